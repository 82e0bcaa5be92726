use std::cmp::Ordering;

use time::OffsetDateTime;

use super::{DASHBOARD_FETCH_LIMIT, DASHBOARD_TOP_N};
use crate::api::OpportunityApi;
use crate::format;
use crate::model::{DealNeedingAttention, Opportunity, OpportunityFilters, OpportunityStats};

/// One line of the stage distribution.
#[derive(Clone, Debug, PartialEq)]
pub struct StageRow {
    pub label: String,
    pub stage_number: Option<u32>,
    pub count: u64,
    pub total_amount: f64,
}

/// Everything the dashboard shows. Sections load and fail independently.
#[derive(Clone, Debug)]
pub struct DashboardView {
    pub stats: Result<OpportunityStats, String>,
    pub recent: Result<Vec<Opportunity>, String>,
    pub largest: Result<Vec<Opportunity>, String>,
    pub attention: Result<Vec<DealNeedingAttention>, String>,
    pub loaded_at: OffsetDateTime,
}

impl DashboardView {
    pub fn load(api: &dyn OpportunityApi) -> Self {
        let stats = api
            .stats()
            .map_err(|e| e.user_message("Failed to load dashboard data"));

        let opportunities = api
            .list_opportunities(&OpportunityFilters::with_limit(DASHBOARD_FETCH_LIMIT))
            .map_err(|e| e.user_message("Failed to load opportunities"));

        let attention = api
            .deals_needing_attention()
            .map_err(|e| e.user_message("Failed to load deals needing attention"));

        if let Err(msg) = &stats {
            tracing::warn!(error = %msg, "dashboard stats unavailable");
        }

        Self {
            stats,
            recent: opportunities
                .as_ref()
                .map(|o| most_recently_synced(o, DASHBOARD_TOP_N))
                .map_err(Clone::clone),
            largest: opportunities
                .as_ref()
                .map(|o| largest_by_delta_arr(o, DASHBOARD_TOP_N))
                .map_err(Clone::clone),
            attention,
            loaded_at: OffsetDateTime::now_utc(),
        }
    }

    pub fn stage_rows(&self) -> Vec<StageRow> {
        match &self.stats {
            Ok(stats) => stage_rows(stats),
            Err(_) => Vec::new(),
        }
    }
}

/// Stage distribution in pipeline order; the unstaged bucket goes last.
pub fn stage_rows(stats: &OpportunityStats) -> Vec<StageRow> {
    let mut rows = stats
        .stage_distribution
        .iter()
        .map(|(key, bucket)| {
            let stage_number = key.parse::<u32>().ok();
            let label = match stage_number {
                Some(n) => format!("Stage {}", n),
                None => "Unstaged".to_string(),
            };
            StageRow {
                label,
                stage_number,
                count: bucket.count,
                total_amount: bucket.total_amount,
            }
        })
        .collect::<Vec<_>>();
    rows.sort_by_key(|r| r.stage_number.unwrap_or(u32::MAX));
    rows
}

/// Newest `sync_timestamp` first. Records never synced sort last.
pub fn most_recently_synced(opps: &[Opportunity], n: usize) -> Vec<Opportunity> {
    let mut keyed = opps
        .iter()
        .map(|o| {
            let ts = o.sync_timestamp.as_deref().and_then(format::parse_timestamp);
            (ts, o)
        })
        .collect::<Vec<_>>();
    keyed.sort_by(|(a, _), (b, _)| b.cmp(a));
    keyed.into_iter().take(n).map(|(_, o)| o.clone()).collect()
}

/// Largest delta ARR first. Missing values count as zero.
pub fn largest_by_delta_arr(opps: &[Opportunity], n: usize) -> Vec<Opportunity> {
    let mut sorted = opps.to_vec();
    sorted.sort_by(|a, b| {
        let a = a.delta_average_arr.unwrap_or(0.0);
        let b = b.delta_average_arr.unwrap_or(0.0);
        b.partial_cmp(&a).unwrap_or(Ordering::Equal)
    });
    sorted.truncate(n);
    sorted
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use crate::api::ApiError;
    use crate::model::StageBucket;
    use crate::tests_support::{Call, FakeBackend, opportunity};

    fn synced(id: &str, ts: Option<&str>) -> Opportunity {
        Opportunity {
            sync_timestamp: ts.map(str::to_string),
            ..opportunity(id, id)
        }
    }

    #[test]
    fn recent_list_orders_by_sync_time() {
        let opps = vec![
            synced("a", Some("2025-01-01T00:00:00Z")),
            synced("b", None),
            synced("c", Some("2025-03-01T00:00:00")),
            synced("d", Some("2025-02-01T00:00:00Z")),
        ];
        let ids = most_recently_synced(&opps, 3)
            .into_iter()
            .map(|o| o.id)
            .collect::<Vec<_>>();
        assert_eq!(ids, vec!["c", "d", "a"]);
    }

    #[test]
    fn largest_list_orders_by_delta_arr() {
        let mut opps = Vec::new();
        for (id, arr) in [("a", Some(10.0)), ("b", None), ("c", Some(500.0))] {
            opps.push(Opportunity {
                delta_average_arr: arr,
                ..opportunity(id, id)
            });
        }
        let ids = largest_by_delta_arr(&opps, 2)
            .into_iter()
            .map(|o| o.id)
            .collect::<Vec<_>>();
        assert_eq!(ids, vec!["c", "a"]);
    }

    #[test]
    fn sections_fail_independently() {
        let api = FakeBackend::with_records(vec![opportunity("1", "Acme")]);
        api.fail_next(ApiError::Application {
            status: 500,
            message: None,
        });
        let view = DashboardView::load(&api);
        assert_eq!(view.stats, Err("Failed to load dashboard data".to_string()));
        assert_eq!(view.recent.as_ref().map(Vec::len), Ok(1));
        assert!(view.attention.is_ok());
        assert_eq!(
            api.calls(),
            vec![
                Call::Stats,
                Call::List(OpportunityFilters::with_limit(100)),
                Call::Attention
            ]
        );
    }

    #[test]
    fn stage_rows_sort_numerically_with_unstaged_last() {
        let mut dist = BTreeMap::new();
        for (key, count) in [("10", 1), ("2", 4), ("unstaged", 2), ("1", 3)] {
            dist.insert(
                key.to_string(),
                StageBucket {
                    count,
                    total_amount: 0.0,
                },
            );
        }
        let view = DashboardView {
            stats: Ok(OpportunityStats {
                stage_distribution: dist,
                ..Default::default()
            }),
            recent: Ok(Vec::new()),
            largest: Ok(Vec::new()),
            attention: Ok(Vec::new()),
            loaded_at: OffsetDateTime::UNIX_EPOCH,
        };
        let labels = view
            .stage_rows()
            .into_iter()
            .map(|r| r.label)
            .collect::<Vec<_>>();
        assert_eq!(labels, vec!["Stage 1", "Stage 2", "Stage 10", "Unstaged"]);
    }
}
