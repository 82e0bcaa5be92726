use time::OffsetDateTime;

use super::*;

pub(super) const DEFAULT_LIMIT: u32 = 100;
pub(super) const MAX_LIMIT: u32 = 1000;

const ATTENTION_MIN_ARR: f64 = 100_000.0;
const LATE_STAGE: u32 = 3;
const RECENT_DAYS: i64 = 30;

pub(super) fn format_ts(at: OffsetDateTime) -> String {
    at.format(&time::format_description::well_known::Rfc3339)
        .unwrap_or_else(|_| "<time>".to_string())
}

pub(super) fn generate_id() -> Result<String> {
    let mut bytes = [0u8; 16];
    getrandom::getrandom(&mut bytes).map_err(|e| anyhow::anyhow!("getrandom: {:?}", e))?;
    let mut out = String::with_capacity(32);
    for b in &bytes {
        out.push_str(&format!("{:02x}", b));
    }
    Ok(out)
}

#[derive(Debug, PartialEq)]
pub(super) enum StoreError {
    NotFound,
    DuplicateSalesforceId(String),
}

/// Opportunities in insertion order.
#[derive(Default)]
pub(super) struct Store {
    records: Vec<Opportunity>,
}

impl Store {
    pub(super) fn new(records: Vec<Opportunity>) -> Self {
        Self { records }
    }

    pub(super) fn len(&self) -> usize {
        self.records.len()
    }

    pub(super) fn list(&self, filters: &OpportunityFilters) -> Vec<Opportunity> {
        let stage = filters.stage.as_deref().filter(|s| !s.is_empty());
        let account = filters
            .account_name
            .as_deref()
            .filter(|s| !s.is_empty())
            .map(str::to_lowercase);
        // Zero bounds are treated as unset.
        let min = filters.min_amount.filter(|v| *v != 0.0);
        let max = filters.max_amount.filter(|v| *v != 0.0);

        self.records
            .iter()
            .filter(|o| match stage {
                Some(s) => o.stage_number.is_some_and(|n| n.to_string().contains(s)),
                None => true,
            })
            .filter(|o| match &account {
                Some(a) => o
                    .account_name
                    .as_deref()
                    .is_some_and(|name| name.to_lowercase().contains(a.as_str())),
                None => true,
            })
            .filter(|o| match min {
                Some(m) => o.delta_average_arr.is_some_and(|v| v >= m),
                None => true,
            })
            .filter(|o| match max {
                Some(m) => o.delta_average_arr.is_some_and(|v| v <= m),
                None => true,
            })
            .skip(filters.skip.unwrap_or(0) as usize)
            .take(filters.limit.unwrap_or(DEFAULT_LIMIT) as usize)
            .cloned()
            .collect()
    }

    pub(super) fn get(&self, id: &str) -> Option<&Opportunity> {
        self.records.iter().find(|o| o.id == id)
    }

    pub(super) fn create(
        &mut self,
        id: String,
        input: OpportunityInput,
        now: OffsetDateTime,
    ) -> Result<Opportunity, StoreError> {
        if self.position_by_salesforce_id(&input.salesforce_id).is_some() {
            return Err(StoreError::DuplicateSalesforceId(input.salesforce_id));
        }
        let ts = format_ts(now);
        let mut record = Opportunity::from_input(id, input);
        record.created_date = Some(ts.clone());
        record.last_modified = Some(ts);
        self.records.push(record.clone());
        Ok(record)
    }

    pub(super) fn update(
        &mut self,
        id: &str,
        input: OpportunityInput,
        now: OffsetDateTime,
    ) -> Result<Opportunity, StoreError> {
        let idx = self
            .records
            .iter()
            .position(|o| o.id == id)
            .ok_or(StoreError::NotFound)?;
        if let Some(other) = self.position_by_salesforce_id(&input.salesforce_id)
            && other != idx
        {
            return Err(StoreError::DuplicateSalesforceId(input.salesforce_id));
        }
        let record = &mut self.records[idx];
        record.apply(input);
        record.last_modified = Some(format_ts(now));
        Ok(record.clone())
    }

    pub(super) fn delete(&mut self, id: &str) -> bool {
        let before = self.records.len();
        self.records.retain(|o| o.id != id);
        self.records.len() != before
    }

    /// Inserts or overwrites by `salesforce_id`, stamping `sync_timestamp`.
    pub(super) fn upsert_synced(
        &mut self,
        rows: Vec<OpportunityInput>,
        now: OffsetDateTime,
        mut new_id: impl FnMut() -> Result<String>,
    ) -> Result<usize> {
        let ts = format_ts(now);
        let mut count = 0;
        for input in rows {
            match self.position_by_salesforce_id(&input.salesforce_id) {
                Some(idx) => {
                    let record = &mut self.records[idx];
                    record.apply(input);
                    record.last_modified = Some(ts.clone());
                    record.sync_timestamp = Some(ts.clone());
                }
                None => {
                    let mut record = Opportunity::from_input(new_id()?, input);
                    record.created_date = Some(ts.clone());
                    record.last_modified = Some(ts.clone());
                    record.sync_timestamp = Some(ts.clone());
                    self.records.push(record);
                }
            }
            count += 1;
        }
        Ok(count)
    }

    pub(super) fn stats(&self, now: OffsetDateTime) -> OpportunityStats {
        let mut stats = OpportunityStats {
            total_opportunities: self.records.len() as u64,
            ..Default::default()
        };

        let recent_cutoff = now - time::Duration::days(RECENT_DAYS);
        let mut late_count = 0u64;
        let mut late_with_services = 0u64;
        let mut late_services = 0.0;
        let mut late_arr = 0.0;

        for o in &self.records {
            let arr = o.delta_average_arr.unwrap_or(0.0);
            let services = o.services_attached_amount.unwrap_or(0.0);
            stats.total_amount += arr;
            if services > 0.0 {
                stats.total_opportunities_with_services += 1;
                stats.total_services_amount += services;
            }

            let key = o
                .stage_number
                .map(|n| n.to_string())
                .unwrap_or_else(|| "unstaged".to_string());
            let bucket = stats.stage_distribution.entry(key).or_default();
            bucket.count += 1;
            bucket.total_amount += arr;

            if o
                .sync_timestamp
                .as_deref()
                .and_then(oppdesk::format::parse_timestamp)
                .is_some_and(|ts| ts >= recent_cutoff)
            {
                stats.recent_opportunities += 1;
            }

            if o.stage_number.is_some_and(|n| n >= LATE_STAGE) {
                late_count += 1;
                late_arr += arr;
                late_services += services;
                if services > 0.0 {
                    late_with_services += 1;
                }
            }
        }

        if late_count > 0 {
            stats.services_logo_attach_rate = late_with_services as f64 / late_count as f64 * 100.0;
        }
        if late_arr > 0.0 {
            stats.services_dollar_attach_rate = late_services / late_arr * 100.0;
        }
        stats
    }

    /// Late-stage, high-ARR deals missing next-step notes or attached services.
    pub(super) fn needing_attention(&self) -> Vec<DealNeedingAttention> {
        self.records
            .iter()
            .filter(|o| o.delta_average_arr.is_some_and(|v| v >= ATTENTION_MIN_ARR))
            .filter(|o| o.stage_number.is_some_and(|n| n >= LATE_STAGE))
            .filter_map(|o| {
                let mut tags = Vec::new();
                if o
                    .services_next_steps
                    .as_deref()
                    .is_none_or(|s| s.trim().is_empty())
                {
                    tags.push("Needs notes".to_string());
                }
                if o.services_attached_amount.is_none_or(|v| v <= 0.0) {
                    tags.push("Needs services".to_string());
                }
                (!tags.is_empty()).then(|| DealNeedingAttention {
                    opportunity: o.clone(),
                    tags,
                })
            })
            .collect()
    }

    fn position_by_salesforce_id(&self, salesforce_id: &str) -> Option<usize> {
        self.records
            .iter()
            .position(|o| o.salesforce_id == salesforce_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(sfid: &str, name: &str) -> OpportunityInput {
        OpportunityInput {
            salesforce_id: sfid.to_string(),
            name: name.to_string(),
            ..Default::default()
        }
    }

    fn seeded() -> Store {
        let mut store = Store::default();
        let now = OffsetDateTime::UNIX_EPOCH;
        for (i, (account, stage, arr)) in [
            ("Acme Corp", 1, 50_000.0),
            ("acme labs", 3, 150_000.0),
            ("Globex", 4, 250_000.0),
        ]
        .into_iter()
        .enumerate()
        {
            let mut row = input(&format!("SF-{}", i), &format!("Deal {}", i));
            row.account_name = Some(account.to_string());
            row.stage_number = Some(stage);
            row.delta_average_arr = Some(arr);
            store
                .create(format!("id-{}", i), row, now)
                .expect("create");
        }
        store
    }

    #[test]
    fn list_filters_by_account_case_insensitively() {
        let store = seeded();
        let filters = OpportunityFilters {
            account_name: Some("ACME".to_string()),
            ..Default::default()
        };
        let ids = store
            .list(&filters)
            .into_iter()
            .map(|o| o.id)
            .collect::<Vec<_>>();
        assert_eq!(ids, vec!["id-0", "id-1"]);
    }

    #[test]
    fn list_applies_amount_bounds_and_paging() {
        let store = seeded();
        let filters = OpportunityFilters {
            min_amount: Some(100_000.0),
            skip: Some(1),
            limit: Some(5),
            ..Default::default()
        };
        let ids = store
            .list(&filters)
            .into_iter()
            .map(|o| o.id)
            .collect::<Vec<_>>();
        assert_eq!(ids, vec!["id-2"]);
    }

    #[test]
    fn create_rejects_duplicate_salesforce_id() {
        let mut store = seeded();
        let err = store
            .create("x".to_string(), input("SF-1", "Dup"), OffsetDateTime::UNIX_EPOCH)
            .unwrap_err();
        assert_eq!(err, StoreError::DuplicateSalesforceId("SF-1".to_string()));
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn update_missing_record_is_not_found() {
        let mut store = seeded();
        let err = store
            .update("nope", input("SF-9", "x"), OffsetDateTime::UNIX_EPOCH)
            .unwrap_err();
        assert_eq!(err, StoreError::NotFound);
    }

    #[test]
    fn attention_tags_late_stage_large_deals() {
        let store = seeded();
        let deals = store.needing_attention();
        assert_eq!(deals.len(), 2);
        assert_eq!(deals[0].opportunity.id, "id-1");
        assert_eq!(deals[0].tags, vec!["Needs notes", "Needs services"]);
    }

    #[test]
    fn stats_bucket_by_stage_and_compute_attach_rates() {
        let mut store = seeded();
        let mut row = store.get("id-2").expect("id-2").to_input();
        row.services_attached_amount = Some(40_000.0);
        store
            .update("id-2", row, OffsetDateTime::UNIX_EPOCH)
            .expect("update");

        let stats = store.stats(OffsetDateTime::UNIX_EPOCH);
        assert_eq!(stats.total_opportunities, 3);
        assert_eq!(stats.total_opportunities_with_services, 1);
        assert_eq!(stats.stage_distribution["3"].count, 1);
        assert_eq!(stats.services_logo_attach_rate, 50.0);
        assert!((stats.services_dollar_attach_rate - 10.0).abs() < 1e-9);
    }

    #[test]
    fn sync_upserts_by_salesforce_id() {
        let mut store = seeded();
        let mut next = 0;
        let count = store
            .upsert_synced(
                vec![input("SF-0", "Renamed"), input("SF-NEW", "Fresh")],
                OffsetDateTime::UNIX_EPOCH,
                || {
                    next += 1;
                    Ok(format!("new-{}", next))
                },
            )
            .expect("upsert");
        assert_eq!(count, 2);
        assert_eq!(store.len(), 4);
        let renamed = store.get("id-0").expect("id-0");
        assert_eq!(renamed.name, "Renamed");
        assert!(renamed.sync_timestamp.is_some());
        assert_eq!(store.get("new-1").map(|o| o.name.as_str()), Some("Fresh"));
    }
}
