use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct StageBucket {
    pub count: u64,
    pub total_amount: f64,
}

/// Aggregates behind the dashboard. Computed server-side.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct OpportunityStats {
    pub total_opportunities: u64,
    #[serde(default)]
    pub total_opportunities_with_services: u64,
    pub total_amount: f64,
    #[serde(default)]
    pub total_services_amount: f64,

    /// Keyed by stage number rendered as a string; "unstaged" for records without one.
    #[serde(default)]
    pub stage_distribution: BTreeMap<String, StageBucket>,

    /// Records synced within the last 30 days.
    #[serde(default)]
    pub recent_opportunities: u64,

    /// Percent of stage 3+ opportunities that carry a services amount.
    #[serde(default)]
    pub services_logo_attach_rate: f64,
    /// Stage 3+ services amount as a percent of stage 3+ delta ARR.
    #[serde(default)]
    pub services_dollar_attach_rate: f64,
}
