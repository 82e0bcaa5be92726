use crate::api::{ApiError, OpportunityApi};
use crate::format::{self, Tone};
use crate::model::Opportunity;

#[derive(Clone, Debug, PartialEq)]
pub struct DetailRow {
    pub label: &'static str,
    pub value: String,
    pub tone: Option<Tone>,
}

impl DetailRow {
    fn plain(label: &'static str, value: String) -> Self {
        Self {
            label,
            value,
            tone: None,
        }
    }

    fn toned(label: &'static str, value: String, tone: Tone) -> Self {
        Self {
            label,
            value,
            tone: Some(tone),
        }
    }
}

/// Read-only view of one record, as handed over by the navigator.
#[derive(Clone, Debug)]
pub struct DetailView {
    record: Opportunity,
    error: Option<String>,
}

impl DetailView {
    pub fn new(record: Opportunity) -> Self {
        Self {
            record,
            error: None,
        }
    }

    pub fn record(&self) -> &Opportunity {
        &self.record
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Refetches the record by id. The shown copy is kept when that fails.
    pub fn refresh(&mut self, api: &dyn OpportunityApi) {
        match api.get_opportunity(&self.record.id) {
            Ok(record) => {
                self.record = record;
                self.error = None;
            }
            Err(err @ ApiError::NotFound { .. }) => {
                self.error = Some(err.user_message("Opportunity not found"));
            }
            Err(err) => {
                self.error = Some(err.user_message("Failed to load opportunity"));
            }
        }
    }

    pub fn key_metrics(&self) -> Vec<DetailRow> {
        let r = &self.record;
        vec![
            DetailRow::plain("Amount", format::currency(r.amount)),
            DetailRow::plain("Delta ARR", format::currency(r.delta_average_arr)),
            DetailRow::plain(
                "Services",
                format::currency(r.services_attached_amount),
            ),
            DetailRow::toned(
                "Probability",
                format::probability(r.probability),
                format::probability_tone(r.probability),
            ),
        ]
    }

    pub fn fields(&self) -> Vec<DetailRow> {
        let r = &self.record;
        let stage_number = match r.stage_number {
            Some(n) => format!("Stage {}", n),
            None => "N/A".to_string(),
        };
        vec![
            DetailRow::plain("Salesforce ID", r.salesforce_id.clone()),
            DetailRow::plain("Account", format::text(r.account_name.as_deref())),
            DetailRow::plain("Owner", format::text(r.owner_name.as_deref())),
            DetailRow::toned(
                "Stage",
                format::text(r.stage.as_deref()),
                format::stage_name_tone(r.stage.as_deref()),
            ),
            DetailRow::toned(
                "Stage number",
                stage_number,
                format::stage_tone(r.stage_number),
            ),
            DetailRow::plain("Stage name", format::text(r.stage_name.as_deref())),
            DetailRow::plain("Close date", format::date(r.close_date.as_deref())),
            DetailRow::plain("Type", format::text(r.opportunity_type.as_deref())),
            DetailRow::plain("Lead source", format::text(r.lead_source.as_deref())),
            DetailRow::plain("Campaign", format::text(r.campaign.as_deref())),
            DetailRow::plain(
                "Forecast category",
                format::text(r.forecast_category.as_deref()),
            ),
            DetailRow::plain(
                "Manager forecast",
                if r.in_manager_forecast { "Yes" } else { "No" }.to_string(),
            ),
            DetailRow::plain(
                "Services next steps",
                format::text(r.services_next_steps.as_deref()),
            ),
        ]
    }

    pub fn description(&self) -> String {
        format::text(self.record.description.as_deref())
    }

    pub fn timestamps(&self) -> Vec<DetailRow> {
        let r = &self.record;
        vec![
            DetailRow::plain("Created", format::datetime(r.created_date.as_deref())),
            DetailRow::plain("Last modified", format::datetime(r.last_modified.as_deref())),
            DetailRow::plain("Last synced", format::datetime(r.sync_timestamp.as_deref())),
        ]
    }
}
