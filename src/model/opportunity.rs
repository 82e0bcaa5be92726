use serde::{Deserialize, Serialize};

/// A sales pipeline record as the backend returns it.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Opportunity {
    pub id: String,
    pub salesforce_id: String,
    pub name: String,

    #[serde(default)]
    pub account_name: Option<String>,
    #[serde(default)]
    pub amount: Option<f64>,
    #[serde(default)]
    pub stage: Option<String>,
    #[serde(default)]
    pub probability: Option<u8>,
    #[serde(default)]
    pub close_date: Option<String>,
    #[serde(default)]
    pub owner_name: Option<String>,
    #[serde(default, rename = "type")]
    pub opportunity_type: Option<String>,
    #[serde(default)]
    pub lead_source: Option<String>,
    #[serde(default)]
    pub campaign: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub forecast_category: Option<String>,
    #[serde(default)]
    pub in_manager_forecast: bool,
    #[serde(default)]
    pub stage_number: Option<u32>,
    #[serde(default)]
    pub stage_name: Option<String>,
    #[serde(default)]
    pub delta_average_arr: Option<f64>,
    #[serde(default)]
    pub services_attached_amount: Option<f64>,
    #[serde(default)]
    pub services_next_steps: Option<String>,

    #[serde(default)]
    pub created_date: Option<String>,
    #[serde(default)]
    pub last_modified: Option<String>,
    #[serde(default)]
    pub sync_timestamp: Option<String>,
}

impl Opportunity {
    /// Builds a record from a create/update payload. Timestamps are left for the caller.
    pub fn from_input(id: String, input: OpportunityInput) -> Self {
        let mut opp = Opportunity {
            id,
            ..Default::default()
        };
        opp.apply(input);
        opp
    }

    /// Overwrites every editable field with the payload (PUT semantics).
    pub fn apply(&mut self, input: OpportunityInput) {
        self.salesforce_id = input.salesforce_id;
        self.name = input.name;
        self.account_name = input.account_name;
        self.amount = input.amount;
        self.stage = input.stage;
        self.probability = input.probability;
        self.close_date = input.close_date;
        self.owner_name = input.owner_name;
        self.opportunity_type = input.opportunity_type;
        self.lead_source = input.lead_source;
        self.campaign = input.campaign;
        self.description = input.description;
        self.forecast_category = input.forecast_category;
        self.in_manager_forecast = input.in_manager_forecast;
        self.stage_number = input.stage_number;
        self.stage_name = input.stage_name;
        self.delta_average_arr = input.delta_average_arr;
        self.services_attached_amount = input.services_attached_amount;
        self.services_next_steps = input.services_next_steps;
    }

    pub fn to_input(&self) -> OpportunityInput {
        OpportunityInput {
            salesforce_id: self.salesforce_id.clone(),
            name: self.name.clone(),
            account_name: self.account_name.clone(),
            amount: self.amount,
            stage: self.stage.clone(),
            probability: self.probability,
            close_date: self.close_date.clone(),
            owner_name: self.owner_name.clone(),
            opportunity_type: self.opportunity_type.clone(),
            lead_source: self.lead_source.clone(),
            campaign: self.campaign.clone(),
            description: self.description.clone(),
            forecast_category: self.forecast_category.clone(),
            in_manager_forecast: self.in_manager_forecast,
            stage_number: self.stage_number,
            stage_name: self.stage_name.clone(),
            delta_average_arr: self.delta_average_arr,
            services_attached_amount: self.services_attached_amount,
            services_next_steps: self.services_next_steps.clone(),
        }
    }
}

/// Create/update payload. Produced by a validated form.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct OpportunityInput {
    pub salesforce_id: String,
    pub name: String,
    #[serde(default)]
    pub account_name: Option<String>,
    #[serde(default)]
    pub amount: Option<f64>,
    #[serde(default)]
    pub stage: Option<String>,
    #[serde(default)]
    pub probability: Option<u8>,
    #[serde(default)]
    pub close_date: Option<String>,
    #[serde(default)]
    pub owner_name: Option<String>,
    #[serde(default, rename = "type")]
    pub opportunity_type: Option<String>,
    #[serde(default)]
    pub lead_source: Option<String>,
    #[serde(default)]
    pub campaign: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub forecast_category: Option<String>,
    #[serde(default)]
    pub in_manager_forecast: bool,
    #[serde(default)]
    pub stage_number: Option<u32>,
    #[serde(default)]
    pub stage_name: Option<String>,
    #[serde(default)]
    pub delta_average_arr: Option<f64>,
    #[serde(default)]
    pub services_attached_amount: Option<f64>,
    #[serde(default)]
    pub services_next_steps: Option<String>,
}

/// Row of `GET /deals-needing-attention`: the record plus the reasons it was flagged.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DealNeedingAttention {
    #[serde(flatten)]
    pub opportunity: Opportunity,

    #[serde(default)]
    pub tags: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opportunity_parses_sparse_backend_payload() {
        let raw = r#"{
            "id": "5d0c",
            "salesforce_id": "006A",
            "name": "Expansion",
            "type": "Renewal",
            "stage_number": 3,
            "delta_average_arr": 125000.5,
            "unknown_column": "ignored"
        }"#;
        let opp: Opportunity = serde_json::from_str(raw).expect("parse");
        assert_eq!(opp.id, "5d0c");
        assert_eq!(opp.opportunity_type.as_deref(), Some("Renewal"));
        assert_eq!(opp.stage_number, Some(3));
        assert_eq!(opp.delta_average_arr, Some(125000.5));
        assert!(opp.account_name.is_none());
        assert!(!opp.in_manager_forecast);
    }

    #[test]
    fn input_serializes_type_under_wire_name() {
        let input = OpportunityInput {
            salesforce_id: "006A".to_string(),
            name: "Expansion".to_string(),
            opportunity_type: Some("New Business".to_string()),
            ..Default::default()
        };
        let v = serde_json::to_value(&input).expect("serialize");
        assert_eq!(v["type"], "New Business");
        assert!(v.get("opportunity_type").is_none());
    }

    #[test]
    fn deal_needing_attention_flattens_record_fields() {
        let raw = r#"{"id":"a","salesforce_id":"s","name":"n","tags":["Needs notes"]}"#;
        let deal: DealNeedingAttention = serde_json::from_str(raw).expect("parse");
        assert_eq!(deal.opportunity.name, "n");
        assert_eq!(deal.tags, vec!["Needs notes".to_string()]);
    }
}
