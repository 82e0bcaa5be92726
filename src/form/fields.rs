use std::collections::BTreeMap;

use crate::format;
use crate::model::Opportunity;

const TYPES: &[&str] = &["New Business", "Existing Business", "Renewal"];
const LEAD_SOURCES: &[&str] = &[
    "Web",
    "Phone",
    "Email",
    "Conference",
    "Trade Show",
    "Referral",
];
const FORECAST_CATEGORIES: &[&str] = &["Pipeline", "Forecast", "Commit", "Closed", "Omitted"];

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    SalesforceId,
    Name,
    AccountName,
    Amount,
    Probability,
    Stage,
    CloseDate,
    OwnerName,
    Type,
    LeadSource,
    ForecastCategory,
    Campaign,
    Description,
    InManagerForecast,
    StageNumber,
    StageName,
    DeltaAverageArr,
    ServicesAttachedAmount,
    ServicesNextSteps,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FieldKind {
    Text,
    /// Free text with suggested values the editor can cycle through.
    Choice(&'static [&'static str]),
    Number,
    Integer { min: Option<i64>, max: Option<i64> },
    Date,
    Flag,
}

#[derive(Clone, Copy, Debug)]
pub struct FieldSpec {
    pub field: Field,
    /// Wire name, also accepted by `--set key=value`.
    pub key: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub required: bool,
}

impl Field {
    pub const ALL: [Field; 19] = [
        Field::SalesforceId,
        Field::Name,
        Field::AccountName,
        Field::Amount,
        Field::Probability,
        Field::Stage,
        Field::CloseDate,
        Field::OwnerName,
        Field::Type,
        Field::LeadSource,
        Field::ForecastCategory,
        Field::Campaign,
        Field::Description,
        Field::InManagerForecast,
        Field::StageNumber,
        Field::StageName,
        Field::DeltaAverageArr,
        Field::ServicesAttachedAmount,
        Field::ServicesNextSteps,
    ];

    pub fn spec(self) -> FieldSpec {
        let (key, label, kind, required) = match self {
            Field::SalesforceId => ("salesforce_id", "Salesforce ID", FieldKind::Text, true),
            Field::Name => ("name", "Opportunity name", FieldKind::Text, true),
            Field::AccountName => ("account_name", "Account name", FieldKind::Text, false),
            Field::Amount => ("amount", "Amount", FieldKind::Number, false),
            Field::Probability => (
                "probability",
                "Probability",
                FieldKind::Integer {
                    min: Some(0),
                    max: Some(100),
                },
                false,
            ),
            Field::Stage => (
                "stage",
                "Stage",
                FieldKind::Choice(format::stage_names()),
                false,
            ),
            Field::CloseDate => ("close_date", "Close date", FieldKind::Date, false),
            Field::OwnerName => ("owner_name", "Owner name", FieldKind::Text, false),
            Field::Type => ("type", "Type", FieldKind::Choice(TYPES), false),
            Field::LeadSource => (
                "lead_source",
                "Lead source",
                FieldKind::Choice(LEAD_SOURCES),
                false,
            ),
            Field::ForecastCategory => (
                "forecast_category",
                "Forecast category",
                FieldKind::Choice(FORECAST_CATEGORIES),
                false,
            ),
            Field::Campaign => ("campaign", "Campaign", FieldKind::Text, false),
            Field::Description => ("description", "Description", FieldKind::Text, false),
            Field::InManagerForecast => (
                "in_manager_forecast",
                "In manager forecast",
                FieldKind::Flag,
                false,
            ),
            Field::StageNumber => (
                "stage_number",
                "Stage number",
                FieldKind::Integer {
                    min: Some(1),
                    max: None,
                },
                false,
            ),
            Field::StageName => ("stage_name", "Stage name", FieldKind::Text, false),
            Field::DeltaAverageArr => (
                "delta_average_arr",
                "Delta average ARR",
                FieldKind::Number,
                false,
            ),
            Field::ServicesAttachedAmount => (
                "services_attached_amount",
                "Services attached amount",
                FieldKind::Number,
                false,
            ),
            Field::ServicesNextSteps => (
                "services_next_steps",
                "Services next steps",
                FieldKind::Text,
                false,
            ),
        };
        FieldSpec {
            field: self,
            key,
            label,
            kind,
            required,
        }
    }

    pub fn label(self) -> &'static str {
        self.spec().label
    }

    pub fn key(self) -> &'static str {
        self.spec().key
    }

    pub fn from_key(key: &str) -> Option<Field> {
        let key = key.trim();
        Field::ALL.into_iter().find(|f| f.key() == key)
    }
}

/// Raw, unvalidated form contents keyed by field. Flags hold `"true"`/`"false"`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FormValues {
    values: BTreeMap<Field, String>,
}

impl FormValues {
    pub fn get(&self, field: Field) -> &str {
        self.values.get(&field).map(String::as_str).unwrap_or("")
    }

    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        self.values.insert(field, value.into());
    }

    pub fn flag(&self, field: Field) -> bool {
        parse_flag(self.get(field)).unwrap_or(false)
    }

    /// Prefills every field from an existing record (edit mode).
    pub fn from_opportunity(opp: &Opportunity) -> Self {
        fn num(v: Option<f64>) -> String {
            v.map(|n| n.to_string()).unwrap_or_default()
        }
        fn txt(v: &Option<String>) -> String {
            v.clone().unwrap_or_default()
        }

        let mut out = FormValues::default();
        out.set(Field::SalesforceId, opp.salesforce_id.clone());
        out.set(Field::Name, opp.name.clone());
        out.set(Field::AccountName, txt(&opp.account_name));
        out.set(Field::Amount, num(opp.amount));
        out.set(
            Field::Probability,
            opp.probability.map(|p| p.to_string()).unwrap_or_default(),
        );
        out.set(Field::Stage, txt(&opp.stage));
        out.set(Field::CloseDate, txt(&opp.close_date));
        out.set(Field::OwnerName, txt(&opp.owner_name));
        out.set(Field::Type, txt(&opp.opportunity_type));
        out.set(Field::LeadSource, txt(&opp.lead_source));
        out.set(Field::ForecastCategory, txt(&opp.forecast_category));
        out.set(Field::Campaign, txt(&opp.campaign));
        out.set(Field::Description, txt(&opp.description));
        out.set(Field::InManagerForecast, opp.in_manager_forecast.to_string());
        out.set(
            Field::StageNumber,
            opp.stage_number.map(|n| n.to_string()).unwrap_or_default(),
        );
        out.set(Field::StageName, txt(&opp.stage_name));
        out.set(Field::DeltaAverageArr, num(opp.delta_average_arr));
        out.set(
            Field::ServicesAttachedAmount,
            num(opp.services_attached_amount),
        );
        out.set(Field::ServicesNextSteps, txt(&opp.services_next_steps));
        out
    }
}

pub(super) fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "" | "false" | "no" | "n" | "0" => Some(false),
        "true" | "yes" | "y" | "1" => Some(true),
        _ => None,
    }
}
