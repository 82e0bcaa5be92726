use std::collections::BTreeMap;

use super::fields::{Field, FieldKind, FormValues, parse_flag};
use crate::format;
use crate::model::OpportunityInput;

/// Field-level messages, at most one per field. Empty means the form may be submitted.
pub type FieldErrors = BTreeMap<Field, String>;

/// Checks every field and reports the first failing rule for each.
///
/// Blank optional fields are always valid; surrounding whitespace is ignored.
pub fn validate(values: &FormValues) -> FieldErrors {
    let mut errors = FieldErrors::new();
    for field in Field::ALL {
        if let Some(msg) = check_field(field, values.get(field)) {
            errors.insert(field, msg);
        }
    }
    errors
}

fn check_field(field: Field, raw: &str) -> Option<String> {
    let spec = field.spec();
    let value = raw.trim();
    if value.is_empty() {
        return spec
            .required
            .then(|| format!("{} is required", spec.label));
    }

    match spec.kind {
        FieldKind::Text | FieldKind::Choice(_) => None,
        FieldKind::Number => format::parse_amount(value)
            .is_none()
            .then(|| format!("{} must be a valid number", spec.label)),
        FieldKind::Integer { min, max } => {
            let Some(n) = format::parse_amount(value) else {
                return Some(format!("{} must be a valid number", spec.label));
            };
            if n.fract() != 0.0 {
                return Some(format!("{} must be a whole number", spec.label));
            }
            if n > f64::from(u32::MAX) {
                return Some(format!("{} must be a valid number", spec.label));
            }
            let n = n as i64;
            match (min, max) {
                (Some(lo), Some(hi)) if n < lo || n > hi => Some(format!(
                    "{} must be between {} and {}",
                    spec.label, lo, hi
                )),
                (Some(lo), None) if n < lo => {
                    Some(format!("{} must be at least {}", spec.label, lo))
                }
                (None, Some(hi)) if n > hi => {
                    Some(format!("{} must be at most {}", spec.label, hi))
                }
                _ => None,
            }
        }
        FieldKind::Date => format::parse_date(value)
            .is_none()
            .then(|| format!("{} must be a date (YYYY-MM-DD)", spec.label)),
        FieldKind::Flag => parse_flag(value)
            .is_none()
            .then(|| format!("{} must be yes or no", spec.label)),
    }
}

/// Converts a validated whole-number field to its wire width. A value that
/// does not fit becomes a field error rather than a truncated number.
fn whole<T: TryFrom<i64>>(
    values: &FormValues,
    field: Field,
    errors: &mut FieldErrors,
) -> Option<T> {
    let n = format::parse_amount(values.get(field).trim())?;
    match T::try_from(n as i64) {
        Ok(v) => Some(v),
        Err(_) => {
            errors.insert(field, format!("{} must be a valid number", field.spec().label));
            None
        }
    }
}

/// Validates and converts to a request payload. Blank optional fields become `None`.
pub fn to_input(values: &FormValues) -> Result<OpportunityInput, FieldErrors> {
    let mut errors = validate(values);
    if !errors.is_empty() {
        return Err(errors);
    }
    let probability = whole::<u8>(values, Field::Probability, &mut errors);
    let stage_number = whole::<u32>(values, Field::StageNumber, &mut errors);
    if !errors.is_empty() {
        return Err(errors);
    }

    let text = |f: Field| {
        let v = values.get(f).trim();
        (!v.is_empty()).then(|| v.to_string())
    };
    let number = |f: Field| format::parse_amount(values.get(f).trim());

    Ok(OpportunityInput {
        salesforce_id: values.get(Field::SalesforceId).trim().to_string(),
        name: values.get(Field::Name).trim().to_string(),
        account_name: text(Field::AccountName),
        amount: number(Field::Amount),
        stage: text(Field::Stage),
        probability,
        close_date: text(Field::CloseDate),
        owner_name: text(Field::OwnerName),
        opportunity_type: text(Field::Type),
        lead_source: text(Field::LeadSource),
        campaign: text(Field::Campaign),
        description: text(Field::Description),
        forecast_category: text(Field::ForecastCategory),
        in_manager_forecast: values.flag(Field::InManagerForecast),
        stage_number,
        stage_name: text(Field::StageName),
        delta_average_arr: number(Field::DeltaAverageArr),
        services_attached_amount: number(Field::ServicesAttachedAmount),
        services_next_steps: text(Field::ServicesNextSteps),
    })
}
