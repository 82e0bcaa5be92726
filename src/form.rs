//! The create/edit form: field definitions, validation and the editing state
//! behind the form screen.

use crate::model::{Opportunity, OpportunityInput};

mod fields;
mod validate;

pub use self::fields::{Field, FieldKind, FieldSpec, FormValues};
pub use self::validate::{FieldErrors, to_input, validate};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit,
}

/// Editing state of one form session. Created fresh every time the form screen mounts.
#[derive(Clone, Debug)]
pub struct OpportunityForm {
    mode: FormMode,
    values: FormValues,
    errors: FieldErrors,
    submit_error: Option<String>,
    focus: usize,
}

impl OpportunityForm {
    pub fn create() -> Self {
        Self::with_values(FormMode::Create, FormValues::default())
    }

    pub fn edit(record: &Opportunity) -> Self {
        Self::with_values(FormMode::Edit, FormValues::from_opportunity(record))
    }

    /// Edit mode when a record is present, create mode otherwise.
    pub fn for_record(record: Option<&Opportunity>) -> Self {
        match record {
            Some(r) => Self::edit(r),
            None => Self::create(),
        }
    }

    fn with_values(mode: FormMode, values: FormValues) -> Self {
        Self {
            mode,
            values,
            errors: FieldErrors::new(),
            submit_error: None,
            focus: 0,
        }
    }

    pub fn mode(&self) -> FormMode {
        self.mode
    }

    pub fn title(&self) -> &'static str {
        match self.mode {
            FormMode::Create => "New Opportunity",
            FormMode::Edit => "Edit Opportunity",
        }
    }

    pub fn values(&self) -> &FormValues {
        &self.values
    }

    pub fn value(&self, field: Field) -> &str {
        self.values.get(field)
    }

    pub fn error(&self, field: Field) -> Option<&str> {
        self.errors.get(&field).map(String::as_str)
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn submit_error(&self) -> Option<&str> {
        self.submit_error.as_deref()
    }

    /// The record's identity cannot change once it exists.
    pub fn is_read_only(&self, field: Field) -> bool {
        self.mode == FormMode::Edit && field == Field::SalesforceId
    }

    pub fn focused(&self) -> Field {
        Field::ALL[self.focus.min(Field::ALL.len() - 1)]
    }

    pub fn focus(&mut self, field: Field) {
        if let Some(i) = Field::ALL.iter().position(|f| *f == field) {
            self.focus = i;
        }
    }

    pub fn focus_next(&mut self) {
        self.focus = (self.focus + 1) % Field::ALL.len();
    }

    pub fn focus_prev(&mut self) {
        self.focus = (self.focus + Field::ALL.len() - 1) % Field::ALL.len();
    }

    /// Replaces a field's text and clears its stale error. Ignored for read-only fields.
    pub fn set(&mut self, field: Field, value: impl Into<String>) -> bool {
        if self.is_read_only(field) {
            return false;
        }
        self.values.set(field, value);
        self.errors.remove(&field);
        true
    }

    /// Applies a `key=value` assignment (CLI `--set`).
    pub fn assign(&mut self, assignment: &str) -> anyhow::Result<()> {
        let Some((key, value)) = assignment.split_once('=') else {
            anyhow::bail!("expected key=value, got '{}'", assignment);
        };
        let Some(field) = Field::from_key(key) else {
            let known = Field::ALL
                .iter()
                .map(|f| f.key())
                .collect::<Vec<_>>()
                .join(", ");
            anyhow::bail!("unknown field '{}' (known: {})", key.trim(), known);
        };
        if !self.set(field, value) {
            anyhow::bail!("{} cannot be changed on an existing opportunity", field.label());
        }
        Ok(())
    }

    pub fn toggle_flag(&mut self, field: Field) {
        if field.spec().kind == FieldKind::Flag {
            let next = !self.values.flag(field);
            self.set(field, next.to_string());
        }
    }

    /// Steps a choice field through its suggested values. Free text falls back to the first.
    pub fn cycle_choice(&mut self, field: Field, forward: bool) {
        let FieldKind::Choice(options) = field.spec().kind else {
            return;
        };
        if options.is_empty() {
            return;
        }
        let current = self.values.get(field);
        let next = match options.iter().position(|o| *o == current) {
            Some(i) if forward => (i + 1) % options.len(),
            Some(i) => (i + options.len() - 1) % options.len(),
            None if forward => 0,
            None => options.len() - 1,
        };
        self.set(field, options[next]);
    }

    /// Runs validation. Returns the payload when the form is clean; otherwise the
    /// errors are kept for display and nothing should be sent.
    pub fn prepare_submit(&mut self) -> Option<OpportunityInput> {
        self.submit_error = None;
        match to_input(&self.values) {
            Ok(input) => {
                self.errors.clear();
                Some(input)
            }
            Err(errors) => {
                if let Some(first) = errors.keys().next().copied() {
                    self.focus(first);
                }
                self.errors = errors;
                None
            }
        }
    }

    pub fn submit_failed(&mut self, message: impl Into<String>) {
        self.submit_error = Some(message.into());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> Opportunity {
        Opportunity {
            id: "rec-1".to_string(),
            salesforce_id: "006A".to_string(),
            name: "Acme".to_string(),
            probability: Some(40),
            ..Default::default()
        }
    }

    #[test]
    fn edit_mode_prefills_and_locks_salesforce_id() {
        let mut form = OpportunityForm::for_record(Some(&record()));
        assert_eq!(form.mode(), FormMode::Edit);
        assert_eq!(form.value(Field::Probability), "40");
        assert!(!form.set(Field::SalesforceId, "other"));
        assert_eq!(form.value(Field::SalesforceId), "006A");
        assert!(form.assign("salesforce_id=other").is_err());
    }

    #[test]
    fn invalid_submit_keeps_errors_and_focuses_first() {
        let mut form = OpportunityForm::create();
        form.focus(Field::Description);
        assert!(form.prepare_submit().is_none());
        assert_eq!(form.error(Field::SalesforceId), Some("Salesforce ID is required"));
        assert_eq!(form.focused(), Field::SalesforceId);

        form.set(Field::SalesforceId, "006B");
        assert!(form.error(Field::SalesforceId).is_none());
        form.set(Field::Name, "Beta");
        let input = form.prepare_submit().expect("valid");
        assert_eq!(input.name, "Beta");
        assert!(form.errors().is_empty());
    }

    #[test]
    fn assign_parses_key_value_pairs() {
        let mut form = OpportunityForm::create();
        form.assign("name=Gamma deal").expect("name");
        form.assign("type=Renewal").expect("type");
        assert_eq!(form.value(Field::Name), "Gamma deal");
        assert_eq!(form.value(Field::Type), "Renewal");
        assert!(form.assign("nonsense").is_err());
        assert!(form.assign("colour=red").is_err());
    }

    #[test]
    fn choices_cycle_and_flags_toggle() {
        let mut form = OpportunityForm::create();
        form.cycle_choice(Field::Type, true);
        assert_eq!(form.value(Field::Type), "New Business");
        form.cycle_choice(Field::Type, false);
        assert_eq!(form.value(Field::Type), "Renewal");
        form.cycle_choice(Field::Name, true);
        assert_eq!(form.value(Field::Name), "");

        form.toggle_flag(Field::InManagerForecast);
        assert!(form.values().flag(Field::InManagerForecast));
        form.toggle_flag(Field::InManagerForecast);
        assert!(!form.values().flag(Field::InManagerForecast));
    }

    #[test]
    fn submit_error_is_cleared_on_retry() {
        let mut form = OpportunityForm::edit(&record());
        form.submit_failed("duplicate salesforce_id");
        assert_eq!(form.submit_error(), Some("duplicate salesforce_id"));
        assert!(form.prepare_submit().is_some());
        assert!(form.submit_error().is_none());
    }
}
