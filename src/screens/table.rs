use crate::api::OpportunityApi;
use crate::format;
use crate::model::{Opportunity, OpportunityFilters};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FilterField {
    Stage,
    AccountName,
    MinAmount,
    MaxAmount,
    Limit,
}

impl FilterField {
    pub const ALL: [FilterField; 5] = [
        FilterField::Stage,
        FilterField::AccountName,
        FilterField::MinAmount,
        FilterField::MaxAmount,
        FilterField::Limit,
    ];

    pub fn label(self) -> &'static str {
        match self {
            FilterField::Stage => "Stage",
            FilterField::AccountName => "Account",
            FilterField::MinAmount => "Min amount",
            FilterField::MaxAmount => "Max amount",
            FilterField::Limit => "Limit",
        }
    }
}

/// Raw filter text as typed. Converted to query parameters on apply.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FilterInputs {
    pub stage: String,
    pub account_name: String,
    pub min_amount: String,
    pub max_amount: String,
    pub limit: String,
}

impl FilterInputs {
    pub fn get(&self, field: FilterField) -> &str {
        match field {
            FilterField::Stage => &self.stage,
            FilterField::AccountName => &self.account_name,
            FilterField::MinAmount => &self.min_amount,
            FilterField::MaxAmount => &self.max_amount,
            FilterField::Limit => &self.limit,
        }
    }

    pub fn set(&mut self, field: FilterField, value: String) {
        match field {
            FilterField::Stage => self.stage = value,
            FilterField::AccountName => self.account_name = value,
            FilterField::MinAmount => self.min_amount = value,
            FilterField::MaxAmount => self.max_amount = value,
            FilterField::Limit => self.limit = value,
        }
    }

    pub fn to_filters(&self) -> Result<OpportunityFilters, String> {
        fn text(raw: &str) -> Option<String> {
            let v = raw.trim();
            (!v.is_empty()).then(|| v.to_string())
        }
        fn amount(raw: &str, label: &str) -> Result<Option<f64>, String> {
            match text(raw) {
                None => Ok(None),
                Some(v) => format::parse_amount(&v)
                    .map(Some)
                    .ok_or_else(|| format!("{} must be a valid number", label)),
            }
        }

        let min_amount = amount(&self.min_amount, "Min amount")?;
        let max_amount = amount(&self.max_amount, "Max amount")?;
        if let (Some(lo), Some(hi)) = (min_amount, max_amount)
            && lo > hi
        {
            return Err("Min amount cannot exceed max amount".to_string());
        }
        let limit = match text(&self.limit) {
            None => None,
            Some(v) => Some(
                v.parse::<u32>()
                    .ok()
                    .filter(|n| *n > 0)
                    .ok_or_else(|| "Limit must be a positive whole number".to_string())?,
            ),
        };

        Ok(OpportunityFilters {
            stage: text(&self.stage),
            account_name: text(&self.account_name),
            min_amount,
            max_amount,
            limit,
            skip: None,
        })
    }
}

/// The opportunity list with its filters and the delete confirmation.
#[derive(Clone, Debug, Default)]
pub struct TableView {
    pub filters: FilterInputs,
    rows: Vec<Opportunity>,
    selected: usize,
    error: Option<String>,
    notice: Option<String>,
    pending_delete: Option<Opportunity>,
}

impl TableView {
    pub fn load(api: &dyn OpportunityApi) -> Self {
        let mut view = Self::default();
        view.refresh(api);
        view
    }

    /// Validates the filter inputs and refetches. Invalid filters make no request.
    pub fn apply_filters(&mut self, api: &dyn OpportunityApi) -> bool {
        match self.filters.to_filters() {
            Ok(filters) => {
                self.fetch(api, &filters);
                true
            }
            Err(msg) => {
                self.error = Some(msg);
                false
            }
        }
    }

    pub fn refresh(&mut self, api: &dyn OpportunityApi) {
        self.apply_filters(api);
    }

    pub fn clear_filters(&mut self, api: &dyn OpportunityApi) {
        self.filters = FilterInputs::default();
        self.refresh(api);
    }

    fn fetch(&mut self, api: &dyn OpportunityApi, filters: &OpportunityFilters) {
        match api.list_opportunities(filters) {
            Ok(rows) => {
                self.rows = rows;
                self.error = None;
                self.selected = self.selected.min(self.rows.len().saturating_sub(1));
            }
            Err(err) => {
                self.error = Some(err.user_message("Failed to load opportunities"));
            }
        }
    }

    pub fn rows(&self) -> &[Opportunity] {
        &self.rows
    }

    pub fn selected_index(&self) -> usize {
        self.selected
    }

    pub fn selected_row(&self) -> Option<&Opportunity> {
        self.rows.get(self.selected)
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn move_up(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn move_down(&mut self) {
        if self.rows.is_empty() {
            self.selected = 0;
            return;
        }
        self.selected = (self.selected + 1).min(self.rows.len() - 1);
    }

    /// Arms the delete confirmation for the selected row.
    pub fn request_delete(&mut self) -> Option<&Opportunity> {
        let row = self.selected_row()?.clone();
        self.pending_delete = Some(row);
        self.pending_delete.as_ref()
    }

    pub fn pending_delete(&self) -> Option<&Opportunity> {
        self.pending_delete.as_ref()
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }

    /// Sends the DELETE for the armed row. Without a pending confirmation this does nothing.
    pub fn confirm_delete(&mut self, api: &dyn OpportunityApi) -> bool {
        let Some(target) = self.pending_delete.take() else {
            return false;
        };
        match api.delete_opportunity(&target.id) {
            Ok(()) => {
                tracing::info!(id = %target.id, "opportunity deleted");
                self.rows.retain(|o| o.id != target.id);
                self.selected = self.selected.min(self.rows.len().saturating_sub(1));
                self.error = None;
                self.notice = Some(format!("Deleted {}", target.name));
                true
            }
            Err(err) => {
                tracing::warn!(id = %target.id, error = %err, "delete failed");
                self.error = Some(err.user_message("Failed to delete opportunity"));
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ApiError;
    use crate::tests_support::{Call, FakeBackend, opportunity};

    fn backend() -> FakeBackend {
        FakeBackend::with_records(vec![
            Opportunity {
                account_name: Some("Acme Corp".to_string()),
                ..opportunity("1", "Acme renewal")
            },
            Opportunity {
                account_name: Some("Globex".to_string()),
                ..opportunity("2", "Globex upsell")
            },
        ])
    }

    #[test]
    fn invalid_numeric_filter_makes_no_request() {
        let api = backend();
        let mut view = TableView::load(&api);
        view.filters.min_amount = "lots".to_string();
        assert!(!view.apply_filters(&api));
        assert_eq!(view.error(), Some("Min amount must be a valid number"));
        assert_eq!(api.calls().len(), 1);
        assert_eq!(view.rows().len(), 2);
    }

    #[test]
    fn filters_become_query_parameters() {
        let api = backend();
        let mut view = TableView::default();
        view.filters.account_name = " acme ".to_string();
        view.filters.min_amount = "1,000".to_string();
        view.filters.limit = "10".to_string();
        assert!(view.apply_filters(&api));

        let expected = OpportunityFilters {
            account_name: Some("acme".to_string()),
            min_amount: Some(1000.0),
            limit: Some(10),
            ..Default::default()
        };
        assert_eq!(api.calls(), vec![Call::List(expected)]);
        assert_eq!(view.rows().len(), 1);
    }

    #[test]
    fn bad_limit_and_inverted_range_are_rejected() {
        let mut f = FilterInputs {
            limit: "0".to_string(),
            ..Default::default()
        };
        assert!(f.to_filters().is_err());
        f.limit.clear();
        f.min_amount = "10".to_string();
        f.max_amount = "5".to_string();
        assert_eq!(
            f.to_filters(),
            Err("Min amount cannot exceed max amount".to_string())
        );
    }

    #[test]
    fn delete_requires_confirmation() {
        let api = backend();
        let mut view = TableView::load(&api);
        assert!(!view.confirm_delete(&api));

        view.move_down();
        assert_eq!(view.request_delete().map(|o| o.id.as_str()), Some("2"));
        view.cancel_delete();
        assert!(!view.confirm_delete(&api));
        assert!(!api.calls().iter().any(|c| matches!(c, Call::Delete(_))));

        view.request_delete();
        assert!(view.confirm_delete(&api));
        assert_eq!(api.calls().last(), Some(&Call::Delete("2".to_string())));
        assert_eq!(view.rows().len(), 1);
        assert_eq!(view.selected_index(), 0);
        assert_eq!(view.notice(), Some("Deleted Globex upsell"));
    }

    #[test]
    fn failed_delete_keeps_row() {
        let api = backend();
        let mut view = TableView::load(&api);
        view.request_delete();
        api.fail_next(ApiError::Transport("reset".to_string()));
        assert!(!view.confirm_delete(&api));
        assert_eq!(view.rows().len(), 2);
        assert_eq!(view.error(), Some("Could not reach server"));
        assert!(view.pending_delete().is_none());
    }
}
