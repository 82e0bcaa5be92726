use super::*;

/// Same required/range rules the client form enforces. Returns the first failure.
pub(super) fn validate_input(input: &OpportunityInput) -> Result<(), String> {
    if input.salesforce_id.trim().is_empty() {
        return Err("Salesforce ID is required".to_string());
    }
    if input.name.trim().is_empty() {
        return Err("Opportunity name is required".to_string());
    }
    if input.probability.is_some_and(|p| p > 100) {
        return Err("Probability must be between 0 and 100".to_string());
    }
    if input.stage_number == Some(0) {
        return Err("Stage number must be at least 1".to_string());
    }
    if let Some(raw) = input.close_date.as_deref()
        && oppdesk::format::parse_date(raw).is_none()
    {
        return Err("Close date must be a date (YYYY-MM-DD)".to_string());
    }
    for (label, value) in [
        ("Amount", input.amount),
        ("Delta average ARR", input.delta_average_arr),
        ("Services attached amount", input.services_attached_amount),
    ] {
        if value.is_some_and(|v| !v.is_finite()) {
            return Err(format!("{} must be a valid number", label));
        }
    }
    Ok(())
}

/// Splits sync source rows into the ones that pass `validate_input` and
/// `(row index, reason)` for the rest.
pub(super) fn partition_sync_rows(
    rows: Vec<OpportunityInput>,
) -> (Vec<OpportunityInput>, Vec<(usize, String)>) {
    let mut valid = Vec::with_capacity(rows.len());
    let mut rejected = Vec::new();
    for (idx, row) in rows.into_iter().enumerate() {
        match validate_input(&row) {
            Ok(()) => valid.push(row),
            Err(reason) => rejected.push((idx, reason)),
        }
    }
    (valid, rejected)
}

pub(super) fn validate_limit(filters: &OpportunityFilters) -> Result<(), String> {
    match filters.limit {
        Some(n) if n == 0 || n > MAX_LIMIT => {
            Err(format!("limit must be between 1 and {}", MAX_LIMIT))
        }
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid() -> OpportunityInput {
        OpportunityInput {
            salesforce_id: "006A".to_string(),
            name: "Expansion".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn required_fields_are_checked_first() {
        let input = OpportunityInput {
            name: "  ".to_string(),
            ..valid()
        };
        assert_eq!(
            validate_input(&input),
            Err("Opportunity name is required".to_string())
        );
    }

    #[test]
    fn probability_and_close_date_are_range_checked() {
        let mut input = valid();
        input.probability = Some(150);
        assert_eq!(
            validate_input(&input),
            Err("Probability must be between 0 and 100".to_string())
        );

        input.probability = Some(50);
        input.close_date = Some("2025-13-40".to_string());
        assert_eq!(
            validate_input(&input),
            Err("Close date must be a date (YYYY-MM-DD)".to_string())
        );

        input.close_date = Some("2025-06-30".to_string());
        assert_eq!(validate_input(&input), Ok(()));
    }

    #[test]
    fn zero_limit_is_rejected() {
        let filters = OpportunityFilters::with_limit(0);
        assert!(validate_limit(&filters).is_err());
        assert!(validate_limit(&OpportunityFilters::with_limit(1000)).is_ok());
    }

    #[test]
    fn sync_rows_failing_validation_are_set_aside() {
        let rows = vec![
            valid(),
            OpportunityInput {
                probability: Some(150),
                ..valid()
            },
            OpportunityInput {
                name: String::new(),
                ..valid()
            },
        ];
        let (kept, rejected) = partition_sync_rows(rows);
        assert_eq!(kept, vec![valid()]);
        assert_eq!(
            rejected,
            vec![
                (1, "Probability must be between 0 and 100".to_string()),
                (2, "Opportunity name is required".to_string()),
            ]
        );
    }
}
