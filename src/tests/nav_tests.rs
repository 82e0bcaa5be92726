use super::*;
use crate::api::ApiError;
use crate::tests_support::{Call, FakeBackend, opportunity};

fn input(name: &str) -> OpportunityInput {
    OpportunityInput {
        salesforce_id: "SF-x".to_string(),
        name: name.to_string(),
        ..Default::default()
    }
}

fn assert_selection_matches_screen(nav: &Navigator) {
    match nav.screen() {
        Screen::Form | Screen::Detail => assert!(nav.selection().is_some()),
        Screen::Dashboard | Screen::Table => assert!(nav.selection().is_none()),
    }
}

#[test]
fn starts_on_dashboard_without_selection() {
    let nav = Navigator::new();
    assert_eq!(nav.screen(), Screen::Dashboard);
    assert!(nav.selection().is_none());
}

#[test]
fn view_edit_create_set_selection() {
    let rec = opportunity("1", "Acme");
    let mut nav = Navigator::new();

    assert!(nav.view(rec.clone()));
    assert_eq!(nav.screen(), Screen::Detail);
    let sel = nav.selection().expect("selection");
    assert_eq!(sel.record.as_ref(), Some(&rec));
    assert!(!sel.editing);

    assert!(nav.edit(rec.clone()));
    assert_eq!(nav.screen(), Screen::Form);
    assert!(nav.selection().expect("selection").editing);

    assert!(nav.create());
    let sel = nav.selection().expect("selection");
    assert!(sel.record.is_none());
    assert!(!sel.editing);
}

#[test]
fn cancel_and_close_only_apply_to_their_screens() {
    let mut nav = Navigator::new();
    assert!(!nav.cancel());
    assert!(!nav.close());
    assert_eq!(nav.screen(), Screen::Dashboard);

    nav.view(opportunity("1", "Acme"));
    assert!(!nav.cancel());
    assert_eq!(nav.screen(), Screen::Detail);
    assert!(nav.close());
    assert_eq!(nav.screen(), Screen::Table);
    assert!(nav.selection().is_none());

    nav.create();
    assert!(!nav.close());
    assert!(nav.cancel());
    assert_eq!(nav.screen(), Screen::Table);
}

#[test]
fn navigate_clears_selection_and_reports_changes() {
    let mut nav = Navigator::new();
    assert!(!nav.navigate(Tab::Dashboard));
    assert!(nav.navigate(Tab::Table));
    assert!(!nav.navigate(Tab::Table));

    nav.edit(opportunity("1", "Acme"));
    assert!(nav.navigate(Tab::Dashboard));
    assert_eq!(nav.screen(), Screen::Dashboard);
    assert!(nav.selection().is_none());
}

#[test]
fn selection_tracks_screen_across_trigger_sequences() {
    let rec = opportunity("1", "Acme");
    let triggers = [
        Trigger::View(rec.clone()),
        Trigger::Edit(rec.clone()),
        Trigger::Create,
        Trigger::Cancel,
        Trigger::Close,
        Trigger::Navigate(Tab::Dashboard),
        Trigger::Navigate(Tab::Table),
    ];

    // Every ordered triple of triggers, from a fresh navigator.
    for a in &triggers {
        for b in &triggers {
            for c in &triggers {
                let mut nav = Navigator::new();
                for t in [a, b, c] {
                    nav.dispatch(t.clone());
                    assert_selection_matches_screen(&nav);
                }
            }
        }
    }
}

#[test]
fn editing_submit_updates_the_selected_record_once() {
    let rec = opportunity("rec-7", "Acme");
    let api = FakeBackend::with_records(vec![rec.clone()]);
    let mut nav = Navigator::new();
    nav.edit(rec);

    let outcome = nav.submit(&api, &input("Acme renamed"));
    assert!(matches!(outcome, SubmitOutcome::Saved(ref o) if o.name == "Acme renamed"));
    assert_eq!(
        api.calls(),
        vec![Call::Update("rec-7".to_string(), input("Acme renamed"))]
    );
    assert_eq!(nav.screen(), Screen::Table);
}

#[test]
fn create_submit_issues_one_create() {
    let api = FakeBackend::default();
    let mut nav = Navigator::new();
    nav.create();

    let outcome = nav.submit(&api, &input("Fresh"));
    assert!(matches!(outcome, SubmitOutcome::Saved(_)));
    assert_eq!(api.calls(), vec![Call::Create(input("Fresh"))]);
    assert_eq!(nav.screen(), Screen::Table);
}

#[test]
fn failed_submit_stays_on_form_with_selection() {
    let rec = opportunity("rec-7", "Acme");
    let api = FakeBackend::with_records(vec![rec.clone()]);
    api.fail_next(ApiError::Application {
        status: 422,
        message: Some("Probability must be between 0 and 100".to_string()),
    });
    let mut nav = Navigator::new();
    nav.edit(rec.clone());
    let before = nav.clone();

    let outcome = nav.submit(&api, &input("Acme"));
    let SubmitOutcome::Failed(err) = outcome else {
        panic!("expected failure");
    };
    assert_eq!(
        err.user_message("Failed to save opportunity"),
        "Probability must be between 0 and 100"
    );
    assert_eq!(nav, before);
    assert_eq!(api.calls().len(), 1);
}

#[test]
fn transport_failure_keeps_form() {
    let api = FakeBackend::default();
    api.fail_next(ApiError::Transport("connection refused".to_string()));
    let mut nav = Navigator::new();
    nav.create();

    assert!(matches!(
        nav.submit(&api, &input("x")),
        SubmitOutcome::Failed(ApiError::Transport(_))
    ));
    assert_eq!(nav.screen(), Screen::Form);
}

#[test]
fn submit_outside_form_makes_no_request() {
    let api = FakeBackend::default();
    let mut nav = Navigator::new();
    assert!(matches!(nav.submit(&api, &input("x")), SubmitOutcome::Ignored));

    nav.view(opportunity("1", "Acme"));
    assert!(matches!(nav.submit(&api, &input("x")), SubmitOutcome::Ignored));
    assert!(api.calls().is_empty());
}

#[test]
fn failed_submit_keeps_entered_values_for_retry() {
    use crate::form::{Field, OpportunityForm};

    let rec = opportunity("rec-9", "Acme");
    let api = FakeBackend::with_records(vec![rec.clone()]);
    let mut nav = Navigator::new();
    nav.edit(rec.clone());
    let mut form = OpportunityForm::edit(&rec);
    form.set(Field::Name, "Acme renewal");
    form.set(Field::Probability, "40");
    form.set(Field::DeltaAverageArr, "250,000");
    let entered = form.values().clone();

    api.fail_next(ApiError::Transport("connection refused".to_string()));
    let payload = form.prepare_submit().expect("valid form");
    let SubmitOutcome::Failed(err) = nav.submit(&api, &payload) else {
        panic!("expected failure");
    };
    form.submit_failed(err.user_message("Failed to save opportunity"));

    assert_eq!(form.values(), &entered);
    assert_eq!(form.submit_error(), Some("Could not reach server"));
    assert_eq!(nav.screen(), Screen::Form);
    assert_eq!(api.calls().len(), 1);

    let retry = form.prepare_submit().expect("still valid");
    assert_eq!(retry, payload);
    assert!(matches!(nav.submit(&api, &retry), SubmitOutcome::Saved(_)));
    assert_eq!(
        api.calls(),
        vec![
            Call::Update("rec-9".to_string(), payload.clone()),
            Call::Update("rec-9".to_string(), payload),
        ]
    );
    assert_eq!(nav.screen(), Screen::Table);
}
