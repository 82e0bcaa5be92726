mod common;

use anyhow::{Context, Result};

use oppdesk::api::{OpportunityApi, SyncApi};
use oppdesk::model::OpportunityFilters;
use oppdesk::sync::{SyncPanel, SyncPhase, SyncSession};

#[test]
fn unconfigured_server_disables_trigger() -> Result<()> {
    let server = common::spawn_server()?;
    let api = server.client()?;

    let mut session = SyncSession::mount(&api);
    assert!(!session.configured());
    assert!(session.config_error().is_none());
    assert!(!session.can_trigger());
    assert!(!session.trigger(&api));
    assert_eq!(session.phase(), SyncPhase::Idle);
    Ok(())
}

#[test]
fn configured_sync_upserts_source_rows() -> Result<()> {
    let rows = serde_json::json!([
        {"salesforce_id": "006W1", "name": "Warehouse deal", "stage_number": 2},
        {"salesforce_id": "006W2", "name": "Another warehouse deal"}
    ]);
    let server = common::spawn_server_with_sync_source(&rows)?;
    let api = server.client()?;
    assert!(api.sync_status().context("sync status")?.configured);

    let mut session = SyncSession::mount(&api);
    assert!(session.configured());
    assert!(session.trigger(&api));
    assert_eq!(session.phase(), SyncPhase::Succeeded);
    assert_eq!(session.last_message(), Some("Successfully synced 2 records"));
    assert!(session.last_success().is_some());

    // A second run overwrites by salesforce_id instead of duplicating.
    assert!(session.trigger(&api));
    let all = api
        .list_opportunities(&OpportunityFilters::default())
        .context("list")?;
    assert_eq!(all.len(), 2);
    assert!(all.iter().all(|o| o.sync_timestamp.is_some()));
    Ok(())
}

#[test]
fn background_trigger_delivers_result_to_panel() -> Result<()> {
    let server = common::spawn_server_with_sync_source(&serde_json::json!([]))?;
    let api = server.client()?;

    let mut panel = SyncPanel::mount(&api);
    assert!(panel.trigger(api.clone()));
    assert_eq!(panel.session().phase(), SyncPhase::InFlight);
    assert!(!panel.trigger(api.clone()));

    let deadline = std::time::Instant::now() + std::time::Duration::from_secs(5);
    while !panel.poll() {
        if std::time::Instant::now() > deadline {
            anyhow::bail!("sync result never arrived");
        }
        std::thread::sleep(std::time::Duration::from_millis(10));
    }
    assert_eq!(panel.session().phase(), SyncPhase::Succeeded);
    assert!(panel.session().can_trigger());
    Ok(())
}

#[test]
fn sync_skips_rows_that_fail_validation() -> Result<()> {
    let rows = serde_json::json!([
        {"salesforce_id": "006OK", "name": "Clean row"},
        {"salesforce_id": "006BAD", "name": "Overconfident", "probability": 150},
        {"salesforce_id": "006BLANK", "name": "  "}
    ]);
    let server = common::spawn_server_with_sync_source(&rows)?;
    let api = server.client()?;

    let mut session = SyncSession::mount(&api);
    assert!(session.trigger(&api));
    assert_eq!(
        session.last_message(),
        Some("Successfully synced 1 records (2 skipped)")
    );

    let all = api
        .list_opportunities(&OpportunityFilters::default())
        .context("list")?;
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].salesforce_id, "006OK");
    Ok(())
}
