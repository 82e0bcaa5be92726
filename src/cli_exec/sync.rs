use oppdesk::api::SyncApi;
use oppdesk::sync::{SyncPhase, SyncSession};

use super::*;

pub(super) fn handle_sync_command(client: &ApiClient, status_only: bool, json: bool) -> Result<()> {
    if status_only {
        let status = client.sync_status().context("check sync status")?;
        if json {
            return print_json(&status, "sync status");
        }
        if status.configured {
            println!("Warehouse sync is configured");
        } else {
            println!("Warehouse sync is not configured");
        }
        return Ok(());
    }

    let mut session = SyncSession::mount(client);
    if let Some(err) = session.config_error() {
        anyhow::bail!("check sync status: {}", err);
    }
    if !session.configured() {
        anyhow::bail!("warehouse sync is not configured on the server");
    }

    session.trigger(client);
    match session.phase() {
        SyncPhase::Succeeded => {
            let message = session.last_message().unwrap_or("Sync started");
            if json {
                print_json(&serde_json::json!({ "message": message }), "sync result")?;
            } else {
                println!("{}", message);
            }
            Ok(())
        }
        SyncPhase::Failed => {
            anyhow::bail!("sync failed: {}", session.last_error().unwrap_or("Sync failed"))
        }
        SyncPhase::Idle | SyncPhase::InFlight => anyhow::bail!("sync did not run"),
    }
}
