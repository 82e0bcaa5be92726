use anyhow::{Context, Result};

use oppdesk::api::ApiClient;

use crate::Commands;

mod dashboard;
mod dispatch;
mod records;
mod sync;

pub(super) fn handle_command(client: &ApiClient, command: Commands) -> Result<()> {
    dispatch::handle_command(client, command)
}

fn print_json<T: serde::Serialize>(value: &T, what: &str) -> Result<()> {
    println!(
        "{}",
        serde_json::to_string_pretty(value).with_context(|| format!("serialize {} json", what))?
    );
    Ok(())
}
