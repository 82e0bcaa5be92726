use super::dashboard::{handle_attention_command, handle_stats_command};
use super::records::{
    handle_create_command, handle_delete_command, handle_list_command, handle_show_command,
    handle_update_command,
};
use super::sync::handle_sync_command;
use super::*;

pub(super) fn handle_command(client: &ApiClient, command: Commands) -> Result<()> {
    match command {
        Commands::List(args) => handle_list_command(client, args)?,
        Commands::Show(args) => handle_show_command(client, &args.id, args.json)?,
        Commands::Create(args) => handle_create_command(client, &args.set, args.json)?,
        Commands::Update(args) => handle_update_command(client, &args.id, &args.set, args.json)?,
        Commands::Delete(args) => handle_delete_command(client, &args.id, args.yes)?,
        Commands::Stats(args) => handle_stats_command(client, args.json)?,
        Commands::Attention(args) => handle_attention_command(client, args.json)?,
        Commands::Sync(args) => handle_sync_command(client, args.status, args.json)?,
    }
    Ok(())
}
