use clap::Args;

#[derive(Args)]
pub(crate) struct JsonArgs {
    /// Emit JSON
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args)]
pub(crate) struct SyncArgs {
    /// Only report whether the sync source is configured
    #[arg(long)]
    pub(crate) status: bool,
    /// Emit JSON
    #[arg(long)]
    pub(crate) json: bool,
}
