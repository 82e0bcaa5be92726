use clap::Args;

#[derive(Args)]
pub(crate) struct ListArgs {
    /// Stage number to match
    #[arg(long)]
    pub(crate) stage: Option<String>,
    /// Account name substring (case-insensitive)
    #[arg(long = "account")]
    pub(crate) account_name: Option<String>,
    /// Minimum delta average ARR
    #[arg(long)]
    pub(crate) min_amount: Option<f64>,
    /// Maximum delta average ARR
    #[arg(long)]
    pub(crate) max_amount: Option<f64>,
    /// Maximum rows to return
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub(crate) limit: Option<u32>,
    /// Rows to skip
    #[arg(long)]
    pub(crate) skip: Option<u32>,
    /// Emit JSON
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args)]
pub(crate) struct ShowArgs {
    pub(crate) id: String,
    /// Emit JSON
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args)]
pub(crate) struct CreateArgs {
    /// Field assignment, e.g. `--set name="Acme renewal"` (repeatable)
    #[arg(long = "set", value_name = "FIELD=VALUE", required = true)]
    pub(crate) set: Vec<String>,
    /// Emit JSON
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args)]
pub(crate) struct UpdateArgs {
    pub(crate) id: String,
    /// Field assignment, e.g. `--set probability=60` (repeatable)
    #[arg(long = "set", value_name = "FIELD=VALUE", required = true)]
    pub(crate) set: Vec<String>,
    /// Emit JSON
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args)]
pub(crate) struct DeleteArgs {
    pub(crate) id: String,
    /// Confirm the deletion
    #[arg(long)]
    pub(crate) yes: bool,
}
