use clap::Subcommand;

pub(crate) mod dashboard;
pub(crate) mod records;

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// List opportunities
    List(records::ListArgs),

    /// Show one opportunity
    Show(records::ShowArgs),

    /// Create an opportunity from field assignments
    Create(records::CreateArgs),

    /// Update an opportunity; unspecified fields keep their current value
    Update(records::UpdateArgs),

    /// Delete an opportunity
    Delete(records::DeleteArgs),

    /// Pipeline totals and stage distribution
    Stats(dashboard::JsonArgs),

    /// Large deals missing notes or services
    Attention(dashboard::JsonArgs),

    /// Run the warehouse sync, or show whether it is configured
    Sync(dashboard::SyncArgs),
}
