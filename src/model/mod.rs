mod filters;
mod opportunity;
mod stats;
mod sync;

pub use self::filters::OpportunityFilters;
pub use self::opportunity::{DealNeedingAttention, Opportunity, OpportunityInput};
pub use self::stats::{OpportunityStats, StageBucket};
pub use self::sync::{SyncAccepted, SyncStatus};
