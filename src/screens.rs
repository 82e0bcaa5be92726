//! Screen state that does not depend on the terminal: what each screen loaded,
//! what failed, and the actions it offers.

mod dashboard;
mod detail;
mod table;

pub use self::dashboard::{
    DashboardView, StageRow, largest_by_delta_arr, most_recently_synced, stage_rows,
};
pub use self::detail::{DetailRow, DetailView};
pub use self::table::{FilterField, FilterInputs, TableView};

/// Opportunities fetched for the dashboard lists.
pub const DASHBOARD_FETCH_LIMIT: u32 = 100;
/// Rows shown in each dashboard top list.
pub const DASHBOARD_TOP_N: usize = 5;
