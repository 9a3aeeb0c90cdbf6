pub mod app_state;
pub mod session_state;
pub mod status_state;
pub mod totals_state;

pub use app_state::AppState;
pub use session_state::SessionState;
pub use status_state::StatusState;
pub use totals_state::TotalsState;
