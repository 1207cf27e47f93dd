pub mod state;
pub mod view;

pub use state::{HoldingsScreen, RefreshOutcome, ScreenModel, ScreenState, Status};
pub use view::{render, View};
