pub mod client;
pub mod types;

pub use client::{HoldingsClient, HoldingsSource};
pub use types::HoldingRecord;
