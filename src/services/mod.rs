pub mod allocator;
pub mod selection;
#[cfg(feature = "tickets")]
pub mod tickets;
#[cfg(feature = "scanner")]
pub mod scanner;
#[cfg(feature = "analytics")]
pub mod analytics;

pub use allocator::{find_best_seats, SeatAllocator};
pub use selection::SelectionState;
