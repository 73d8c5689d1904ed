pub mod seat;
pub mod venue;
pub mod ticket;
pub mod scan;

pub use seat::{Seat, SeatDisplayStatus, SeatStatus};
pub use venue::{VenueLayout, VenueSection};
pub use ticket::{AvailabilityLevel, TicketType};
pub use scan::{ScanRecord, ScanResult, ScanStatus};
