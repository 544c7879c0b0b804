pub mod booking;
pub mod tool;

pub use booking::{Booking, BookingStatus, StayInterval, StoredBooking, HEADER};
pub use tool::{CheckAvailabilityArgs, CreateBookingArgs, ToolResponse};
