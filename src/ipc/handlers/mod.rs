pub mod bookings;
pub mod core;
pub mod rooms;
pub mod schedule;
