pub mod booking;
pub mod booking_admin;
pub mod health;
