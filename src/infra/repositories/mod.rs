pub mod sqlite_booking_repo;
pub mod postgres_booking_repo;
