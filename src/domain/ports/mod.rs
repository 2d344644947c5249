use crate::domain::models::{
    booking::{Booking, BookingStatus, DateRange},
    email::OutgoingEmail,
};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

#[async_trait]
pub trait BookingRepository: Send + Sync {
    async fn create(&self, booking: &Booking) -> Result<Booking, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Booking>, AppError>;
    /// Most recent booking for `email` created at or after `since`, any status.
    async fn find_recent_by_email(&self, email: &str, since: DateTime<Utc>) -> Result<Option<Booking>, AppError>;
    /// Any confirmed booking whose closed range intersects `range`, other than `exclude_id`.
    async fn find_confirmed_overlap(&self, range: &DateRange, exclude_id: Option<&str>) -> Result<Option<Booking>, AppError>;
    /// Confirmed ranges ordered by `from_date` ascending.
    async fn list_confirmed_ranges(&self) -> Result<Vec<DateRange>, AppError>;
    /// Newest first.
    async fn list(&self, status: Option<BookingStatus>) -> Result<Vec<Booking>, AppError>;
    /// Atomically moves a pending booking to confirmed, provided no other confirmed
    /// booking overlaps it at write time. `None` when either guard fails.
    async fn confirm_if_pending(&self, id: &str, confirmed_at: DateTime<Utc>) -> Result<Option<Booking>, AppError>;
    /// Atomically moves a pending booking to rejected. `None` when it is no longer pending.
    async fn reject_if_pending(&self, id: &str, reason: &str, rejected_at: DateTime<Utc>) -> Result<Option<Booking>, AppError>;
}

#[async_trait]
pub trait EmailService: Send + Sync {
    async fn send(&self, email: &OutgoingEmail) -> Result<(), AppError>;
}

pub trait AdminAuthorizer: Send + Sync {
    fn is_authorized(&self, token: &str) -> bool;
}
