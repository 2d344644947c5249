use std::sync::Arc;

use chrono::{Duration, Utc};
use tracing::{info, warn};

use crate::domain::models::booking::{Booking, BookingStatus, DateRange, NewBookingParams};
use crate::domain::ports::BookingRepository;
use crate::domain::services::notification::{NotificationOutcome, RejectionNotifier};
use crate::error::AppError;

pub const SUBMISSION_WINDOW_HOURS: i64 = 24;
pub const DEFAULT_REJECTION_REASON: &str = "The requested dates are not available for booking";

#[derive(Debug, Clone)]
pub struct Rejection {
    pub booking: Booking,
    pub notification: NotificationOutcome,
}

/// Admission and lifecycle rules for bookings of the single venue.
///
/// Submit runs its rate-limit and overlap checks as plain reads, so two
/// overlapping submissions may both land as pending. Confirmation settles that:
/// the store applies the pending-status guard and the overlap guard in the same
/// conditional write, so of two overlapping pending bookings only the first to
/// be confirmed can succeed.
pub struct BookingService {
    repo: Arc<dyn BookingRepository>,
    notifier: RejectionNotifier,
}

impl BookingService {
    pub fn new(repo: Arc<dyn BookingRepository>, notifier: RejectionNotifier) -> Self {
        Self { repo, notifier }
    }

    pub async fn submit(&self, params: NewBookingParams) -> Result<Booking, AppError> {
        let booking = Booking::new(params);

        let since = booking.created_at - Duration::hours(SUBMISSION_WINDOW_HOURS);
        if let Some(recent) = self.repo.find_recent_by_email(&booking.email, since).await? {
            warn!("Submission rate-limited for {} (previous booking {})", booking.email, recent.id);
            return Err(AppError::RateLimited(format!(
                "You can submit only once every {} hours.",
                SUBMISSION_WINDOW_HOURS
            )));
        }

        if let Some(existing) = self.repo.find_confirmed_overlap(&booking.dates(), None).await? {
            warn!(
                "Submission for {}..{} conflicts with confirmed booking {}",
                booking.from_date, booking.to_date, existing.id
            );
            return Err(AppError::DateConflict(
                "These dates are already booked. Please choose different dates.".into(),
            ));
        }

        let created = self.repo.create(&booking).await?;
        info!("Booking request saved: {}", created.id);
        Ok(created)
    }

    pub async fn blocked_ranges(&self) -> Result<Vec<DateRange>, AppError> {
        self.repo.list_confirmed_ranges().await
    }

    pub async fn list(&self, status: Option<BookingStatus>) -> Result<Vec<Booking>, AppError> {
        self.repo.list(status).await
    }

    pub async fn list_pending(&self) -> Result<Vec<Booking>, AppError> {
        self.repo.list(Some(BookingStatus::Pending)).await
    }

    pub async fn confirm(&self, id: &str) -> Result<Booking, AppError> {
        let booking = self.load_pending(id, BookingStatus::Confirmed).await?;

        if let Some(existing) = self.repo.find_confirmed_overlap(&booking.dates(), Some(id)).await? {
            warn!("Cannot confirm {}: overlaps confirmed booking {}", id, existing.id);
            return Err(confirm_conflict());
        }

        match self.repo.confirm_if_pending(id, Utc::now()).await? {
            Some(confirmed) => {
                info!("Booking confirmed: {}", confirmed.id);
                Ok(confirmed)
            }
            // Lost a race: either the status moved or another overlapping
            // booking was confirmed between our read and our write.
            None => match self.repo.find_by_id(id).await? {
                None => Err(not_found()),
                Some(current) if current.status != BookingStatus::Pending => {
                    Err(invalid_transition(BookingStatus::Confirmed, current.status))
                }
                Some(_) => {
                    warn!("Cannot confirm {}: dates claimed by a concurrent confirmation", id);
                    Err(confirm_conflict())
                }
            },
        }
    }

    pub async fn reject(&self, id: &str, reason: Option<String>) -> Result<Rejection, AppError> {
        self.load_pending(id, BookingStatus::Rejected).await?;

        let reason = reason
            .map(|r| r.trim().to_string())
            .filter(|r| !r.is_empty())
            .unwrap_or_else(|| DEFAULT_REJECTION_REASON.to_string());

        let rejected = match self.repo.reject_if_pending(id, &reason, Utc::now()).await? {
            Some(rejected) => rejected,
            None => {
                let current = self.repo.find_by_id(id).await?.ok_or_else(not_found)?;
                return Err(invalid_transition(BookingStatus::Rejected, current.status));
            }
        };
        info!("Booking rejected: {}", rejected.id);

        let notification = self.notifier.notify(&rejected).await;
        Ok(Rejection { booking: rejected, notification })
    }

    async fn load_pending(&self, id: &str, target: BookingStatus) -> Result<Booking, AppError> {
        let booking = self.repo.find_by_id(id).await?.ok_or_else(not_found)?;
        if !booking.status.can_transition_to(target) {
            return Err(invalid_transition(target, booking.status));
        }
        Ok(booking)
    }
}

fn not_found() -> AppError {
    AppError::NotFound("Booking not found".into())
}

fn invalid_transition(target: BookingStatus, status: BookingStatus) -> AppError {
    let action = if target == BookingStatus::Confirmed { "confirm" } else { "reject" };
    AppError::InvalidTransition(format!("Cannot {} booking with status: {}", action, status))
}

fn confirm_conflict() -> AppError {
    AppError::DateConflict("Cannot confirm: These dates are already booked by another confirmed booking.".into())
}
