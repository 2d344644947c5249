use crate::domain::models::booking::{DateRange, NewBookingParams};
use crate::error::AppError;
use chrono::NaiveDate;
use serde::Deserialize;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookingRequest {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub event_type: String,
    pub guests: i32,
    pub from_date: NaiveDate,
    pub to_date: NaiveDate,
    pub check_in: String,
    pub check_out: String,
    pub message: Option<String>,
}

impl CreateBookingRequest {
    /// Structural checks only; admission rules live in the booking service.
    pub fn into_params(self, source_address: Option<String>) -> Result<NewBookingParams, AppError> {
        let mut problems = Vec::new();

        for (field, value) in [
            ("name", &self.name),
            ("phone", &self.phone),
            ("eventType", &self.event_type),
            ("checkIn", &self.check_in),
            ("checkOut", &self.check_out),
        ] {
            if value.trim().is_empty() {
                problems.push(format!("{} is required", field));
            }
        }
        if !is_plausible_email(&self.email) {
            problems.push("A valid email is required".to_string());
        }
        if self.guests < 1 {
            problems.push("guests must be at least 1".to_string());
        }
        if self.from_date > self.to_date {
            problems.push("fromDate must not be after toDate".to_string());
        }

        if !problems.is_empty() {
            return Err(AppError::Validation(problems.join(", ")));
        }

        Ok(NewBookingParams {
            name: self.name.trim().to_string(),
            email: self.email,
            phone: self.phone.trim().to_string(),
            event_type: self.event_type.trim().to_string(),
            guests: self.guests,
            dates: DateRange::new(self.from_date, self.to_date)?,
            check_in: self.check_in,
            check_out: self.check_out,
            message: self.message.filter(|m| !m.trim().is_empty()),
            source_address,
        })
    }
}

fn is_plausible_email(email: &str) -> bool {
    let email = email.trim();
    match email.split_once('@') {
        Some((local, domain)) => !local.is_empty() && !domain.is_empty() && !domain.contains('@'),
        None => false,
    }
}

#[derive(Deserialize)]
pub struct RejectBookingRequest {
    pub reason: Option<String>,
}

#[derive(Deserialize)]
pub struct ListBookingsQuery {
    pub status: Option<String>,
}
