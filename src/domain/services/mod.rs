pub mod booking_service;
pub mod notification;
