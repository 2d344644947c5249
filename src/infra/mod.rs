pub mod auth;
pub mod email;
pub mod factory;
pub mod repositories;
