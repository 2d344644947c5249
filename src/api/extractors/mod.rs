pub mod admin;
pub mod client_addr;
pub mod json_body;
