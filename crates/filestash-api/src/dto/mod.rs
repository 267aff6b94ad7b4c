//! Request and response bodies for the HTTP API.

pub mod request;
pub mod response;
