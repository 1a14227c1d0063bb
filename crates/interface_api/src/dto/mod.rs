//! Request/response data transfer objects

pub mod records;
pub mod authorize;
