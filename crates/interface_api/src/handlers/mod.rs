//! Request handlers

pub mod health;
pub mod authorize;
pub mod benefit;
pub mod resource;
