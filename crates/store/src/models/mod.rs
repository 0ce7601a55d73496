//! Typed document models, one module per collection.

pub mod availability;
pub mod config;
pub mod shift;
pub mod shift_request;
pub mod staff;
pub mod timeoff;
