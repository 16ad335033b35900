//! Rating aggregation and dynamic pricing for a car-detailing business.
//!
//! Both engines are pure: callers fetch reviews and pricing rules, hand them
//! in, and receive a computed rating or price back.

pub mod config;
pub mod error;
pub mod pricing;
pub mod ratings;
pub mod telemetry;
