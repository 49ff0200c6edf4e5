//! Credit card application screening service.
//!
//! The underwriting workflow evaluates submitted applications against the
//! screening rubric, consulting an injected fraud-risk capability and a
//! frequent-flyer validator, and exposes the results over a service facade
//! and HTTP router.

pub mod config;
pub mod error;
pub mod telemetry;
pub mod workflows;
