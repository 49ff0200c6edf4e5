use serde::{Deserialize, Serialize};

/// Threshold configuration for the screening rubric.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScreeningConfig {
    /// Gross annual income at or above which an application is auto-accepted.
    pub high_income_auto_accept: u32,
    /// Gross annual income below which a validated application is declined.
    pub low_income_auto_decline: u32,
    /// Age at or above which the detailed validation mode is requested.
    pub detailed_validation_age: u8,
    /// Age at or below which a validated application is referred to a human.
    pub young_applicant_age: u8,
}

impl Default for ScreeningConfig {
    fn default() -> Self {
        Self {
            high_income_auto_accept: 100_000,
            low_income_auto_decline: 20_000,
            detailed_validation_age: 30,
            young_applicant_age: 20,
        }
    }
}
