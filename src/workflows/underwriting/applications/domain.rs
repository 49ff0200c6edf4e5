use serde::{Deserialize, Serialize};

/// Identifier wrapper for submitted applications.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ApplicationId(pub String);

/// Applicant-submitted snapshot, immutable for the duration of one evaluation.
///
/// Missing numeric fields default to zero and a missing frequent-flyer number
/// is a valid domain value, not an error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreditCardApplication {
    #[serde(default)]
    pub gross_annual_income: u32,
    #[serde(default)]
    pub age: u8,
    #[serde(default)]
    pub frequent_flyer_number: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
}

/// High level status tracked throughout the underwriting workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CardApplicationStatus {
    Submitted,
    UnderReview,
    Approved,
    Declined,
}

impl CardApplicationStatus {
    pub const fn label(self) -> &'static str {
        match self {
            CardApplicationStatus::Submitted => "submitted",
            CardApplicationStatus::UnderReview => "under_review",
            CardApplicationStatus::Approved => "approved",
            CardApplicationStatus::Declined => "declined",
        }
    }
}
