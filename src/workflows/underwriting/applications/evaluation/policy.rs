use serde::{Deserialize, Serialize};

/// Adjudication outcome for a screened application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CardApplicationDecision {
    AutoAccepted,
    AutoDeclined,
    ReferredToHuman,
    ReferredToHumanFraudRisk,
}

impl CardApplicationDecision {
    pub const fn label(self) -> &'static str {
        match self {
            CardApplicationDecision::AutoAccepted => "auto_accepted",
            CardApplicationDecision::AutoDeclined => "auto_declined",
            CardApplicationDecision::ReferredToHuman => "referred_to_human",
            CardApplicationDecision::ReferredToHumanFraudRisk => "referred_to_human_fraud_risk",
        }
    }

    pub const fn is_referral(self) -> bool {
        matches!(
            self,
            CardApplicationDecision::ReferredToHuman
                | CardApplicationDecision::ReferredToHumanFraudRisk
        )
    }

    pub fn summary(&self) -> String {
        match self {
            CardApplicationDecision::AutoAccepted => "application auto-accepted".to_string(),
            CardApplicationDecision::AutoDeclined => "application auto-declined".to_string(),
            CardApplicationDecision::ReferredToHuman => {
                "referred to a human underwriter".to_string()
            }
            CardApplicationDecision::ReferredToHumanFraudRisk => {
                "referred to a human underwriter: fraud risk".to_string()
            }
        }
    }
}
