mod config;
mod policy;

pub use config::ScreeningConfig;
pub use policy::CardApplicationDecision;

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use super::domain::CreditCardApplication;
use super::fraud::{FraudRiskCheck, NoFraudRisk};
use super::validator::{
    FrequentFlyerValidator, LookupObserver, ValidationError, ValidationMode,
};

const EXPIRED_LICENSE_KEY: &str = "EXPIRED";

/// Which calling convention to use against the validator. Both express the
/// same lookup; only the mechanism differs.
#[derive(Clone, Copy)]
enum LookupCall {
    Returning,
    OutSlot,
}

struct LookupCounter {
    lookups: Arc<AtomicU64>,
}

impl LookupObserver for LookupCounter {
    fn lookup_performed(&self) {
        self.lookups.fetch_add(1, Ordering::Relaxed);
    }
}

/// Applies the screening rubric to one application at a time.
///
/// The evaluator owns no state between evaluations apart from the lookup
/// counter, which it registers with the validator's lookup notification once
/// at construction.
pub struct CardApplicationEvaluator<V> {
    validator: Arc<V>,
    fraud_lookup: Arc<dyn FraudRiskCheck>,
    config: ScreeningConfig,
    lookups: Arc<AtomicU64>,
}

impl<V> CardApplicationEvaluator<V>
where
    V: FrequentFlyerValidator,
{
    pub fn new(validator: Arc<V>) -> Self {
        Self::with_fraud_lookup(validator, Arc::new(NoFraudRisk))
    }

    pub fn with_fraud_lookup(validator: Arc<V>, fraud_lookup: Arc<dyn FraudRiskCheck>) -> Self {
        Self::with_config(validator, fraud_lookup, ScreeningConfig::default())
    }

    pub fn with_config(
        validator: Arc<V>,
        fraud_lookup: Arc<dyn FraudRiskCheck>,
        config: ScreeningConfig,
    ) -> Self {
        let lookups = Arc::new(AtomicU64::new(0));
        validator.subscribe_lookup_performed(Arc::new(LookupCounter {
            lookups: lookups.clone(),
        }));

        Self {
            validator,
            fraud_lookup,
            config,
            lookups,
        }
    }

    /// Evaluate using the validator's value-returning lookup.
    pub fn evaluate(&self, application: &CreditCardApplication) -> CardApplicationDecision {
        self.decide(application, LookupCall::Returning)
    }

    /// Evaluate using the validator's out-slot lookup. Decisions are
    /// identical to [`Self::evaluate`] for identical validator behavior.
    pub fn evaluate_using_out(
        &self,
        application: &CreditCardApplication,
    ) -> CardApplicationDecision {
        self.decide(application, LookupCall::OutSlot)
    }

    /// Successful validator lookups observed since construction.
    pub fn lookup_count(&self) -> u64 {
        self.lookups.load(Ordering::Relaxed)
    }

    fn decide(
        &self,
        application: &CreditCardApplication,
        call: LookupCall,
    ) -> CardApplicationDecision {
        if self.fraud_lookup.is_fraud_risk(application) {
            return CardApplicationDecision::ReferredToHumanFraudRisk;
        }

        if application.gross_annual_income >= self.config.high_income_auto_accept {
            return CardApplicationDecision::AutoAccepted;
        }

        // One license read per evaluation that reaches this gate.
        let license_key = self.validator.service_information().license.license_key;
        if license_key.as_deref() == Some(EXPIRED_LICENSE_KEY) {
            return CardApplicationDecision::ReferredToHuman;
        }

        let mode = if application.age >= self.config.detailed_validation_age {
            ValidationMode::Detailed
        } else {
            ValidationMode::Quick
        };
        self.validator.set_validation_mode(mode);

        let valid = match self.lookup(application.frequent_flyer_number.as_deref(), call) {
            Ok(valid) => valid,
            Err(_) => return CardApplicationDecision::ReferredToHuman,
        };
        if !valid {
            return CardApplicationDecision::ReferredToHuman;
        }

        if application.age <= self.config.young_applicant_age {
            return CardApplicationDecision::ReferredToHuman;
        }

        if application.gross_annual_income < self.config.low_income_auto_decline {
            return CardApplicationDecision::AutoDeclined;
        }

        CardApplicationDecision::ReferredToHuman
    }

    fn lookup(
        &self,
        frequent_flyer_number: Option<&str>,
        call: LookupCall,
    ) -> Result<bool, ValidationError> {
        match call {
            LookupCall::Returning => self.validator.is_valid(frequent_flyer_number),
            LookupCall::OutSlot => {
                let mut is_valid = false;
                self.validator
                    .is_valid_out(frequent_flyer_number, &mut is_valid)?;
                Ok(is_valid)
            }
        }
    }
}
