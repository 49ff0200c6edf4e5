use std::collections::BTreeSet;
use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};

/// Lookup depth instruction written to the validator before a lookup.
///
/// The evaluator writes this field and never reads it back.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValidationMode {
    #[default]
    Quick,
    Detailed,
}

/// Licensing metadata published by the validation service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LicenseData {
    pub license_key: Option<String>,
}

/// Service metadata snapshot; callers must re-request it for every evaluation
/// rather than cache the license across calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceInformation {
    pub license: LicenseData,
}

/// Failure raised by a frequent-flyer lookup.
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("frequent flyer service unavailable: {0}")]
    ServiceUnavailable(String),
    #[error("frequent flyer service rejected the lookup: {0}")]
    LookupRejected(String),
}

/// Observer notified synchronously each time a lookup completes, at most once
/// per successful lookup.
pub trait LookupObserver: Send + Sync {
    fn lookup_performed(&self);
}

/// Frequent-flyer validation capability bundle.
///
/// `is_valid` and `is_valid_out` perform the same lookup; the out-slot form
/// exists for deployments that cannot return the verdict directly and write
/// it through the slot instead. Either form may fail.
#[mockall::automock]
pub trait FrequentFlyerValidator: Send + Sync {
    fn is_valid<'a>(
        &self,
        frequent_flyer_number: Option<&'a str>,
    ) -> Result<bool, ValidationError>;

    fn is_valid_out<'a>(
        &self,
        frequent_flyer_number: Option<&'a str>,
        is_valid: &mut bool,
    ) -> Result<(), ValidationError>;

    fn set_validation_mode(&self, mode: ValidationMode);

    fn service_information(&self) -> ServiceInformation;

    fn subscribe_lookup_performed(&self, observer: Arc<dyn LookupObserver>);
}

/// Directory-backed validator: a number is valid when it is enrolled.
///
/// Serves the HTTP service, the batch CLI, and the integration tests; fires
/// the lookup notification on every successful lookup through either calling
/// convention.
pub struct FlyerDirectory {
    members: Mutex<BTreeSet<String>>,
    license_key: Mutex<Option<String>>,
    mode: Mutex<ValidationMode>,
    observers: Mutex<Vec<Arc<dyn LookupObserver>>>,
}

impl FlyerDirectory {
    pub fn new(license_key: impl Into<String>) -> Self {
        Self {
            members: Mutex::new(BTreeSet::new()),
            license_key: Mutex::new(Some(license_key.into())),
            mode: Mutex::new(ValidationMode::default()),
            observers: Mutex::new(Vec::new()),
        }
    }

    pub fn enroll(&self, frequent_flyer_number: impl Into<String>) {
        self.members
            .lock()
            .expect("directory mutex poisoned")
            .insert(frequent_flyer_number.into());
    }

    pub fn set_license_key(&self, license_key: Option<String>) {
        *self.license_key.lock().expect("license mutex poisoned") = license_key;
    }

    pub fn validation_mode(&self) -> ValidationMode {
        *self.mode.lock().expect("mode mutex poisoned")
    }

    fn notify_lookup_performed(&self) {
        let observers = self.observers.lock().expect("observer mutex poisoned");
        for observer in observers.iter() {
            observer.lookup_performed();
        }
    }
}

impl FrequentFlyerValidator for FlyerDirectory {
    fn is_valid<'a>(
        &self,
        frequent_flyer_number: Option<&'a str>,
    ) -> Result<bool, ValidationError> {
        let valid = match frequent_flyer_number {
            Some(number) => self
                .members
                .lock()
                .expect("directory mutex poisoned")
                .contains(number),
            None => false,
        };
        self.notify_lookup_performed();
        Ok(valid)
    }

    fn is_valid_out<'a>(
        &self,
        frequent_flyer_number: Option<&'a str>,
        is_valid: &mut bool,
    ) -> Result<(), ValidationError> {
        *is_valid = self.is_valid(frequent_flyer_number)?;
        Ok(())
    }

    fn set_validation_mode(&self, mode: ValidationMode) {
        *self.mode.lock().expect("mode mutex poisoned") = mode;
    }

    fn service_information(&self) -> ServiceInformation {
        let license_key = self
            .license_key
            .lock()
            .expect("license mutex poisoned")
            .clone();
        ServiceInformation {
            license: LicenseData { license_key },
        }
    }

    fn subscribe_lookup_performed(&self, observer: Arc<dyn LookupObserver>) {
        self.observers
            .lock()
            .expect("observer mutex poisoned")
            .push(observer);
    }
}
