//! Credit card application intake and decisioning.
//!
//! The decision evaluator composes two injected capabilities, a fraud-risk
//! check and a frequent-flyer validator, and applies an ordered sequence of
//! short-circuiting gates to each application. The surrounding service,
//! repository, and router modules carry stored applications through the
//! workflow and expose the results over HTTP.

pub mod domain;
pub mod evaluation;
pub mod fraud;
pub mod memory;
pub mod repository;
pub mod router;
pub mod service;
pub mod validator;

#[cfg(test)]
mod tests;

pub use domain::{ApplicationId, CardApplicationStatus, CreditCardApplication};
pub use evaluation::{CardApplicationDecision, CardApplicationEvaluator, ScreeningConfig};
pub use fraud::{FraudRiskCheck, NoFraudRisk, WatchlistFraudLookup};
pub use memory::{InMemoryApplicationRepository, InMemoryReviewQueue};
pub use repository::{
    ApplicationRecord, ApplicationRepository, ApplicationStatusView, RepositoryError, ReviewAlert,
    ReviewQueue, ReviewQueueError,
};
pub use router::application_router;
pub use service::{ApplicationServiceError, CardApplicationService};
pub use validator::{
    FlyerDirectory, FrequentFlyerValidator, LicenseData, LookupObserver, ServiceInformation,
    ValidationError, ValidationMode,
};
