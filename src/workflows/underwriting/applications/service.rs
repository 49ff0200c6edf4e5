use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Local;

use super::domain::{ApplicationId, CardApplicationStatus, CreditCardApplication};
use super::evaluation::{CardApplicationDecision, CardApplicationEvaluator, ScreeningConfig};
use super::fraud::FraudRiskCheck;
use super::repository::{
    ApplicationRecord, ApplicationRepository, RepositoryError, ReviewAlert, ReviewQueue,
    ReviewQueueError,
};
use super::validator::FrequentFlyerValidator;

/// Service composing the repository, review queue, and decision evaluator.
pub struct CardApplicationService<R, Q, V> {
    repository: Arc<R>,
    review_queue: Arc<Q>,
    evaluator: CardApplicationEvaluator<V>,
}

static APPLICATION_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_application_id() -> ApplicationId {
    let id = APPLICATION_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    ApplicationId(format!("card-{id:06}"))
}

impl<R, Q, V> CardApplicationService<R, Q, V>
where
    R: ApplicationRepository + 'static,
    Q: ReviewQueue + 'static,
    V: FrequentFlyerValidator + 'static,
{
    pub fn new(repository: Arc<R>, review_queue: Arc<Q>, validator: Arc<V>) -> Self {
        Self {
            repository,
            review_queue,
            evaluator: CardApplicationEvaluator::new(validator),
        }
    }

    pub fn with_fraud_lookup(
        repository: Arc<R>,
        review_queue: Arc<Q>,
        validator: Arc<V>,
        fraud_lookup: Arc<dyn FraudRiskCheck>,
        config: ScreeningConfig,
    ) -> Self {
        Self {
            repository,
            review_queue,
            evaluator: CardApplicationEvaluator::with_config(validator, fraud_lookup, config),
        }
    }

    /// Submit a new application, returning the repository-backed record.
    pub fn submit(
        &self,
        application: CreditCardApplication,
    ) -> Result<ApplicationRecord, ApplicationServiceError> {
        let record = ApplicationRecord {
            application_id: next_application_id(),
            application,
            status: CardApplicationStatus::Submitted,
            decision: None,
            received_on: Local::now().date_naive(),
        };

        let stored = self.repository.insert(record)?;
        Ok(stored)
    }

    /// Evaluate a stored application, persist the outcome, and route
    /// referrals to the review queue.
    pub fn decide(
        &self,
        application_id: &ApplicationId,
    ) -> Result<CardApplicationDecision, ApplicationServiceError> {
        let mut record = self
            .repository
            .fetch(application_id)?
            .ok_or(RepositoryError::NotFound)?;

        let decision = self.evaluator.evaluate(&record.application);

        record.status = match decision {
            CardApplicationDecision::AutoAccepted => CardApplicationStatus::Approved,
            CardApplicationDecision::AutoDeclined => CardApplicationStatus::Declined,
            CardApplicationDecision::ReferredToHuman
            | CardApplicationDecision::ReferredToHumanFraudRisk => {
                CardApplicationStatus::UnderReview
            }
        };
        record.decision = Some(decision);

        self.repository.update(record)?;

        if decision.is_referral() {
            let mut details = BTreeMap::new();
            details.insert("decision".to_string(), decision.label().to_string());
            self.review_queue.enqueue(ReviewAlert {
                reason: decision.summary(),
                application_id: application_id.clone(),
                details,
            })?;
        }

        Ok(decision)
    }

    /// Fetch an application and current status for API responses.
    pub fn get(
        &self,
        application_id: &ApplicationId,
    ) -> Result<ApplicationRecord, ApplicationServiceError> {
        let record = self
            .repository
            .fetch(application_id)?
            .ok_or(RepositoryError::NotFound)?;
        Ok(record)
    }

    /// Successful frequent-flyer lookups performed across all decisions.
    pub fn lookup_count(&self) -> u64 {
        self.evaluator.lookup_count()
    }
}

/// Error raised by the application service.
#[derive(Debug, thiserror::Error)]
pub enum ApplicationServiceError {
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error(transparent)]
    Review(#[from] ReviewQueueError),
}
