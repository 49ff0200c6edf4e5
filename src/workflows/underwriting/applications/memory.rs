use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use super::domain::{ApplicationId, CardApplicationStatus};
use super::repository::{
    ApplicationRecord, ApplicationRepository, RepositoryError, ReviewAlert, ReviewQueue,
    ReviewQueueError,
};

/// In-memory repository backing the server, the batch CLI, and tests.
#[derive(Default, Clone)]
pub struct InMemoryApplicationRepository {
    records: Arc<Mutex<HashMap<ApplicationId, ApplicationRecord>>>,
}

impl ApplicationRepository for InMemoryApplicationRepository {
    fn insert(&self, record: ApplicationRecord) -> Result<ApplicationRecord, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if guard.contains_key(&record.application_id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(record.application_id.clone(), record.clone());
        Ok(record)
    }

    fn update(&self, record: ApplicationRecord) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if guard.contains_key(&record.application_id) {
            guard.insert(record.application_id.clone(), record);
            Ok(())
        } else {
            Err(RepositoryError::NotFound)
        }
    }

    fn fetch(&self, id: &ApplicationId) -> Result<Option<ApplicationRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn pending(&self, limit: usize) -> Result<Vec<ApplicationRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard
            .values()
            .filter(|record| record.status == CardApplicationStatus::UnderReview)
            .take(limit)
            .cloned()
            .collect())
    }
}

/// In-memory review queue with an accessor so tests can assert alerts.
#[derive(Default, Clone)]
pub struct InMemoryReviewQueue {
    alerts: Arc<Mutex<Vec<ReviewAlert>>>,
}

impl InMemoryReviewQueue {
    pub fn alerts(&self) -> Vec<ReviewAlert> {
        self.alerts.lock().expect("review queue mutex poisoned").clone()
    }
}

impl ReviewQueue for InMemoryReviewQueue {
    fn enqueue(&self, alert: ReviewAlert) -> Result<(), ReviewQueueError> {
        self.alerts
            .lock()
            .expect("review queue mutex poisoned")
            .push(alert);
        Ok(())
    }
}
