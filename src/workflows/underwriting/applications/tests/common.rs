use std::sync::{Arc, Mutex};

use axum::http::StatusCode;
use axum::response::Response;
use serde_json::Value;

use crate::workflows::underwriting::applications::domain::{ApplicationId, CreditCardApplication};
use crate::workflows::underwriting::applications::memory::{
    InMemoryApplicationRepository, InMemoryReviewQueue,
};
use crate::workflows::underwriting::applications::repository::{
    ApplicationRecord, ApplicationRepository, RepositoryError, ReviewAlert, ReviewQueue,
    ReviewQueueError,
};
use crate::workflows::underwriting::applications::validator::{
    LicenseData, LookupObserver, MockFrequentFlyerValidator, ServiceInformation,
};
use crate::workflows::underwriting::applications::{
    application_router, CardApplicationService, FlyerDirectory,
};

pub(super) fn application(
    gross_annual_income: u32,
    age: u8,
    frequent_flyer_number: Option<&str>,
) -> CreditCardApplication {
    CreditCardApplication {
        gross_annual_income,
        age,
        frequent_flyer_number: frequent_flyer_number.map(str::to_string),
        last_name: None,
    }
}

/// Mock validator with the construction-time subscription already expected.
pub(super) fn mock_validator() -> MockFrequentFlyerValidator {
    let mut validator = MockFrequentFlyerValidator::new();
    validator
        .expect_subscribe_lookup_performed()
        .times(1)
        .returning(|_| ());
    validator
}

/// Mock validator that hands the subscribed observer back to the test so a
/// lookup expectation can raise the notification, mirroring the validator
/// contract's synchronous fire-on-lookup.
pub(super) fn observing_validator() -> (
    MockFrequentFlyerValidator,
    Arc<Mutex<Option<Arc<dyn LookupObserver>>>>,
) {
    let mut validator = MockFrequentFlyerValidator::new();
    let captured: Arc<Mutex<Option<Arc<dyn LookupObserver>>>> = Arc::new(Mutex::new(None));
    let slot = captured.clone();
    validator
        .expect_subscribe_lookup_performed()
        .times(1)
        .returning(move |observer| {
            *slot.lock().expect("observer slot poisoned") = Some(observer);
        });
    (validator, captured)
}

pub(super) fn notify(observer: &Arc<Mutex<Option<Arc<dyn LookupObserver>>>>) {
    if let Some(observer) = observer
        .lock()
        .expect("observer slot poisoned")
        .as_ref()
    {
        observer.lookup_performed();
    }
}

pub(super) fn stub_license(validator: &mut MockFrequentFlyerValidator, license_key: Option<&str>) {
    let license_key = license_key.map(str::to_string);
    validator
        .expect_service_information()
        .returning(move || ServiceInformation {
            license: LicenseData {
                license_key: license_key.clone(),
            },
        });
}

pub(super) type MemoryCardService =
    CardApplicationService<InMemoryApplicationRepository, InMemoryReviewQueue, FlyerDirectory>;

pub(super) fn build_service() -> (
    MemoryCardService,
    Arc<InMemoryApplicationRepository>,
    Arc<InMemoryReviewQueue>,
    Arc<FlyerDirectory>,
) {
    let repository = Arc::new(InMemoryApplicationRepository::default());
    let review_queue = Arc::new(InMemoryReviewQueue::default());
    let directory = Arc::new(FlyerDirectory::new("OK"));
    let service =
        CardApplicationService::new(repository.clone(), review_queue.clone(), directory.clone());
    (service, repository, review_queue, directory)
}

pub(super) fn service_router(service: MemoryCardService) -> axum::Router {
    application_router(Arc::new(service))
}

pub(super) struct ConflictRepository;

impl ApplicationRepository for ConflictRepository {
    fn insert(&self, _record: ApplicationRecord) -> Result<ApplicationRecord, RepositoryError> {
        Err(RepositoryError::Conflict)
    }

    fn update(&self, _record: ApplicationRecord) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("read only".to_string()))
    }

    fn fetch(&self, _id: &ApplicationId) -> Result<Option<ApplicationRecord>, RepositoryError> {
        Ok(None)
    }

    fn pending(&self, _limit: usize) -> Result<Vec<ApplicationRecord>, RepositoryError> {
        Ok(Vec::new())
    }
}

pub(super) struct UnavailableRepository;

impl ApplicationRepository for UnavailableRepository {
    fn insert(&self, _record: ApplicationRecord) -> Result<ApplicationRecord, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn update(&self, _record: ApplicationRecord) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn fetch(&self, _id: &ApplicationId) -> Result<Option<ApplicationRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn pending(&self, _limit: usize) -> Result<Vec<ApplicationRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

pub(super) struct ClosedReviewQueue;

impl ReviewQueue for ClosedReviewQueue {
    fn enqueue(&self, _alert: ReviewAlert) -> Result<(), ReviewQueueError> {
        Err(ReviewQueueError::Transport("queue offline".to_string()))
    }
}

pub(super) fn assert_conflict_response(response: Response) {
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
