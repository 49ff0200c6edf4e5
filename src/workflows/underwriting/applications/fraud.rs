use std::collections::BTreeSet;

use super::domain::CreditCardApplication;

/// Fraud-risk capability consulted before any income-based logic.
///
/// `is_fraud_risk` is the only entry point the evaluator calls; the inner
/// `check_application` hook lets an implementation swap the risk rule while
/// keeping the outer plumbing.
#[mockall::automock]
pub trait FraudRiskCheck: Send + Sync {
    fn is_fraud_risk(&self, application: &CreditCardApplication) -> bool {
        self.check_application(application)
    }

    fn check_application(&self, application: &CreditCardApplication) -> bool;
}

/// Stand-in used when no fraud capability is supplied: nothing is a risk.
pub struct NoFraudRisk;

impl FraudRiskCheck for NoFraudRisk {
    fn check_application(&self, _application: &CreditCardApplication) -> bool {
        false
    }
}

/// Default rule: flag applications whose last name is on the watchlist.
pub struct WatchlistFraudLookup {
    watchlist: BTreeSet<String>,
}

impl WatchlistFraudLookup {
    pub fn new<I, S>(watchlist: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            watchlist: watchlist.into_iter().map(Into::into).collect(),
        }
    }
}

impl FraudRiskCheck for WatchlistFraudLookup {
    fn check_application(&self, application: &CreditCardApplication) -> bool {
        application
            .last_name
            .as_deref()
            .map(|name| self.watchlist.contains(name))
            .unwrap_or(false)
    }
}
