//! Purchase provider abstraction.
//!
//! The premium flow talks to the billing SDK through this narrow trait so
//! the controller never touches a concrete third-party singleton and can
//! run against [`mock::MockProvider`] in tests.

use crate::state::Offer;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Provider-reported purchase failure.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum PurchaseError {
    /// Failure with a human-readable description from the SDK.
    #[error("{0}")]
    Described(String),
    /// Failure with no usable description.
    #[error("purchase failed")]
    Undescribed,
}

/// The result of one purchase attempt.
///
/// Billing SDKs report success and error independently, so an outcome can
/// be successful, failed with a reason, or failed with nothing to show.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurchaseOutcome {
    /// Whether the transaction went through.
    pub success: bool,
    /// The reported error, if any.
    pub error: Option<PurchaseError>,
}

impl PurchaseOutcome {
    /// A successful purchase.
    #[must_use]
    pub fn succeeded() -> Self {
        Self {
            success: true,
            error: None,
        }
    }

    /// A failure with a description.
    pub fn failed(description: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(PurchaseError::Described(description.into())),
        }
    }

    /// A failure the SDK could not describe.
    #[must_use]
    pub fn failed_undescribed() -> Self {
        Self {
            success: false,
            error: Some(PurchaseError::Undescribed),
        }
    }

    /// Neither success nor error reported (e.g. user cancelled).
    #[must_use]
    pub fn failed_silently() -> Self {
        Self {
            success: false,
            error: None,
        }
    }
}

/// External purchasing capability.
#[async_trait]
pub trait PurchaseProvider: Send + Sync {
    /// Returns the first offer of the current paywall, or `None` when the
    /// paywall is empty or unreachable.
    async fn fetch_current_offer(&self) -> Option<Offer>;

    /// Runs one purchase attempt for the given offer.
    async fn purchase(&self, offer: &Offer) -> PurchaseOutcome;

    /// Replays past transactions with the store. The call's own result is
    /// not meaningful; entitlement is re-checked afterwards.
    async fn restore_purchases(&self);

    /// Whether the provider currently considers this user premium.
    async fn has_active_entitlement(&self) -> bool;
}

/// A mock provider for testing.
pub mod mock {
    use super::*;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    /// Scriptable in-memory provider.
    ///
    /// Purchase outcomes are consumed from a queue; an empty queue yields
    /// success. A successful purchase flips the entitlement flag, as the
    /// real SDK does.
    #[derive(Debug, Default)]
    pub struct MockProvider {
        offer: Mutex<Option<Offer>>,
        purchase_outcomes: Mutex<VecDeque<PurchaseOutcome>>,
        entitled: Mutex<bool>,
        fetch_calls: Mutex<u32>,
        purchase_calls: Mutex<u32>,
        restore_calls: Mutex<u32>,
    }

    impl MockProvider {
        /// Creates a provider with no offer and no entitlement.
        #[must_use]
        pub fn new() -> Self {
            Self::default()
        }

        /// Creates a provider whose paywall serves the given offer.
        #[must_use]
        pub fn with_offer(offer: Offer) -> Self {
            let provider = Self::default();
            provider.set_offer(Some(offer));
            provider
        }

        /// Replaces the served offer.
        pub fn set_offer(&self, offer: Option<Offer>) {
            *self.offer.lock().unwrap() = offer;
        }

        /// Queues the outcome of the next purchase call.
        pub fn queue_purchase_outcome(&self, outcome: PurchaseOutcome) {
            self.purchase_outcomes.lock().unwrap().push_back(outcome);
        }

        /// Sets the entitlement flag directly.
        pub fn set_entitled(&self, entitled: bool) {
            *self.entitled.lock().unwrap() = entitled;
        }

        /// Number of `fetch_current_offer` calls.
        pub fn fetch_calls(&self) -> u32 {
            *self.fetch_calls.lock().unwrap()
        }

        /// Number of `purchase` calls.
        pub fn purchase_calls(&self) -> u32 {
            *self.purchase_calls.lock().unwrap()
        }

        /// Number of `restore_purchases` calls.
        pub fn restore_calls(&self) -> u32 {
            *self.restore_calls.lock().unwrap()
        }
    }

    #[async_trait]
    impl PurchaseProvider for MockProvider {
        async fn fetch_current_offer(&self) -> Option<Offer> {
            *self.fetch_calls.lock().unwrap() += 1;
            self.offer.lock().unwrap().clone()
        }

        async fn purchase(&self, _offer: &Offer) -> PurchaseOutcome {
            *self.purchase_calls.lock().unwrap() += 1;
            let outcome = self
                .purchase_outcomes
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(PurchaseOutcome::succeeded);
            if outcome.success {
                *self.entitled.lock().unwrap() = true;
            }
            outcome
        }

        async fn restore_purchases(&self) {
            *self.restore_calls.lock().unwrap() += 1;
        }

        async fn has_active_entitlement(&self) -> bool {
            *self.entitled.lock().unwrap()
        }
    }
}
