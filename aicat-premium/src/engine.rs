//! Premium flow engine — stateful purchase logic without I/O.
//!
//! The engine is a pure state machine: it consumes intents and
//! effect-completion events, mutates [`PremiumState`], and returns effects.
//! The controller executes the effects against the provider and feeds the
//! completions back in. Guard rejections and events arriving in a phase
//! that did not request them leave the state untouched.

use crate::provider::{PurchaseError, PurchaseOutcome};
use crate::state::{Offer, Phase, PremiumState, Toast, ToastId};
use std::time::Duration;
use tracing::{debug, info, warn};

const MSG_PREMIUM_UNLOCKED: &str = "You get AICat Premium Now!";
const MSG_NOT_PREMIUM: &str = "You are not premium user!";
const MSG_PURCHASE_FAILED: &str = "Purchase failed!";

const TOAST_SHORT: Duration = Duration::from_secs(2);
const TOAST_LONG: Duration = Duration::from_secs(4);

/// A UI-triggered intent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    /// Start the offer fetch and entitlement refresh. Accepted once.
    Initialize,
    /// Begin a purchase attempt for the loaded offer.
    Subscribe,
    /// Replay past purchases and re-check entitlement.
    Restore,
    /// Re-run the offer fetch after a failed one.
    RetryFetchOffer,
    /// Clear the current toast if it still carries this id. Sent by
    /// explicit user dismissal and by the toast's own expiry timer.
    DismissToast { id: ToastId },
}

/// Completion of an effect previously requested by the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// The offer fetch finished.
    OfferFetched(Option<Offer>),
    /// The entitlement check finished.
    EntitlementChecked(bool),
    /// The purchase attempt finished.
    PurchaseFinished(PurchaseOutcome),
    /// The restore attempt finished; `entitled` is the provider's
    /// post-restore truth.
    RestoreFinished { entitled: bool },
}

/// A side effect for the controller to execute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Fetch the first offer of the current paywall.
    FetchOffer,
    /// Ask the provider whether the user is premium.
    CheckEntitlement,
    /// Run one purchase attempt.
    Purchase(Offer),
    /// Replay past transactions, then re-check entitlement.
    RestorePurchases,
}

/// The premium flow engine.
#[derive(Debug, Default)]
pub struct PremiumEngine {
    state: PremiumState,
}

impl PremiumEngine {
    /// Creates an engine in the idle state.
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: PremiumState::new(),
        }
    }

    /// Returns the current state.
    pub fn state(&self) -> &PremiumState {
        &self.state
    }

    /// Marks whether a local license key is stored. The controller
    /// refreshes this before every intent.
    pub fn set_license_key_present(&mut self, present: bool) {
        self.state.license_key_present = present;
    }

    /// Processes a UI intent, returning the effects to execute.
    pub fn handle_intent(&mut self, intent: Intent) -> Vec<Effect> {
        match intent {
            Intent::Initialize => {
                if self.state.phase != Phase::Idle {
                    debug!(phase = ?self.state.phase, "ignoring initialize");
                    return Vec::new();
                }
                self.state.phase = Phase::FetchingOffer;
                vec![Effect::FetchOffer, Effect::CheckEntitlement]
            }
            Intent::RetryFetchOffer => {
                if self.state.phase != Phase::FetchFailed {
                    debug!(phase = ?self.state.phase, "ignoring offer retry");
                    return Vec::new();
                }
                self.state.phase = Phase::FetchingOffer;
                vec![Effect::FetchOffer]
            }
            Intent::Subscribe => {
                if self.state.phase != Phase::Ready || self.state.is_entitled() {
                    debug!(
                        phase = ?self.state.phase,
                        entitled = self.state.is_entitled(),
                        "ignoring subscribe"
                    );
                    return Vec::new();
                }
                let Some(offer) = self.state.offer.clone() else {
                    return Vec::new();
                };
                info!(product = %offer.product_id, "starting purchase");
                self.state.phase = Phase::Purchasing;
                vec![Effect::Purchase(offer)]
            }
            Intent::Restore => {
                if self.state.phase != Phase::Ready || self.state.offer.is_none() {
                    debug!(phase = ?self.state.phase, "ignoring restore");
                    return Vec::new();
                }
                info!("starting restore");
                self.state.phase = Phase::Restoring;
                vec![Effect::RestorePurchases]
            }
            Intent::DismissToast { id } => {
                if self.state.toast.as_ref().is_some_and(|t| t.id == id) {
                    self.state.toast = None;
                }
                Vec::new()
            }
        }
    }

    /// Processes an effect completion, returning any follow-up effects.
    pub fn handle_event(&mut self, event: Event) -> Vec<Effect> {
        match event {
            Event::OfferFetched(offer) => {
                if self.state.phase != Phase::FetchingOffer {
                    debug!(phase = ?self.state.phase, "dropping stray offer result");
                    return Vec::new();
                }
                match offer {
                    Some(offer) => {
                        info!(product = %offer.product_id, price = %offer.price, "offer loaded");
                        self.state.offer = Some(offer);
                        self.state.phase = Phase::Ready;
                    }
                    None => {
                        warn!("paywall returned no offer");
                        self.state.phase = Phase::FetchFailed;
                    }
                }
                Vec::new()
            }
            Event::EntitlementChecked(entitled) => {
                debug!(entitled, "entitlement checked");
                self.state.provider_entitled = entitled;
                Vec::new()
            }
            Event::PurchaseFinished(outcome) => {
                if self.state.phase != Phase::Purchasing {
                    debug!(phase = ?self.state.phase, "dropping stray purchase result");
                    return Vec::new();
                }
                if outcome.success {
                    info!("purchase succeeded");
                    self.state.provider_entitled = true;
                    self.show_toast(Toast::success(MSG_PREMIUM_UNLOCKED, TOAST_SHORT));
                }
                match outcome.error {
                    Some(PurchaseError::Described(description)) => {
                        warn!(error = %description, "purchase failed");
                        self.show_toast(Toast::error(
                            format!("Purchase failed, {description})"),
                            TOAST_LONG,
                        ));
                    }
                    Some(PurchaseError::Undescribed) => {
                        warn!("purchase failed without description");
                        self.show_toast(Toast::error(MSG_PURCHASE_FAILED, TOAST_SHORT));
                    }
                    None => {}
                }
                // Toast before leaving the purchasing phase: no snapshot
                // may show the spinner and the outcome toast together.
                self.state.phase = Phase::Ready;
                Vec::new()
            }
            Event::RestoreFinished { entitled } => {
                if self.state.phase != Phase::Restoring {
                    debug!(phase = ?self.state.phase, "dropping stray restore result");
                    return Vec::new();
                }
                self.state.provider_entitled = entitled;
                if entitled {
                    info!("restore confirmed entitlement");
                    self.show_toast(Toast::success(MSG_PREMIUM_UNLOCKED, TOAST_SHORT));
                } else {
                    info!("restore found no entitlement");
                    self.show_toast(Toast::error(MSG_NOT_PREMIUM, TOAST_SHORT));
                }
                self.state.phase = Phase::Ready;
                Vec::new()
            }
        }
    }

    // A newer toast supersedes the current one unconditionally.
    fn show_toast(&mut self, toast: Toast) {
        self.state.toast = Some(toast);
    }
}
