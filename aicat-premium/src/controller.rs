//! Effect executor for the premium engine.

use crate::engine::{Effect, Event, Intent, PremiumEngine};
use crate::provider::PurchaseProvider;
use crate::state::PremiumState;
use aicat_license::LicenseStore;
use std::collections::VecDeque;
use std::sync::Arc;
use tracing::debug;

/// Drives the premium flow: feeds intents to the engine and executes the
/// resulting effects against the purchase provider and license store.
///
/// `dispatch` takes `&mut self`, so intents are processed one at a time in
/// arrival order and the engine's guards never see a half-finished
/// attempt. Provider calls are awaited to completion; there is no
/// cancellation and no timeout.
pub struct PremiumController {
    engine: PremiumEngine,
    provider: Arc<dyn PurchaseProvider>,
    license: Arc<dyn LicenseStore>,
}

impl PremiumController {
    /// Creates a controller in the idle state.
    pub fn new(provider: Arc<dyn PurchaseProvider>, license: Arc<dyn LicenseStore>) -> Self {
        Self {
            engine: PremiumEngine::new(),
            provider,
            license,
        }
    }

    /// The read-only state snapshot for rendering.
    pub fn state(&self) -> &PremiumState {
        self.engine.state()
    }

    /// Processes one intent and runs all resulting effects to quiescence.
    pub async fn dispatch(&mut self, intent: Intent) {
        self.engine
            .set_license_key_present(self.license.stored_key().is_some());

        let mut queue: VecDeque<Effect> = self.engine.handle_intent(intent).into();
        while let Some(effect) = queue.pop_front() {
            let event = self.run_effect(effect).await;
            queue.extend(self.engine.handle_event(event));
        }
    }

    async fn run_effect(&self, effect: Effect) -> Event {
        match effect {
            Effect::FetchOffer => Event::OfferFetched(self.provider.fetch_current_offer().await),
            Effect::CheckEntitlement => {
                Event::EntitlementChecked(self.provider.has_active_entitlement().await)
            }
            Effect::Purchase(offer) => {
                debug!(product = %offer.product_id, "executing purchase");
                Event::PurchaseFinished(self.provider.purchase(&offer).await)
            }
            Effect::RestorePurchases => {
                // The restore call's own result is discarded; entitlement
                // is whatever the provider reports afterwards.
                self.provider.restore_purchases().await;
                Event::RestoreFinished {
                    entitled: self.provider.has_active_entitlement().await,
                }
            }
        }
    }
}
