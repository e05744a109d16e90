//! Property-based tests for the premium state machine.
//!
//! For arbitrary interleavings of intents with well-formed completion
//! events, the in-flight invariant must hold: `is_purchasing` is true only
//! strictly between a single accepted Subscribe/Restore and its completion,
//! and never across two attempts.

use aicat_premium::{
    Effect, Event, Intent, Offer, PremiumEngine, PurchaseOutcome, ToastId,
};
use proptest::prelude::*;

fn offer() -> Offer {
    Offer::new("p1", "$4.99")
}

fn intent_for(selector: u8) -> Intent {
    match selector {
        0 => Intent::Initialize,
        1 => Intent::Subscribe,
        2 => Intent::Restore,
        3 => Intent::RetryFetchOffer,
        // A fresh id is always stale relative to any displayed toast.
        _ => Intent::DismissToast { id: ToastId::new() },
    }
}

/// Resolves an effect the way the controller would, with `succeed`
/// deciding the provider's answer.
fn resolve(effect: &Effect, succeed: bool) -> Event {
    match effect {
        Effect::FetchOffer => Event::OfferFetched(succeed.then(offer)),
        Effect::CheckEntitlement => Event::EntitlementChecked(false),
        Effect::Purchase(_) => Event::PurchaseFinished(if succeed {
            PurchaseOutcome::succeeded()
        } else {
            PurchaseOutcome::failed("declined")
        }),
        Effect::RestorePurchases => Event::RestoreFinished { entitled: succeed },
    }
}

proptest! {
    #[test]
    fn purchasing_only_inside_a_single_attempt(
        steps in prop::collection::vec((0u8..5, any::<bool>()), 1..50),
    ) {
        let mut engine = PremiumEngine::new();

        for (selector, succeed) in steps {
            prop_assert!(!engine.state().is_purchasing());

            let effects = engine.handle_intent(intent_for(selector));

            // At most one attempt may be started by a single intent.
            let attempts = effects
                .iter()
                .filter(|e| matches!(e, Effect::Purchase(_) | Effect::RestorePurchases))
                .count();
            prop_assert!(attempts <= 1);
            prop_assert_eq!(attempts == 1, engine.state().is_purchasing());

            for effect in &effects {
                engine.handle_event(resolve(effect, succeed));
            }

            // Every attempt resolves back to a stable, non-purchasing state.
            prop_assert!(!engine.state().is_purchasing());
        }
    }

    #[test]
    fn guarded_intents_never_change_state_when_rejected(selector in 1u8..4) {
        // Engine without an offer: Subscribe, Restore, and retry outside
        // FetchFailed must all be rejected without touching state.
        let mut engine = PremiumEngine::new();
        engine.handle_intent(Intent::Initialize);
        let before = engine.state().clone();

        let effects = engine.handle_intent(intent_for(selector));
        prop_assert!(effects.is_empty());
        prop_assert_eq!(engine.state(), &before);
    }
}
