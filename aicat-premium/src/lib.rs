//! Premium entitlement and purchase flow for AICat.
//!
//! Mediates between UI-triggered intents and the external purchase
//! provider, exposing a single state snapshot for rendering.
//!
//! # Architecture
//!
//! - **State**: the snapshot the UI renders (offer, toast, phase,
//!   entitlement)
//! - **Engine**: a pure state machine — consumes intents and
//!   effect-completion events, returns effects, never does I/O
//! - **Provider**: a narrow trait over the billing SDK, with a mock for
//!   tests
//! - **Controller**: executes effects, one intent at a time
//!
//! Entitlement is derived from two sources: a locally stored license key
//! (see `aicat-license`) or provider-confirmed premium access. All provider
//! failures are converted into toasts; the flow always settles back into a
//! stable ready state after any attempt.
//!
//! # Example
//!
//! ```
//! use aicat_premium::{Effect, Intent, PremiumEngine};
//!
//! let mut engine = PremiumEngine::new();
//! let effects = engine.handle_intent(Intent::Initialize);
//! assert_eq!(effects, vec![Effect::FetchOffer, Effect::CheckEntitlement]);
//! ```

mod controller;
mod engine;
pub mod provider;
mod state;

pub use controller::PremiumController;
pub use engine::{Effect, Event, Intent, PremiumEngine};
pub use provider::{PurchaseError, PurchaseOutcome, PurchaseProvider};
pub use state::{Offer, Phase, PremiumState, Toast, ToastId, ToastKind};
