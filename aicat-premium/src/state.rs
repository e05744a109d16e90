//! Purchase state exposed to the UI layer.
//!
//! The state is created with idle defaults when the controller is built,
//! populated by the initialize fetch, mutated only through intents and
//! effect-completion events, and dropped with the controller. It is never
//! persisted.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;
use uuid::Uuid;

/// A purchasable subscription product as returned by the provider's
/// paywall configuration. Immutable once fetched; replaced only by a
/// re-fetch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Offer {
    /// Provider product identifier.
    pub product_id: String,
    /// Human-readable localized price (e.g. "$4.99").
    pub price: String,
}

impl Offer {
    /// Creates an offer.
    pub fn new(product_id: impl Into<String>, price: impl Into<String>) -> Self {
        Self {
            product_id: product_id.into(),
            price: price.into(),
        }
    }
}

/// Unique identifier for a toast.
/// Uses UUID v7 which embeds a timestamp for natural ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ToastId(Uuid);

impl ToastId {
    /// Creates a new toast ID with the current timestamp.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    /// Returns the underlying UUID.
    #[must_use]
    pub const fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for ToastId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ToastId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Whether a toast reports success or failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToastKind {
    Success,
    Error,
}

/// A transient notification.
///
/// The embedding UI drives expiry: after `duration` it sends
/// `Intent::DismissToast` carrying this toast's `id`. A newer toast
/// replaces the current one, and a dismiss carrying the old id is then
/// ignored, so a stale expiry timer can never clear a newer toast.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Toast {
    pub id: ToastId,
    pub kind: ToastKind,
    pub message: String,
    pub duration: Duration,
}

impl Toast {
    /// Creates a success toast.
    pub fn success(message: impl Into<String>, duration: Duration) -> Self {
        Self {
            id: ToastId::new(),
            kind: ToastKind::Success,
            message: message.into(),
            duration,
        }
    }

    /// Creates an error toast.
    pub fn error(message: impl Into<String>, duration: Duration) -> Self {
        Self {
            id: ToastId::new(),
            kind: ToastKind::Error,
            message: message.into(),
            duration,
        }
    }
}

/// Where the premium flow is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Created, not yet initialized.
    Idle,
    /// Fetching the current offer from the provider.
    FetchingOffer,
    /// Offer loaded; accepting purchase and restore intents.
    Ready,
    /// Offer fetch returned nothing; a retry is available.
    FetchFailed,
    /// A purchase attempt is in flight.
    Purchasing,
    /// A restore attempt is in flight.
    Restoring,
}

/// The state snapshot rendered by the UI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PremiumState {
    /// Current lifecycle phase.
    pub phase: Phase,
    /// The loaded offer, if any.
    pub offer: Option<Offer>,
    /// The current toast, if any.
    pub toast: Option<Toast>,
    /// Entitlement as last confirmed by the provider.
    pub provider_entitled: bool,
    /// Whether a local license key is stored.
    pub license_key_present: bool,
}

impl PremiumState {
    /// Creates the initial state.
    #[must_use]
    pub fn new() -> Self {
        Self {
            phase: Phase::Idle,
            offer: None,
            toast: None,
            provider_entitled: false,
            license_key_present: false,
        }
    }

    /// True while exactly one purchase or restore attempt is in flight.
    #[must_use]
    pub fn is_purchasing(&self) -> bool {
        matches!(self.phase, Phase::Purchasing | Phase::Restoring)
    }

    /// Premium access: a stored license key or provider-confirmed
    /// entitlement.
    #[must_use]
    pub fn is_entitled(&self) -> bool {
        self.license_key_present || self.provider_entitled
    }

    /// Localized price of the loaded offer, if any.
    #[must_use]
    pub fn price(&self) -> Option<&str> {
        self.offer.as_ref().map(|o| o.price.as_str())
    }
}

impl Default for PremiumState {
    fn default() -> Self {
        Self::new()
    }
}
