use crate::services::geocoder::Geocode;
use crate::validation::debounce::Debouncer;
use serde::Serialize;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Shown when the collaborator answers without usable coordinates.
pub const NO_COORDINATES_MESSAGE: &str = "Could not find coordinates for this address";

/// Validation state of an address field
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum AddressState {
    Idle,
    Checking,
    Resolved {
        latitude: f64,
        longitude: f64,
        #[serde(rename = "formattedAddress")]
        formatted_address: String,
    },
    Failed {
        message: String,
    },
}

struct FieldInner {
    text: String,
    state: AddressState,
}

/// A debounced, geocoder-backed address input field.
///
/// Keystrokes go through `input`; after the quiet period the current text is
/// resolved against the geocoding collaborator and the field moves through
/// `Idle -> Checking -> Resolved | Failed`. A successful resolution replaces
/// the field text with the collaborator's formatted address; a failure leaves
/// the text untouched. Responses that arrive for superseded input are
/// discarded.
///
/// Fields are independent: each owns its timer and sequence marker, so
/// multiple address fields never contend with each other.
pub struct AddressField<G> {
    geocoder: Arc<G>,
    debouncer: Debouncer,
    inner: Arc<Mutex<FieldInner>>,
}

impl<G: Geocode + 'static> AddressField<G> {
    pub fn new(geocoder: Arc<G>, quiet_period: Duration) -> Self {
        Self {
            geocoder,
            debouncer: Debouncer::new(quiet_period),
            inner: Arc::new(Mutex::new(FieldInner {
                text: String::new(),
                state: AddressState::Idle,
            })),
        }
    }

    /// Feed the field's current text after a keystroke.
    ///
    /// An emptied field drops straight back to Idle without a collaborator
    /// call; otherwise a resolution is scheduled for after the quiet period,
    /// cancelling whatever was pending.
    pub fn input(&self, text: &str) {
        // Holding the field lock across the reschedule keeps the sequence
        // bump and the state write atomic with respect to completing work.
        let mut inner = self.inner.lock().unwrap();
        inner.text = text.to_string();

        if text.trim().is_empty() {
            inner.state = AddressState::Idle;
            self.debouncer.cancel();
            return;
        }

        let geocoder = Arc::clone(&self.geocoder);
        let field = Arc::clone(&self.inner);
        let debouncer = self.debouncer.clone();
        let query = text.to_string();

        self.debouncer.schedule(move |seq| async move {
            field.lock().unwrap().state = AddressState::Checking;

            let result = geocoder.resolve(&query).await;

            let mut field = field.lock().unwrap();
            // Superseded while the call was in flight
            if !debouncer.is_current(seq) {
                return;
            }

            match result {
                Ok(Some(resolved)) => {
                    field.text = resolved.formatted_address.clone();
                    field.state = AddressState::Resolved {
                        latitude: resolved.latitude,
                        longitude: resolved.longitude,
                        formatted_address: resolved.formatted_address,
                    };
                }
                Ok(None) => {
                    field.state = AddressState::Failed {
                        message: NO_COORDINATES_MESSAGE.to_string(),
                    };
                }
                Err(err) => {
                    tracing::debug!("Address resolution failed: {}", err);
                    field.state = AddressState::Failed {
                        message: format!("Address lookup failed: {}", err),
                    };
                }
            }
        });
    }

    /// Current validation state.
    pub fn state(&self) -> AddressState {
        self.inner.lock().unwrap().state.clone()
    }

    /// Current displayed text (the formatted address after a resolution).
    pub fn text(&self) -> String {
        self.inner.lock().unwrap().text.clone()
    }
}
