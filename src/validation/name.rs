use crate::services::directory::NameLookup;
use crate::validation::debounce::Debouncer;
use serde::Serialize;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Shown when the existence lookup itself fails.
pub const LOOKUP_FAILED_MESSAGE: &str = "Could not verify name availability";

/// Validation state of the restaurant-name field
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum NameState {
    Unchecked,
    Checking,
    Available,
    Taken,
    Failed { message: String },
}

struct FieldInner {
    text: String,
    state: NameState,
}

/// A debounced uniqueness check for the restaurant-name field.
///
/// Follows the same debounce and stale-discard discipline as the address
/// field, with a shorter quiet period and the available/taken outcome pair.
/// In edit mode the record being edited is excluded from the lookup so a
/// restaurant's own name never reads as taken.
pub struct NameField<L> {
    lookup: Arc<L>,
    exclude_id: Option<String>,
    debouncer: Debouncer,
    inner: Arc<Mutex<FieldInner>>,
}

impl<L: NameLookup + 'static> NameField<L> {
    pub fn new(lookup: Arc<L>, quiet_period: Duration) -> Self {
        Self::with_exclusion(lookup, quiet_period, None)
    }

    /// Edit-mode constructor: `exclude_id` is the record being edited.
    pub fn with_exclusion(
        lookup: Arc<L>,
        quiet_period: Duration,
        exclude_id: Option<String>,
    ) -> Self {
        Self {
            lookup,
            exclude_id,
            debouncer: Debouncer::new(quiet_period),
            inner: Arc::new(Mutex::new(FieldInner {
                text: String::new(),
                state: NameState::Unchecked,
            })),
        }
    }

    /// Feed the field's current text after a keystroke.
    pub fn input(&self, text: &str) {
        let mut inner = self.inner.lock().unwrap();
        inner.text = text.to_string();

        if text.trim().is_empty() {
            inner.state = NameState::Unchecked;
            self.debouncer.cancel();
            return;
        }

        let lookup = Arc::clone(&self.lookup);
        let field = Arc::clone(&self.inner);
        let debouncer = self.debouncer.clone();
        let name = text.to_string();
        let exclude_id = self.exclude_id.clone();

        self.debouncer.schedule(move |seq| async move {
            field.lock().unwrap().state = NameState::Checking;

            let result = lookup.name_exists(&name, exclude_id.as_deref()).await;

            let mut field = field.lock().unwrap();
            if !debouncer.is_current(seq) {
                return;
            }

            field.state = match result {
                Ok(true) => NameState::Taken,
                Ok(false) => NameState::Available,
                Err(err) => {
                    tracing::debug!("Name lookup failed: {}", err);
                    NameState::Failed {
                        message: LOOKUP_FAILED_MESSAGE.to_string(),
                    }
                }
            };
        });
    }

    /// Current validation state.
    pub fn state(&self) -> NameState {
        self.inner.lock().unwrap().state.clone()
    }

    /// Current field text.
    pub fn text(&self) -> String {
        self.inner.lock().unwrap().text.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::directory::DirectoryError;
    use std::collections::HashSet;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct StubLookup {
        taken: HashSet<String>,
        fail: bool,
        calls: AtomicUsize,
        last_exclude: Mutex<Option<String>>,
    }

    impl StubLookup {
        fn with_taken(names: &[&str]) -> Self {
            Self {
                taken: names.iter().map(|n| n.to_lowercase()).collect(),
                fail: false,
                calls: AtomicUsize::new(0),
                last_exclude: Mutex::new(None),
            }
        }

        fn failing() -> Self {
            Self {
                taken: HashSet::new(),
                fail: true,
                calls: AtomicUsize::new(0),
                last_exclude: Mutex::new(None),
            }
        }
    }

    impl NameLookup for StubLookup {
        async fn name_exists(
            &self,
            name: &str,
            exclude_id: Option<&str>,
        ) -> Result<bool, DirectoryError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            *self.last_exclude.lock().unwrap() = exclude_id.map(|s| s.to_string());

            if self.fail {
                return Err(DirectoryError::ApiError("500 Internal Server Error".into()));
            }
            // The stub pretends the exclusion always refers to the record
            // owning the name, mirroring edit mode.
            if exclude_id.is_some() {
                return Ok(false);
            }
            Ok(self.taken.contains(&name.to_lowercase()))
        }
    }

    const QUIET: Duration = Duration::from_millis(20);

    async fn settle() {
        tokio::time::sleep(Duration::from_millis(100)).await;
    }

    #[tokio::test]
    async fn test_available_name() {
        let lookup = Arc::new(StubLookup::with_taken(&["Erol Döner"]));
        let field = NameField::new(Arc::clone(&lookup), QUIET);

        field.input("Brand New Bistro");
        settle().await;

        assert_eq!(field.state(), NameState::Available);
        assert_eq!(lookup.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_taken_name_case_insensitive() {
        let lookup = Arc::new(StubLookup::with_taken(&["Erol Döner"]));
        let field = NameField::new(lookup, QUIET);

        field.input("erol döner");
        settle().await;

        assert_eq!(field.state(), NameState::Taken);
    }

    #[tokio::test]
    async fn test_empty_input_resets_to_unchecked() {
        let lookup = Arc::new(StubLookup::with_taken(&[]));
        let field = NameField::new(Arc::clone(&lookup), QUIET);

        field.input("Something");
        field.input("");
        settle().await;

        assert_eq!(field.state(), NameState::Unchecked);
        assert_eq!(lookup.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_lookup_failure_has_distinct_message() {
        let lookup = Arc::new(StubLookup::failing());
        let field = NameField::new(lookup, QUIET);

        field.input("Any Name");
        settle().await;

        assert_eq!(
            field.state(),
            NameState::Failed {
                message: LOOKUP_FAILED_MESSAGE.to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_edit_mode_passes_exclusion() {
        let lookup = Arc::new(StubLookup::with_taken(&["Köşk Kebab"]));
        let field =
            NameField::with_exclusion(Arc::clone(&lookup), QUIET, Some("r3".to_string()));

        field.input("Köşk Kebab");
        settle().await;

        // Own name stays available while editing
        assert_eq!(field.state(), NameState::Available);
        assert_eq!(
            lookup.last_exclude.lock().unwrap().as_deref(),
            Some("r3")
        );
    }

    #[tokio::test]
    async fn test_rapid_keystrokes_check_once() {
        let lookup = Arc::new(StubLookup::with_taken(&[]));
        let field = NameField::new(Arc::clone(&lookup), QUIET);

        field.input("C");
        tokio::time::sleep(Duration::from_millis(5)).await;
        field.input("Ça");
        tokio::time::sleep(Duration::from_millis(5)).await;
        field.input("Çan's Buns");
        settle().await;

        assert_eq!(lookup.calls.load(Ordering::SeqCst), 1);
        assert_eq!(field.state(), NameState::Available);
    }
}
