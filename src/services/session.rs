use crate::models::FilterCriteria;
use crate::services::{DirectoryClient, GeocoderClient};
use crate::validation::{AddressField, NameField};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Transient state for one edit/search form session.
///
/// The address and name fields are independent, each with its own timer and
/// sequence marker. The search selection is shared across the page's sibling
/// components through explicit get/set calls.
pub struct FormSession {
    pub address: AddressField<GeocoderClient>,
    pub name: NameField<DirectoryClient>,
    selection: Mutex<FilterCriteria>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl FormSession {
    pub fn selection(&self) -> FilterCriteria {
        self.selection.lock().unwrap().clone()
    }

    pub fn set_selection(&self, criteria: FilterCriteria) {
        *self.selection.lock().unwrap() = criteria;
    }
}

/// Session-scoped store for form state.
///
/// Sessions are created on page mount and discarded on navigation; the TTL
/// reclaims sessions whose client never said goodbye. No state outlives the
/// store itself.
pub struct SessionStore {
    sessions: moka::future::Cache<String, Arc<FormSession>>,
    geocoder: Arc<GeocoderClient>,
    directory: Arc<DirectoryClient>,
    address_quiet: Duration,
    name_quiet: Duration,
}

impl SessionStore {
    pub fn new(
        capacity: u64,
        ttl_secs: u64,
        geocoder: Arc<GeocoderClient>,
        directory: Arc<DirectoryClient>,
        address_quiet: Duration,
        name_quiet: Duration,
    ) -> Self {
        let sessions = moka::future::CacheBuilder::new(capacity)
            .time_to_live(Duration::from_secs(ttl_secs))
            .build();

        Self {
            sessions,
            geocoder,
            directory,
            address_quiet,
            name_quiet,
        }
    }

    /// Open a new session; `editing_restaurant_id` pins the name-lookup
    /// exclusion for edit mode.
    pub async fn create(
        &self,
        editing_restaurant_id: Option<String>,
    ) -> (String, Arc<FormSession>) {
        let session_id = uuid::Uuid::new_v4().to_string();

        let session = Arc::new(FormSession {
            address: AddressField::new(Arc::clone(&self.geocoder), self.address_quiet),
            name: NameField::with_exclusion(
                Arc::clone(&self.directory),
                self.name_quiet,
                editing_restaurant_id,
            ),
            selection: Mutex::new(FilterCriteria::default()),
            created_at: chrono::Utc::now(),
        });

        self.sessions
            .insert(session_id.clone(), Arc::clone(&session))
            .await;

        tracing::debug!("Opened form session {}", session_id);

        (session_id, session)
    }

    pub async fn get(&self, session_id: &str) -> Option<Arc<FormSession>> {
        self.sessions.get(session_id).await
    }

    pub async fn remove(&self, session_id: &str) {
        self.sessions.invalidate(session_id).await;
        tracing::debug!("Closed form session {}", session_id);
    }

    /// Number of live sessions (approximate, for diagnostics).
    pub fn len(&self) -> u64 {
        self.sessions.entry_count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_store() -> SessionStore {
        let geocoder = Arc::new(GeocoderClient::new(
            "https://geocode.test".to_string(),
            "key".to_string(),
        ));
        let directory = Arc::new(DirectoryClient::new(
            "https://directory.test".to_string(),
            "key".to_string(),
            "restaurants".to_string(),
        ));
        SessionStore::new(
            100,
            60,
            geocoder,
            directory,
            Duration::from_millis(1000),
            Duration::from_millis(500),
        )
    }

    #[tokio::test]
    async fn test_session_lifecycle() {
        let store = test_store();

        let (session_id, _) = store.create(None).await;
        assert!(store.get(&session_id).await.is_some());

        store.remove(&session_id).await;
        assert!(store.get(&session_id).await.is_none());
    }

    #[tokio::test]
    async fn test_unknown_session_is_none() {
        let store = test_store();
        assert!(store.get("no-such-session").await.is_none());
    }

    #[tokio::test]
    async fn test_selection_round_trip() {
        let store = test_store();
        let (_, session) = store.create(None).await;

        assert_eq!(session.selection(), FilterCriteria::default());

        let criteria = FilterCriteria {
            persona: Some("foodie".to_string()),
            cuisine: Some("japanese".to_string()),
            ..Default::default()
        };
        session.set_selection(criteria.clone());

        assert_eq!(session.selection(), criteria);
    }

    #[tokio::test]
    async fn test_sessions_are_independent() {
        let store = test_store();
        let (_, first) = store.create(None).await;
        let (_, second) = store.create(None).await;

        first.set_selection(FilterCriteria {
            district: Some("west".to_string()),
            ..Default::default()
        });

        assert_eq!(second.selection(), FilterCriteria::default());
    }
}
