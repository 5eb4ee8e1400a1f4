//! Application state handed to every view.
//!
//! [`AppState`] owns the storage handle and both stores and passes them
//! explicitly; nothing is reachable through globals. Views that only need one
//! store can borrow it through the accessors.

use std::rc::Rc;

use tokio::sync::broadcast;
use tracing::info;

use nexus_shared::{time, ProjectId};
use nexus_store::backup::{self, BackupPayload, ImportStats};
use nexus_store::{Application, Database, KeyValueStore, MemoryStore};

use crate::config::{ClientConfig, StorageBackend};
use crate::dashboard::DashboardSummary;
use crate::domain::DomainStore;
use crate::error::Result;
use crate::feed::Feed;
use crate::notify::{Notifier, StoreEvent};
use crate::session::SessionStore;

pub struct AppState {
    storage: Rc<dyn KeyValueStore>,
    notifier: Notifier,
    pub session: SessionStore,
    pub domain: DomainStore,
    pub feed: Feed,
}

impl AppState {
    /// Open the configured storage backend and load both stores from it.
    pub fn open(config: &ClientConfig) -> Result<Self> {
        let storage: Rc<dyn KeyValueStore> = match config.storage {
            StorageBackend::Memory => Rc::new(MemoryStore::new()),
            StorageBackend::Sqlite => match &config.db_path {
                Some(path) => {
                    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                        std::fs::create_dir_all(parent).map_err(nexus_store::StoreError::from)?;
                    }
                    Rc::new(Database::open_at(path)?)
                }
                None => Rc::new(Database::new()?),
            },
        };

        info!(backend = %config.storage, "storage opened");
        Self::with_storage(storage, Notifier::new(config.notify_capacity))
    }

    /// Build the state over an existing storage handle.
    pub fn with_storage(storage: Rc<dyn KeyValueStore>, notifier: Notifier) -> Result<Self> {
        let session = SessionStore::open(storage.clone(), notifier.clone())?;
        let domain = DomainStore::load(storage.clone(), notifier.clone())?;
        let feed = Feed::new(notifier.clone());

        Ok(Self {
            storage,
            notifier,
            session,
            domain,
            feed,
        })
    }

    pub fn storage(&self) -> &dyn KeyValueStore {
        self.storage.as_ref()
    }

    pub fn subscribe(&self) -> broadcast::Receiver<StoreEvent> {
        self.notifier.subscribe()
    }

    /// Dashboard counters for the logged-in user, if any.
    pub fn dashboard(&self) -> Option<DashboardSummary> {
        self.session
            .current_user()
            .map(|user| DashboardSummary::for_user(user, &self.domain, time::now()))
    }

    /// Apply to a project as the logged-in user, under their own name.
    ///
    /// Returns `None` when nobody is logged in.
    pub fn apply_as_current_user(
        &mut self,
        project_id: &ProjectId,
        message: Option<String>,
    ) -> Result<Option<Application>> {
        let Some(user) = self.session.current_user() else {
            return Ok(None);
        };
        let (student_id, student_name) = (user.id.clone(), user.name.clone());
        let application = self
            .domain
            .apply_to_project(project_id, &student_id, &student_name, message)?;
        Ok(Some(application))
    }

    pub fn export_backup(&self) -> Result<BackupPayload> {
        Ok(backup::export_backup(self.storage.as_ref())?)
    }

    /// Write a backup into storage and reload both stores from it.
    pub fn import_backup(&mut self, payload: &BackupPayload) -> Result<ImportStats> {
        let stats = backup::import_backup(self.storage.as_ref(), payload)?;
        self.session = SessionStore::open(self.storage.clone(), self.notifier.clone())?;
        self.domain = DomainStore::load(self.storage.clone(), self.notifier.clone())?;
        Ok(stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nexus_shared::constants::SESSION_USER_KEY;
    use nexus_shared::UserId;

    fn memory_state() -> AppState {
        AppState::with_storage(Rc::new(MemoryStore::new()), Notifier::default()).unwrap()
    }

    #[test]
    fn test_open_memory_backend() {
        let config = ClientConfig {
            storage: StorageBackend::Memory,
            ..ClientConfig::default()
        };
        let state = AppState::open(&config).unwrap();
        assert!(state.session.current_user().is_none());
        assert!(state.dashboard().is_none());
    }

    #[test]
    fn test_open_sqlite_at_path_restores_session() {
        let dir = tempfile::tempdir().unwrap();
        let config = ClientConfig {
            storage: StorageBackend::Sqlite,
            db_path: Some(dir.path().join("nested").join("nexus.db")),
            ..ClientConfig::default()
        };

        {
            let mut state = AppState::open(&config).unwrap();
            assert!(state.session.login("lisa@placements.edu", "pw").unwrap());
        }

        let state = AppState::open(&config).unwrap();
        assert_eq!(
            state.session.current_user().map(|u| u.id.clone()),
            Some(UserId::from("4"))
        );
        assert!(matches!(
            state.dashboard(),
            Some(DashboardSummary::PlacementsAdmin { .. })
        ));
    }

    #[test]
    fn test_apply_as_current_user_uses_profile_name() {
        let mut state = memory_state();
        assert!(state
            .apply_as_current_user(&ProjectId::from("1"), None)
            .unwrap()
            .is_none());

        state.session.login("alex@student.edu", "pw").unwrap();
        let app = state
            .apply_as_current_user(&ProjectId::from("1"), Some("Keen on ML".into()))
            .unwrap()
            .unwrap();
        assert_eq!(app.student_name, "Alex Chen");
        assert_eq!(app.student_id, UserId::from("1"));
    }

    #[test]
    fn test_backup_moves_state_between_stores() {
        let mut source = memory_state();
        source.session.login("alex@student.edu", "pw").unwrap();
        source
            .apply_as_current_user(&ProjectId::from("2"), None)
            .unwrap();
        let payload = source.export_backup().unwrap();

        let mut target = memory_state();
        let stats = target.import_backup(&payload).unwrap();
        assert_eq!(stats.entries_imported, 2);
        assert!(target.storage().get(SESSION_USER_KEY).unwrap().is_some());
        assert_eq!(target.domain.applications().len(), 1);
        assert_eq!(
            target.session.current_user().map(|u| u.email.as_str()),
            Some("alex@student.edu")
        );
    }

    #[test]
    fn test_subscribers_see_domain_changes() {
        let mut state = memory_state();
        let mut rx = state.subscribe();
        state
            .domain
            .register_for_event(&nexus_shared::EventId::from("1"), &UserId::from("1"))
            .unwrap();
        assert_eq!(rx.try_recv().unwrap(), StoreEvent::RegistrationsChanged);
        assert_eq!(rx.try_recv().unwrap(), StoreEvent::EventsChanged);
    }
}
