//! The Session Store: the single slot holding the logged-in account.

use std::rc::Rc;

use tracing::{debug, info};

use nexus_shared::constants::SESSION_USER_KEY;
use nexus_shared::{time, Role, UserId};
use nexus_store::{KeyValueStore, User};

use crate::error::Result;
use crate::notify::{Notifier, StoreEvent};
use crate::persist::{load_lenient, save};
use crate::seed;

/// Profile fields supplied at registration.
#[derive(Debug, Clone, Default)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    /// Defaults to [`Role::Student`].
    pub role: Option<Role>,
    pub department: Option<String>,
    pub year: Option<u8>,
    pub skills: Vec<String>,
    pub bio: Option<String>,
    pub avatar: Option<String>,
}

/// A partial profile update. `None` leaves a field as it is.
///
/// Identity fields (id, role, creation time) cannot be changed.
#[derive(Debug, Clone, Default)]
pub struct ProfileUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
    pub department: Option<String>,
    pub year: Option<u8>,
    pub skills: Option<Vec<String>>,
    pub bio: Option<String>,
    pub avatar: Option<String>,
}

impl ProfileUpdate {
    fn apply_to(self, user: &mut User) {
        if let Some(name) = self.name {
            user.name = name;
        }
        if let Some(email) = self.email {
            user.email = email;
        }
        if let Some(department) = self.department {
            user.department = Some(department);
        }
        if let Some(year) = self.year {
            user.year = Some(year);
        }
        if let Some(skills) = self.skills {
            user.skills = skills;
        }
        if let Some(bio) = self.bio {
            user.bio = Some(bio);
        }
        if let Some(avatar) = self.avatar {
            user.avatar = Some(avatar);
        }
    }
}

/// Holds at most one authenticated [`User`] and mirrors it to storage under
/// [`SESSION_USER_KEY`].
///
/// Authentication is a demo-roster lookup by email; the password is never
/// checked.
pub struct SessionStore {
    storage: Rc<dyn KeyValueStore>,
    notifier: Notifier,
    roster: Vec<User>,
    current: Option<User>,
    loading: bool,
}

impl SessionStore {
    /// Create a store that has not yet looked at storage.
    pub fn new(storage: Rc<dyn KeyValueStore>, notifier: Notifier) -> Self {
        Self::with_roster(storage, notifier, seed::demo_roster())
    }

    pub fn with_roster(storage: Rc<dyn KeyValueStore>, notifier: Notifier, roster: Vec<User>) -> Self {
        Self {
            storage,
            notifier,
            roster,
            current: None,
            loading: true,
        }
    }

    /// Create a store and restore any saved session.
    pub fn open(storage: Rc<dyn KeyValueStore>, notifier: Notifier) -> Result<Self> {
        let mut store = Self::new(storage, notifier);
        store.restore()?;
        Ok(store)
    }

    /// Adopt the saved session, if one exists and decodes.
    pub fn restore(&mut self) -> Result<Option<&User>> {
        let saved: Option<User> = load_lenient(self.storage.as_ref(), SESSION_USER_KEY)?;
        if let Some(user) = &saved {
            info!(user_id = %user.id, role = %user.role, "restored session");
        } else {
            debug!("no saved session");
        }
        self.current = saved;
        self.loading = false;
        self.notifier.publish(StoreEvent::SessionChanged);
        Ok(self.current.as_ref())
    }

    /// `true` until storage has been checked for a saved session.
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn current_user(&self) -> Option<&User> {
        self.current.as_ref()
    }

    pub fn is_logged_in(&self) -> bool {
        self.current.is_some()
    }

    pub fn roster(&self) -> &[User] {
        &self.roster
    }

    /// Log in as the roster entry with exactly this email.
    ///
    /// Returns `false` and leaves the session untouched when no entry matches.
    pub fn login(&mut self, email: &str, _password: &str) -> Result<bool> {
        let Some(user) = self.roster.iter().find(|u| u.email == email).cloned() else {
            info!(email, "login rejected: unknown email");
            return Ok(false);
        };

        self.set_current(user)?;
        Ok(true)
    }

    /// Create a fresh account and log in as it. Never fails for domain
    /// reasons; only a storage failure is an error.
    pub fn register(&mut self, new_user: NewUser) -> Result<User> {
        let user = User {
            id: UserId::new(),
            name: new_user.name,
            email: new_user.email,
            role: new_user.role.unwrap_or_default(),
            department: new_user.department,
            year: new_user.year,
            skills: new_user.skills,
            bio: new_user.bio,
            avatar: new_user.avatar,
            created_at: time::now(),
        };

        self.set_current(user.clone())?;
        Ok(user)
    }

    /// Clear the session and its stored copy. Idempotent.
    pub fn logout(&mut self) -> Result<()> {
        nexus_store::remove(self.storage.as_ref(), SESSION_USER_KEY)?;
        if let Some(user) = self.current.take() {
            info!(user_id = %user.id, "logged out");
        }
        self.notifier.publish(StoreEvent::SessionChanged);
        Ok(())
    }

    /// Merge `update` into the current user and persist it.
    ///
    /// Returns `None` (and does nothing) when nobody is logged in.
    pub fn update_profile(&mut self, update: ProfileUpdate) -> Result<Option<User>> {
        let Some(current) = &self.current else {
            debug!("profile update ignored: no session");
            return Ok(None);
        };

        let mut updated = current.clone();
        update.apply_to(&mut updated);
        self.set_current(updated.clone())?;
        Ok(Some(updated))
    }

    fn set_current(&mut self, user: User) -> Result<()> {
        save(self.storage.as_ref(), SESSION_USER_KEY, &user)?;
        info!(user_id = %user.id, role = %user.role, "session user set");
        self.current = Some(user);
        self.notifier.publish(StoreEvent::SessionChanged);
        Ok(())
    }
}
