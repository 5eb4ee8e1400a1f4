//! The Domain Store: shared collections and their mutation entry points.
//!
//! Projects, events and the badge catalog are demo-seeded on every load and
//! live only in memory. Applications, badge awards and event registrations
//! are mirrored to storage after each change and reloaded on startup.
//!
//! Every mutation builds the new collection, writes it to storage, and only
//! then replaces the in-memory copy, so a failed write changes nothing.

use std::rc::Rc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use nexus_shared::constants::{APPLICATIONS_KEY, EVENT_REGISTRATIONS_KEY, STUDENT_BADGES_KEY};
use nexus_shared::{
    time, ApplicationDecision, ApplicationId, ApplicationStatus, AwardId, BadgeId, EventId,
    EventKind, ProjectId, ProjectStatus, RegistrationId, UserId,
};
use nexus_store::{
    Application, Badge, Event, EventRegistration, KeyValueStore, Project, StudentBadge,
};

use crate::error::Result;
use crate::notify::{Notifier, StoreEvent};
use crate::persist::{load_lenient, save};
use crate::seed;

/// Fields of a project as entered by its faculty owner.
#[derive(Debug, Clone)]
pub struct NewProject {
    pub title: String,
    pub description: String,
    pub faculty_id: UserId,
    pub faculty_name: String,
    pub department: String,
    pub skills: Vec<String>,
    pub duration: String,
    pub status: ProjectStatus,
    pub max_students: u32,
    pub current_students: u32,
    pub deadline: Option<DateTime<Utc>>,
    pub tags: Vec<String>,
    pub requirements: Vec<String>,
    pub outcomes: Vec<String>,
}

/// Fields of a new event. Registration starts at zero.
#[derive(Debug, Clone)]
pub struct NewEvent {
    pub title: String,
    pub description: String,
    pub date: DateTime<Utc>,
    pub location: String,
    pub organizer: String,
    pub department: String,
    pub kind: EventKind,
    pub capacity: u32,
}

/// A badge award as requested by faculty.
#[derive(Debug, Clone)]
pub struct NewAward {
    pub student_id: UserId,
    pub badge_id: BadgeId,
    pub reason: String,
    pub awarded_by: UserId,
    pub awarded_by_name: String,
    pub project_id: Option<ProjectId>,
    pub event_id: Option<EventId>,
}

/// Result of [`DomainStore::register_for_event`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum RegistrationOutcome {
    Registered { registration: EventRegistration },
    AlreadyRegistered,
    AtCapacity,
    EventNotFound,
}

impl RegistrationOutcome {
    pub fn is_registered(&self) -> bool {
        matches!(self, RegistrationOutcome::Registered { .. })
    }
}

pub struct DomainStore {
    storage: Rc<dyn KeyValueStore>,
    notifier: Notifier,
    projects: Vec<Project>,
    applications: Vec<Application>,
    events: Vec<Event>,
    badges: Vec<Badge>,
    student_badges: Vec<StudentBadge>,
    registrations: Vec<EventRegistration>,
}

impl DomainStore {
    /// Seed the demo collections and load the persisted ones.
    ///
    /// Missing or undecodable persisted lists fall back to the sample awards
    /// (badge awards) or to an empty list.
    pub fn load(storage: Rc<dyn KeyValueStore>, notifier: Notifier) -> Result<Self> {
        let applications: Vec<Application> =
            load_lenient(storage.as_ref(), APPLICATIONS_KEY)?.unwrap_or_default();
        let student_badges: Vec<StudentBadge> = load_lenient(storage.as_ref(), STUDENT_BADGES_KEY)?
            .unwrap_or_else(|| seed::sample_awards(time::now()));
        let registrations: Vec<EventRegistration> =
            load_lenient(storage.as_ref(), EVENT_REGISTRATIONS_KEY)?.unwrap_or_default();

        info!(
            applications = applications.len(),
            awards = student_badges.len(),
            registrations = registrations.len(),
            "domain store loaded"
        );

        Ok(Self {
            storage,
            notifier,
            projects: seed::demo_projects(),
            applications,
            events: seed::demo_events(),
            badges: seed::badge_catalog(),
            student_badges,
            registrations,
        })
    }

    // ------------------------------------------------------------------
    // Read
    // ------------------------------------------------------------------

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    pub fn applications(&self) -> &[Application] {
        &self.applications
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn badges(&self) -> &[Badge] {
        &self.badges
    }

    pub fn student_badges(&self) -> &[StudentBadge] {
        &self.student_badges
    }

    pub fn event_registrations(&self) -> &[EventRegistration] {
        &self.registrations
    }

    pub fn project(&self, id: &ProjectId) -> Option<&Project> {
        self.projects.iter().find(|p| &p.id == id)
    }

    pub fn application(&self, id: &ApplicationId) -> Option<&Application> {
        self.applications.iter().find(|a| &a.id == id)
    }

    pub fn event(&self, id: &EventId) -> Option<&Event> {
        self.events.iter().find(|e| &e.id == id)
    }

    pub fn badge(&self, id: &BadgeId) -> Option<&Badge> {
        self.badges.iter().find(|b| &b.id == id)
    }

    pub fn is_registered(&self, event_id: &EventId, student_id: &UserId) -> bool {
        self.registrations
            .iter()
            .any(|r| &r.event_id == event_id && &r.student_id == student_id)
    }

    // ------------------------------------------------------------------
    // Projects
    // ------------------------------------------------------------------

    /// Publish a project at the top of the listing. Not persisted.
    pub fn add_project(&mut self, new: NewProject) -> Project {
        let project = Project {
            id: ProjectId::new(),
            title: new.title,
            description: new.description,
            faculty_id: new.faculty_id,
            faculty_name: new.faculty_name,
            department: new.department,
            skills: new.skills,
            duration: new.duration,
            status: new.status,
            max_students: new.max_students,
            current_students: new.current_students,
            created_at: time::now(),
            deadline: new.deadline,
            tags: new.tags,
            requirements: new.requirements,
            outcomes: new.outcomes,
        };

        debug!(project_id = %project.id, title = %project.title, "project added");
        self.projects.insert(0, project.clone());
        self.notifier.publish(StoreEvent::ProjectsChanged);
        project
    }

    /// Set a project's status by hand. Returns `None` for unknown projects.
    pub fn set_project_status(&mut self, id: &ProjectId, status: ProjectStatus) -> Option<Project> {
        let project = self.projects.iter_mut().find(|p| &p.id == id)?;
        project.status = status;
        let updated = project.clone();

        debug!(project_id = %id, %status, "project status changed");
        self.notifier.publish(StoreEvent::ProjectsChanged);
        Some(updated)
    }

    // ------------------------------------------------------------------
    // Applications
    // ------------------------------------------------------------------

    /// Record a pending application.
    ///
    /// No duplicate or capacity check, and the project's enrolment counter is
    /// left alone.
    pub fn apply_to_project(
        &mut self,
        project_id: &ProjectId,
        student_id: &UserId,
        student_name: &str,
        message: Option<String>,
    ) -> Result<Application> {
        let application = Application {
            id: ApplicationId::new(),
            project_id: project_id.clone(),
            student_id: student_id.clone(),
            student_name: student_name.to_string(),
            status: ApplicationStatus::Pending,
            applied_at: time::now(),
            message,
        };

        let mut updated = self.applications.clone();
        updated.push(application.clone());
        save(self.storage.as_ref(), APPLICATIONS_KEY, &updated)?;
        self.applications = updated;

        info!(
            application_id = %application.id,
            project_id = %project_id,
            student_id = %student_id,
            "application submitted"
        );
        self.notifier.publish(StoreEvent::ApplicationsChanged);
        Ok(application)
    }

    /// Apply a faculty decision. The latest decision wins.
    ///
    /// Returns `None` for unknown application ids.
    pub fn update_application(
        &mut self,
        id: &ApplicationId,
        decision: ApplicationDecision,
    ) -> Result<Option<Application>> {
        let Some(index) = self.applications.iter().position(|a| &a.id == id) else {
            debug!(application_id = %id, "decision ignored: unknown application");
            return Ok(None);
        };

        let mut updated = self.applications.clone();
        updated[index].status = decision.into();
        let application = updated[index].clone();
        save(self.storage.as_ref(), APPLICATIONS_KEY, &updated)?;
        self.applications = updated;

        info!(application_id = %id, status = %application.status, "application decided");
        self.notifier.publish(StoreEvent::ApplicationsChanged);
        Ok(Some(application))
    }

    // ------------------------------------------------------------------
    // Events
    // ------------------------------------------------------------------

    /// Publish an event at the top of the listing. Not persisted.
    pub fn add_event(&mut self, new: NewEvent) -> Event {
        let event = Event {
            id: EventId::new(),
            title: new.title,
            description: new.description,
            date: new.date,
            location: new.location,
            organizer: new.organizer,
            department: new.department,
            kind: new.kind,
            capacity: new.capacity,
            registered: 0,
        };

        debug!(event_id = %event.id, title = %event.title, "event added");
        self.events.insert(0, event.clone());
        self.notifier.publish(StoreEvent::EventsChanged);
        event
    }

    /// Register a student, guarding against duplicates and full events.
    pub fn register_for_event(
        &mut self,
        event_id: &EventId,
        student_id: &UserId,
    ) -> Result<RegistrationOutcome> {
        if self.is_registered(event_id, student_id) {
            warn!(event_id = %event_id, student_id = %student_id, "already registered for event");
            return Ok(RegistrationOutcome::AlreadyRegistered);
        }

        let Some(index) = self.events.iter().position(|e| &e.id == event_id) else {
            warn!(event_id = %event_id, "registration for unknown event");
            return Ok(RegistrationOutcome::EventNotFound);
        };

        if self.events[index].is_full() {
            warn!(event_id = %event_id, student_id = %student_id, "event is full");
            return Ok(RegistrationOutcome::AtCapacity);
        }

        let registration = EventRegistration {
            id: RegistrationId::new(),
            event_id: event_id.clone(),
            student_id: student_id.clone(),
            registered_at: time::now(),
        };

        let mut updated = self.registrations.clone();
        updated.push(registration.clone());
        save(self.storage.as_ref(), EVENT_REGISTRATIONS_KEY, &updated)?;
        self.registrations = updated;
        self.events[index].registered += 1;

        info!(
            event_id = %event_id,
            student_id = %student_id,
            registered = self.events[index].registered,
            "registered for event"
        );
        self.notifier.publish(StoreEvent::RegistrationsChanged);
        self.notifier.publish(StoreEvent::EventsChanged);
        Ok(RegistrationOutcome::Registered { registration })
    }

    /// Drop a student's registration. Returns `false` if there was none, in
    /// which case nothing changes.
    pub fn unregister_from_event(&mut self, event_id: &EventId, student_id: &UserId) -> Result<bool> {
        let updated: Vec<EventRegistration> = self
            .registrations
            .iter()
            .filter(|r| !(&r.event_id == event_id && &r.student_id == student_id))
            .cloned()
            .collect();

        if updated.len() == self.registrations.len() {
            debug!(event_id = %event_id, student_id = %student_id, "nothing to unregister");
            return Ok(false);
        }

        save(self.storage.as_ref(), EVENT_REGISTRATIONS_KEY, &updated)?;
        self.registrations = updated;

        if let Some(event) = self.events.iter_mut().find(|e| &e.id == event_id) {
            event.registered = event.registered.saturating_sub(1);
        }

        info!(event_id = %event_id, student_id = %student_id, "unregistered from event");
        self.notifier.publish(StoreEvent::RegistrationsChanged);
        self.notifier.publish(StoreEvent::EventsChanged);
        Ok(true)
    }

    // ------------------------------------------------------------------
    // Badges
    // ------------------------------------------------------------------

    /// Record a badge award. Repeat awards of the same badge are kept.
    pub fn award_badge(&mut self, new: NewAward) -> Result<StudentBadge> {
        if self.badge(&new.badge_id).is_none() {
            warn!(badge_id = %new.badge_id, "awarding badge missing from catalog");
        }

        let award = StudentBadge {
            id: AwardId::new(),
            student_id: new.student_id,
            badge_id: new.badge_id,
            awarded_by: new.awarded_by,
            awarded_by_name: new.awarded_by_name,
            awarded_at: time::now(),
            reason: new.reason,
            project_id: new.project_id,
            event_id: new.event_id,
        };

        let mut updated = self.student_badges.clone();
        updated.push(award.clone());
        save(self.storage.as_ref(), STUDENT_BADGES_KEY, &updated)?;
        self.student_badges = updated;

        info!(
            award_id = %award.id,
            student_id = %award.student_id,
            badge_id = %award.badge_id,
            "badge awarded"
        );
        self.notifier.publish(StoreEvent::BadgesAwarded);
        Ok(award)
    }
}
