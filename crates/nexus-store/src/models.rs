//! Domain model structs mirrored into durable storage.
//!
//! Every struct derives `Serialize` and `Deserialize` with camelCase field
//! names, the shape the browser client stored under the same keys, so data
//! saved by either side loads in the other. Timestamps go through
//! [`nexus_shared::time`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use nexus_shared::time::rfc3339;
use nexus_shared::{
    ApplicationId, ApplicationStatus, AwardId, BadgeCategory, BadgeId, EventId, EventKind,
    ProjectId, ProjectStatus, Rarity, RegistrationId, Role, UserId,
};

// ---------------------------------------------------------------------------
// User
// ---------------------------------------------------------------------------

/// An account: identity, role and profile fields.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    /// Year of study; students only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<u8>,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    /// Avatar image URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    #[serde(with = "rfc3339")]
    pub created_at: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Project
// ---------------------------------------------------------------------------

/// A research opportunity posted by a faculty member.
///
/// `current_students <= max_students` is expected of the data but no
/// mutation maintains it; accepting an application leaves both untouched.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: ProjectId,
    pub title: String,
    pub description: String,
    pub faculty_id: UserId,
    pub faculty_name: String,
    pub department: String,
    /// Skills a candidate should bring.
    pub skills: Vec<String>,
    /// Free text, e.g. "4 months".
    pub duration: String,
    pub status: ProjectStatus,
    pub max_students: u32,
    pub current_students: u32,
    #[serde(with = "rfc3339")]
    pub created_at: DateTime<Utc>,
    #[serde(
        default,
        with = "rfc3339::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub deadline: Option<DateTime<Utc>>,
    pub tags: Vec<String>,
    pub requirements: Vec<String>,
    pub outcomes: Vec<String>,
}

impl Project {
    pub fn is_full(&self) -> bool {
        self.current_students >= self.max_students
    }
}

// ---------------------------------------------------------------------------
// Application
// ---------------------------------------------------------------------------

/// A student's request to join a project.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    pub id: ApplicationId,
    pub project_id: ProjectId,
    pub student_id: UserId,
    pub student_name: String,
    pub status: ApplicationStatus,
    #[serde(with = "rfc3339")]
    pub applied_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

// ---------------------------------------------------------------------------
// Event
// ---------------------------------------------------------------------------

/// A scheduled campus activity.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: EventId,
    pub title: String,
    pub description: String,
    #[serde(with = "rfc3339")]
    pub date: DateTime<Utc>,
    pub location: String,
    pub organizer: String,
    /// Department scope, or "All Departments".
    pub department: String,
    #[serde(rename = "type")]
    pub kind: EventKind,
    pub capacity: u32,
    pub registered: u32,
}

impl Event {
    pub fn is_full(&self) -> bool {
        self.registered >= self.capacity
    }

    pub fn seats_left(&self) -> u32 {
        self.capacity.saturating_sub(self.registered)
    }
}

/// Join record between a student and an event. `(event_id, student_id)` is
/// unique across the registration list.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct EventRegistration {
    pub id: RegistrationId,
    pub event_id: EventId,
    pub student_id: UserId,
    #[serde(with = "rfc3339")]
    pub registered_at: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Badges
// ---------------------------------------------------------------------------

/// Catalog entry describing a badge that can be awarded.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Badge {
    pub id: BadgeId,
    pub name: String,
    pub description: String,
    /// Emoji glyph.
    pub icon: String,
    /// Presentation color token.
    pub color: String,
    pub category: BadgeCategory,
    pub rarity: Rarity,
    /// How the badge is earned, in plain words.
    pub criteria: String,
}

/// One award of a badge to a student. The same badge may be awarded to the
/// same student more than once.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct StudentBadge {
    pub id: AwardId,
    pub student_id: UserId,
    pub badge_id: BadgeId,
    pub awarded_by: UserId,
    pub awarded_by_name: String,
    #[serde(with = "rfc3339")]
    pub awarded_at: DateTime<Utc>,
    pub reason: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_id: Option<ProjectId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_id: Option<EventId>,
}
