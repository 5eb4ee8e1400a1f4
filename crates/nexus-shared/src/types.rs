use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ParseEnumError;

// ---------------------------------------------------------------------------
// Identifiers
// ---------------------------------------------------------------------------

// Ids are opaque strings: seed data uses short numeric ids, fresh records get
// a UUID v4.
macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            /// Generate a fresh, globally unique id.
            pub fn new() -> Self {
                Self(Uuid::new_v4().to_string())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }
    };
}

define_id!(
    /// Identity of a student, faculty member or administrator.
    UserId
);
define_id!(ProjectId);
define_id!(ApplicationId);
define_id!(EventId);
define_id!(RegistrationId);
define_id!(BadgeId);
define_id!(
    /// Identity of one badge award (a `StudentBadge` record).
    AwardId
);
define_id!(PostId);

// ---------------------------------------------------------------------------
// Vocabulary enums
// ---------------------------------------------------------------------------

macro_rules! string_enum {
    (
        $(#[$meta:meta])*
        $name:ident, $kind:literal {
            $($variant:ident => $text:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $text)]
                $variant,
            )+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => $text,)+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = ParseEnumError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($text => Ok($name::$variant),)+
                    other => Err(ParseEnumError {
                        kind: $kind,
                        value: other.to_string(),
                    }),
                }
            }
        }
    };
}

string_enum!(
    /// Role of an account. Fixed at creation; no operation changes it.
    Role, "role" {
        Student => "student",
        Faculty => "faculty",
        DeptAdmin => "dept_admin",
        PlacementsAdmin => "placements_admin",
        HeadAdmin => "head_admin",
    }
);

impl Role {
    pub fn is_admin(self) -> bool {
        matches!(self, Role::DeptAdmin | Role::PlacementsAdmin | Role::HeadAdmin)
    }

    /// Faculty post projects, review applications and award badges.
    pub fn is_faculty(self) -> bool {
        self == Role::Faculty
    }

    /// Human-readable label, e.g. "dept admin".
    pub fn label(self) -> String {
        self.as_str().replace('_', " ")
    }
}

impl Default for Role {
    fn default() -> Self {
        Role::Student
    }
}

string_enum!(
    ProjectStatus, "project status" {
        Open => "open",
        InProgress => "in_progress",
        Completed => "completed",
    }
);

string_enum!(
    /// Lifecycle of an application. Leaves `Pending` only through a faculty
    /// decision and never returns to it.
    ApplicationStatus, "application status" {
        Pending => "pending",
        Accepted => "accepted",
        Rejected => "rejected",
    }
);

string_enum!(
    /// A faculty decision on a pending application.
    ApplicationDecision, "application decision" {
        Accepted => "accepted",
        Rejected => "rejected",
    }
);

impl From<ApplicationDecision> for ApplicationStatus {
    fn from(decision: ApplicationDecision) -> Self {
        match decision {
            ApplicationDecision::Accepted => ApplicationStatus::Accepted,
            ApplicationDecision::Rejected => ApplicationStatus::Rejected,
        }
    }
}

string_enum!(
    EventKind, "event type" {
        Workshop => "workshop",
        Seminar => "seminar",
        Competition => "competition",
        Networking => "networking",
    }
);

string_enum!(
    BadgeCategory, "badge category" {
        Skill => "skill",
        Achievement => "achievement",
        Leadership => "leadership",
        Participation => "participation",
        Innovation => "innovation",
    }
);

string_enum!(
    /// Badge rarity tier, ordered from most to least common.
    #[derive(PartialOrd, Ord)]
    Rarity, "rarity" {
        Common => "common",
        Rare => "rare",
        Epic => "epic",
        Legendary => "legendary",
    }
);

string_enum!(
    /// Audience bucket shown next to a feed post's author.
    AuthorRole, "author role" {
        Student => "student",
        Faculty => "faculty",
        Admin => "admin",
    }
);

impl From<Role> for AuthorRole {
    fn from(role: Role) -> Self {
        match role {
            Role::Student => AuthorRole::Student,
            Role::Faculty => AuthorRole::Faculty,
            _ => AuthorRole::Admin,
        }
    }
}

string_enum!(
    PostKind, "post type" {
        Text => "text",
        ProjectUpdate => "project_update",
        Achievement => "achievement",
        Event => "event",
        Collaboration => "collaboration",
    }
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_ids_are_unique() {
        let a = UserId::new();
        let b = UserId::new();
        assert_ne!(a, b);
    }

    #[test]
    fn test_id_serializes_as_plain_string() {
        let id = ProjectId::from("3");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"3\"");
        let back: ProjectId = serde_json::from_str("\"3\"").unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn test_role_wire_names() {
        assert_eq!(
            serde_json::to_string(&Role::PlacementsAdmin).unwrap(),
            "\"placements_admin\""
        );
        assert_eq!("dept_admin".parse::<Role>().unwrap(), Role::DeptAdmin);
        assert!("janitor".parse::<Role>().is_err());
        assert_eq!(Role::HeadAdmin.label(), "head admin");
    }

    #[test]
    fn test_role_groups() {
        assert!(Role::DeptAdmin.is_admin());
        assert!(!Role::Faculty.is_admin());
        assert!(Role::Faculty.is_faculty());
        assert_eq!(Role::default(), Role::Student);
    }

    #[test]
    fn test_decision_maps_to_status() {
        assert_eq!(
            ApplicationStatus::from(ApplicationDecision::Rejected),
            ApplicationStatus::Rejected
        );
    }

    #[test]
    fn test_rarity_ordering() {
        assert!(Rarity::Legendary > Rarity::Epic);
        assert!(Rarity::Common < Rarity::Rare);
    }

    #[test]
    fn test_author_role_from_account_role() {
        assert_eq!(AuthorRole::from(Role::HeadAdmin), AuthorRole::Admin);
        assert_eq!(AuthorRole::from(Role::Student), AuthorRole::Student);
    }
}
