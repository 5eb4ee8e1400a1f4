/// Application name
pub const APP_NAME: &str = "Project Nexus";

/// Storage key for the authenticated session user
pub const SESSION_USER_KEY: &str = "nexus_user";

/// Storage key for the project applications list
pub const APPLICATIONS_KEY: &str = "nexus_applications";

/// Storage key for badge awards
pub const STUDENT_BADGES_KEY: &str = "nexus_student_badges";

/// Storage key for event registrations
pub const EVENT_REGISTRATIONS_KEY: &str = "nexus_event_registrations";

/// Every key the application writes, in a stable order (used by backups)
pub const ALL_STORAGE_KEYS: [&str; 4] = [
    SESSION_USER_KEY,
    APPLICATIONS_KEY,
    STUDENT_BADGES_KEY,
    EVENT_REGISTRATIONS_KEY,
];

/// Default capacity of the change-notification channel
pub const DEFAULT_NOTIFY_CAPACITY: usize = 64;

/// Number of open projects recommended on the student dashboard
pub const RECOMMENDED_PROJECTS: usize = 3;
