use std::collections::HashSet;
use std::rc::Rc;

use nexus_client::seed;
use nexus_client::{
    DomainStore, NewEvent, NewUser, Notifier, RegistrationOutcome, SessionStore,
};
use nexus_shared::constants::{APPLICATIONS_KEY, EVENT_REGISTRATIONS_KEY, SESSION_USER_KEY};
use nexus_shared::{
    time, ApplicationDecision, ApplicationStatus, EventId, EventKind, ProjectId, UserId,
};
use nexus_store::{Database, KeyValueStore, MemoryStore};

fn memory() -> Rc<MemoryStore> {
    Rc::new(MemoryStore::new())
}

fn open_session(storage: Rc<MemoryStore>) -> SessionStore {
    SessionStore::open(storage, Notifier::default()).unwrap()
}

fn open_domain(storage: Rc<MemoryStore>) -> DomainStore {
    DomainStore::load(storage, Notifier::default()).unwrap()
}

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

#[test]
fn login_succeeds_for_every_roster_email() {
    let mut session = open_session(memory());
    for entry in seed::demo_roster() {
        assert!(session.login(&entry.email, "whatever").unwrap());
        let user = session.current_user().unwrap();
        assert_eq!(user.email, entry.email);
        assert_eq!(user, &entry);
    }
}

#[test]
fn login_failure_leaves_slot_unchanged() {
    let storage = memory();
    let mut session = open_session(storage.clone());

    assert!(!session.login("ghost@campus.edu", "pw").unwrap());
    assert!(session.current_user().is_none());
    assert!(storage.get(SESSION_USER_KEY).unwrap().is_none());

    session.login("michael@admin.edu", "pw").unwrap();
    assert!(!session.login("", "pw").unwrap());
    assert_eq!(session.current_user().unwrap().email, "michael@admin.edu");
}

#[test]
fn logout_is_idempotent() {
    let storage = memory();
    let mut session = open_session(storage.clone());

    session.logout().unwrap();
    assert!(session.current_user().is_none());

    session.login("alex@student.edu", "pw").unwrap();
    session.logout().unwrap();
    session.logout().unwrap();
    assert!(session.current_user().is_none());
    assert!(storage.get(SESSION_USER_KEY).unwrap().is_none());
}

#[test]
fn register_always_yields_fresh_ids() {
    let mut session = open_session(memory());
    let roster_ids: HashSet<UserId> = seed::demo_roster().into_iter().map(|u| u.id).collect();
    let mut seen = HashSet::new();

    for i in 0..50 {
        let user = session
            .register(NewUser {
                name: format!("Student {i}"),
                email: "same@student.edu".into(),
                ..NewUser::default()
            })
            .unwrap();
        assert!(!roster_ids.contains(&user.id));
        assert!(seen.insert(user.id.clone()));
        assert_eq!(session.current_user(), Some(&user));
    }
}

#[test]
fn saved_session_survives_restart() {
    let storage = memory();
    {
        let mut session = open_session(storage.clone());
        session.login("sarah@faculty.edu", "pw").unwrap();
    }
    let restored = open_session(storage);
    assert_eq!(
        restored.current_user().map(|u| u.id.clone()),
        Some(UserId::from("2"))
    );
}

// ---------------------------------------------------------------------------
// Applications
// ---------------------------------------------------------------------------

#[test]
fn apply_creates_one_pending_application_each_time() {
    let mut domain = open_domain(memory());
    let project = ProjectId::from("1");
    let student = UserId::from("1");

    let first = domain
        .apply_to_project(&project, &student, "Alex Chen", Some("Hi".into()))
        .unwrap();
    assert_eq!(domain.applications().len(), 1);
    let listed = &domain.applications()[0];
    assert_eq!(listed, &first);
    assert_eq!(listed.status, ApplicationStatus::Pending);
    assert_eq!(listed.project_id, project);
    assert_eq!(listed.student_id, student);

    let second = domain
        .apply_to_project(&project, &student, "Alex Chen", None)
        .unwrap();
    assert_eq!(domain.applications().len(), 2);
    assert_ne!(first.id, second.id);
}

#[test]
fn latest_decision_wins() {
    let mut domain = open_domain(memory());
    let app = domain
        .apply_to_project(&ProjectId::from("2"), &UserId::from("1"), "Alex Chen", None)
        .unwrap();

    domain
        .update_application(&app.id, ApplicationDecision::Accepted)
        .unwrap();
    let last = domain
        .update_application(&app.id, ApplicationDecision::Rejected)
        .unwrap()
        .unwrap();

    assert_eq!(last.status, ApplicationStatus::Rejected);
    assert_eq!(
        domain.application(&app.id).unwrap().status,
        ApplicationStatus::Rejected
    );
}

#[test]
fn applications_round_trip_through_storage() {
    let storage = memory();
    let before = {
        let mut domain = open_domain(storage.clone());
        let a = domain
            .apply_to_project(&ProjectId::from("1"), &UserId::from("1"), "Alex Chen", Some("ML!".into()))
            .unwrap();
        domain
            .apply_to_project(&ProjectId::from("2"), &UserId::from("9"), "Priya Nair", None)
            .unwrap();
        domain
            .update_application(&a.id, ApplicationDecision::Accepted)
            .unwrap();
        domain.applications().to_vec()
    };

    assert!(storage.get(APPLICATIONS_KEY).unwrap().is_some());
    let reloaded = open_domain(storage);
    assert_eq!(reloaded.applications(), before.as_slice());
}

#[test]
fn applications_round_trip_through_sqlite() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nexus.db");

    let before = {
        let storage: Rc<dyn KeyValueStore> = Rc::new(Database::open_at(&path).unwrap());
        let mut domain = DomainStore::load(storage, Notifier::default()).unwrap();
        domain
            .apply_to_project(&ProjectId::from("3"), &UserId::from("1"), "Alex Chen", None)
            .unwrap();
        domain.applications().to_vec()
    };

    let storage: Rc<dyn KeyValueStore> = Rc::new(Database::open_at(&path).unwrap());
    let reloaded = DomainStore::load(storage, Notifier::default()).unwrap();
    assert_eq!(reloaded.applications(), before.as_slice());
}

// ---------------------------------------------------------------------------
// Event registration
// ---------------------------------------------------------------------------

fn tiny_event(domain: &mut DomainStore, capacity: u32) -> EventId {
    domain
        .add_event(NewEvent {
            title: "Paper reading group".into(),
            description: "Weekly systems papers".into(),
            date: time::at(2030, 9, 1, 17, 0),
            location: "Room 101".into(),
            organizer: "Dr. Sarah Wilson".into(),
            department: "Computer Science".into(),
            kind: EventKind::Seminar,
            capacity,
        })
        .id
}

#[test]
fn duplicate_registration_is_a_noop() {
    let storage = memory();
    let mut domain = open_domain(storage.clone());
    let event = EventId::from("2");
    let student = UserId::from("1");
    let before = domain.event(&event).unwrap().registered;

    assert!(domain.register_for_event(&event, &student).unwrap().is_registered());
    assert_eq!(
        domain.register_for_event(&event, &student).unwrap(),
        RegistrationOutcome::AlreadyRegistered
    );
    assert_eq!(domain.event(&event).unwrap().registered, before + 1);
    assert_eq!(domain.event_registrations().len(), 1);

    assert!(domain.unregister_from_event(&event, &student).unwrap());
    assert_eq!(domain.event(&event).unwrap().registered, before);
    assert!(!domain.is_registered(&event, &student));
    assert_eq!(storage.get(EVENT_REGISTRATIONS_KEY).unwrap().as_deref(), Some("[]"));
}

#[test]
fn capacity_one_scenario() {
    let mut domain = open_domain(memory());
    let event = tiny_event(&mut domain, 1);
    let a = UserId::from("student-a");
    let b = UserId::from("student-b");

    assert!(domain.register_for_event(&event, &a).unwrap().is_registered());
    assert_eq!(domain.event(&event).unwrap().registered, 1);

    assert_eq!(
        domain.register_for_event(&event, &b).unwrap(),
        RegistrationOutcome::AtCapacity
    );
    assert_eq!(domain.event(&event).unwrap().registered, 1);

    assert!(domain.unregister_from_event(&event, &a).unwrap());
    assert_eq!(domain.event(&event).unwrap().registered, 0);

    assert!(domain.register_for_event(&event, &b).unwrap().is_registered());
    assert_eq!(domain.event(&event).unwrap().registered, 1);
}

#[test]
fn registrations_reload_but_event_counts_reset() {
    let storage = memory();
    let event = EventId::from("1");
    let student = UserId::from("1");
    {
        let mut domain = open_domain(storage.clone());
        domain.register_for_event(&event, &student).unwrap();
    }

    let mut reloaded = open_domain(storage);
    assert!(reloaded.is_registered(&event, &student));
    assert_eq!(reloaded.event(&event).unwrap().registered, 32);
    assert_eq!(
        reloaded.register_for_event(&event, &student).unwrap(),
        RegistrationOutcome::AlreadyRegistered
    );
}
