//! Fixed demo data: the login roster, the project and event listings that
//! are recreated every session, the badge catalog and the sample awards used
//! when nothing has been saved yet.

use chrono::{DateTime, Duration, Utc};

use nexus_shared::time::at;
use nexus_shared::{
    AwardId, BadgeCategory, BadgeId, EventId, EventKind, ProjectId, ProjectStatus, Rarity, Role,
    UserId,
};
use nexus_store::{Badge, Event, Project, StudentBadge, User};

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn avatar(photo: u32) -> Option<String> {
    Some(format!(
        "https://images.pexels.com/photos/{photo}/pexels-photo-{photo}.jpeg?auto=compress&cs=tinysrgb&w=150&h=150&fit=crop"
    ))
}

/// One account per role. Login matches on email alone.
pub fn demo_roster() -> Vec<User> {
    vec![
        User {
            id: UserId::from("1"),
            name: "Alex Chen".into(),
            email: "alex@student.edu".into(),
            role: Role::Student,
            department: Some("Computer Science".into()),
            year: Some(3),
            skills: strings(&["React", "Python", "Machine Learning"]),
            bio: Some("Passionate about AI and web development".into()),
            avatar: avatar(2381069),
            created_at: at(2024, 1, 15, 0, 0),
        },
        User {
            id: UserId::from("2"),
            name: "Dr. Sarah Wilson".into(),
            email: "sarah@faculty.edu".into(),
            role: Role::Faculty,
            department: Some("Computer Science".into()),
            year: None,
            skills: strings(&["Research", "AI", "Data Science"]),
            bio: Some("Professor specializing in artificial intelligence and machine learning".into()),
            avatar: avatar(3184291),
            created_at: at(2020, 8, 10, 0, 0),
        },
        User {
            id: UserId::from("3"),
            name: "Prof. Michael Johnson".into(),
            email: "michael@admin.edu".into(),
            role: Role::DeptAdmin,
            department: Some("Computer Science".into()),
            year: None,
            skills: Vec::new(),
            bio: Some("Head of Computer Science Department".into()),
            avatar: avatar(2379004),
            created_at: at(2018, 5, 20, 0, 0),
        },
        User {
            id: UserId::from("4"),
            name: "Lisa Rodriguez".into(),
            email: "lisa@placements.edu".into(),
            role: Role::PlacementsAdmin,
            department: Some("Administration".into()),
            year: None,
            skills: Vec::new(),
            bio: Some("Head of Placements and Career Services".into()),
            avatar: avatar(3184338),
            created_at: at(2019, 3, 12, 0, 0),
        },
        User {
            id: UserId::from("5"),
            name: "Dr. Robert Thompson".into(),
            email: "robert@admin.edu".into(),
            role: Role::HeadAdmin,
            department: None,
            year: None,
            skills: Vec::new(),
            bio: Some("Dean of Engineering".into()),
            avatar: avatar(2182970),
            created_at: at(2015, 9, 1, 0, 0),
        },
    ]
}

pub fn demo_projects() -> Vec<Project> {
    vec![
        Project {
            id: ProjectId::from("1"),
            title: "AI-Powered Student Performance Prediction".into(),
            description: "Develop a machine learning model to predict student academic performance based on various factors including attendance, assignment scores, and engagement metrics.".into(),
            faculty_id: UserId::from("2"),
            faculty_name: "Dr. Sarah Wilson".into(),
            department: "Computer Science".into(),
            skills: strings(&["Python", "Machine Learning", "Data Analysis", "TensorFlow"]),
            duration: "4 months".into(),
            status: ProjectStatus::Open,
            max_students: 3,
            current_students: 1,
            created_at: at(2024, 1, 20, 0, 0),
            deadline: Some(at(2024, 2, 15, 0, 0)),
            tags: strings(&["AI", "ML", "Education", "Research"]),
            requirements: strings(&[
                "Strong Python skills",
                "Basic ML knowledge",
                "Statistical analysis experience",
            ]),
            outcomes: strings(&[
                "Published research paper",
                "ML model deployment",
                "Portfolio project",
            ]),
        },
        Project {
            id: ProjectId::from("2"),
            title: "Sustainable Campus Energy Management System".into(),
            description: "Create an IoT-based system to monitor and optimize energy consumption across campus buildings using smart sensors and data analytics.".into(),
            faculty_id: UserId::from("2"),
            faculty_name: "Dr. Sarah Wilson".into(),
            department: "Computer Science".into(),
            skills: strings(&["IoT", "React", "Node.js", "Data Visualization"]),
            duration: "6 months".into(),
            status: ProjectStatus::Open,
            max_students: 4,
            current_students: 0,
            created_at: at(2024, 1, 18, 0, 0),
            deadline: Some(at(2024, 2, 20, 0, 0)),
            tags: strings(&["IoT", "Sustainability", "Full Stack", "Innovation"]),
            requirements: strings(&[
                "Web development experience",
                "Interest in IoT",
                "Problem-solving skills",
            ]),
            outcomes: strings(&[
                "Working prototype",
                "Conference presentation",
                "Industry connections",
            ]),
        },
        Project {
            id: ProjectId::from("3"),
            title: "Blockchain-Based Student Credential System".into(),
            description: "Design and implement a secure, decentralized system for storing and verifying student academic credentials using blockchain technology.".into(),
            faculty_id: UserId::from("2"),
            faculty_name: "Dr. Sarah Wilson".into(),
            department: "Computer Science".into(),
            skills: strings(&["Blockchain", "Smart Contracts", "Cryptography", "Web3"]),
            duration: "5 months".into(),
            status: ProjectStatus::InProgress,
            max_students: 2,
            current_students: 2,
            created_at: at(2024, 1, 10, 0, 0),
            deadline: None,
            tags: strings(&["Blockchain", "Security", "Innovation", "Fintech"]),
            requirements: strings(&[
                "Understanding of blockchain concepts",
                "Programming experience",
                "Security mindset",
            ]),
            outcomes: strings(&[
                "Deployed blockchain application",
                "Research publication",
                "Industry partnerships",
            ]),
        },
    ]
}

pub fn demo_events() -> Vec<Event> {
    vec![
        Event {
            id: EventId::from("1"),
            title: "Introduction to Machine Learning Workshop".into(),
            description: "A hands-on workshop covering the fundamentals of ML algorithms, practical applications, and career opportunities.".into(),
            date: at(2024, 2, 10, 14, 0),
            location: "CS Auditorium".into(),
            organizer: "Dr. Sarah Wilson".into(),
            department: "Computer Science".into(),
            kind: EventKind::Workshop,
            capacity: 50,
            registered: 32,
        },
        Event {
            id: EventId::from("2"),
            title: "Tech Industry Career Panel".into(),
            description: "Industry leaders share insights on career paths, skills demand, and networking strategies.".into(),
            date: at(2024, 2, 15, 16, 0),
            location: "Main Hall".into(),
            organizer: "Placements Cell".into(),
            department: "All Departments".into(),
            kind: EventKind::Networking,
            capacity: 100,
            registered: 67,
        },
        Event {
            id: EventId::from("3"),
            title: "Innovation Challenge 2024".into(),
            description: "Annual competition for innovative project ideas with prizes and mentorship opportunities.".into(),
            date: at(2024, 3, 1, 9, 0),
            location: "Innovation Center".into(),
            organizer: "Innovation Cell".into(),
            department: "All Departments".into(),
            kind: EventKind::Competition,
            capacity: 80,
            registered: 45,
        },
    ]
}

fn badge(
    id: &str,
    name: &str,
    description: &str,
    icon: &str,
    color: &str,
    category: BadgeCategory,
    rarity: Rarity,
    criteria: &str,
) -> Badge {
    Badge {
        id: BadgeId::from(id),
        name: name.into(),
        description: description.into(),
        icon: icon.into(),
        color: color.into(),
        category,
        rarity,
        criteria: criteria.into(),
    }
}

/// The immutable badge catalog.
pub fn badge_catalog() -> Vec<Badge> {
    use BadgeCategory::*;
    vec![
        badge("1", "Innovation Pioneer", "Awarded for exceptional innovative thinking and creative problem-solving", "🚀", "bg-purple-500", Innovation, Rarity::Legendary, "Create a groundbreaking project or solution"),
        badge("2", "Code Master", "Demonstrated exceptional programming skills and code quality", "💻", "bg-blue-500", Skill, Rarity::Epic, "Complete a complex programming project with excellent code quality"),
        badge("3", "Team Leader", "Excellent leadership skills in team projects", "👑", "bg-yellow-500", Leadership, Rarity::Rare, "Successfully lead a team project to completion"),
        badge("4", "Research Scholar", "Outstanding contribution to research projects", "🔬", "bg-green-500", Achievement, Rarity::Epic, "Publish research or present at conferences"),
        badge("5", "Quick Learner", "Rapidly acquired new skills and technologies", "⚡", "bg-orange-500", Skill, Rarity::Common, "Learn and apply new technology in a project"),
        badge("6", "Event Organizer", "Successfully organized or participated in events", "🎯", "bg-pink-500", Participation, Rarity::Rare, "Organize or actively participate in department events"),
        badge("7", "Problem Solver", "Exceptional analytical and problem-solving abilities", "🧩", "bg-indigo-500", Skill, Rarity::Rare, "Solve complex technical challenges"),
        badge("8", "Mentor", "Helped and guided fellow students", "🤝", "bg-teal-500", Leadership, Rarity::Common, "Mentor junior students or peers"),
    ]
}

/// Awards shown before any award has been saved, dated relative to `now`.
pub fn sample_awards(now: DateTime<Utc>) -> Vec<StudentBadge> {
    vec![
        StudentBadge {
            id: AwardId::from("1"),
            student_id: UserId::from("1"),
            badge_id: BadgeId::from("2"),
            awarded_by: UserId::from("2"),
            awarded_by_name: "Dr. Sarah Wilson".into(),
            awarded_at: now - Duration::days(7),
            reason: "Excellent work on the blockchain credential system project".into(),
            project_id: Some(ProjectId::from("3")),
            event_id: None,
        },
        StudentBadge {
            id: AwardId::from("2"),
            student_id: UserId::from("1"),
            badge_id: BadgeId::from("5"),
            awarded_by: UserId::from("2"),
            awarded_by_name: "Dr. Sarah Wilson".into(),
            awarded_at: now - Duration::days(14),
            reason: "Quickly mastered React and TypeScript for the project".into(),
            project_id: None,
            event_id: None,
        },
    ]
}
