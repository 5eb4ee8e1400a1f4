//! Read-only list helpers behind the marketplace, calendar, review and badge
//! views. All of them borrow from the Domain Store's collections.

use std::collections::{BTreeMap, BTreeSet, HashSet};

use chrono::{DateTime, Utc};
use serde::Serialize;

use nexus_shared::{ApplicationStatus, BadgeCategory, BadgeId, EventKind, ProjectId, ProjectStatus, UserId};
use nexus_store::{Application, Badge, Event, Project, StudentBadge};

fn contains_ci(haystack: &str, needle_lower: &str) -> bool {
    haystack.to_lowercase().contains(needle_lower)
}

// ---------------------------------------------------------------------------
// Projects
// ---------------------------------------------------------------------------

/// Marketplace filter. Empty search matches everything.
#[derive(Debug, Clone, Default)]
pub struct ProjectFilter {
    /// Case-insensitive match on title, description or faculty name.
    pub search: String,
    pub department: Option<String>,
    pub skill: Option<String>,
    pub open_only: bool,
}

impl ProjectFilter {
    /// The student marketplace: open projects only.
    pub fn marketplace() -> Self {
        Self {
            open_only: true,
            ..Self::default()
        }
    }

    pub fn matches(&self, project: &Project) -> bool {
        let needle = self.search.to_lowercase();
        let matches_search = needle.is_empty()
            || contains_ci(&project.title, &needle)
            || contains_ci(&project.description, &needle)
            || contains_ci(&project.faculty_name, &needle);
        let matches_department = self
            .department
            .as_ref()
            .map_or(true, |d| &project.department == d);
        let matches_skill = self
            .skill
            .as_ref()
            .map_or(true, |s| project.skills.contains(s));
        let matches_status = !self.open_only || project.status == ProjectStatus::Open;

        matches_search && matches_department && matches_skill && matches_status
    }

    pub fn apply<'a>(&self, projects: &'a [Project]) -> Vec<&'a Project> {
        projects.iter().filter(|p| self.matches(p)).collect()
    }
}

pub fn projects_by_faculty<'a>(projects: &'a [Project], faculty_id: &UserId) -> Vec<&'a Project> {
    projects.iter().filter(|p| &p.faculty_id == faculty_id).collect()
}

/// Distinct project departments, sorted.
pub fn project_departments(projects: &[Project]) -> Vec<String> {
    let set: BTreeSet<&str> = projects.iter().map(|p| p.department.as_str()).collect();
    set.into_iter().map(String::from).collect()
}

/// Distinct skills across all projects, sorted.
pub fn project_skills(projects: &[Project]) -> Vec<String> {
    let set: BTreeSet<&str> = projects
        .iter()
        .flat_map(|p| p.skills.iter().map(String::as_str))
        .collect();
    set.into_iter().map(String::from).collect()
}

// ---------------------------------------------------------------------------
// Events
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default)]
pub struct EventFilter {
    /// Case-insensitive match on title or description.
    pub search: String,
    pub kind: Option<EventKind>,
    pub department: Option<String>,
}

impl EventFilter {
    pub fn matches(&self, event: &Event) -> bool {
        let needle = self.search.to_lowercase();
        let matches_search = needle.is_empty()
            || contains_ci(&event.title, &needle)
            || contains_ci(&event.description, &needle);
        let matches_kind = self.kind.map_or(true, |k| event.kind == k);
        let matches_department = self
            .department
            .as_ref()
            .map_or(true, |d| &event.department == d);

        matches_search && matches_kind && matches_department
    }

    pub fn apply<'a>(&self, events: &'a [Event]) -> Vec<&'a Event> {
        events.iter().filter(|e| self.matches(e)).collect()
    }
}

/// Split events into `(upcoming, past)` relative to `now`. An event starting
/// exactly at `now` counts as upcoming.
pub fn split_by_date<'a>(
    events: impl IntoIterator<Item = &'a Event>,
    now: DateTime<Utc>,
) -> (Vec<&'a Event>, Vec<&'a Event>) {
    events.into_iter().partition(|e| e.date >= now)
}

pub fn event_departments(events: &[Event]) -> Vec<String> {
    let set: BTreeSet<&str> = events.iter().map(|e| e.department.as_str()).collect();
    set.into_iter().map(String::from).collect()
}

// ---------------------------------------------------------------------------
// Applications
// ---------------------------------------------------------------------------

pub fn applications_for_student<'a>(
    applications: &'a [Application],
    student_id: &UserId,
) -> Vec<&'a Application> {
    applications
        .iter()
        .filter(|a| &a.student_id == student_id)
        .collect()
}

/// Applications to any project owned by `faculty_id`.
pub fn applications_for_faculty<'a>(
    projects: &[Project],
    applications: &'a [Application],
    faculty_id: &UserId,
) -> Vec<&'a Application> {
    let owned: HashSet<&ProjectId> = projects
        .iter()
        .filter(|p| &p.faculty_id == faculty_id)
        .map(|p| &p.id)
        .collect();
    applications
        .iter()
        .filter(|a| owned.contains(&a.project_id))
        .collect()
}

/// Review-screen filter over applications.
#[derive(Debug, Clone, Default)]
pub struct ApplicationFilter {
    /// Case-insensitive match on the student name.
    pub search: String,
    pub status: Option<ApplicationStatus>,
    pub project_id: Option<ProjectId>,
}

impl ApplicationFilter {
    pub fn matches(&self, application: &Application) -> bool {
        let needle = self.search.to_lowercase();
        (needle.is_empty() || contains_ci(&application.student_name, &needle))
            && self.status.map_or(true, |s| application.status == s)
            && self
                .project_id
                .as_ref()
                .map_or(true, |p| &application.project_id == p)
    }

    pub fn apply<'a>(&self, applications: impl IntoIterator<Item = &'a Application>) -> Vec<&'a Application> {
        applications.into_iter().filter(|a| self.matches(a)).collect()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusCounts {
    pub total: usize,
    pub pending: usize,
    pub accepted: usize,
    pub rejected: usize,
}

impl StatusCounts {
    pub fn tally<'a>(applications: impl IntoIterator<Item = &'a Application>) -> Self {
        let mut counts = Self::default();
        for application in applications {
            counts.total += 1;
            match application.status {
                ApplicationStatus::Pending => counts.pending += 1,
                ApplicationStatus::Accepted => counts.accepted += 1,
                ApplicationStatus::Rejected => counts.rejected += 1,
            }
        }
        counts
    }

    /// Share of applications that have been decided, as a whole percentage.
    pub fn response_rate(&self) -> u32 {
        let decided = (self.accepted + self.rejected) as f64;
        (decided / self.total.max(1) as f64 * 100.0).round() as u32
    }
}

// ---------------------------------------------------------------------------
// Badges
// ---------------------------------------------------------------------------

pub fn awards_for_student<'a>(awards: &'a [StudentBadge], student_id: &UserId) -> Vec<&'a StudentBadge> {
    awards.iter().filter(|a| &a.student_id == student_id).collect()
}

/// Catalog badges the student has not earned yet.
pub fn available_badges<'a>(
    badges: &'a [Badge],
    awards: &[StudentBadge],
    student_id: &UserId,
) -> Vec<&'a Badge> {
    let earned: HashSet<&BadgeId> = awards
        .iter()
        .filter(|a| &a.student_id == student_id)
        .map(|a| &a.badge_id)
        .collect();
    badges.iter().filter(|b| !earned.contains(&b.id)).collect()
}

#[derive(Debug, Clone, Default)]
pub struct BadgeFilter {
    /// Case-insensitive match on name or description.
    pub search: String,
    pub category: Option<BadgeCategory>,
}

impl BadgeFilter {
    pub fn matches(&self, badge: &Badge) -> bool {
        let needle = self.search.to_lowercase();
        self.category.map_or(true, |c| badge.category == c)
            && (needle.is_empty()
                || contains_ci(&badge.name, &needle)
                || contains_ci(&badge.description, &needle))
    }

    pub fn apply<'a>(&self, badges: impl IntoIterator<Item = &'a Badge>) -> Vec<&'a Badge> {
        badges.into_iter().filter(|b| self.matches(b)).collect()
    }
}

/// Awards held relative to the catalog size, as a whole percentage.
///
/// Repeat awards count, so this can exceed 100.
pub fn badge_progress(awards_held: usize, catalog_size: usize) -> u32 {
    if catalog_size == 0 {
        return 0;
    }
    (awards_held as f64 / catalog_size as f64 * 100.0).round() as u32
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardEntry {
    pub rank: usize,
    pub student_id: UserId,
    pub awards: usize,
}

/// Students ranked by number of awards, ties broken by id.
pub fn leaderboard(awards: &[StudentBadge], limit: usize) -> Vec<LeaderboardEntry> {
    let mut counts: BTreeMap<&UserId, usize> = BTreeMap::new();
    for award in awards {
        *counts.entry(&award.student_id).or_default() += 1;
    }

    let mut ranked: Vec<(&UserId, usize)> = counts.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));

    ranked
        .into_iter()
        .take(limit)
        .enumerate()
        .map(|(i, (student_id, awards))| LeaderboardEntry {
            rank: i + 1,
            student_id: student_id.clone(),
            awards,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed;
    use nexus_shared::{time, ApplicationId, AwardId};

    fn application(id: &str, project: &str, student: &str, name: &str, status: ApplicationStatus) -> Application {
        Application {
            id: ApplicationId::from(id),
            project_id: ProjectId::from(project),
            student_id: UserId::from(student),
            student_name: name.into(),
            status,
            applied_at: time::at(2024, 1, 25, 0, 0),
            message: None,
        }
    }

    fn award(student: &str, badge: &str) -> StudentBadge {
        StudentBadge {
            id: AwardId::new(),
            student_id: UserId::from(student),
            badge_id: BadgeId::from(badge),
            awarded_by: UserId::from("2"),
            awarded_by_name: "Dr. Sarah Wilson".into(),
            awarded_at: time::at(2024, 1, 1, 0, 0),
            reason: "r".into(),
            project_id: None,
            event_id: None,
        }
    }

    #[test]
    fn test_marketplace_hides_non_open_projects() {
        let projects = seed::demo_projects();
        let listed = ProjectFilter::marketplace().apply(&projects);
        assert_eq!(listed.len(), 2);
        assert!(listed.iter().all(|p| p.status == ProjectStatus::Open));
    }

    #[test]
    fn test_project_search_is_case_insensitive() {
        let projects = seed::demo_projects();
        let filter = ProjectFilter {
            search: "IOT".into(),
            ..ProjectFilter::default()
        };
        let found = filter.apply(&projects);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, ProjectId::from("2"));

        let by_faculty = ProjectFilter {
            search: "wilson".into(),
            ..ProjectFilter::default()
        };
        assert_eq!(by_faculty.apply(&projects).len(), 3);
    }

    #[test]
    fn test_project_skill_filter() {
        let projects = seed::demo_projects();
        let filter = ProjectFilter {
            skill: Some("Web3".into()),
            ..ProjectFilter::default()
        };
        assert_eq!(filter.apply(&projects)[0].id, ProjectId::from("3"));
    }

    #[test]
    fn test_distinct_lists() {
        let projects = seed::demo_projects();
        assert_eq!(project_departments(&projects), vec!["Computer Science".to_string()]);
        let skills = project_skills(&projects);
        assert!(skills.contains(&"TensorFlow".to_string()));
        assert_eq!(skills.len(), 12);

        let events = seed::demo_events();
        assert_eq!(event_departments(&events).len(), 2);
    }

    #[test]
    fn test_event_filter_and_split() {
        let events = seed::demo_events();
        let filter = EventFilter {
            kind: Some(EventKind::Competition),
            ..EventFilter::default()
        };
        let matched = filter.apply(&events);
        assert_eq!(matched.len(), 1);

        let (upcoming, past) = split_by_date(&events, time::at(2024, 2, 15, 16, 0));
        assert_eq!(upcoming.len(), 2);
        assert_eq!(past.len(), 1);
    }

    #[test]
    fn test_faculty_applications_and_counts() {
        let mut projects = seed::demo_projects();
        projects[2].faculty_id = UserId::from("99");
        let apps = vec![
            application("a1", "1", "1", "Alex Chen", ApplicationStatus::Pending),
            application("a2", "2", "7", "Priya Nair", ApplicationStatus::Accepted),
            application("a3", "3", "8", "Omar Haddad", ApplicationStatus::Rejected),
        ];

        let mine = applications_for_faculty(&projects, &apps, &UserId::from("2"));
        assert_eq!(mine.len(), 2);

        let counts = StatusCounts::tally(mine.iter().copied());
        assert_eq!(
            counts,
            StatusCounts {
                total: 2,
                pending: 1,
                accepted: 1,
                rejected: 0
            }
        );
        assert_eq!(counts.response_rate(), 50);
        assert_eq!(StatusCounts::default().response_rate(), 0);

        let filter = ApplicationFilter {
            search: "priya".into(),
            ..ApplicationFilter::default()
        };
        assert_eq!(filter.apply(mine.iter().copied()).len(), 1);

        assert_eq!(applications_for_student(&apps, &UserId::from("1")).len(), 1);
    }

    #[test]
    fn test_available_badges_exclude_earned() {
        let badges = seed::badge_catalog();
        let awards = vec![award("1", "2"), award("1", "5"), award("9", "1")];

        let available = available_badges(&badges, &awards, &UserId::from("1"));
        assert_eq!(available.len(), 6);
        assert!(available.iter().all(|b| b.id != BadgeId::from("2")));

        assert_eq!(awards_for_student(&awards, &UserId::from("1")).len(), 2);
        assert_eq!(badge_progress(2, badges.len()), 25);
        assert_eq!(badge_progress(1, 0), 0);
    }

    #[test]
    fn test_badge_filter() {
        let badges = seed::badge_catalog();
        let filter = BadgeFilter {
            category: Some(BadgeCategory::Leadership),
            search: "mentor".into(),
        };
        let found = filter.apply(&badges);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "Mentor");
    }

    #[test]
    fn test_leaderboard_ranks_by_award_count() {
        let awards = vec![award("b", "1"), award("a", "1"), award("b", "2"), award("c", "3")];
        let board = leaderboard(&awards, 2);
        assert_eq!(board.len(), 2);
        assert_eq!(board[0].student_id, UserId::from("b"));
        assert_eq!(board[0].awards, 2);
        assert_eq!(board[1].student_id, UserId::from("a"));
        assert_eq!(board[1].rank, 2);
    }
}
