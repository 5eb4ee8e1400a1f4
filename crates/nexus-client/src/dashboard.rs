//! Per-role dashboard counters.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::Serialize;

use nexus_shared::constants::RECOMMENDED_PROJECTS;
use nexus_shared::{ApplicationStatus, ProjectId, ProjectStatus, Role};
use nexus_store::User;

use crate::domain::DomainStore;
use crate::queries::{self, ProjectFilter, StatusCounts};

/// What the landing dashboard shows for each role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "role", rename_all = "snake_case")]
pub enum DashboardSummary {
    #[serde(rename_all = "camelCase")]
    Student {
        applications: StatusCounts,
        skills: usize,
        badges_earned: usize,
        recommended_projects: Vec<ProjectId>,
    },
    #[serde(rename_all = "camelCase")]
    Faculty {
        active_projects: usize,
        enrolled_students: u32,
        pending_reviews: usize,
    },
    #[serde(rename_all = "camelCase")]
    DeptAdmin {
        department: Option<String>,
        department_projects: usize,
        open_projects: usize,
        department_applications: usize,
    },
    #[serde(rename_all = "camelCase")]
    PlacementsAdmin {
        placed_students: usize,
        total_applications: usize,
        upcoming_events: usize,
    },
    #[serde(rename_all = "camelCase")]
    HeadAdmin {
        total_projects: usize,
        total_applications: usize,
        total_events: usize,
        badges_awarded: usize,
    },
}

impl DashboardSummary {
    pub fn for_user(user: &User, domain: &DomainStore, now: DateTime<Utc>) -> Self {
        match user.role {
            Role::Student => {
                let mine = queries::applications_for_student(domain.applications(), &user.id);
                let recommended_projects = ProjectFilter::marketplace()
                    .apply(domain.projects())
                    .into_iter()
                    .take(RECOMMENDED_PROJECTS)
                    .map(|p| p.id.clone())
                    .collect();
                DashboardSummary::Student {
                    applications: StatusCounts::tally(mine),
                    skills: user.skills.len(),
                    badges_earned: queries::awards_for_student(domain.student_badges(), &user.id)
                        .len(),
                    recommended_projects,
                }
            }
            Role::Faculty => {
                let projects = queries::projects_by_faculty(domain.projects(), &user.id);
                let reviews = queries::applications_for_faculty(
                    domain.projects(),
                    domain.applications(),
                    &user.id,
                );
                DashboardSummary::Faculty {
                    active_projects: projects
                        .iter()
                        .filter(|p| {
                            matches!(p.status, ProjectStatus::Open | ProjectStatus::InProgress)
                        })
                        .count(),
                    enrolled_students: projects.iter().map(|p| p.current_students).sum(),
                    pending_reviews: reviews
                        .iter()
                        .filter(|a| a.status == ApplicationStatus::Pending)
                        .count(),
                }
            }
            Role::DeptAdmin => {
                let in_department = |department: &str| {
                    user.department.as_deref() == Some(department)
                };
                let projects: Vec<_> = domain
                    .projects()
                    .iter()
                    .filter(|p| in_department(&p.department))
                    .collect();
                let ids: HashSet<&ProjectId> = projects.iter().map(|p| &p.id).collect();
                DashboardSummary::DeptAdmin {
                    department: user.department.clone(),
                    department_projects: projects.len(),
                    open_projects: projects
                        .iter()
                        .filter(|p| p.status == ProjectStatus::Open)
                        .count(),
                    department_applications: domain
                        .applications()
                        .iter()
                        .filter(|a| ids.contains(&a.project_id))
                        .count(),
                }
            }
            Role::PlacementsAdmin => {
                let placed: HashSet<_> = domain
                    .applications()
                    .iter()
                    .filter(|a| a.status == ApplicationStatus::Accepted)
                    .map(|a| &a.student_id)
                    .collect();
                let (upcoming, _) = queries::split_by_date(domain.events(), now);
                DashboardSummary::PlacementsAdmin {
                    placed_students: placed.len(),
                    total_applications: domain.applications().len(),
                    upcoming_events: upcoming.len(),
                }
            }
            Role::HeadAdmin => DashboardSummary::HeadAdmin {
                total_projects: domain.projects().len(),
                total_applications: domain.applications().len(),
                total_events: domain.events().len(),
                badges_awarded: domain.student_badges().len(),
            },
        }
    }
}
