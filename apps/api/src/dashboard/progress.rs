//! Dashboard progress summary: project counts, roadmap progress and a
//! weighted career-readiness score with a short explanation.
//!
//! Pure over a stored profile and its projects. Readiness metrics exist only
//! once a roadmap has been generated.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::models::profile::UserProfileRow;
use crate::models::project::{ProjectRow, ProjectStatus};
use crate::roadmap::generator::{PhaseStatus, RoadmapPhase, StepStatus};
use crate::roadmap::skill_data::RoleCatalog;

pub const REQUIRED_PROJECT_COUNT: u32 = 3;

const SKILL_WEIGHT: f64 = 0.5;
const ROADMAP_WEIGHT: f64 = 0.3;
const PROJECT_WEIGHT: f64 = 0.2;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressSummary {
    pub total_projects: u32,
    pub completed_projects: u32,
    pub projects_in_progress: u32,
    pub has_roadmap: bool,
    pub roadmap_progress_percentage: u32,
    pub current_roadmap_phase: String,
    pub phases_completed: u32,
    pub phases_remaining: u32,
    pub total_required_skills: u32,
    pub completed_required_skills: u32,
    pub missing_critical_skills: u32,
    pub missing_projects: u32,
    pub career_readiness_percentage: u32,
    pub readiness_explanation: String,
}

/// Decodes the stored roadmap. An absent or unreadable document counts as no roadmap.
pub fn stored_roadmap(profile: &UserProfileRow) -> Vec<RoadmapPhase> {
    let Some(value) = profile.roadmap.clone() else {
        return Vec::new();
    };
    serde_json::from_value(value).unwrap_or_else(|e| {
        warn!("Stored roadmap for user {} is unreadable: {e}", profile.user_id);
        Vec::new()
    })
}

pub fn compute_progress(
    profile: &UserProfileRow,
    projects: &[ProjectRow],
    catalog: &RoleCatalog,
) -> ProgressSummary {
    let count = |status: ProjectStatus| projects.iter().filter(|p| p.status() == status).count() as u32;
    let completed_projects = count(ProjectStatus::Completed);

    let mut summary = ProgressSummary {
        total_projects: projects.len() as u32,
        completed_projects,
        projects_in_progress: count(ProjectStatus::InProgress),
        has_roadmap: false,
        roadmap_progress_percentage: 0,
        current_roadmap_phase: "Not Started".to_string(),
        phases_completed: 0,
        phases_remaining: 0,
        total_required_skills: 0,
        completed_required_skills: 0,
        missing_critical_skills: 0,
        missing_projects: 0,
        career_readiness_percentage: 0,
        readiness_explanation: String::new(),
    };

    let roadmap = stored_roadmap(profile);
    if roadmap.is_empty() {
        return summary;
    }
    summary.has_roadmap = true;

    let steps = roadmap.iter().flat_map(|phase| &phase.steps);
    let total_steps = steps.clone().count();
    let completed_steps = steps.filter(|s| s.status == StepStatus::Completed).count();
    if total_steps > 0 {
        summary.roadmap_progress_percentage = percent(completed_steps as f64 / total_steps as f64);
    }

    summary.current_roadmap_phase = match roadmap.iter().find(|p| p.status != PhaseStatus::Completed) {
        Some(phase) => format!("{}: {}", phase.phase, phase.title),
        None => "All phases completed!".to_string(),
    };
    summary.phases_completed = roadmap
        .iter()
        .filter(|p| p.status == PhaseStatus::Completed)
        .count() as u32;
    summary.phases_remaining = roadmap.len() as u32 - summary.phases_completed;

    if let Some(role) = profile.target_role.as_deref().and_then(|r| catalog.role(r)) {
        let effective_skills: Vec<String> = profile
            .skills
            .iter()
            .chain(
                projects
                    .iter()
                    .filter(|p| p.status() == ProjectStatus::Completed)
                    .flat_map(|p| &p.skills),
            )
            .map(|s| s.to_lowercase())
            .collect();
        summary.total_required_skills = role.requirements.strong.len() as u32;
        summary.completed_required_skills = role
            .requirements
            .strong
            .iter()
            .filter(|req| effective_skills.iter().any(|s| s == *req))
            .count() as u32;
        summary.missing_critical_skills =
            summary.total_required_skills - summary.completed_required_skills;
    }

    summary.missing_projects = REQUIRED_PROJECT_COUNT.saturating_sub(completed_projects);

    let skill_coverage = ratio(summary.completed_required_skills, summary.total_required_skills);
    let roadmap_coverage = ratio(summary.phases_completed, roadmap.len() as u32);
    let project_coverage = ratio(completed_projects, REQUIRED_PROJECT_COUNT).min(1.0);
    summary.career_readiness_percentage = percent(
        skill_coverage * SKILL_WEIGHT
            + roadmap_coverage * ROADMAP_WEIGHT
            + project_coverage * PROJECT_WEIGHT,
    );
    summary.readiness_explanation = readiness_explanation(
        summary.missing_critical_skills,
        summary.missing_projects,
        summary.career_readiness_percentage,
    );

    summary
}

fn ratio(part: u32, whole: u32) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64
    }
}

fn percent(fraction: f64) -> u32 {
    (fraction * 100.0).round() as u32
}

fn plural(count: u32, noun: &str) -> String {
    if count == 1 {
        noun.to_string()
    } else {
        format!("{noun}s")
    }
}

fn readiness_explanation(missing_skills: u32, missing_projects: u32, readiness: u32) -> String {
    let mut factors = Vec::new();
    if missing_skills > 0 {
        factors.push(format!(
            "{missing_skills} missing critical {}",
            plural(missing_skills, "skill")
        ));
    }
    if missing_projects > 0 {
        factors.push(format!(
            "{missing_projects} more {} needed",
            plural(missing_projects, "project")
        ));
    }

    if !factors.is_empty() {
        format!("Limited by {}.", factors.join(" and "))
    } else if readiness < 100 {
        "Keep completing your roadmap to reach 100%!".to_string()
    } else {
        "You've met all readiness requirements!".to_string()
    }
}
