//! Career Insight Synthesizer: profile-level judgement built from
//! independent additive signals.
//!
//! Each signal contributes points plus either a strength or a gap with its
//! matching next action. The readiness score is the clamped sum.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::analysis::aggregation::AggregatedSkill;
use crate::analysis::repository::AnalyzedRepo;
use crate::analysis::taxonomy::{ExperienceLevel, ProjectType};
use crate::models::github::ProfileFact;

const RECENT_ACTIVITY_DAYS: i64 = 90;
const TEST_KEYWORDS: &[&str] = &["test", "spec", "jest", "mocha", "chai", "pytest", "junit"];
pub const GENERALIST_ROLE: &str = "Generalist";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CareerInsights {
    pub experience_level: ExperienceLevel,
    pub primary_role: String,
    pub strengths: Vec<String>,
    pub gaps: Vec<String>,
    pub next_actions: Vec<String>,
    /// 0 – 100
    pub career_readiness_score: u8,
}

impl CareerInsights {
    /// Result for an account with nothing to analyse.
    pub fn empty() -> Self {
        Self {
            experience_level: ExperienceLevel::Beginner,
            primary_role: GENERALIST_ROLE.to_string(),
            strengths: vec![],
            gaps: vec!["No public repositories found to analyze.".to_string()],
            next_actions: vec![
                "Create a public repository on GitHub to showcase your skills.".to_string(),
            ],
            career_readiness_score: 0,
        }
    }
}

#[derive(Debug, Default)]
struct InsightBuilder {
    score: i32,
    strengths: Vec<String>,
    gaps: Vec<String>,
    next_actions: Vec<String>,
}

impl InsightBuilder {
    fn strength(&mut self, points: i32, text: impl Into<String>) {
        self.score += points;
        self.strengths.push(text.into());
    }

    fn gap(&mut self, gap: &str, action: &str) {
        self.gaps.push(gap.to_string());
        self.next_actions.push(action.to_string());
    }
}

pub fn synthesize_insights(
    profile: &ProfileFact,
    analyzed_repos: &[AnalyzedRepo],
    aggregated_skills: &[AggregatedSkill],
    now: DateTime<Utc>,
) -> CareerInsights {
    if analyzed_repos.is_empty() {
        return CareerInsights::empty();
    }

    let mut builder = InsightBuilder::default();
    let total = analyzed_repos.len() as f64;

    let (experience_level, level_points) = overall_level(analyzed_repos);
    builder.score += level_points;

    let primary_role = primary_role(analyzed_repos);

    // Community presence
    let avg_stars = analyzed_repos.iter().map(|r| r.stars as f64).sum::<f64>() / total;
    if avg_stars > 10.0 || profile.followers > 50 {
        builder.strength(
            15,
            "Building a community presence with starred projects and followers.",
        );
    }

    // Description quality
    let described = analyzed_repos
        .iter()
        .filter(|r| description_len(r) >= 50)
        .count() as f64;
    if described / total > 0.7 {
        builder.strength(15, "Writes clear and effective project descriptions.");
    } else {
        builder.gap(
            "Many projects lack a detailed README or description.",
            "Improve project descriptions and add detailed README.md files.",
        );
    }

    // Skill depth
    let advanced_skills: Vec<&str> = aggregated_skills
        .iter()
        .filter(|s| s.level == ExperienceLevel::Advanced)
        .map(|s| s.name.as_str())
        .collect();
    if advanced_skills.len() > 1 {
        let top: Vec<&str> = advanced_skills.iter().take(2).copied().collect();
        builder.strength(
            15,
            format!(
                "Demonstrates deep expertise in key technologies like {}.",
                top.join(" and ")
            ),
        );
    }

    // Recent activity
    let cutoff = now - Duration::days(RECENT_ACTIVITY_DAYS);
    let recent = analyzed_repos
        .iter()
        .filter(|r| r.pushed_at > cutoff)
        .count() as f64;
    if recent / total > 0.5 {
        builder.strength(10, "Maintains consistent and recent activity on projects.");
    } else {
        builder.gap(
            "Project activity has been low in the last 3 months.",
            "Contribute to a project or start a new one to show recent activity.",
        );
    }

    // Testing, judged from descriptions only
    let tested = analyzed_repos.iter().filter(|r| mentions_testing(r)).count() as f64;
    if tested / total < 0.2 {
        builder.gap(
            "Lacks demonstrated testing practices in projects.",
            "Incorporate a testing framework (like Jest or Pytest) into a key project.",
        );
    } else {
        builder.strength(
            5,
            "Includes testing in some projects, showing a commitment to code quality.",
        );
    }

    if builder.gaps.is_empty() {
        builder.gap(
            "Profile is strong, consider contributing to open source to further stand out.",
            "Find an open-source project aligned with your skills and make a contribution.",
        );
    }

    CareerInsights {
        experience_level,
        primary_role,
        strengths: builder.strengths,
        gaps: builder.gaps,
        next_actions: builder.next_actions,
        career_readiness_score: builder.score.clamp(0, 100) as u8,
    }
}

/// Overall tier from repository tiers, with its point contribution.
fn overall_level(repos: &[AnalyzedRepo]) -> (ExperienceLevel, i32) {
    let advanced = repos
        .iter()
        .filter(|r| r.analysis.experience_level == ExperienceLevel::Advanced)
        .count();
    let intermediate = repos
        .iter()
        .filter(|r| r.analysis.experience_level == ExperienceLevel::Intermediate)
        .count();

    if advanced >= 2 || (advanced >= 1 && intermediate >= 2) {
        (ExperienceLevel::Advanced, 40)
    } else if intermediate >= 2 || advanced >= 1 || repos.len() >= 5 {
        (ExperienceLevel::Intermediate, 20)
    } else {
        (ExperienceLevel::Beginner, 5)
    }
}

/// Most frequent non-General project type; the first seen wins a tie.
/// Any mix of Frontend and Backend work reads as Full Stack.
fn primary_role(repos: &[AnalyzedRepo]) -> String {
    let mut tally: Vec<(ProjectType, u32)> = Vec::new();
    for repo in repos {
        let project_type = repo.analysis.project_type;
        if project_type == ProjectType::General {
            continue;
        }
        match tally.iter_mut().find(|(t, _)| *t == project_type) {
            Some((_, count)) => *count += 1,
            None => tally.push((project_type, 1)),
        }
    }

    let count_of = |target: ProjectType| {
        tally
            .iter()
            .find(|(t, _)| *t == target)
            .map(|(_, c)| *c)
            .unwrap_or(0)
    };
    if count_of(ProjectType::Frontend) > 0 && count_of(ProjectType::Backend) > 0 {
        return ProjectType::FullStack.label().to_string();
    }

    let mut best: Option<(ProjectType, u32)> = None;
    for (project_type, count) in tally {
        if best.map_or(true, |(_, c)| count > c) {
            best = Some((project_type, count));
        }
    }
    best.map(|(t, _)| t.label().to_string())
        .unwrap_or_else(|| GENERALIST_ROLE.to_string())
}

fn description_len(repo: &AnalyzedRepo) -> usize {
    repo.description
        .as_deref()
        .map(|d| d.chars().count())
        .unwrap_or(0)
}

fn mentions_testing(repo: &AnalyzedRepo) -> bool {
    let description = repo.description.as_deref().unwrap_or("").to_lowercase();
    TEST_KEYWORDS.iter().any(|kw| description.contains(kw))
}
