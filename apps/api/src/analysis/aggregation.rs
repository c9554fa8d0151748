//! Skill Aggregator: folds language signals across all repositories into a
//! ranked, leveled skill inventory.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::analysis::taxonomy::ExperienceLevel;
use crate::models::github::RepositoryFact;

const MS_PER_DAY: f64 = 1000.0 * 3600.0 * 24.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregatedSkill {
    pub name: String,
    pub level: ExperienceLevel,
    pub repo_count: u32,
    /// Summed bytes of code across repositories.
    pub frequency: u64,
    /// Average days since last push across repositories exhibiting the skill.
    pub recency: f64,
}

#[derive(Debug, Default)]
struct SkillStats {
    repo_count: u32,
    frequency: u64,
    recency_samples: Vec<f64>,
}

/// Aggregates and ranks skills, descending by frequency. Equal frequencies
/// keep first-seen order.
pub fn aggregate_skills(repos: &[RepositoryFact], now: DateTime<Utc>) -> Vec<AggregatedSkill> {
    let mut order: Vec<String> = Vec::new();
    let mut stats: HashMap<String, SkillStats> = HashMap::new();

    for repo in repos {
        let days_since_push = days_between(repo.pushed_at, now);

        let mut skills_in_repo: Vec<&str> = Vec::new();
        if let Some(language) = repo.language.as_deref() {
            skills_in_repo.push(language);
        }
        for language in repo.languages.keys() {
            if !skills_in_repo.contains(&language.as_str()) {
                skills_in_repo.push(language);
            }
        }

        for skill in skills_in_repo {
            let entry = stats.entry(skill.to_string()).or_insert_with(|| {
                order.push(skill.to_string());
                SkillStats::default()
            });
            entry.repo_count += 1;
            entry.frequency += repo.languages.get(skill).copied().unwrap_or(0);
            entry.recency_samples.push(days_since_push);
        }
    }

    let mut ranked: Vec<AggregatedSkill> = order
        .into_iter()
        .filter_map(|name| {
            let skill_stats = stats.remove(&name)?;
            let recency = average(&skill_stats.recency_samples);
            Some(AggregatedSkill {
                level: skill_level(skill_stats.repo_count, skill_stats.frequency, recency),
                name,
                repo_count: skill_stats.repo_count,
                frequency: skill_stats.frequency,
                recency,
            })
        })
        .collect();

    // Stable sort keeps insertion order among equal frequencies.
    ranked.sort_by(|a, b| b.frequency.cmp(&a.frequency));
    ranked
}

/// Recency alone is enough for Advanced: one repo pushed last week qualifies.
pub fn skill_level(repo_count: u32, frequency: u64, average_recency_days: f64) -> ExperienceLevel {
    if (repo_count >= 3 && frequency > 50_000) || average_recency_days < 90.0 {
        ExperienceLevel::Advanced
    } else if repo_count >= 2 || frequency > 10_000 {
        ExperienceLevel::Intermediate
    } else {
        ExperienceLevel::Beginner
    }
}

/// Fractional days from `from` to `to`.
pub fn days_between(from: DateTime<Utc>, to: DateTime<Utc>) -> f64 {
    (to - from).num_milliseconds() as f64 / MS_PER_DAY
}

fn average(samples: &[f64]) -> f64 {
    if samples.is_empty() {
        return 0.0;
    }
    samples.iter().sum::<f64>() / samples.len() as f64
}
