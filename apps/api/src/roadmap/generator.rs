//! Roadmap Generator: role template + declared skills → categorized skills,
//! skill gaps and a status-annotated roadmap.
//!
//! Step completion uses exact case-insensitive equality, unlike the substring
//! policy of the repository classifier.

use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::roadmap::skill_data::{PhaseTemplate, Priority, RoleCatalog, SkillCategory};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StepStatus {
    Recommended,
    Completed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PhaseStatus {
    #[serde(rename = "In Progress")]
    InProgress,
    Completed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoadmapStep {
    pub title: String,
    pub description: String,
    pub priority: Priority,
    pub status: StepStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoadmapPhase {
    pub phase: String,
    pub title: String,
    pub steps: Vec<RoadmapStep>,
    pub status: PhaseStatus,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CategorizedSkills {
    pub frontend: Vec<String>,
    pub backend: Vec<String>,
    pub cs_fundamentals: Vec<String>,
    pub tools: Vec<String>,
    pub other: Vec<String>,
}

impl CategorizedSkills {
    fn bucket_mut(&mut self, category: SkillCategory) -> &mut Vec<String> {
        match category {
            SkillCategory::Frontend => &mut self.frontend,
            SkillCategory::Backend => &mut self.backend,
            SkillCategory::CsFundamentals => &mut self.cs_fundamentals,
            SkillCategory::Tools => &mut self.tools,
            SkillCategory::Other => &mut self.other,
        }
    }
}

/// Requirement names (lower-case) in role-definition order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SkillGaps {
    pub strong: Vec<String>,
    pub missing: Vec<String>,
    pub optional: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillAnalysisOutput {
    pub categorized_skills: CategorizedSkills,
    pub skill_gaps: SkillGaps,
    pub roadmap: Vec<RoadmapPhase>,
}

#[derive(Debug, Clone, Default)]
pub struct RoadmapGenerator {
    catalog: RoleCatalog,
}

impl RoadmapGenerator {
    pub fn new(catalog: RoleCatalog) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &RoleCatalog {
        &self.catalog
    }

    /// Fails with `NotFound` when the role has no template.
    pub fn generate(
        &self,
        target_role: &str,
        current_skills: &[String],
    ) -> Result<SkillAnalysisOutput, AppError> {
        let role = self.catalog.role(target_role).ok_or_else(|| {
            AppError::NotFound(format!(
                "Roadmap for \"{target_role}\" is not available yet."
            ))
        })?;

        let lower_skills: Vec<String> = current_skills.iter().map(|s| s.to_lowercase()).collect();
        let has = |name: &str| lower_skills.iter().any(|s| s == name);

        let roadmap = role
            .phases
            .iter()
            .map(|phase| annotate_phase(phase, &lower_skills))
            .collect();

        let mut skill_gaps = SkillGaps::default();
        for &req in &role.requirements.strong {
            if has(req) {
                skill_gaps.strong.push(req.to_string());
            } else {
                skill_gaps.missing.push(req.to_string());
            }
        }
        skill_gaps.optional = role
            .requirements
            .optional
            .iter()
            .copied()
            .filter(|req| has(*req))
            .map(|req| req.to_string())
            .collect();

        Ok(SkillAnalysisOutput {
            categorized_skills: self.categorize(current_skills),
            skill_gaps,
            roadmap,
        })
    }

    /// Partitions skills by taxonomy category, keeping the first spelling of
    /// case-insensitive duplicates.
    pub fn categorize(&self, skills: &[String]) -> CategorizedSkills {
        let mut categorized = CategorizedSkills::default();
        let mut seen: Vec<String> = Vec::new();
        for skill in skills {
            let lower = skill.to_lowercase();
            if seen.contains(&lower) {
                continue;
            }
            categorized
                .bucket_mut(self.catalog.category_of(&lower))
                .push(skill.clone());
            seen.push(lower);
        }
        categorized
    }
}

fn annotate_phase(template: &PhaseTemplate, lower_skills: &[String]) -> RoadmapPhase {
    let steps: Vec<RoadmapStep> = template
        .steps
        .iter()
        .map(|step| {
            let title_lower = step.title.to_lowercase();
            let status = if lower_skills.iter().any(|s| *s == title_lower) {
                StepStatus::Completed
            } else {
                StepStatus::Recommended
            };
            RoadmapStep {
                title: step.title.to_string(),
                description: step.description.to_string(),
                priority: step.priority,
                status,
            }
        })
        .collect();

    let status = if steps.iter().all(|s| s.status == StepStatus::Completed) {
        PhaseStatus::Completed
    } else {
        PhaseStatus::InProgress
    };

    RoadmapPhase {
        phase: template.phase.to_string(),
        title: template.title.to_string(),
        steps,
        status,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn skills(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_frontend_roadmap_partial_progress() {
        let generator = RoadmapGenerator::default();
        let output = generator
            .generate("frontend developer", &skills(&["HTML", "React"]))
            .unwrap();

        let phase1 = &output.roadmap[0];
        assert_eq!(phase1.steps[0].title, "HTML");
        assert_eq!(phase1.steps[0].status, StepStatus::Completed);
        assert_eq!(phase1.steps[1].status, StepStatus::Recommended);
        assert_eq!(phase1.steps[2].status, StepStatus::Recommended);
        assert_eq!(phase1.status, PhaseStatus::InProgress);

        assert_eq!(output.skill_gaps.strong, vec!["html", "react"]);
        assert_eq!(output.skill_gaps.missing, vec!["css", "javascript", "git"]);
        assert!(output.skill_gaps.optional.is_empty());
        assert_eq!(output.categorized_skills.frontend, vec!["HTML", "React"]);
    }

    #[test]
    fn test_unknown_role_is_not_found() {
        let err = RoadmapGenerator::default()
            .generate("product manager", &skills(&["Roadmapping"]))
            .unwrap_err();
        match err {
            AppError::NotFound(msg) => assert!(msg.contains("product manager")),
            other => panic!("expected NotFound, got {other:?}"),
        }
    }

    #[test]
    fn test_role_key_is_case_insensitive() {
        assert!(RoadmapGenerator::default()
            .generate("Frontend Developer", &[])
            .is_ok());
    }

    #[test]
    fn test_phase_completed_when_all_steps_match() {
        let output = RoadmapGenerator::default()
            .generate("frontend developer", &skills(&["html", "Css", "JAVASCRIPT"]))
            .unwrap();
        assert_eq!(output.roadmap[0].status, PhaseStatus::Completed);
        assert_eq!(output.roadmap[1].status, PhaseStatus::InProgress);
    }

    #[test]
    fn test_step_match_is_exact_not_substring() {
        // "Java" must not complete the "JavaScript" step.
        let output = RoadmapGenerator::default()
            .generate("frontend developer", &skills(&["Java", "npm", "yarn"]))
            .unwrap();
        assert_eq!(output.roadmap[0].steps[2].status, StepStatus::Recommended);
        assert_eq!(output.roadmap[1].steps[2].status, StepStatus::Recommended);
        assert_eq!(output.skill_gaps.optional, vec!["npm", "yarn"]);
    }

    #[test]
    fn test_categorize_dedups_case_insensitively() {
        let generator = RoadmapGenerator::default();
        let categorized = generator.categorize(&skills(&[
            "React", "react", "Python", "Git", "Algorithms", "Rust", "RUST",
        ]));
        assert_eq!(categorized.frontend, vec!["React"]);
        assert_eq!(categorized.backend, vec!["Python"]);
        assert_eq!(categorized.tools, vec!["Git"]);
        assert_eq!(categorized.cs_fundamentals, vec!["Algorithms"]);
        assert_eq!(categorized.other, vec!["Rust"]);
    }

    #[test]
    fn test_generation_is_idempotent_and_leaves_template_untouched() {
        let generator = RoadmapGenerator::default();
        let input = skills(&["HTML", "CSS", "JavaScript", "Git"]);
        let first = generator.generate("frontend developer", &input).unwrap();
        let second = generator.generate("frontend developer", &input).unwrap();
        assert_eq!(first, second);
        assert_eq!(generator.catalog(), &RoleCatalog::default());
    }

    #[test]
    fn test_output_serializes_statuses_as_labels() {
        let output = RoadmapGenerator::default()
            .generate("frontend developer", &[])
            .unwrap();
        let json = serde_json::to_value(&output).unwrap();
        assert_eq!(json["roadmap"][0]["status"], "In Progress");
        assert_eq!(json["roadmap"][0]["steps"][0]["status"], "Recommended");
        assert_eq!(json["roadmap"][0]["steps"][0]["priority"], "High");
        assert!(json["categorized_skills"]["cs_fundamentals"].is_array());
    }
}
