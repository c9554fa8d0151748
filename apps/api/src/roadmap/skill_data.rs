//! Role catalog: skill taxonomy, role requirements and roadmap templates.
//!
//! Role keys are lower-case. The catalog is read-only once built; generated
//! roadmaps are fresh owned values and never alias template data.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkillCategory {
    Frontend,
    Backend,
    CsFundamentals,
    Tools,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Priority {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StepTemplate {
    pub title: &'static str,
    pub description: &'static str,
    pub priority: Priority,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PhaseTemplate {
    pub phase: &'static str,
    pub title: &'static str,
    pub steps: Vec<StepTemplate>,
}

/// Lower-case skill names a role demands (`strong`) or rewards (`optional`).
#[derive(Debug, Clone, PartialEq)]
pub struct RoleRequirements {
    pub strong: Vec<&'static str>,
    pub optional: Vec<&'static str>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RoleDefinition {
    pub key: &'static str,
    pub requirements: RoleRequirements,
    pub phases: Vec<PhaseTemplate>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RoleCatalog {
    /// Lower-case skill name → category. Anything absent is `Other`.
    pub taxonomy: Vec<(&'static str, SkillCategory)>,
    pub roles: Vec<RoleDefinition>,
}

impl RoleCatalog {
    /// Case-insensitive role lookup.
    pub fn role(&self, target_role: &str) -> Option<&RoleDefinition> {
        let key = target_role.to_lowercase();
        self.roles.iter().find(|r| r.key == key)
    }

    /// Category for a skill, matched case-insensitively.
    pub fn category_of(&self, skill: &str) -> SkillCategory {
        let lower = skill.to_lowercase();
        self.taxonomy
            .iter()
            .find(|(name, _)| *name == lower)
            .map(|(_, category)| *category)
            .unwrap_or(SkillCategory::Other)
    }
}

fn step(title: &'static str, description: &'static str, priority: Priority) -> StepTemplate {
    StepTemplate {
        title,
        description,
        priority,
    }
}

impl Default for RoleCatalog {
    fn default() -> Self {
        use SkillCategory::*;

        Self {
            taxonomy: vec![
                ("html", Frontend),
                ("css", Frontend),
                ("javascript", Frontend),
                ("react", Frontend),
                ("next.js", Frontend),
                ("vue", Frontend),
                ("angular", Frontend),
                ("node.js", Backend),
                ("express", Backend),
                ("python", Backend),
                ("django", Backend),
                ("java", Backend),
                ("sql", Backend),
                ("mongodb", Backend),
                ("data structures", CsFundamentals),
                ("algorithms", CsFundamentals),
                ("git", Tools),
                ("docker", Tools),
                ("npm", Tools),
                ("yarn", Tools),
                ("jest", Tools),
                ("rtl", Tools),
            ],
            roles: vec![RoleDefinition {
                key: "frontend developer",
                requirements: RoleRequirements {
                    strong: vec!["html", "css", "javascript", "react", "git"],
                    optional: vec!["typescript", "next.js", "jest", "rtl", "npm", "yarn"],
                },
                phases: vec![
                    PhaseTemplate {
                        phase: "Phase 1",
                        title: "Mastering the Fundamentals",
                        steps: vec![
                            step("HTML", "The backbone of all web pages.", Priority::High),
                            step(
                                "CSS",
                                "Essential for styling and visual presentation.",
                                Priority::High,
                            ),
                            step(
                                "JavaScript",
                                "The core language for web interactivity.",
                                Priority::High,
                            ),
                        ],
                    },
                    PhaseTemplate {
                        phase: "Phase 2",
                        title: "Core Role Competencies",
                        steps: vec![
                            step(
                                "React",
                                "A powerful library for building user interfaces.",
                                Priority::High,
                            ),
                            step(
                                "Git",
                                "Version control is crucial for collaboration.",
                                Priority::High,
                            ),
                            step(
                                "Package Managers (npm/yarn)",
                                "Manage project dependencies effectively.",
                                Priority::Medium,
                            ),
                        ],
                    },
                    PhaseTemplate {
                        phase: "Phase 3",
                        title: "Advanced & Specialization",
                        steps: vec![
                            step(
                                "TypeScript",
                                "Adds static typing to JavaScript for larger projects.",
                                Priority::Medium,
                            ),
                            step(
                                "Next.js",
                                "A popular React framework for production apps.",
                                Priority::Low,
                            ),
                            step(
                                "Testing (Jest/RTL)",
                                "Ensure your code is reliable and bug-free.",
                                Priority::Low,
                            ),
                        ],
                    },
                ],
            }],
        }
    }
}
