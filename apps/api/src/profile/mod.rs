// User profile: declared skills and career target, plus skill-list editing rules.

pub mod handlers;
pub mod store;

use crate::errors::AppError;

/// Trims, drops blanks and removes case-insensitive duplicates (first spelling wins).
pub fn normalize_skills(skills: &[String]) -> Vec<String> {
    let mut normalized: Vec<String> = Vec::new();
    for skill in skills {
        let skill = skill.trim();
        if skill.is_empty() {
            continue;
        }
        let lower = skill.to_lowercase();
        if !normalized.iter().any(|s| s.to_lowercase() == lower) {
            normalized.push(skill.to_string());
        }
    }
    normalized
}

/// Trimmed skill name, or `Validation` when blank.
pub fn validate_skill(skill: &str) -> Result<&str, AppError> {
    let skill = skill.trim();
    if skill.is_empty() {
        return Err(AppError::Validation("skill cannot be empty".to_string()));
    }
    Ok(skill)
}

pub fn duplicate_skill(skill: &str) -> AppError {
    AppError::Validation(format!("Skill \"{skill}\" already exists"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn skills(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_normalize_dedups_and_trims() {
        let normalized = normalize_skills(&skills(&[" React ", "react", "", "Go", "GO", "Rust"]));
        assert_eq!(normalized, vec!["React", "Go", "Rust"]);
    }

    #[test]
    fn test_validate_skill() {
        assert_eq!(validate_skill("  Docker ").unwrap(), "Docker");
        assert!(matches!(validate_skill("   "), Err(AppError::Validation(_))));
    }

    #[test]
    fn test_duplicate_skill_message() {
        match duplicate_skill("typescript") {
            AppError::Validation(msg) => assert_eq!(msg, "Skill \"typescript\" already exists"),
            other => panic!("expected Validation, got {other:?}"),
        }
    }
}
