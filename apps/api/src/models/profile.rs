use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::analysis::normalizer::strip_bullet_glyph;
use crate::errors::AppError;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContactInfo {
    pub email: Option<String>,
    pub phone: Option<String>,
    pub linkedin: Option<String>,
    pub location: Option<String>,
}

impl ContactInfo {
    /// Non-empty contact fields in display order.
    pub fn parts(&self) -> Vec<&str> {
        [&self.email, &self.phone, &self.linkedin, &self.location]
            .into_iter()
            .filter_map(|f| f.as_deref().map(str::trim))
            .filter(|s| !s.is_empty())
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExperienceEntry {
    pub title: String,
    pub org: String,
    #[serde(default)]
    pub dates: Option<String>,
    #[serde(default)]
    pub bullets: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EducationEntry {
    pub degree: String,
    pub institution: String,
    #[serde(default)]
    pub dates: Option<String>,
    /// GPA, honours, coursework.
    #[serde(default)]
    pub details: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectEntry {
    pub name: String,
    /// Shown after the name, e.g. "Rust, Postgres".
    #[serde(default)]
    pub tech_stack: Option<String>,
    #[serde(default)]
    pub bullets: Vec<String>,
}

/// Structured resume input. Immutable once handed to scoring or rendering.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResumeProfile {
    pub name: String,
    #[serde(default)]
    pub contact: ContactInfo,
    /// Target role shown under the name.
    #[serde(default)]
    pub headline: Option<String>,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub experience: Vec<ExperienceEntry>,
    #[serde(default)]
    pub projects: Vec<ProjectEntry>,
    #[serde(default)]
    pub education: Vec<EducationEntry>,
    #[serde(default)]
    pub skills: BTreeSet<String>,
}

impl ResumeProfile {
    /// Checks entry-level fields. Section presence is the renderer's concern.
    pub fn validate(&self) -> Result<(), AppError> {
        for (i, entry) in self.experience.iter().enumerate() {
            if entry.title.trim().is_empty() {
                return Err(AppError::input(
                    format!("experience[{i}].title"),
                    "every experience entry needs a title",
                ));
            }
            if entry.org.trim().is_empty() {
                return Err(AppError::input(
                    format!("experience[{i}].org"),
                    "every experience entry needs an organization",
                ));
            }
        }
        for (i, entry) in self.projects.iter().enumerate() {
            if entry.name.trim().is_empty() {
                return Err(AppError::input(
                    format!("projects[{i}].name"),
                    "every project needs a name",
                ));
            }
        }
        for (i, entry) in self.education.iter().enumerate() {
            if entry.degree.trim().is_empty() {
                return Err(AppError::input(
                    format!("education[{i}].degree"),
                    "every education entry needs a degree",
                ));
            }
            if entry.institution.trim().is_empty() {
                return Err(AppError::input(
                    format!("education[{i}].institution"),
                    "every education entry needs an institution",
                ));
            }
        }
        Ok(())
    }

    /// Experience then project bullets in order, glyphs stripped, empties skipped.
    pub fn bullets(&self) -> impl Iterator<Item = &str> {
        self.experience
            .iter()
            .flat_map(|e| e.bullets.iter())
            .chain(self.projects.iter().flat_map(|p| p.bullets.iter()))
            .map(|b| strip_bullet_glyph(b))
            .filter(|b| !b.is_empty())
    }

    /// Summary, bullets (one "- " line each), and skills: the text that gets scored.
    pub fn combined_text(&self) -> String {
        let mut lines: Vec<String> = Vec::new();
        if let Some(summary) = self.summary.as_deref().filter(|s| !s.trim().is_empty()) {
            lines.push(summary.trim().to_string());
        }
        lines.extend(self.bullets().map(|b| format!("- {b}")));
        if !self.skills.is_empty() {
            let skills: Vec<&str> = self.skills.iter().map(String::as_str).collect();
            lines.push(skills.join(", "));
        }
        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ResumeProfile {
        ResumeProfile {
            name: "Ada Lovelace".to_string(),
            summary: Some("Engineer who ships.".to_string()),
            experience: vec![ExperienceEntry {
                title: "Engineer".to_string(),
                org: "Analytical Engines".to_string(),
                dates: Some("1842 – 1843".to_string()),
                bullets: vec!["• Designed the first program".to_string(), "  ".to_string()],
            }],
            skills: ["math", "python"].iter().map(|s| s.to_string()).collect(),
            ..Default::default()
        }
    }

    #[test]
    fn test_combined_text_layout() {
        assert_eq!(
            sample().combined_text(),
            "Engineer who ships.\n- Designed the first program\nmath, python"
        );
    }

    #[test]
    fn test_validate_flags_entry_field() {
        let mut p = sample();
        p.experience[0].org = " ".to_string();
        match p.validate() {
            Err(AppError::Input { field, .. }) => assert_eq!(field, "experience[0].org"),
            other => panic!("expected input error, got {other:?}"),
        }
    }

    #[test]
    fn test_project_bullets_are_scored_text() {
        let mut p = sample();
        p.projects.push(ProjectEntry {
            name: "Difference Engine Emulator".to_string(),
            tech_stack: Some("Rust".to_string()),
            bullets: vec!["- Reproduced 12 historical tables".to_string()],
        });
        assert_eq!(
            p.bullets().collect::<Vec<_>>(),
            vec!["Designed the first program", "Reproduced 12 historical tables"]
        );
        assert!(p.combined_text().contains("- Reproduced 12 historical tables"));
    }

    #[test]
    fn test_validate_flags_blank_project_name() {
        let mut p = sample();
        p.projects.push(ProjectEntry {
            name: "  ".to_string(),
            tech_stack: None,
            bullets: vec![],
        });
        match p.validate() {
            Err(AppError::Input { field, .. }) => assert_eq!(field, "projects[0].name"),
            other => panic!("expected input error, got {other:?}"),
        }
    }

    #[test]
    fn test_contact_parts_skip_blank() {
        let c = ContactInfo {
            email: Some("ada@example.com".to_string()),
            phone: Some("  ".to_string()),
            linkedin: None,
            location: Some("London".to_string()),
        };
        assert_eq!(c.parts(), vec!["ada@example.com", "London"]);
    }

    #[test]
    fn test_profile_deserializes_with_defaults() {
        let p: ResumeProfile = serde_json::from_str(r#"{"name": "Ada"}"#).unwrap();
        assert!(p.experience.is_empty());
        assert!(p.projects.is_empty());
        assert!(p.contact.parts().is_empty());
    }
}
