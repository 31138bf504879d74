use serde::{Deserialize, Serialize};

/// Education entries carry at most this many achievement bullets.
pub const MAX_EDUCATION_ACHIEVEMENTS: usize = 3;

/// Contact details shown at the top of every rendered resume.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PersonalInfo {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub linkedin: String,
    pub github: String,
    pub portfolio: String,
    pub location: String,
}

/// Free-text date tokens ("May 2024", "Present") are kept as written.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Education {
    pub degree: String,
    pub institution: String,
    pub location: String,
    pub start_date: String,
    pub end_date: String,
    pub gpa: Option<String>,
    pub relevant_coursework: Vec<String>,
    pub achievements: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Experience {
    pub title: String,
    pub company: String,
    pub location: String,
    pub start_date: String,
    pub end_date: String,
    pub description: Vec<String>,
    pub skills_used: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Project {
    pub name: String,
    pub description: String,
    pub technologies: Vec<String>,
    pub achievements: Vec<String>,
    pub url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileSkills {
    pub technical: Vec<String>,
    pub languages: Vec<String>,
    pub tools: Vec<String>,
    #[serde(alias = "soft")]
    pub soft_skills: Vec<String>,
}

/// The reusable career record. Absent values are empty, never null.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Profile {
    pub personal_info: PersonalInfo,
    pub summary: String,
    /// Free-text narrative feeding the story generator.
    pub my_story: String,
    pub education: Vec<Education>,
    pub experience: Vec<Experience>,
    pub projects: Vec<Project>,
    pub skills: ProfileSkills,
    pub certifications: Vec<String>,
    pub awards: Vec<String>,
}

impl Profile {
    /// Checks constraints the form layer would otherwise enforce.
    pub fn validate(&self) -> Result<(), String> {
        for (i, edu) in self.education.iter().enumerate() {
            edu.validate()
                .map_err(|msg| format!("education[{i}]: {msg}"))?;
        }
        Ok(())
    }
}

impl Education {
    pub fn validate(&self) -> Result<(), String> {
        if self.achievements.len() > MAX_EDUCATION_ACHIEVEMENTS {
            return Err(format!(
                "at most {MAX_EDUCATION_ACHIEVEMENTS} achievements allowed, got {}",
                self.achievements.len()
            ));
        }
        Ok(())
    }
}
