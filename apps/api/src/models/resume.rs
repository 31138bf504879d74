use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::models::profile::{Education, Experience, PersonalInfo, Project};

/// Structured read of a job description, shared context for every later prompt.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JobAnalysis {
    #[serde(deserialize_with = "nullable_list")]
    pub required_skills: Vec<String>,
    #[serde(deserialize_with = "nullable_list")]
    pub soft_skills: Vec<String>,
    /// Models answer with "3+ years", 5 or null; all are kept as text.
    #[serde(deserialize_with = "string_or_number")]
    pub experience_years: String,
    #[serde(deserialize_with = "nullable_list")]
    pub responsibilities: Vec<String>,
    #[serde(deserialize_with = "nullable_list")]
    pub nice_to_have: Vec<String>,
    #[serde(deserialize_with = "nullable_list")]
    pub culture_keywords: Vec<String>,
}

/// The generated skills section: three categories, nine entries requested each.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SkillsSection {
    pub technical: Vec<String>,
    pub languages: Vec<String>,
    pub tools: Vec<String>,
}

impl SkillsSection {
    pub fn is_empty(&self) -> bool {
        self.technical.is_empty() && self.languages.is_empty() && self.tools.is_empty()
    }
}

/// Per-job output of the orchestrator. Only persisted inside history entries.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TailoredResume {
    pub personal_info: PersonalInfo,
    pub summary: String,
    pub experience: Vec<Experience>,
    pub projects: Vec<Project>,
    pub education: Vec<Education>,
    pub skills: SkillsSection,
    pub certifications: Vec<String>,
    pub awards: Vec<String>,
    pub jd_analysis: JobAnalysis,
}

/// Narrative outputs; only the requested, non-empty ones are present.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoryContent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub why_you_want_to_work_here: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_letter: Option<String>,
}

impl StoryContent {
    pub fn is_empty(&self) -> bool {
        self.why_you_want_to_work_here.is_none() && self.cover_letter.is_none()
    }
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s,
        Value::Number(n) => n.to_string(),
        Value::Null => String::new(),
        other => other.to_string(),
    })
}

fn nullable_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}
