//! Resume Generation: orchestrates the tailoring pipeline.
//!
//! Flow: analyze JD → summary → per-experience tailoring → per-project
//!       tailoring → skills section → assemble `TailoredResume`.
//!
//! Steps run strictly in order and the first failure aborts the whole run.
//! There is no partial resume and no retry at this layer.

use std::collections::HashMap;

use serde::Deserialize;
use tracing::info;

use crate::errors::AppError;
use crate::generation::analysis::{analyze_job_description, json_prompt, json_system};
use crate::generation::prompts::{
    EXPERIENCE_BULLETS_TEMPLATE, EXPERIENCE_CONTEXT_TEMPLATE,
    EXPERIENCE_SKILLS_AND_BULLETS_TEMPLATE, EXPERIENCE_SYSTEM, PROJECT_PROMPT_TEMPLATE,
    PROJECT_SYSTEM, SKILLS_PROMPT_TEMPLATE, SKILLS_SYSTEM, SUMMARY_PROMPT_TEMPLATE,
    SUMMARY_SYSTEM,
};
use crate::generation::truncate::truncate_bullets;
use crate::llm_client::prompts::{extra_context_block, fill_template, GROUNDING_INSTRUCTION};
use crate::llm_client::{generate_json, GenerationRequest, LlmError, TextGenerator};
use crate::models::{Experience, JobAnalysis, Profile, Project, SkillsSection, TailoredResume};

pub const DEFAULT_BULLET_COUNT: u8 = 4;
pub const MIN_BULLET_COUNT: u8 = 2;
pub const MAX_BULLET_COUNT: u8 = 6;

/// Only the first few profile projects make it onto a resume.
pub const MAX_PROJECTS: usize = 3;

/// Description marking a project whose details should be generated.
pub const PROJECT_PLACEHOLDER: &str = "Project details to be generated";

const SUMMARY_MAX_TOKENS: u32 = 800;
const SUMMARY_TEMPERATURE: f32 = 0.6;
const EXPERIENCE_MAX_TOKENS: u32 = 2500;
const EXPERIENCE_TEMPERATURE: f32 = 0.6;
const PROJECT_MAX_TOKENS: u32 = 2000;
const PROJECT_TEMPERATURE: f32 = 0.6;
const SKILLS_MAX_TOKENS: u32 = 1000;
const SKILLS_TEMPERATURE: f32 = 0.7;

// ────────────────────────────────────────────────────────────────────────────
// Data models
// ────────────────────────────────────────────────────────────────────────────

/// Caller-supplied knobs for one generation run.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct GenerationOptions {
    /// Free-text context injected into the experience and project prompts.
    pub extra_knowledge: Option<String>,
    /// Bullets requested per experience index; absent entries use the default.
    pub experience_bullet_counts: HashMap<usize, u8>,
}

impl GenerationOptions {
    /// Rejects out-of-range counts before any network call.
    pub fn validate(&self) -> Result<(), AppError> {
        let mut indices: Vec<_> = self.experience_bullet_counts.keys().collect();
        indices.sort();
        for index in indices {
            let count = self.experience_bullet_counts[index];
            if !(MIN_BULLET_COUNT..=MAX_BULLET_COUNT).contains(&count) {
                return Err(AppError::Validation(format!(
                    "experience_bullet_counts[{index}] must be between \
                     {MIN_BULLET_COUNT} and {MAX_BULLET_COUNT}, got {count}"
                )));
            }
        }
        Ok(())
    }

    fn bullet_count(&self, index: usize) -> u8 {
        self.experience_bullet_counts
            .get(&index)
            .copied()
            .unwrap_or(DEFAULT_BULLET_COUNT)
    }
}

/// Reply to an experience prompt. Keys the model omits fall back to the entry's data.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ExperienceReply {
    skills: Option<Vec<String>>,
    bullets: Option<Vec<String>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ProjectReply {
    description: Option<String>,
    technologies: Option<Vec<String>>,
    achievements: Option<Vec<String>>,
}

// ────────────────────────────────────────────────────────────────────────────
// Generation pipeline
// ────────────────────────────────────────────────────────────────────────────

/// Runs the full tailoring pipeline.
///
/// Steps:
/// 1. analyze_job_description() → JobAnalysis
/// 2. generate_summary() → String
/// 3. tailor_experiences() → one call per experience entry
/// 4. tailor_projects() → up to three calls
/// 5. generate_skills() → SkillsSection
///
/// Education, certifications and awards are copied verbatim.
pub async fn generate_tailored_resume(
    generator: &dyn TextGenerator,
    profile: &Profile,
    job_description: &str,
    options: &GenerationOptions,
) -> Result<TailoredResume, AppError> {
    if job_description.trim().is_empty() {
        return Err(AppError::Validation(
            "job_description cannot be empty".to_string(),
        ));
    }
    options.validate()?;

    // Step 1: JD analysis
    info!("Step 1/5: analyzing job description");
    let jd_analysis = analyze_job_description(generator, job_description).await?;

    // Step 2: Summary
    info!("Step 2/5: generating summary");
    let summary = generate_summary(generator, profile, &jd_analysis).await?;

    // Step 3: Experience
    info!(
        "Step 3/5: tailoring {} experience entries",
        profile.experience.len()
    );
    let experience = tailor_experiences(generator, profile, &jd_analysis, options).await?;

    // Step 4: Projects
    info!("Step 4/5: tailoring projects");
    let projects = tailor_projects(
        generator,
        profile,
        &jd_analysis,
        options.extra_knowledge.as_deref(),
    )
    .await?;

    // Step 5: Skills
    info!("Step 5/5: generating skills section");
    let skills = generate_skills(generator, profile, &jd_analysis).await?;

    info!(
        "Generated tailored resume: {} experience, {} projects",
        experience.len(),
        projects.len()
    );

    Ok(TailoredResume {
        personal_info: profile.personal_info.clone(),
        summary,
        experience,
        projects,
        education: profile.education.clone(),
        skills,
        certifications: profile.certifications.clone(),
        awards: profile.awards.clone(),
        jd_analysis,
    })
}

// ────────────────────────────────────────────────────────────────────────────
// Step 2: summary
// ────────────────────────────────────────────────────────────────────────────

pub fn build_summary_request(profile: &Profile, analysis: &JobAnalysis) -> GenerationRequest {
    let current_title = profile
        .experience
        .first()
        .map(|e| e.title.as_str())
        .unwrap_or("Entry Level");
    let education = profile
        .education
        .first()
        .map(|e| e.degree.as_str())
        .unwrap_or_default();

    let prompt = fill_template(
        SUMMARY_PROMPT_TEMPLATE,
        &[
            ("current_title", current_title),
            ("skills", join_first(&profile.skills.technical, 10).as_str()),
            ("education", education),
            ("required_skills", join_first(&analysis.required_skills, 10).as_str()),
            ("responsibilities", join_first(&analysis.responsibilities, 5).as_str()),
            ("culture_keywords", analysis.culture_keywords.join(", ").as_str()),
        ],
    );

    GenerationRequest::new(
        SUMMARY_SYSTEM,
        prompt,
        SUMMARY_MAX_TOKENS,
        SUMMARY_TEMPERATURE,
    )
}

/// Step 2. The reply is used as-is after trimming.
pub async fn generate_summary(
    generator: &dyn TextGenerator,
    profile: &Profile,
    analysis: &JobAnalysis,
) -> Result<String, LlmError> {
    let text = generator
        .generate(&build_summary_request(profile, analysis))
        .await?;
    Ok(text.trim().to_string())
}

// ────────────────────────────────────────────────────────────────────────────
// Step 3: experience
// ────────────────────────────────────────────────────────────────────────────

pub fn build_experience_request(
    experience: &Experience,
    analysis: &JobAnalysis,
    bullet_count: u8,
    extra_knowledge: Option<&str>,
) -> GenerationRequest {
    let has_skills = !experience.skills_used.is_empty();

    let existing_bullets = if experience.description.is_empty() {
        "- No existing responsibilities provided".to_string()
    } else {
        experience
            .description
            .iter()
            .map(|b| format!("- {b}"))
            .collect::<Vec<_>>()
            .join("\n")
    };
    let verbs = leading_verbs(&experience.description);
    let existing_verbs = if verbs.is_empty() {
        "None provided".to_string()
    } else {
        verbs.join(", ")
    };
    let skills_line = if has_skills {
        format!("Skills Used: {}\n", experience.skills_used.join(", "))
    } else {
        String::new()
    };
    let experience_years = if analysis.experience_years.trim().is_empty() {
        "Entry-level"
    } else {
        analysis.experience_years.as_str()
    };

    let context = fill_template(
        EXPERIENCE_CONTEXT_TEMPLATE,
        &[
            ("title", experience.title.as_str()),
            ("company", experience.company.as_str()),
            ("start_date", experience.start_date.as_str()),
            ("end_date", experience.end_date.as_str()),
            ("skills_line", skills_line.as_str()),
            ("existing_bullets", existing_bullets.as_str()),
            ("existing_verbs", existing_verbs.as_str()),
            ("experience_years", experience_years),
            ("required_skills", analysis.required_skills.join(", ").as_str()),
            ("responsibilities", analysis.responsibilities.join(", ").as_str()),
            ("soft_skills", analysis.soft_skills.join(", ").as_str()),
            ("extra_context", extra_context_block(extra_knowledge).as_str()),
        ],
    );

    let template = if has_skills {
        EXPERIENCE_BULLETS_TEMPLATE
    } else {
        EXPERIENCE_SKILLS_AND_BULLETS_TEMPLATE
    };
    let prompt = fill_template(
        template,
        &[
            ("title", experience.title.as_str()),
            ("company", experience.company.as_str()),
            ("grounding", GROUNDING_INSTRUCTION),
            ("bullet_count", bullet_count.to_string().as_str()),
            ("context", context.as_str()),
        ],
    );

    GenerationRequest::new(
        &json_system(EXPERIENCE_SYSTEM),
        json_prompt(prompt),
        EXPERIENCE_MAX_TOKENS,
        EXPERIENCE_TEMPERATURE,
    )
}

/// Step 3. One call per entry, in profile order.
///
/// Entries that already list skills keep them; only bullets are regenerated.
/// Entries without skills take the model's list. Returned bullets are truncated
/// to the word ceiling; keys missing from a reply keep the entry's existing data.
pub async fn tailor_experiences(
    generator: &dyn TextGenerator,
    profile: &Profile,
    analysis: &JobAnalysis,
    options: &GenerationOptions,
) -> Result<Vec<Experience>, AppError> {
    options.validate()?;
    let mut tailored = Vec::with_capacity(profile.experience.len());

    for (index, experience) in profile.experience.iter().enumerate() {
        let request = build_experience_request(
            experience,
            analysis,
            options.bullet_count(index),
            options.extra_knowledge.as_deref(),
        );
        let reply: ExperienceReply = generate_json(generator, &request).await?;

        let has_skills = !experience.skills_used.is_empty();
        let skills_used = match reply.skills {
            Some(skills) if !has_skills => skills,
            _ => experience.skills_used.clone(),
        };
        let description = reply
            .bullets
            .map(truncate_bullets)
            .unwrap_or_else(|| experience.description.clone());

        info!(
            "Tailored experience {} ({} at {}): {} bullets",
            index,
            experience.title,
            experience.company,
            description.len()
        );

        tailored.push(Experience {
            description,
            skills_used,
            ..experience.clone()
        });
    }

    Ok(tailored)
}

/// First word of each bullet, list markers and trailing punctuation removed,
/// capitalized, deduplicated in order.
fn leading_verbs(bullets: &[String]) -> Vec<String> {
    let mut verbs: Vec<String> = Vec::new();
    for bullet in bullets {
        let cleaned = bullet.trim_start_matches(['•', '-', ' ']).trim();
        let first = cleaned
            .split(' ')
            .next()
            .unwrap_or_default()
            .trim_matches([',', '.', ';', ':']);
        let verb = capitalize(first);
        if !verb.is_empty() && !verbs.contains(&verb) {
            verbs.push(verb);
        }
    }
    verbs
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Step 4: projects
// ────────────────────────────────────────────────────────────────────────────

/// A project is regenerated when it has no technologies or no real description.
pub fn project_needs_generation(project: &Project) -> bool {
    project.technologies.is_empty()
        || project.description.is_empty()
        || project.description == PROJECT_PLACEHOLDER
}

pub fn build_project_request(
    project: &Project,
    analysis: &JobAnalysis,
    extra_knowledge: Option<&str>,
) -> GenerationRequest {
    let description = if project.description.is_empty() {
        "None provided"
    } else {
        project.description.as_str()
    };
    let prompt = fill_template(
        PROJECT_PROMPT_TEMPLATE,
        &[
            ("required_skills", analysis.required_skills.join(", ").as_str()),
            ("responsibilities", analysis.responsibilities.join(", ").as_str()),
            ("extra_context", extra_context_block(extra_knowledge).as_str()),
            ("name", project.name.as_str()),
            ("description", description),
        ],
    );

    GenerationRequest::new(
        &json_system(PROJECT_SYSTEM),
        json_prompt(prompt),
        PROJECT_MAX_TOKENS,
        PROJECT_TEMPERATURE,
    )
}

/// Step 4. Projects past the first three are dropped. Complete projects pass
/// through with truncated achievements and cost no call.
pub async fn tailor_projects(
    generator: &dyn TextGenerator,
    profile: &Profile,
    analysis: &JobAnalysis,
    extra_knowledge: Option<&str>,
) -> Result<Vec<Project>, LlmError> {
    let mut tailored = Vec::new();

    for project in profile.projects.iter().take(MAX_PROJECTS) {
        if !project_needs_generation(project) {
            tailored.push(Project {
                achievements: truncate_bullets(project.achievements.clone()),
                ..project.clone()
            });
            continue;
        }

        let request = build_project_request(project, analysis, extra_knowledge);
        let reply: ProjectReply = generate_json(generator, &request).await?;
        info!("Generated details for project '{}'", project.name);

        tailored.push(Project {
            name: project.name.clone(),
            description: reply
                .description
                .unwrap_or_else(|| project.description.clone()),
            technologies: reply
                .technologies
                .unwrap_or_else(|| project.technologies.clone()),
            achievements: reply
                .achievements
                .map(truncate_bullets)
                .unwrap_or_else(|| project.achievements.clone()),
            url: project.url.clone(),
        });
    }

    Ok(tailored)
}

// ────────────────────────────────────────────────────────────────────────────
// Step 5: skills
// ────────────────────────────────────────────────────────────────────────────

pub fn build_skills_request(profile: &Profile, analysis: &JobAnalysis) -> GenerationRequest {
    let prompt = fill_template(
        SKILLS_PROMPT_TEMPLATE,
        &[
            ("required_skills", analysis.required_skills.join(", ").as_str()),
            ("responsibilities", analysis.responsibilities.join(", ").as_str()),
            ("culture_keywords", analysis.culture_keywords.join(", ").as_str()),
            ("technical", profile.skills.technical.join(", ").as_str()),
            ("languages", profile.skills.languages.join(", ").as_str()),
            ("tools", profile.skills.tools.join(", ").as_str()),
            ("soft_skills", profile.skills.soft_skills.join(", ").as_str()),
        ],
    );

    GenerationRequest::new(
        &json_system(SKILLS_SYSTEM),
        json_prompt(prompt),
        SKILLS_MAX_TOKENS,
        SKILLS_TEMPERATURE,
    )
}

/// Step 5. Nine entries per category are requested; whatever comes back is kept.
pub async fn generate_skills(
    generator: &dyn TextGenerator,
    profile: &Profile,
    analysis: &JobAnalysis,
) -> Result<SkillsSection, LlmError> {
    let skills: SkillsSection =
        generate_json(generator, &build_skills_request(profile, analysis)).await?;
    info!(
        "Skills section: {} technical, {} languages, {} tools",
        skills.technical.len(),
        skills.languages.len(),
        skills.tools.len()
    );
    Ok(skills)
}

fn join_first(items: &[String], n: usize) -> String {
    items.iter().take(n).cloned().collect::<Vec<_>>().join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::testing::ScriptedGenerator;
    use crate::models::{Education, PersonalInfo};

    const JD: &str = "Acme Corp is hiring a Backend Engineer to build Rust services.";
    const ANALYSIS_REPLY: &str = r#"{"required_skills": ["Rust", "SQL"], "soft_skills": ["Ownership"],
        "experience_years": "3+ years", "responsibilities": ["Build APIs"],
        "nice_to_have": [], "culture_keywords": ["fast-paced"]}"#;
    const SKILLS_REPLY: &str =
        r#"{"technical": ["APIs"], "languages": ["Rust"], "tools": ["Docker"]}"#;

    fn profile_with_experience(experience: Vec<Experience>) -> Profile {
        Profile {
            personal_info: PersonalInfo {
                name: "Jane Doe".to_string(),
                ..Default::default()
            },
            education: vec![Education {
                degree: "BSc Computer Science".to_string(),
                ..Default::default()
            }],
            experience,
            certifications: vec!["AWS SAA".to_string()],
            awards: vec!["Hackathon winner".to_string()],
            ..Default::default()
        }
    }

    fn bare_experience() -> Experience {
        Experience {
            title: "Engineer".to_string(),
            company: "Initech".to_string(),
            start_date: "Jan 2020".to_string(),
            end_date: "Present".to_string(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_end_to_end_experience_without_skills_takes_generated_skills() {
        let generator = ScriptedGenerator::new([
            ANALYSIS_REPLY,
            "  A focused backend engineer.  ",
            r#"{"skills":["a","b"],"bullets":["Did X"]}"#,
            SKILLS_REPLY,
        ]);
        let profile = profile_with_experience(vec![bare_experience()]);

        let resume =
            generate_tailored_resume(&generator, &profile, JD, &GenerationOptions::default())
                .await
                .unwrap();

        assert_eq!(resume.experience[0].skills_used, vec!["a", "b"]);
        assert_eq!(resume.experience[0].description, vec!["Did X"]);
        assert_eq!(resume.experience[0].company, "Initech");
        assert_eq!(resume.summary, "A focused backend engineer.");
        assert_eq!(resume.skills.languages, vec!["Rust"]);
        assert_eq!(resume.jd_analysis.required_skills, vec!["Rust", "SQL"]);
        assert_eq!(resume.personal_info.name, "Jane Doe");
        assert_eq!(resume.education, profile.education);
        assert_eq!(resume.certifications, vec!["AWS SAA"]);
        assert_eq!(resume.awards, vec!["Hackathon winner"]);
        assert!(resume.projects.is_empty());
        assert_eq!(generator.call_count(), 4);
    }

    #[tokio::test]
    async fn test_request_parameters_follow_step_order() {
        let generator = ScriptedGenerator::new([
            ANALYSIS_REPLY,
            "Summary",
            r#"{"bullets":["Did X"]}"#,
            SKILLS_REPLY,
        ]);
        let profile = profile_with_experience(vec![bare_experience()]);
        generate_tailored_resume(&generator, &profile, JD, &GenerationOptions::default())
            .await
            .unwrap();

        let params: Vec<(u32, f32)> = generator
            .requests()
            .iter()
            .map(|r| (r.max_tokens, r.temperature))
            .collect();
        assert_eq!(
            params,
            vec![(2000, 0.3), (800, 0.6), (2500, 0.6), (1000, 0.7)]
        );
    }

    #[tokio::test]
    async fn test_failure_midway_aborts_whole_pipeline() {
        let generator = ScriptedGenerator::new([ANALYSIS_REPLY, "Summary", "not json at all"]);
        let profile = profile_with_experience(vec![bare_experience(), bare_experience()]);

        let err = generate_tailored_resume(&generator, &profile, JD, &GenerationOptions::default())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::LlmResponse(_)));
        // The second experience and the skills step never ran.
        assert_eq!(generator.call_count(), 3);
    }

    #[tokio::test]
    async fn test_upstream_error_aborts_before_later_steps() {
        let generator = ScriptedGenerator::new([ANALYSIS_REPLY]);
        generator.push_error(LlmError::Api {
            status: 401,
            message: "invalid x-api-key".to_string(),
        });
        let profile = profile_with_experience(vec![bare_experience()]);

        let err = generate_tailored_resume(&generator, &profile, JD, &GenerationOptions::default())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Llm(msg) if msg.contains("invalid x-api-key")));
        assert_eq!(generator.call_count(), 2);
    }

    #[tokio::test]
    async fn test_empty_job_description_fails_before_any_call() {
        let generator = ScriptedGenerator::default();
        let err = generate_tailored_resume(
            &generator,
            &Profile::default(),
            "   ",
            &GenerationOptions::default(),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert_eq!(generator.call_count(), 0);
    }

    #[tokio::test]
    async fn test_out_of_range_bullet_count_fails_before_any_call() {
        let generator = ScriptedGenerator::default();
        let options = GenerationOptions {
            experience_bullet_counts: HashMap::from([(0, 7)]),
            ..Default::default()
        };
        let err = generate_tailored_resume(
            &generator,
            &profile_with_experience(vec![bare_experience()]),
            JD,
            &options,
        )
        .await
        .unwrap_err();
        assert!(matches!(err, AppError::Validation(msg) if msg.contains("experience_bullet_counts[0]")));
        assert_eq!(generator.call_count(), 0);
    }

    #[tokio::test]
    async fn test_existing_skills_are_kept_and_bullets_truncated() {
        let long_bullet = vec!["word"; 30].join(" ");
        let reply = serde_json::json!({
            "skills": ["ignored"],
            "bullets": [long_bullet, "Shipped Y"]
        })
        .to_string();
        let generator = ScriptedGenerator::new([reply]);
        let profile = profile_with_experience(vec![Experience {
            skills_used: vec!["Rust".to_string()],
            description: vec!["- built things".to_string()],
            ..bare_experience()
        }]);
        let options = GenerationOptions {
            experience_bullet_counts: HashMap::from([(0, 2)]),
            extra_knowledge: Some("Referred by the team lead".to_string()),
        };

        let tailored = tailor_experiences(&generator, &profile, &JobAnalysis::default(), &options)
            .await
            .unwrap();

        assert_eq!(tailored[0].skills_used, vec!["Rust"]);
        assert_eq!(tailored[0].description[0], format!("{}...", vec!["word"; 25].join(" ")));
        assert_eq!(tailored[0].description[1], "Shipped Y");

        let prompt = &generator.requests()[0].prompt;
        assert!(prompt.contains("Now create 2 bullet points"));
        assert!(prompt.contains("Skills Used: Rust"));
        assert!(prompt.contains("Action verbs already used: Built"));
        assert!(prompt.contains("- Referred by the team lead"));
        assert!(!prompt.contains("5-8 skills"));
    }

    #[tokio::test]
    async fn test_missing_reply_keys_fall_back_to_entry() {
        let generator = ScriptedGenerator::new(["{}"]);
        let profile = profile_with_experience(vec![Experience {
            description: vec!["Original bullet".to_string()],
            ..bare_experience()
        }]);

        let tailored = tailor_experiences(
            &generator,
            &profile,
            &JobAnalysis::default(),
            &GenerationOptions::default(),
        )
        .await
        .unwrap();
        assert_eq!(tailored[0].description, vec!["Original bullet"]);
        assert!(tailored[0].skills_used.is_empty());

        let prompt = &generator.requests()[0].prompt;
        assert!(prompt.contains("Now create:"));
        assert!(prompt.contains("2. 4 bullet points"));
        assert!(prompt.contains("Target Role: Entry-level position"));
    }

    #[tokio::test]
    async fn test_projects_keep_first_three_and_only_regenerate_incomplete() {
        let complete = |name: &str| Project {
            name: name.to_string(),
            description: "A real project".to_string(),
            technologies: vec!["Rust".to_string()],
            achievements: vec![vec!["x"; 26].join(" ")],
            url: Some("https://example.com".to_string()),
        };
        let profile = Profile {
            projects: vec![
                complete("one"),
                Project {
                    name: "two".to_string(),
                    description: PROJECT_PLACEHOLDER.to_string(),
                    technologies: vec!["Go".to_string()],
                    url: Some("https://two.dev".to_string()),
                    ..Default::default()
                },
                complete("three"),
                complete("four"),
            ],
            ..Default::default()
        };
        let generator = ScriptedGenerator::new([
            r#"{"description": "Generated", "technologies": ["Go", "gRPC"], "achievements": ["Cut latency"]}"#,
        ]);

        let projects = tailor_projects(&generator, &profile, &JobAnalysis::default(), None)
            .await
            .unwrap();

        assert_eq!(projects.len(), 3);
        assert_eq!(generator.call_count(), 1);
        assert_eq!(projects[0].achievements[0], format!("{}...", vec!["x"; 25].join(" ")));
        assert_eq!(projects[0].url.as_deref(), Some("https://example.com"));
        assert_eq!(projects[1].description, "Generated");
        assert_eq!(projects[1].technologies, vec!["Go", "gRPC"]);
        assert_eq!(projects[1].url.as_deref(), Some("https://two.dev"));
        assert_eq!(projects[2].name, "three");
        assert!(generator.requests()[0].prompt.contains("Project Name: two"));
    }

    #[test]
    fn test_project_needs_generation() {
        let mut project = Project {
            name: "p".to_string(),
            description: "Real".to_string(),
            technologies: vec!["Rust".to_string()],
            ..Default::default()
        };
        assert!(!project_needs_generation(&project));
        project.description = String::new();
        assert!(project_needs_generation(&project));
        project.description = "Real".to_string();
        project.technologies.clear();
        assert!(project_needs_generation(&project));
    }

    #[tokio::test]
    async fn test_skills_count_is_not_enforced() {
        let generator = ScriptedGenerator::new([r#"{"technical": ["A", "B"]}"#]);
        let skills = generate_skills(&generator, &Profile::default(), &JobAnalysis::default())
            .await
            .unwrap();
        assert_eq!(skills.technical, vec!["A", "B"]);
        assert!(skills.languages.is_empty());
        assert!(skills.tools.is_empty());
    }

    #[test]
    fn test_summary_request_uses_profile_and_analysis() {
        let profile = profile_with_experience(vec![bare_experience()]);
        let analysis = JobAnalysis {
            required_skills: vec!["Rust".to_string()],
            ..Default::default()
        };
        let request = build_summary_request(&profile, &analysis);
        assert!(request.prompt.contains("Current Experience: Engineer"));
        assert!(request.prompt.contains("Education: BSc Computer Science"));
        assert!(request.prompt.contains("Required Skills: Rust"));
        assert!(!request.system.contains("JSON"));

        let empty = build_summary_request(&Profile::default(), &analysis);
        assert!(empty.prompt.contains("Current Experience: Entry Level"));
    }

    #[test]
    fn test_braces_in_profile_text_reach_the_prompt_verbatim() {
        let analysis = JobAnalysis {
            required_skills: vec!["Kubernetes".to_string()],
            ..Default::default()
        };
        let experience = Experience {
            description: vec!["Documented {required_skills} template syntax".to_string()],
            ..bare_experience()
        };
        let request = build_experience_request(&experience, &analysis, 4, None);
        assert!(request
            .prompt
            .contains("- Documented {required_skills} template syntax"));
        assert!(request.prompt.contains("Kubernetes"));

        let project = Project {
            name: "Parser for {description} tags".to_string(),
            description: "Handlebars clone".to_string(),
            ..Default::default()
        };
        let request = build_project_request(&project, &analysis, None);
        assert!(request.prompt.contains("Parser for {description} tags"));
    }

    #[test]
    fn test_leading_verbs() {
        let bullets = vec![
            "• led the team.".to_string(),
            "- Built, tested and shipped".to_string(),
            "LED migrations".to_string(),
            "   ".to_string(),
        ];
        assert_eq!(leading_verbs(&bullets), vec!["Led", "Built"]);
    }
}
