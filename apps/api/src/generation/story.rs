//! Story-based narratives: a "why this company" statement and a cover letter,
//! grounded in the profile's free-text story. Only runs on explicit request.

use serde::Deserialize;
use tracing::info;

use crate::errors::AppError;
use crate::generation::analysis::json_system;
use crate::generation::prompts::{
    COVER_LETTER_REQUIREMENT, STORY_PROMPT_TEMPLATE, STORY_SYSTEM, WHY_REQUIREMENT,
};
use crate::llm_client::prompts::fill_template;
use crate::llm_client::{generate_json, GenerationRequest, TextGenerator};
use crate::models::{Profile, StoryContent};

const STORY_MAX_TOKENS: u32 = 1100;
const STORY_TEMPERATURE: f32 = 0.7;

/// Experience entries quoted as highlights.
const MAX_HIGHLIGHTS: usize = 4;
/// Bullets quoted per highlight.
const HIGHLIGHT_BULLETS: usize = 2;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct StoryOptions {
    pub include_why: bool,
    pub include_cover_letter: bool,
    pub extra_knowledge: Option<String>,
}

impl StoryOptions {
    fn anything_requested(&self) -> bool {
        self.include_why || self.include_cover_letter
    }
}

pub fn build_story_request(
    profile: &Profile,
    job_description: &str,
    options: &StoryOptions,
) -> GenerationRequest {
    let summary = match profile.summary.trim() {
        "" => "No summary provided",
        s => s,
    };
    let highlights: Vec<String> = profile
        .experience
        .iter()
        .take(MAX_HIGHLIGHTS)
        .map(|exp| {
            let preview = if exp.description.is_empty() {
                "No detailed responsibilities provided".to_string()
            } else {
                exp.description
                    .iter()
                    .take(HIGHLIGHT_BULLETS)
                    .cloned()
                    .collect::<Vec<_>>()
                    .join(" ")
            };
            format!(
                "{} at {} ({} - {}): {preview}",
                exp.title, exp.company, exp.start_date, exp.end_date
            )
        })
        .collect();
    let highlights = if highlights.is_empty() {
        "No experience entries provided.".to_string()
    } else {
        highlights.join("\n")
    };
    let extra = options
        .extra_knowledge
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or("None provided");

    let mut requirements = Vec::new();
    if options.include_why {
        requirements.push(WHY_REQUIREMENT);
    }
    if options.include_cover_letter {
        requirements.push(COVER_LETTER_REQUIREMENT);
    }

    let prompt = fill_template(
        STORY_PROMPT_TEMPLATE,
        &[
            ("requirements", requirements.join("\n").as_str()),
            ("summary", summary),
            ("experience_highlights", highlights.as_str()),
            ("extra_knowledge", extra),
            ("job_description", job_description),
            ("story", profile.my_story.trim()),
        ],
    );

    GenerationRequest::new(
        &json_system(STORY_SYSTEM),
        prompt,
        STORY_MAX_TOKENS,
        STORY_TEMPERATURE,
    )
}

/// Returns only the requested outputs, trimmed; blank replies are dropped.
///
/// Nothing requested is an empty result, not an error. Otherwise an empty
/// story or job description fails before any call.
pub async fn generate_story_content(
    generator: &dyn TextGenerator,
    profile: &Profile,
    job_description: &str,
    options: &StoryOptions,
) -> Result<StoryContent, AppError> {
    if !options.anything_requested() {
        return Ok(StoryContent::default());
    }
    if profile.my_story.trim().is_empty() {
        return Err(AppError::Validation(
            "Add content to 'My Story' in the profile before generating story-based responses."
                .to_string(),
        ));
    }
    if job_description.trim().is_empty() {
        return Err(AppError::Validation(
            "A job description is required to tailor story-based responses.".to_string(),
        ));
    }

    let request = build_story_request(profile, job_description, options);
    let reply: StoryContent = generate_json(generator, &request).await?;

    let keep = |requested: bool, text: Option<String>| {
        text.filter(|_| requested)
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
    };
    let story = StoryContent {
        why_you_want_to_work_here: keep(options.include_why, reply.why_you_want_to_work_here),
        cover_letter: keep(options.include_cover_letter, reply.cover_letter),
    };
    info!(
        "Story content generated (why: {}, cover letter: {})",
        story.why_you_want_to_work_here.is_some(),
        story.cover_letter.is_some()
    );
    Ok(story)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::testing::ScriptedGenerator;
    use crate::models::Experience;

    fn storied_profile() -> Profile {
        Profile {
            my_story: "I grew up fixing radios.".to_string(),
            experience: (0..5)
                .map(|i| Experience {
                    title: format!("Role {i}"),
                    company: "Initech".to_string(),
                    description: vec!["First".to_string(), "Second".to_string(), "Third".to_string()],
                    ..Default::default()
                })
                .collect(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_nothing_requested_makes_no_call() {
        let generator = ScriptedGenerator::default();
        let story = generate_story_content(
            &generator,
            &Profile::default(),
            "",
            &StoryOptions::default(),
        )
        .await
        .unwrap();
        assert!(story.is_empty());
        assert_eq!(generator.call_count(), 0);
    }

    #[tokio::test]
    async fn test_empty_story_fails_fast() {
        let generator = ScriptedGenerator::default();
        let options = StoryOptions {
            include_why: true,
            ..Default::default()
        };
        let err = generate_story_content(&generator, &Profile::default(), "A JD", &options)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(msg) if msg.contains("My Story")));
        assert_eq!(generator.call_count(), 0);
    }

    #[tokio::test]
    async fn test_empty_job_description_fails_fast() {
        let generator = ScriptedGenerator::default();
        let options = StoryOptions {
            include_cover_letter: true,
            ..Default::default()
        };
        let err = generate_story_content(&generator, &storied_profile(), "  ", &options)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert_eq!(generator.call_count(), 0);
    }

    #[tokio::test]
    async fn test_unrequested_outputs_are_dropped() {
        let generator = ScriptedGenerator::new([
            r#"{"why_you_want_to_work_here": "  Because radios.  ", "cover_letter": "Dear team"}"#,
        ]);
        let options = StoryOptions {
            include_why: true,
            ..Default::default()
        };
        let story = generate_story_content(&generator, &storied_profile(), "A JD", &options)
            .await
            .unwrap();
        assert_eq!(story.why_you_want_to_work_here.as_deref(), Some("Because radios."));
        assert!(story.cover_letter.is_none());

        let request = &generator.requests()[0];
        assert_eq!(request.max_tokens, 1100);
        assert!(request.prompt.contains("WHY_RESPONSE"));
        assert!(!request.prompt.contains("COVER_LETTER:"));
    }

    #[test]
    fn test_job_description_placeholders_are_not_expanded() {
        let options = StoryOptions {
            include_why: true,
            ..Default::default()
        };
        let request = build_story_request(&storied_profile(), "Tell us your {story}", &options);
        assert!(request.prompt.contains("Tell us your {story}"));
        assert_eq!(request.prompt.matches("I grew up fixing radios.").count(), 1);
    }

    #[test]
    fn test_prompt_quotes_four_highlights_with_two_bullets_each() {
        let options = StoryOptions {
            include_cover_letter: true,
            extra_knowledge: Some("Met the CTO".to_string()),
            ..Default::default()
        };
        let request = build_story_request(&storied_profile(), "A JD", &options);
        assert!(request.prompt.contains("Role 3 at Initech"));
        assert!(!request.prompt.contains("Role 4"));
        assert!(request.prompt.contains("First Second"));
        assert!(!request.prompt.contains("Third"));
        assert!(request.prompt.contains("No summary provided"));
        assert!(request.prompt.contains("Extra Knowledge: Met the CTO"));
        assert!(request.prompt.contains("I grew up fixing radios."));
    }
}
