//! Job-description analysis: the structured read every later prompt embeds.

use tracing::info;

use crate::generation::prompts::{ANALYSIS_PROMPT_TEMPLATE, ANALYSIS_SYSTEM};
use crate::llm_client::prompts::{fill_template, JSON_ONLY_INSTRUCTION, JSON_ONLY_SYSTEM_SUFFIX};
use crate::llm_client::{generate_json, GenerationRequest, LlmError, TextGenerator};
use crate::models::JobAnalysis;

const ANALYSIS_MAX_TOKENS: u32 = 2000;
const ANALYSIS_TEMPERATURE: f32 = 0.3;

/// Appends the JSON-only suffix to a base system prompt.
pub(crate) fn json_system(base: &str) -> String {
    format!("{base} {JSON_ONLY_SYSTEM_SUFFIX}")
}

/// Appends the closing JSON-only line to a user prompt.
pub(crate) fn json_prompt(body: String) -> String {
    format!("{body}\n\n{JSON_ONLY_INSTRUCTION}")
}

pub fn build_analysis_request(job_description: &str) -> GenerationRequest {
    let prompt = fill_template(ANALYSIS_PROMPT_TEMPLATE, &[("job_description", job_description)]);
    GenerationRequest::new(
        &json_system(ANALYSIS_SYSTEM),
        json_prompt(prompt),
        ANALYSIS_MAX_TOKENS,
        ANALYSIS_TEMPERATURE,
    )
}

/// Step 1. Missing keys in the reply default to empty.
pub async fn analyze_job_description(
    generator: &dyn TextGenerator,
    job_description: &str,
) -> Result<JobAnalysis, LlmError> {
    let analysis: JobAnalysis =
        generate_json(generator, &build_analysis_request(job_description)).await?;
    info!(
        "Job analysis: {} required skills, {} responsibilities",
        analysis.required_skills.len(),
        analysis.responsibilities.len()
    );
    Ok(analysis)
}
