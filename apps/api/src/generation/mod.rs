// Resume Generation Engine
// Implements: JD analysis, summary, experience/project tailoring, skills,
// story content and advisory job labels.
// All LLM calls go through llm_client's TextGenerator; no direct API calls here.

pub mod analysis;
pub mod generator;
pub mod handlers;
pub mod labels;
pub mod prompts;
pub mod story;
pub mod truncate;

pub use generator::{generate_tailored_resume, GenerationOptions};
pub use story::{generate_story_content, StoryOptions};
