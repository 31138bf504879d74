// Shared prompt fragments. Each module that calls the model keeps its own
// prompts.rs alongside it; only cross-cutting text lives here.

use std::sync::LazyLock;

use regex::{Captures, Regex};

static PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\{(\w+)\}").unwrap());

/// Appended to every system prompt whose response is parsed as JSON.
pub const JSON_ONLY_SYSTEM_SUFFIX: &str = "Always respond with valid JSON only.";

/// Closing line of every JSON-producing user prompt.
pub const JSON_ONLY_INSTRUCTION: &str = "Return ONLY the JSON object, no additional text.";

/// Grounding rules shared by the per-entry tailoring prompts.
pub const GROUNDING_INSTRUCTION: &str = "\
STEP 3: GROUNDING CHECK
- Only use facts from the existing material
- Keep industry context authentic
- Don't insert keywords from the target role that don't fit the actual work
- Don't claim work on projects or systems that don't match the source";

/// Renders the optional extra-context block shared by tailoring and story prompts.
pub fn extra_context_block(extra_knowledge: Option<&str>) -> String {
    match extra_knowledge.map(str::trim).filter(|s| !s.is_empty()) {
        Some(extra) => format!("- {extra}"),
        None => "- No additional context provided".to_string(),
    }
}

/// Substitutes `{name}` placeholders in one pass. Substituted text is never
/// rescanned, and unknown placeholders are left as written.
pub fn fill_template(template: &str, values: &[(&str, &str)]) -> String {
    PLACEHOLDER
        .replace_all(template, |caps: &Captures| {
            let key = &caps[1];
            values
                .iter()
                .find(|(name, _)| *name == key)
                .map(|(_, value)| value.to_string())
                .unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fill_template_single_pass() {
        let filled = fill_template(
            "Role: {title}\nSkills: {skills}\nKeep {\"json\": true} and {unknown}",
            &[("title", "Writes {skills} docs"), ("skills", "Rust")],
        );
        assert_eq!(
            filled,
            "Role: Writes {skills} docs\nSkills: Rust\nKeep {\"json\": true} and {unknown}"
        );
    }

    #[test]
    fn test_extra_context_block_blank_is_placeholder() {
        assert_eq!(
            extra_context_block(Some("   ")),
            "- No additional context provided"
        );
        assert_eq!(extra_context_block(None), "- No additional context provided");
    }

    #[test]
    fn test_extra_context_block_trims() {
        assert_eq!(
            extra_context_block(Some("  Referred by Jane  ")),
            "- Referred by Jane"
        );
    }
}
