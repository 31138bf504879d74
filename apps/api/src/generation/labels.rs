//! Advisory company / job-title guesses used to label history entries.
//!
//! Best-effort regex heuristics; a wrong or empty guess is expected and harmless.
//! Users can correct both fields afterwards.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct JobLabels {
    pub job_title: String,
    pub company: String,
}

/// Which capture group holds which label.
enum Groups {
    CompanyThenTitle,
    TitleThenCompany,
}

/// Posting headlines, tried in order: "X is hiring a Y", "Y at X", "X: Y".
static HEADLINE_PATTERNS: LazyLock<Vec<(Regex, Groups)>> = LazyLock::new(|| {
    vec![
        (
            Regex::new(
                r"(?im)([A-Z][A-Za-z0-9&.\-\s]+?)\s+is\s+hiring\s+(?:a|an)?\s*([A-Z][A-Za-z\-\s]+?)(?:\s+to|\s+for|\s+who|\s+with|\s+in|\s+at|\s*\.|\s*$|\n)",
            )
            .unwrap(),
            Groups::CompanyThenTitle,
        ),
        (
            Regex::new(
                r"(?im)([A-Z][A-Za-z\-\s]+?)\s+at\s+([A-Z][A-Za-z0-9&.\-\s]+?)(?:\s*[,\n.]|\s+we|\s+our|\s+is|\s+are|$)",
            )
            .unwrap(),
            Groups::TitleThenCompany,
        ),
        (
            Regex::new(
                r"(?im)([A-Z][A-Za-z0-9&.\-\s]+?)\s*[:\-]\s*([A-Z][A-Za-z\-\s]+?)(?:\s*[,\n.]|\s+we|\s+our|\s+is|\s+are|$)",
            )
            .unwrap(),
            Groups::CompanyThenTitle,
        ),
    ]
});

static COMPANY_SUFFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b([A-Z][A-Za-z0-9&.\-\s]+?)\s+(?:Inc|Ltd|LLC|Corp|Co\.|Company|Technologies|Labs)\b")
        .unwrap()
});

static ALL_CAPS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b([A-Z]{2,}(?:\s+[A-Z]{2,})*)\b").unwrap());

static STOPWORDS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(?:the|a|an|in|at|for|with|and|or|but|to|of|on|by|as|is|are|was|were|be|being|been)\b",
    )
    .unwrap()
});

static PUNCTUATION: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^\w\s-]").unwrap());

const TITLE_KEYWORDS: &[&str] = &[
    "intern",
    "internship",
    "product manager",
    "software engineer",
    "developer",
    "designer",
    "analyst",
    "associate",
    "specialist",
];

/// Lines scanned for a title keyword when no headline pattern matched.
const TITLE_SCAN_LINES: usize = 5;

/// Never fails; unknown labels come back empty.
pub fn extract_job_labels(job_description: &str) -> JobLabels {
    let (mut company, mut job_title) = headline_labels(job_description).unwrap_or_default();

    if company.is_empty() || job_title.is_empty() {
        let first_line = job_description.lines().next().unwrap_or_default();
        company = fallback_company(first_line).unwrap_or_default();
        if job_title.is_empty() {
            job_title = fallback_title(job_description).unwrap_or_default();
        }
    }

    if !company.is_empty() {
        company = collapse_whitespace(&STOPWORDS.replace_all(&company, ""));
    }
    if !job_title.is_empty() {
        job_title = strip_punctuation(&job_title);
    }

    JobLabels { job_title, company }
}

/// (company, title) from the first headline pattern yielding both.
fn headline_labels(text: &str) -> Option<(String, String)> {
    HEADLINE_PATTERNS.iter().find_map(|(pattern, groups)| {
        let caps = pattern.captures(text)?;
        let first = strip_punctuation(caps.get(1)?.as_str());
        let second = strip_punctuation(caps.get(2)?.as_str());
        let (company, title) = match groups {
            Groups::CompanyThenTitle => (first, second),
            Groups::TitleThenCompany => (second, first),
        };
        (!company.is_empty() && !title.is_empty()).then_some((company, title))
    })
}

fn fallback_company(first_line: &str) -> Option<String> {
    COMPANY_SUFFIX
        .captures(first_line)
        .or_else(|| ALL_CAPS.captures(first_line))
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
}

fn fallback_title(text: &str) -> Option<String> {
    for line in text.lines().take(TITLE_SCAN_LINES) {
        let lower = line.to_lowercase();
        for keyword in TITLE_KEYWORDS.iter().filter(|k| lower.contains(*k)) {
            let pattern = format!(r"(?i)([A-Z][A-Za-z\-\s]+{}[A-Za-z\-\s]*)", regex::escape(keyword));
            let Ok(re) = Regex::new(&pattern) else {
                continue;
            };
            if let Some(m) = re.captures(line).and_then(|caps| caps.get(1)) {
                return Some(m.as_str().trim().to_string());
            }
        }
    }
    None
}

fn strip_punctuation(text: &str) -> String {
    collapse_whitespace(&PUNCTUATION.replace_all(text, ""))
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_hiring_pattern() {
        let labels = extract_job_labels(
            "Acme Corp is hiring a Senior Backend Engineer to build payment services.",
        );
        assert_eq!(labels.company, "Acme Corp");
        assert_eq!(labels.job_title, "Senior Backend Engineer");
    }

    #[test]
    fn test_title_at_company_pattern_assigns_groups_correctly() {
        let labels =
            extract_job_labels("Software Engineer at Globex Corporation, building tools for teams");
        assert_eq!(labels.job_title, "Software Engineer");
        assert_eq!(labels.company, "Globex Corporation");
    }

    #[test]
    fn test_company_colon_title_pattern() {
        let labels = extract_job_labels("Initech: Data Analyst\nJoin us to crunch numbers");
        assert_eq!(labels.company, "Initech");
        assert_eq!(labels.job_title, "Data Analyst");
    }

    #[test]
    fn test_all_caps_company_and_keyword_title_fallback() {
        let labels =
            extract_job_labels("NASA builds rockets\nSenior Software Engineer\nJoin us today");
        assert_eq!(labels.company, "NASA");
        assert_eq!(labels.job_title, "Senior Software Engineer");
    }

    #[test]
    fn test_unlabelled_text_yields_empty_labels() {
        let labels = extract_job_labels("we need someone great\nplease apply");
        assert_eq!(labels, JobLabels::default());
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(extract_job_labels(""), JobLabels::default());
    }
}
