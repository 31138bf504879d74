// Document Exporter
// Renders a TailoredResume into plain text, DOCX or PDF bytes.
// Renderers never mutate the resume; empty sections are omitted.

pub mod docx;
pub mod font_metrics;
pub mod handlers;
pub mod pdf;
pub mod text;

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::errors::AppError;
use crate::models::{PersonalInfo, SkillsSection, TailoredResume};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Txt,
    Docx,
    Pdf,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Txt => "txt",
            ExportFormat::Docx => "docx",
            ExportFormat::Pdf => "pdf",
        }
    }

    pub fn mime_type(self) -> &'static str {
        match self {
            ExportFormat::Txt => "text/plain; charset=utf-8",
            ExportFormat::Docx => {
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            }
            ExportFormat::Pdf => "application/pdf",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for ExportFormat {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "txt" | "text" => Ok(ExportFormat::Txt),
            "docx" => Ok(ExportFormat::Docx),
            "pdf" => Ok(ExportFormat::Pdf),
            other => Err(AppError::Validation(format!(
                "unsupported export format '{other}' (expected txt, docx or pdf)"
            ))),
        }
    }
}

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("archive error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<RenderError> for AppError {
    fn from(err: RenderError) -> Self {
        AppError::Export(err.to_string())
    }
}

pub fn render(resume: &TailoredResume, format: ExportFormat) -> Result<Vec<u8>, RenderError> {
    match format {
        ExportFormat::Txt => Ok(text::render_txt(resume).into_bytes()),
        ExportFormat::Docx => docx::render_docx(resume),
        ExportFormat::Pdf => Ok(pdf::render_pdf(resume)),
    }
}

/// `resume_<name>_<YYYYmmdd_HHMMSS>.<ext>`; the name part is dropped when blank.
pub fn export_filename(resume: &TailoredResume, format: ExportFormat) -> String {
    let timestamp = chrono::Utc::now().format("%Y%m%d_%H%M%S");
    let name: String = resume
        .personal_info
        .name
        .split_whitespace()
        .map(|part| {
            part.chars()
                .filter(|c| c.is_ascii_alphanumeric())
                .collect::<String>()
        })
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("_");
    if name.is_empty() {
        format!("resume_{timestamp}.{}", format.extension())
    } else {
        format!("resume_{name}_{timestamp}.{}", format.extension())
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Shared section helpers
// ────────────────────────────────────────────────────────────────────────────

pub(crate) const SUMMARY_HEADING: &str = "PROFESSIONAL SUMMARY";
pub(crate) const EXPERIENCE_HEADING: &str = "PROFESSIONAL EXPERIENCE";
pub(crate) const PROJECTS_HEADING: &str = "PROJECTS";
pub(crate) const EDUCATION_HEADING: &str = "EDUCATION";
pub(crate) const SKILLS_HEADING: &str = "SKILLS";
pub(crate) const CERTIFICATIONS_HEADING: &str = "CERTIFICATIONS";
pub(crate) const AWARDS_HEADING: &str = "AWARDS";

/// Name shown when the profile has none.
pub(crate) const NAME_PLACEHOLDER: &str = "Your Name";

pub(crate) fn display_name(info: &PersonalInfo) -> String {
    match info.name.trim() {
        "" => NAME_PLACEHOLDER.to_uppercase(),
        name => name.to_uppercase(),
    }
}

/// Email, phone and location, in that order, skipping blanks.
pub(crate) fn contact_parts(info: &PersonalInfo) -> Vec<&str> {
    [&info.email, &info.phone, &info.location]
        .into_iter()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .collect()
}

/// Labelled profile links ("LinkedIn: ...") for the line under the contact details.
pub(crate) fn link_parts(info: &PersonalInfo) -> Vec<String> {
    [
        ("LinkedIn", &info.linkedin),
        ("GitHub", &info.github),
        ("Portfolio", &info.portfolio),
    ]
    .into_iter()
    .filter(|(_, url)| !url.trim().is_empty())
    .map(|(label, url)| format!("{label}: {}", url.trim()))
    .collect()
}

/// Drops the scheme and `www.` prefix for compact display.
pub(crate) fn short_url(url: &str) -> &str {
    let url = url.trim();
    let url = url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"))
        .unwrap_or(url);
    url.strip_prefix("www.").unwrap_or(url)
}

pub(crate) fn date_range(start: &str, end: &str) -> String {
    match (start.trim(), end.trim()) {
        ("", "") => String::new(),
        (s, "") => s.to_string(),
        ("", e) => e.to_string(),
        (s, e) => format!("{s} - {e}"),
    }
}

/// Profile bullets are sometimes stored with a leading "• ".
pub(crate) fn strip_bullet(text: &str) -> &str {
    text.trim_start_matches(['\u{2022}', ' ']).trim_end()
}

/// Non-empty skill categories as ("Technical", "Rust, Go") pairs.
pub(crate) fn skill_lines(skills: &SkillsSection) -> Vec<(&'static str, String)> {
    [
        ("Technical", &skills.technical),
        ("Languages", &skills.languages),
        ("Tools", &skills.tools),
    ]
    .into_iter()
    .filter(|(_, items)| !items.is_empty())
    .map(|(label, items)| (label, items.join(", ")))
    .collect()
}

pub(crate) fn join_nonblank(parts: &[&str], sep: &str) -> String {
    parts
        .iter()
        .map(|p| p.trim())
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join(sep)
}

pub(crate) fn non_empty(items: &[String]) -> impl Iterator<Item = &str> {
    items.iter().map(|s| strip_bullet(s)).filter(|s| !s.is_empty())
}
