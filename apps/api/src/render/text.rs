//! Plain-text export: an 80-column layout with ruled section headings.

use crate::models::TailoredResume;
use crate::render::{
    contact_parts, date_range, display_name, join_nonblank, link_parts, non_empty, skill_lines,
    AWARDS_HEADING, CERTIFICATIONS_HEADING, EDUCATION_HEADING, EXPERIENCE_HEADING,
    PROJECTS_HEADING, SKILLS_HEADING, SUMMARY_HEADING,
};

const RULE_WIDTH: usize = 80;

pub fn render_txt(resume: &TailoredResume) -> String {
    let mut out = TextBuilder::default();
    let info = &resume.personal_info;

    out.line(display_name(info));
    out.line("=".repeat(RULE_WIDTH));
    let contact = contact_parts(info);
    if !contact.is_empty() {
        out.line(contact.join(" | "));
    }
    for link in link_parts(info) {
        out.line(link);
    }
    out.blank();

    if !resume.summary.trim().is_empty() {
        out.heading(SUMMARY_HEADING);
        out.line(resume.summary.trim());
        out.blank();
    }

    if !resume.experience.is_empty() {
        out.heading(EXPERIENCE_HEADING);
        for exp in &resume.experience {
            out.line(join_nonblank(&[exp.title.as_str(), exp.company.as_str()], " - "));
            let dates = date_range(&exp.start_date, &exp.end_date);
            let meta = join_nonblank(&[dates.as_str(), exp.location.as_str()], " | ");
            if !meta.is_empty() {
                out.line(meta);
            }
            for bullet in non_empty(&exp.description) {
                out.bullet(bullet);
            }
            out.blank();
        }
    }

    if !resume.projects.is_empty() {
        out.heading(PROJECTS_HEADING);
        for project in &resume.projects {
            out.line(project.name.trim());
            if !project.technologies.is_empty() {
                out.line(format!("Technologies: {}", project.technologies.join(", ")));
            }
            if !project.description.trim().is_empty() {
                out.line(project.description.trim());
            }
            for achievement in non_empty(&project.achievements) {
                out.bullet(achievement);
            }
            out.blank();
        }
    }

    if !resume.education.is_empty() {
        out.heading(EDUCATION_HEADING);
        for edu in &resume.education {
            out.line(edu.degree.trim());
            let dates = date_range(&edu.start_date, &edu.end_date);
            out.line(join_nonblank(
                &[edu.institution.as_str(), edu.location.as_str(), dates.as_str()],
                " | ",
            ));
            if let Some(gpa) = edu.gpa.as_deref().map(str::trim).filter(|g| !g.is_empty()) {
                out.line(format!("GPA: {gpa}"));
            }
            for achievement in non_empty(&edu.achievements) {
                out.bullet(achievement);
            }
            out.blank();
        }
    }

    let skills = skill_lines(&resume.skills);
    if !skills.is_empty() {
        out.heading(SKILLS_HEADING);
        for (label, items) in skills {
            out.line(format!("{label}: {items}"));
        }
        out.blank();
    }

    for (heading, items) in [
        (CERTIFICATIONS_HEADING, &resume.certifications),
        (AWARDS_HEADING, &resume.awards),
    ] {
        let items: Vec<&str> = non_empty(items).collect();
        if items.is_empty() {
            continue;
        }
        out.heading(heading);
        for item in items {
            out.line(format!("\u{2022} {item}"));
        }
        out.blank();
    }

    out.finish()
}

#[derive(Default)]
struct TextBuilder {
    lines: Vec<String>,
}

impl TextBuilder {
    fn line(&mut self, text: impl Into<String>) {
        self.lines.push(text.into());
    }

    fn blank(&mut self) {
        self.lines.push(String::new());
    }

    fn heading(&mut self, title: &str) {
        self.line(title);
        self.line("-".repeat(RULE_WIDTH));
    }

    fn bullet(&mut self, text: &str) {
        self.line(format!("  \u{2022} {text}"));
    }

    fn finish(mut self) -> String {
        while self.lines.last().is_some_and(|l| l.is_empty()) {
            self.lines.pop();
        }
        let mut text = self.lines.join("\n");
        text.push('\n');
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::fixtures::sample_resume;

    fn position(haystack: &str, needle: &str) -> usize {
        haystack
            .find(needle)
            .unwrap_or_else(|| panic!("missing '{needle}'"))
    }

    #[test]
    fn test_header_block() {
        let text = render_txt(&sample_resume());
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "ADA LOVELACE");
        assert_eq!(lines[1], "=".repeat(80));
        assert_eq!(lines[2], "ada@example.com | 555-0100 | London");
        assert_eq!(lines[3], "LinkedIn: https://www.linkedin.com/in/ada");
        assert_eq!(lines[4], "GitHub: https://github.com/ada");
    }

    #[test]
    fn test_sections_in_order() {
        let text = render_txt(&sample_resume());
        let order = [
            "PROFESSIONAL SUMMARY",
            "PROFESSIONAL EXPERIENCE",
            "PROJECTS",
            "EDUCATION",
            "SKILLS",
            "CERTIFICATIONS",
            "AWARDS",
        ];
        let positions: Vec<usize> = order.iter().map(|h| position(&text, h)).collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]), "{positions:?}");
    }

    #[test]
    fn test_entry_lines() {
        let text = render_txt(&sample_resume());
        assert!(text.contains("Senior Engineer - Analytical Engines Ltd\nJan 2020 - Present | London\n"));
        assert!(text.contains("  \u{2022} Cut compute cost by 30% through caching (C) & batching"));
        assert!(text.contains("Technologies: Rust, Punch cards"));
        assert!(text.contains("University of London | London | 2012 - May 2016"));
        assert!(text.contains("GPA: 3.9"));
        assert!(text.contains("  \u{2022} Dean's list"));
        assert!(!text.contains("\u{2022} \u{2022}"));
        assert!(text.contains("Languages: Rust, Python"));
        assert!(!text.contains("Tools:"));
        assert!(text.ends_with("\u{2022} Royal Society medal\n"));
    }

    #[test]
    fn test_empty_sections_are_omitted() {
        let text = render_txt(&TailoredResume::default());
        assert!(text.starts_with("YOUR NAME\n"));
        for heading in ["SUMMARY", "EXPERIENCE", "PROJECTS", "EDUCATION", "SKILLS", "AWARDS"] {
            assert!(!text.contains(heading), "unexpected {heading}");
        }
    }
}
