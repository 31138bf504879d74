//! DOCX export: a minimal Office Open XML package written part by part.
//!
//! Letter page with 0.5" margins, Times New Roman 9.5pt throughout, a bordered
//! name line and section headings, right-aligned dates on a tab stop, and
//! list bullets from a single numbering definition.

use std::io::{Cursor, Write};

use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::models::TailoredResume;
use crate::render::{
    contact_parts, date_range, display_name, non_empty, short_url, skill_lines, RenderError,
    AWARDS_HEADING, CERTIFICATIONS_HEADING, EDUCATION_HEADING, EXPERIENCE_HEADING,
    PROJECTS_HEADING, SKILLS_HEADING, SUMMARY_HEADING,
};

/// 8.5" minus two 0.5" margins, in twips.
const RIGHT_TAB_TWIPS: u32 = 10_800;
const MARGIN_TWIPS: u32 = 720;
/// Half-points.
const BODY_SIZE: u32 = 19;
const NAME_SIZE: u32 = 32;
/// 5pt in twips, used between entries.
const ENTRY_GAP: u32 = 100;

const CONTENT_TYPES_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/><Override PartName="/word/styles.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.styles+xml"/><Override PartName="/word/numbering.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.numbering+xml"/></Types>"#;

const PACKAGE_RELS_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/></Relationships>"#;

const DOCUMENT_RELS_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles" Target="styles.xml"/><Relationship Id="rId2" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/numbering" Target="numbering.xml"/></Relationships>"#;

const STYLES_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:styles xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:docDefaults><w:rPrDefault><w:rPr><w:rFonts w:ascii="Times New Roman" w:hAnsi="Times New Roman" w:eastAsia="Times New Roman" w:cs="Times New Roman"/><w:sz w:val="19"/><w:szCs w:val="19"/></w:rPr></w:rPrDefault><w:pPrDefault><w:pPr><w:spacing w:before="0" w:after="0" w:line="240" w:lineRule="auto"/></w:pPr></w:pPrDefault></w:docDefaults><w:style w:type="paragraph" w:default="1" w:styleId="Normal"><w:name w:val="Normal"/></w:style></w:styles>"#;

const NUMBERING_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:numbering xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:abstractNum w:abstractNumId="0"><w:multiLevelType w:val="singleLevel"/><w:lvl w:ilvl="0"><w:start w:val="1"/><w:numFmt w:val="bullet"/><w:lvlText w:val="&#8226;"/><w:lvlJc w:val="left"/><w:pPr><w:ind w:left="720" w:hanging="360"/></w:pPr><w:rPr><w:rFonts w:ascii="Times New Roman" w:hAnsi="Times New Roman"/></w:rPr></w:lvl></w:abstractNum><w:num w:numId="1"><w:abstractNumId w:val="0"/></w:num></w:numbering>"#;

pub fn render_docx(resume: &TailoredResume) -> Result<Vec<u8>, RenderError> {
    let document = document_xml(resume);
    let parts: [(&str, &str); 6] = [
        ("[Content_Types].xml", CONTENT_TYPES_XML),
        ("_rels/.rels", PACKAGE_RELS_XML),
        ("word/_rels/document.xml.rels", DOCUMENT_RELS_XML),
        ("word/document.xml", &document),
        ("word/styles.xml", STYLES_XML),
        ("word/numbering.xml", NUMBERING_XML),
    ];

    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
    for (name, body) in parts {
        zip.start_file(name, options)?;
        zip.write_all(body.as_bytes())?;
    }
    Ok(zip.finish()?.into_inner())
}

fn document_xml(resume: &TailoredResume) -> String {
    let mut body: Vec<Paragraph> = Vec::new();
    let info = &resume.personal_info;

    body.push(
        Paragraph::new()
            .centered()
            .border()
            .after(40)
            .run(Run::new(display_name(info)).bold().size(NAME_SIZE)),
    );

    let mut contact: Vec<String> = contact_parts(info).into_iter().map(String::from).collect();
    contact.extend(
        [&info.linkedin, &info.github, &info.portfolio]
            .into_iter()
            .filter(|url| !url.trim().is_empty())
            .map(|url| short_url(url).to_string()),
    );
    if !contact.is_empty() {
        body.push(Paragraph::new().centered().run(Run::new(contact.join(" | "))));
    }

    if !resume.summary.trim().is_empty() {
        body.push(heading(SUMMARY_HEADING));
        body.push(Paragraph::new().run(Run::new(resume.summary.trim())));
    }

    if !resume.education.is_empty() {
        body.push(heading(EDUCATION_HEADING));
        for edu in &resume.education {
            body.push(entry_line(
                &edu.institution,
                &edu.location,
                &date_range(&edu.start_date, &edu.end_date),
            ));
            let mut degree = Paragraph::new().run(Run::new(edu.degree.trim()).italic());
            if let Some(gpa) = edu.gpa.as_deref().map(str::trim).filter(|g| !g.is_empty()) {
                degree = degree.run(Run::new(format!(" | GPA: {gpa}")));
            }
            body.push(degree);
            body.extend(non_empty(&edu.achievements).map(bullet));
        }
    }

    if !resume.experience.is_empty() {
        body.push(heading(EXPERIENCE_HEADING));
        for exp in &resume.experience {
            body.push(entry_line(
                &exp.company,
                &exp.location,
                &date_range(&exp.start_date, &exp.end_date),
            ));
            body.push(Paragraph::new().run(Run::new(exp.title.trim()).italic()));
            body.extend(non_empty(&exp.description).map(bullet));
        }
    }

    if !resume.projects.is_empty() {
        body.push(heading(PROJECTS_HEADING));
        for (i, project) in resume.projects.iter().enumerate() {
            let gap = if i == 0 { 0 } else { ENTRY_GAP };
            body.push(
                Paragraph::new()
                    .before(gap)
                    .run(Run::new(project.name.trim()).bold()),
            );
            if !project.technologies.is_empty() {
                body.push(
                    Paragraph::new()
                        .run(Run::new("Technologies: ").italic())
                        .run(Run::new(project.technologies.join(", "))),
                );
            }
            if !project.description.trim().is_empty() {
                body.push(Paragraph::new().run(Run::new(project.description.trim())));
            }
            body.extend(non_empty(&project.achievements).map(bullet));
        }
    }

    let skills = skill_lines(&resume.skills);
    if !skills.is_empty() {
        body.push(heading(SKILLS_HEADING));
        for (label, items) in skills {
            body.push(
                Paragraph::new()
                    .run(Run::new(format!("{label}: ")).bold())
                    .run(Run::new(items)),
            );
        }
    }

    for (title, items) in [
        (CERTIFICATIONS_HEADING, &resume.certifications),
        (AWARDS_HEADING, &resume.awards),
    ] {
        let items: Vec<Paragraph> = non_empty(items).map(bullet).collect();
        if !items.is_empty() {
            body.push(heading(title));
            body.extend(items);
        }
    }

    let mut xml = String::from(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>"#,
    );
    for paragraph in &body {
        paragraph.write_xml(&mut xml);
    }
    xml.push_str(&format!(
        r#"<w:sectPr><w:pgSz w:w="12240" w:h="15840"/><w:pgMar w:top="{m}" w:right="{m}" w:bottom="{m}" w:left="{m}" w:header="{m}" w:footer="{m}" w:gutter="0"/></w:sectPr></w:body></w:document>"#,
        m = MARGIN_TWIPS
    ));
    xml
}

fn heading(title: &str) -> Paragraph {
    Paragraph::new()
        .border()
        .before(160)
        .after(40)
        .run(Run::new(title).bold().size(BODY_SIZE))
}

/// "Name - Location<TAB>Dates" with the dates on the right margin.
fn entry_line(name: &str, location: &str, dates: &str) -> Paragraph {
    let mut p = Paragraph::new()
        .before(ENTRY_GAP)
        .right_tab()
        .run(Run::new(name.trim()).bold());
    if !location.trim().is_empty() {
        p = p.run(Run::new(format!(" - {}", location.trim())));
    }
    if !dates.is_empty() {
        p = p.run(Run::new(format!("\t{dates}")).bold());
    }
    p
}

fn bullet(text: &str) -> Paragraph {
    Paragraph::new().bulleted().run(Run::new(text))
}

// ────────────────────────────────────────────────────────────────────────────
// WordprocessingML builders
// ────────────────────────────────────────────────────────────────────────────

#[derive(Default)]
struct Paragraph {
    centered: bool,
    border: bool,
    right_tab: bool,
    bulleted: bool,
    before: u32,
    after: u32,
    runs: Vec<Run>,
}

impl Paragraph {
    fn new() -> Self {
        Self::default()
    }

    fn centered(mut self) -> Self {
        self.centered = true;
        self
    }

    fn border(mut self) -> Self {
        self.border = true;
        self
    }

    fn right_tab(mut self) -> Self {
        self.right_tab = true;
        self
    }

    fn bulleted(mut self) -> Self {
        self.bulleted = true;
        self
    }

    fn before(mut self, twips: u32) -> Self {
        self.before = twips;
        self
    }

    fn after(mut self, twips: u32) -> Self {
        self.after = twips;
        self
    }

    fn run(mut self, run: Run) -> Self {
        self.runs.push(run);
        self
    }

    fn write_xml(&self, out: &mut String) {
        out.push_str("<w:p><w:pPr>");
        if self.bulleted {
            out.push_str(r#"<w:numPr><w:ilvl w:val="0"/><w:numId w:val="1"/></w:numPr>"#);
        }
        if self.border {
            out.push_str(
                r#"<w:pBdr><w:bottom w:val="single" w:sz="4" w:space="0" w:color="000000"/></w:pBdr>"#,
            );
        }
        if self.right_tab {
            out.push_str(&format!(
                r#"<w:tabs><w:tab w:val="right" w:pos="{RIGHT_TAB_TWIPS}"/></w:tabs>"#
            ));
        }
        if self.before > 0 || self.after > 0 {
            out.push_str(&format!(
                r#"<w:spacing w:before="{}" w:after="{}"/>"#,
                self.before, self.after
            ));
        }
        if self.centered {
            out.push_str(r#"<w:jc w:val="center"/>"#);
        }
        out.push_str("</w:pPr>");
        for run in &self.runs {
            run.write_xml(out);
        }
        out.push_str("</w:p>");
    }
}

struct Run {
    text: String,
    bold: bool,
    italic: bool,
    size: Option<u32>,
}

impl Run {
    fn new(text: impl Into<String>) -> Self {
        Run {
            text: text.into(),
            bold: false,
            italic: false,
            size: None,
        }
    }

    fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    fn italic(mut self) -> Self {
        self.italic = true;
        self
    }

    fn size(mut self, half_points: u32) -> Self {
        self.size = Some(half_points);
        self
    }

    fn write_xml(&self, out: &mut String) {
        out.push_str("<w:r>");
        if self.bold || self.italic || self.size.is_some() {
            out.push_str("<w:rPr>");
            if self.bold {
                out.push_str("<w:b/>");
            }
            if self.italic {
                out.push_str("<w:i/>");
            }
            if let Some(size) = self.size {
                out.push_str(&format!(r#"<w:sz w:val="{size}"/><w:szCs w:val="{size}"/>"#));
            }
            out.push_str("</w:rPr>");
        }
        for (i, segment) in self.text.split('\t').enumerate() {
            if i > 0 {
                out.push_str("<w:tab/>");
            }
            if !segment.is_empty() {
                out.push_str(r#"<w:t xml:space="preserve">"#);
                out.push_str(&escape_xml(segment));
                out.push_str("</w:t>");
            }
        }
        out.push_str("</w:r>");
    }
}

/// Escapes markup characters and drops control characters XML 1.0 forbids.
fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            '\n' | '\r' => out.push(' '),
            c if (c as u32) < 0x20 => {}
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use std::io::Read;

    use super::*;
    use crate::render::fixtures::sample_resume;

    fn read_part(bytes: &[u8], name: &str) -> String {
        let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
        let mut file = archive.by_name(name).unwrap();
        let mut xml = String::new();
        file.read_to_string(&mut xml).unwrap();
        xml
    }

    #[test]
    fn test_package_contains_all_parts() {
        let bytes = render_docx(&sample_resume()).unwrap();
        let archive = zip::ZipArchive::new(Cursor::new(bytes.as_slice())).unwrap();
        let mut names: Vec<&str> = archive.file_names().collect();
        names.sort_unstable();
        assert_eq!(
            names,
            vec![
                "[Content_Types].xml",
                "_rels/.rels",
                "word/_rels/document.xml.rels",
                "word/document.xml",
                "word/numbering.xml",
                "word/styles.xml",
            ]
        );
    }

    #[test]
    fn test_document_layout() {
        let bytes = render_docx(&sample_resume()).unwrap();
        let xml = read_part(&bytes, "word/document.xml");

        assert!(xml.contains(">ADA LOVELACE<"));
        assert!(xml.contains("ada@example.com | 555-0100 | London | linkedin.com/in/ada | github.com/ada"));
        assert!(xml.contains(r#"<w:tab w:val="right" w:pos="10800"/>"#));
        assert!(xml.contains("<w:tab/>"));
        assert!(xml.contains("Jan 2020 - Present"));
        assert!(xml.contains(r#"<w:numId w:val="1"/>"#));
        assert!(xml.contains("caching (C) &amp; batching"));
        assert!(xml.contains("Dean&apos;s list"));
        assert!(xml.contains(r#"w:left="720""#));

        let education = xml.find(">EDUCATION<").unwrap();
        let experience = xml.find(">PROFESSIONAL EXPERIENCE<").unwrap();
        let certifications = xml.find(">CERTIFICATIONS<").unwrap();
        let awards = xml.find(">AWARDS<").unwrap();
        assert!(education < experience);
        assert!(certifications < awards);
    }

    #[test]
    fn test_styles_set_times_new_roman_body() {
        let bytes = render_docx(&sample_resume()).unwrap();
        let styles = read_part(&bytes, "word/styles.xml");
        assert!(styles.contains(r#"w:ascii="Times New Roman""#));
        assert!(styles.contains(r#"<w:sz w:val="19"/>"#));
    }

    #[test]
    fn test_empty_resume_has_only_name() {
        let bytes = render_docx(&TailoredResume::default()).unwrap();
        let xml = read_part(&bytes, "word/document.xml");
        assert!(xml.contains(">YOUR NAME<"));
        assert!(!xml.contains("SUMMARY"));
        assert!(!xml.contains("<w:numPr>"));
    }

    #[test]
    fn test_escape_xml() {
        assert_eq!(escape_xml("R&D <team>"), "R&amp;D &lt;team&gt;");
        assert_eq!(escape_xml("a\u{0007}b\nc"), "ab c");
    }
}
