//! PDF export: a single-pass PDF 1.4 writer over the base-14 Times faces.
//!
//! Text is WinAnsi-encoded, word-wrapped with the static width tables in
//! `font_metrics`, and flows onto new Letter pages as the cursor reaches the
//! bottom margin. Content streams are left uncompressed.

use crate::models::TailoredResume;
use crate::render::font_metrics::Face;
use crate::render::{
    contact_parts, date_range, display_name, join_nonblank, link_parts, non_empty, skill_lines,
    AWARDS_HEADING, CERTIFICATIONS_HEADING, EDUCATION_HEADING, EXPERIENCE_HEADING,
    PROJECTS_HEADING, SKILLS_HEADING, SUMMARY_HEADING,
};

const PAGE_WIDTH: f32 = 612.0;
const PAGE_HEIGHT: f32 = 792.0;
const MARGIN: f32 = 54.0;
const CONTENT_WIDTH: f32 = PAGE_WIDTH - 2.0 * MARGIN;
/// Line height as a multiple of font size.
const LEADING: f32 = 1.25;

const NAME_SIZE: f32 = 20.0;
const HEADING_SIZE: f32 = 12.0;
const ENTRY_SIZE: f32 = 11.0;
const BODY_SIZE: f32 = 10.0;
const META_SIZE: f32 = 9.0;

const BULLET_INDENT: f32 = 8.0;
const BULLET_TEXT_INDENT: f32 = 18.0;

/// Heading plus at least one line of its section must fit on the page.
const HEADING_KEEP: f32 = 40.0;

const FACES: [Face; 3] = [Face::Regular, Face::Bold, Face::Italic];

pub fn render_pdf(resume: &TailoredResume) -> Vec<u8> {
    let mut page = PageWriter::new();
    let info = &resume.personal_info;

    page.centered(Face::Bold, NAME_SIZE, &display_name(info));
    let contact = contact_parts(info);
    if !contact.is_empty() {
        page.centered(Face::Regular, BODY_SIZE, &contact.join(" | "));
    }
    let links = link_parts(info);
    if !links.is_empty() {
        page.centered(Face::Regular, BODY_SIZE, &links.join(" | "));
    }

    if !resume.summary.trim().is_empty() {
        page.heading(SUMMARY_HEADING);
        page.paragraph(Face::Regular, BODY_SIZE, resume.summary.trim());
    }

    if !resume.experience.is_empty() {
        page.heading(EXPERIENCE_HEADING);
        for exp in &resume.experience {
            page.entry_gap();
            page.paragraph(
                Face::Bold,
                ENTRY_SIZE,
                &join_nonblank(&[exp.title.as_str(), exp.company.as_str()], " - "),
            );
            let dates = date_range(&exp.start_date, &exp.end_date);
            let meta = join_nonblank(&[dates.as_str(), exp.location.as_str()], " | ");
            if !meta.is_empty() {
                page.paragraph(Face::Italic, META_SIZE, &meta);
            }
            for bullet in non_empty(&exp.description) {
                page.bullet(bullet);
            }
        }
    }

    if !resume.projects.is_empty() {
        page.heading(PROJECTS_HEADING);
        for project in &resume.projects {
            page.entry_gap();
            page.paragraph(Face::Bold, ENTRY_SIZE, project.name.trim());
            if !project.technologies.is_empty() {
                page.paragraph(
                    Face::Italic,
                    BODY_SIZE,
                    &format!("Technologies: {}", project.technologies.join(", ")),
                );
            }
            if !project.description.trim().is_empty() {
                page.paragraph(Face::Regular, BODY_SIZE, project.description.trim());
            }
            for achievement in non_empty(&project.achievements) {
                page.bullet(achievement);
            }
        }
    }

    if !resume.education.is_empty() {
        page.heading(EDUCATION_HEADING);
        for edu in &resume.education {
            page.entry_gap();
            page.paragraph(Face::Bold, ENTRY_SIZE, edu.degree.trim());
            let dates = date_range(&edu.start_date, &edu.end_date);
            page.paragraph(
                Face::Regular,
                BODY_SIZE,
                &join_nonblank(
                    &[edu.institution.as_str(), edu.location.as_str(), dates.as_str()],
                    " | ",
                ),
            );
            if let Some(gpa) = edu.gpa.as_deref().map(str::trim).filter(|g| !g.is_empty()) {
                page.paragraph(Face::Regular, BODY_SIZE, &format!("GPA: {gpa}"));
            }
            for achievement in non_empty(&edu.achievements) {
                page.bullet(achievement);
            }
        }
    }

    let skills = skill_lines(&resume.skills);
    if !skills.is_empty() {
        page.heading(SKILLS_HEADING);
        for (label, items) in skills {
            page.paragraph(Face::Regular, BODY_SIZE, &format!("{label}: {items}"));
        }
    }

    for (title, items) in [
        (CERTIFICATIONS_HEADING, &resume.certifications),
        (AWARDS_HEADING, &resume.awards),
    ] {
        let items: Vec<&str> = non_empty(items).collect();
        if items.is_empty() {
            continue;
        }
        page.heading(title);
        for item in items {
            page.bullet(item);
        }
    }

    assemble(page.finish())
}

// ────────────────────────────────────────────────────────────────────────────
// Page layout
// ────────────────────────────────────────────────────────────────────────────

/// Cursor-based layout that emits one content stream per page.
struct PageWriter {
    pages: Vec<String>,
    current: String,
    /// Top of the next line, in PDF user space (origin bottom-left).
    y: f32,
}

impl PageWriter {
    fn new() -> Self {
        PageWriter {
            pages: Vec::new(),
            current: String::new(),
            y: PAGE_HEIGHT - MARGIN,
        }
    }

    fn ensure(&mut self, height: f32) {
        if self.y - height < MARGIN && !self.current.is_empty() {
            self.pages.push(std::mem::take(&mut self.current));
            self.y = PAGE_HEIGHT - MARGIN;
        }
    }

    fn gap(&mut self, points: f32) {
        self.y -= points;
    }

    fn entry_gap(&mut self) {
        self.gap(4.0);
    }

    /// Places one already-wrapped line with its left edge at `x`.
    fn line(&mut self, face: Face, size: f32, x: f32, text: &str) {
        let height = size * LEADING;
        self.ensure(height);
        let baseline = self.y - size;
        self.draw(face, size, x, baseline, text);
        self.y -= height;
    }

    fn draw(&mut self, face: Face, size: f32, x: f32, baseline: f32, text: &str) {
        self.current.push_str(&format!(
            "BT /{} {size:.1} Tf {x:.2} {baseline:.2} Td ({}) Tj ET\n",
            face.resource(),
            encode_text(text)
        ));
    }

    fn centered(&mut self, face: Face, size: f32, text: &str) {
        let metrics = face.metrics();
        for line in metrics.wrap(text, size, CONTENT_WIDTH) {
            let width = metrics.measure_str(&line) * size;
            let x = (PAGE_WIDTH - width) / 2.0;
            self.line(face, size, x, &line);
        }
    }

    fn paragraph(&mut self, face: Face, size: f32, text: &str) {
        for line in face.metrics().wrap(text, size, CONTENT_WIDTH) {
            self.line(face, size, MARGIN, &line);
        }
    }

    /// A bulleted item with a hanging indent for continuation lines.
    fn bullet(&mut self, text: &str) {
        let text_x = MARGIN + BULLET_TEXT_INDENT;
        let lines = Face::Regular
            .metrics()
            .wrap(text, BODY_SIZE, CONTENT_WIDTH - BULLET_TEXT_INDENT);
        for (i, line) in lines.iter().enumerate() {
            if i == 0 {
                self.ensure(BODY_SIZE * LEADING);
                let baseline = self.y - BODY_SIZE;
                self.draw(Face::Regular, BODY_SIZE, MARGIN + BULLET_INDENT, baseline, "\u{2022}");
            }
            self.line(Face::Regular, BODY_SIZE, text_x, line);
        }
    }

    /// Bold heading with a rule underneath, kept together with the next line.
    fn heading(&mut self, title: &str) {
        self.gap(6.0);
        self.ensure(HEADING_KEEP);
        self.line(Face::Bold, HEADING_SIZE, MARGIN, title);
        let rule_y = self.y + 1.0;
        self.current.push_str(&format!(
            "0.5 w {MARGIN:.2} {rule_y:.2} m {:.2} {rule_y:.2} l S\n",
            PAGE_WIDTH - MARGIN
        ));
        self.gap(3.0);
    }

    fn finish(mut self) -> Vec<String> {
        if !self.current.is_empty() || self.pages.is_empty() {
            self.pages.push(self.current);
        }
        self.pages
    }
}

// ────────────────────────────────────────────────────────────────────────────
// File assembly
// ────────────────────────────────────────────────────────────────────────────

/// Object layout: 1 catalog, 2 page tree, 3..=5 fonts, then (page, content) pairs.
fn assemble(pages: Vec<String>) -> Vec<u8> {
    let first_page_obj = 3 + FACES.len();
    let page_ids: Vec<usize> = (0..pages.len()).map(|i| first_page_obj + 2 * i).collect();

    let mut objects: Vec<String> = Vec::new();
    objects.push("<< /Type /Catalog /Pages 2 0 R >>".to_string());
    let kids = page_ids
        .iter()
        .map(|id| format!("{id} 0 R"))
        .collect::<Vec<_>>()
        .join(" ");
    objects.push(format!(
        "<< /Type /Pages /Kids [{kids}] /Count {} >>",
        pages.len()
    ));
    for face in FACES {
        objects.push(format!(
            "<< /Type /Font /Subtype /Type1 /BaseFont /{} /Encoding /WinAnsiEncoding >>",
            face.base_font()
        ));
    }
    let font_resources = FACES
        .iter()
        .enumerate()
        .map(|(i, face)| format!("/{} {} 0 R", face.resource(), 3 + i))
        .collect::<Vec<_>>()
        .join(" ");
    for (page_id, content) in page_ids.iter().zip(&pages) {
        objects.push(format!(
            "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 {PAGE_WIDTH} {PAGE_HEIGHT}] \
             /Resources << /Font << {font_resources} >> >> /Contents {} 0 R >>",
            page_id + 1
        ));
        objects.push(format!(
            "<< /Length {} >>\nstream\n{content}endstream",
            content.len()
        ));
    }

    // Content is pure ASCII, so string offsets are byte offsets.
    let mut out = String::from("%PDF-1.4\n");
    let mut offsets = Vec::with_capacity(objects.len());
    for (i, body) in objects.iter().enumerate() {
        offsets.push(out.len());
        out.push_str(&format!("{} 0 obj\n{body}\nendobj\n", i + 1));
    }
    let xref_offset = out.len();
    out.push_str(&format!("xref\n0 {}\n0000000000 65535 f \n", objects.len() + 1));
    for offset in offsets {
        out.push_str(&format!("{offset:010} 00000 n \n"));
    }
    out.push_str(&format!(
        "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{xref_offset}\n%%EOF\n",
        objects.len() + 1
    ));
    out.into_bytes()
}

/// WinAnsi string literal body: delimiters escaped, high bytes as octal.
fn encode_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match win_ansi_byte(c) {
            b @ (b'(' | b')' | b'\\') => {
                out.push('\\');
                out.push(b as char);
            }
            b @ 0x20..=0x7E => out.push(b as char),
            b => out.push_str(&format!("\\{b:03o}")),
        }
    }
    out
}

fn win_ansi_byte(c: char) -> u8 {
    match c {
        ' '..='~' => c as u8,
        '\u{2022}' => 0x95,
        '\u{2013}' => 0x96,
        '\u{2014}' => 0x97,
        '\u{2018}' => 0x91,
        '\u{2019}' => 0x92,
        '\u{201C}' => 0x93,
        '\u{201D}' => 0x94,
        '\u{2026}' => 0x85,
        '\u{20AC}' => 0x80,
        '\u{A0}'..='\u{FF}' => c as u8,
        '\t' | '\n' | '\r' => b' ',
        _ => b'?',
    }
}
