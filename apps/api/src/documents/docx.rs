//! `.docx` writer built on docx-rs.
//!
//! Writing happens in two passes: `plan_document` lays the request out as a
//! flat list of blocks (pure, testable), then `build_docx` maps each block to
//! a docx-rs paragraph and packs the archive.

use std::io::Cursor;

use docx_rs::{
    AbstractNumbering, AlignmentType, BreakType, Docx, Header, IndentLevel, Level, LevelJc,
    LevelText, NumberFormat, Numbering, NumberingId, PageMargin, Paragraph, Run,
    SpecialIndentType, Start,
};

use crate::documents::{DocumentError, DocumentWriter};
use crate::formatting::{DocumentBody, FormattedBlock, Fragment, RenderRequest};
use crate::models::DocumentKind;

/// One inch, in twentieths of a point.
const MARGIN_TWIPS: i32 = 1440;
const BULLET_NUMBERING_ID: usize = 1;
const BULLET_INDENT_TWIPS: i32 = 720;
const BULLET_HANGING_TWIPS: i32 = 360;

// Run sizes are in half-points.
const TITLE_SIZE: usize = 40;
const HEADING_SIZE: usize = 28;
const BODY_SIZE: usize = 22;
const PAGE_HEADER_SIZE: usize = 18;
const HEADING_COLOR: &str = "2C3E50";

/// A single laid-out paragraph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocBlock {
    Title(String),
    /// Lines joined with soft breaks, centered.
    Centered(Vec<String>),
    /// Lines joined with soft breaks, right-aligned.
    RightAligned(Vec<String>),
    Heading(String),
    Text(String),
    Bullet(String),
    Blank,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocPlan {
    /// Repeated page header text, if any.
    pub page_header: Option<String>,
    pub blocks: Vec<DocBlock>,
}

/// Lays a render request out as docx blocks.
pub fn plan_document(request: &RenderRequest) -> DocPlan {
    let contact = &request.contact;
    let mut blocks = Vec::new();

    let page_header = match request.kind {
        DocumentKind::Resume => {
            let mut contact_lines = vec![
                format!("{} | {}", contact.email, contact.phone),
                contact.address.clone(),
            ];
            if let Some(url) = &contact.linkedin {
                contact_lines.push(format!("LinkedIn: {url}"));
            }

            blocks.push(DocBlock::Title(contact.name.clone()));
            blocks.push(DocBlock::Centered(contact_lines));
            blocks.push(DocBlock::Blank);

            Some(format!(
                "{} | {} | {}",
                contact.name, contact.email, contact.phone
            ))
        }
        DocumentKind::CoverLetter => {
            blocks.push(DocBlock::RightAligned(vec![
                contact.name.clone(),
                contact.email.clone(),
                contact.phone.clone(),
                contact.address.clone(),
            ]));
            blocks.push(DocBlock::Text(request.date.clone()));
            blocks.push(DocBlock::Blank);
            None
        }
    };

    match &request.body {
        DocumentBody::Sections(sections) => {
            for section in sections {
                blocks.push(DocBlock::Heading(section.label.clone()));
                push_fragments(&mut blocks, &section.fragments);
            }
        }
        DocumentBody::Letter(text) | DocumentBody::Verbatim(text) => {
            blocks.extend(text.lines().map(|line| match line.trim() {
                "" => DocBlock::Blank,
                line => DocBlock::Text(line.to_string()),
            }));
        }
    }

    DocPlan {
        page_header,
        blocks,
    }
}

fn push_fragments(blocks: &mut Vec<DocBlock>, block: &FormattedBlock) {
    for fragment in &block.fragments {
        match fragment {
            Fragment::Paragraph(text) => blocks.push(DocBlock::Text(text.clone())),
            Fragment::BulletList(items) => {
                blocks.extend(items.iter().cloned().map(DocBlock::Bullet));
            }
        }
    }
}

fn lines_run(lines: &[String]) -> Run {
    lines
        .iter()
        .enumerate()
        .fold(Run::new().size(BODY_SIZE), |run, (i, line)| {
            let run = if i > 0 {
                run.add_break(BreakType::TextWrapping)
            } else {
                run
            };
            run.add_text(line.as_str())
        })
}

fn paragraph_for(block: &DocBlock) -> Paragraph {
    match block {
        DocBlock::Title(text) => Paragraph::new()
            .add_run(Run::new().add_text(text.as_str()).size(TITLE_SIZE).bold())
            .align(AlignmentType::Center),
        DocBlock::Centered(lines) => Paragraph::new()
            .add_run(lines_run(lines))
            .align(AlignmentType::Center),
        DocBlock::RightAligned(lines) => Paragraph::new()
            .add_run(lines_run(lines))
            .align(AlignmentType::Right),
        DocBlock::Heading(text) => Paragraph::new().add_run(
            Run::new()
                .add_text(text.as_str())
                .size(HEADING_SIZE)
                .bold()
                .color(HEADING_COLOR),
        ),
        DocBlock::Text(text) => {
            Paragraph::new().add_run(Run::new().add_text(text.as_str()).size(BODY_SIZE))
        }
        DocBlock::Bullet(text) => Paragraph::new()
            .add_run(Run::new().add_text(text.as_str()).size(BODY_SIZE))
            .numbering(NumberingId::new(BULLET_NUMBERING_ID), IndentLevel::new(0)),
        DocBlock::Blank => Paragraph::new(),
    }
}

fn bullet_numbering() -> AbstractNumbering {
    AbstractNumbering::new(BULLET_NUMBERING_ID).add_level(
        Level::new(
            0,
            Start::new(1),
            NumberFormat::new("bullet"),
            LevelText::new("•"),
            LevelJc::new("left"),
        )
        .indent(
            Some(BULLET_INDENT_TWIPS),
            Some(SpecialIndentType::Hanging(BULLET_HANGING_TWIPS)),
            None,
            None,
        ),
    )
}

/// Maps a plan onto a docx-rs document.
pub fn build_docx(plan: &DocPlan) -> Docx {
    let mut docx = Docx::new()
        .page_margin(
            PageMargin::new()
                .top(MARGIN_TWIPS)
                .bottom(MARGIN_TWIPS)
                .left(MARGIN_TWIPS)
                .right(MARGIN_TWIPS),
        )
        .add_abstract_numbering(bullet_numbering())
        .add_numbering(Numbering::new(BULLET_NUMBERING_ID, BULLET_NUMBERING_ID));

    if let Some(text) = &plan.page_header {
        docx = docx.header(
            Header::new().add_paragraph(
                Paragraph::new()
                    .add_run(Run::new().add_text(text.as_str()).size(PAGE_HEADER_SIZE))
                    .align(AlignmentType::Center),
            ),
        );
    }

    plan.blocks
        .iter()
        .fold(docx, |docx, block| docx.add_paragraph(paragraph_for(block)))
}

/// Default `DocumentWriter`.
#[derive(Debug, Clone, Copy, Default)]
pub struct DocxWriter;

impl DocumentWriter for DocxWriter {
    fn write(&self, request: &RenderRequest) -> Result<Vec<u8>, DocumentError> {
        let plan = plan_document(request);
        let mut buffer = Cursor::new(Vec::new());

        build_docx(&plan)
            .build()
            .pack(&mut buffer)
            .map_err(|e| DocumentError::Pack(e.to_string()))?;

        Ok(buffer.into_inner())
    }
}
