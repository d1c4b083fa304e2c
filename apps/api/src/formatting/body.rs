//! Body Formatter — re-flows a section body into paragraphs and bullet lists.

use serde::Serialize;

/// Shown when a body produced no fragments at all.
pub const PLACEHOLDER_TEXT: &str = "Information not provided";

/// Leading glyphs that mark a bullet line.
pub const BULLET_GLYPHS: &[char] = &['•', '-', '*', '▪', '◦'];

/// One typed unit of formatted output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "content", rename_all = "snake_case")]
pub enum Fragment {
    Paragraph(String),
    BulletList(Vec<String>),
}

/// Fragments of one body, in source order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FormattedBlock {
    pub fragments: Vec<Fragment>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BodyLine<'a> {
    Blank,
    Bullet(&'a str),
    Text(&'a str),
}

enum BodyState<'a> {
    Idle,
    Prose(Vec<&'a str>),
    List(Vec<String>),
}

fn classify_line(line: &str) -> BodyLine<'_> {
    let line = line.trim();
    if line.is_empty() {
        return BodyLine::Blank;
    }

    match strip_bullet_marker(line) {
        Some(item) => BodyLine::Bullet(item),
        None => BodyLine::Text(line),
    }
}

/// Returns the item text if `line` starts with a bullet glyph or a
/// single-digit ordinal (`1.` through `9.`).
///
/// The ordinal's period must be followed by whitespace or end the line, so
/// "3.5 years" stays prose. "10." never matches since its second char is a digit.
fn strip_bullet_marker(line: &str) -> Option<&str> {
    let mut chars = line.chars();
    let first = chars.next()?;

    if BULLET_GLYPHS.contains(&first) {
        return Some(line[first.len_utf8()..].trim());
    }

    if ('1'..='9').contains(&first) && chars.next() == Some('.') {
        match chars.next() {
            None => return Some(""),
            Some(c) if c.is_whitespace() => return Some(line[2..].trim()),
            Some(_) => {}
        }
    }

    None
}

fn step<'a>(state: BodyState<'a>, line: BodyLine<'a>, out: &mut Vec<Fragment>) -> BodyState<'a> {
    match (state, line) {
        (BodyState::Idle, BodyLine::Blank) => BodyState::Idle,
        (BodyState::Idle, BodyLine::Bullet(item)) => BodyState::List(vec![item.to_string()]),
        (BodyState::Idle, BodyLine::Text(text)) => BodyState::Prose(vec![text]),

        (BodyState::Prose(lines), BodyLine::Blank) => {
            out.push(Fragment::Paragraph(lines.join(" ")));
            BodyState::Idle
        }
        (BodyState::Prose(lines), BodyLine::Bullet(item)) => {
            out.push(Fragment::Paragraph(lines.join(" ")));
            BodyState::List(vec![item.to_string()])
        }
        (BodyState::Prose(mut lines), BodyLine::Text(text)) => {
            lines.push(text);
            BodyState::Prose(lines)
        }

        // A blank line does not end a list; only prose does.
        (BodyState::List(items), BodyLine::Blank) => BodyState::List(items),
        (BodyState::List(mut items), BodyLine::Bullet(item)) => {
            items.push(item.to_string());
            BodyState::List(items)
        }
        (BodyState::List(items), BodyLine::Text(text)) => {
            out.push(Fragment::BulletList(items));
            BodyState::Prose(vec![text])
        }
    }
}

/// Formats one section body into paragraphs and bullet lists.
///
/// Line breaks inside a paragraph collapse to single spaces.
pub fn format_body(body: &str) -> FormattedBlock {
    let mut fragments = Vec::new();

    let last = body
        .lines()
        .map(classify_line)
        .fold(BodyState::Idle, |state, line| step(state, line, &mut fragments));

    match last {
        BodyState::Idle => {}
        BodyState::Prose(lines) => fragments.push(Fragment::Paragraph(lines.join(" "))),
        BodyState::List(items) => fragments.push(Fragment::BulletList(items)),
    }

    if fragments.is_empty() {
        fragments.push(Fragment::Paragraph(PLACEHOLDER_TEXT.to_string()));
    }

    FormattedBlock { fragments }
}
