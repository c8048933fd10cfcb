//! Paragraph layout in oversampled space.
//!
//! Text is split on `\n` into paragraphs. Whitespace-only paragraphs become
//! blank markers; everything else is word-wrapped to a character budget.
//! The layout also fixes the canvas height before anything is drawn.
//!
//! ## Vertical rhythm (2x space)
//!
//! ```text
//! ┌──────────────────────────────┐
//! │ 2×top + 20                   │  first line top
//! │ line ─┐ line_height          │
//! │ line ─┘                      │
//! │ 2×bottom                     │  paragraph gap
//! │ (blank) line_height+2×bottom │
//! │ line                         │
//! └──────────────────────────────┘
//! ```

use crate::error::{Result, TextCanvasError};

/// Supersampling factor between the drawing canvas and the output image.
pub const SCALE: u32 = 2;

pub const LEFT_MARGIN: u32 = 20;
pub const TOP_MARGIN: u32 = 20;
pub const RIGHT_MARGIN: u32 = 20;
pub const BOTTOM_MARGIN: u32 = 40;

/// Extra space added to the reference glyph extent to form a line.
pub const LINE_SPACING: u32 = 20;

/// Inset added to the scaled left/top margins for the first glyph.
pub const TEXT_INSET: u32 = 20;

/// Padding added to the scaled top+bottom margins when estimating height.
pub const HEIGHT_PADDING: u32 = 40;

/// Minimum canvas height in oversampled space.
pub const MIN_OVERSAMPLED_HEIGHT: u32 = 400;

/// Minimum height of the output image.
pub const MIN_FINAL_HEIGHT: u32 = 200;

/// Horizontal start of every line in oversampled space.
pub const TEXT_LEFT: u32 = LEFT_MARGIN * SCALE + TEXT_INSET;

/// Vertical start of the first line in oversampled space.
pub const TEXT_TOP: u32 = TOP_MARGIN * SCALE + TEXT_INSET;

const PARAGRAPH_GAP: u32 = BOTTOM_MARGIN * SCALE;

/// One input paragraph after wrapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Paragraph {
    /// Empty or whitespace-only input line.
    Blank,
    /// Wrapped lines, in order.
    Lines(Vec<String>),
}

impl Paragraph {
    pub fn is_blank(&self) -> bool {
        matches!(self, Paragraph::Blank)
    }

    pub fn lines(&self) -> &[String] {
        match self {
            Paragraph::Blank => &[],
            Paragraph::Lines(lines) => lines,
        }
    }
}

/// Wrapped paragraphs plus the canvas height they need.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrappedLayout {
    pub paragraphs: Vec<Paragraph>,
    /// Line advance in oversampled pixels.
    pub line_height: u32,
    /// Canvas height in oversampled pixels (already clamped).
    pub canvas_height: u32,
}

impl WrappedLayout {
    /// Height of the output image after downscaling.
    pub fn final_height(&self) -> u32 {
        (self.canvas_height / SCALE).max(MIN_FINAL_HEIGHT)
    }

    /// Top edge (oversampled y) of every drawn line, in drawing order.
    pub fn placed_lines(&self) -> Vec<(u32, &str)> {
        let mut placed = Vec::new();
        let mut y = TEXT_TOP;

        for paragraph in &self.paragraphs {
            match paragraph {
                Paragraph::Blank => {
                    y += self.line_height + PARAGRAPH_GAP;
                }
                Paragraph::Lines(lines) => {
                    for line in lines {
                        placed.push((y, line.as_str()));
                        y += self.line_height;
                    }
                    y += PARAGRAPH_GAP;
                }
            }
        }

        placed
    }
}

/// Character budget per line for a given output width and font size.
///
/// This is a heuristic (oversampled usable width divided by the font size),
/// not a measurement of glyph advances.
pub fn wrap_width(width: u32, font_size: u32) -> Result<usize> {
    if font_size == 0 {
        return Err(TextCanvasError::InvalidInput(
            "font size must be positive".to_string(),
        ));
    }

    let usable = (width as i64 * SCALE as i64) - ((LEFT_MARGIN + RIGHT_MARGIN) * SCALE) as i64;
    let chars = usable.div_euclid(font_size as i64);

    if chars < 1 {
        return Err(TextCanvasError::InvalidInput(format!(
            "image width {} is too narrow for font size {}",
            width, font_size
        )));
    }

    Ok(chars as usize)
}

/// Split text into paragraphs on `\n`, keeping empty entries.
pub fn split_paragraphs(text: &str) -> Vec<&str> {
    text.split('\n').collect()
}

/// Tab stops used when expanding tabs before wrapping.
pub const TAB_SIZE: usize = 8;

/// Greedy word wrap to at most `width` characters per line.
///
/// Tabs expand to the next tab stop and other whitespace characters become
/// spaces. Runs of spaces between words are kept; whitespace at the end of a
/// line and at the start of every line after the first is dropped. Words
/// longer than a whole line are broken, first filling whatever room is left
/// on the current line.
pub fn wrap(paragraph: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut chunks = chunks(&expand_whitespace(paragraph));
    chunks.reverse();

    let mut lines = Vec::new();
    while !chunks.is_empty() {
        let mut line: Vec<String> = Vec::new();
        let mut line_len = 0usize;

        if !lines.is_empty() && chunks.last().is_some_and(|c| is_blank(c)) {
            chunks.pop();
        }

        while let Some(chunk) = chunks.last() {
            let len = chunk.chars().count();
            if line_len + len > width {
                break;
            }
            line_len += len;
            line.extend(chunks.pop());
        }

        if let Some(chunk) = chunks.last_mut() {
            if chunk.chars().count() > width {
                let split = char_boundary(chunk, width - line_len);
                let tail = chunk.split_off(split);
                line.push(std::mem::replace(chunk, tail));
            }
        }

        if line.last().is_some_and(|c| is_blank(c)) {
            line.pop();
        }
        if !line.is_empty() {
            lines.push(line.concat());
        }
    }

    lines
}

fn is_wrap_space(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\r' | '\x0b' | '\x0c')
}

fn is_blank(chunk: &str) -> bool {
    chunk.chars().all(|c| c == ' ')
}

/// Expand tabs to [`TAB_SIZE`] stops and turn other whitespace into spaces.
fn expand_whitespace(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut column = 0usize;

    for c in text.chars() {
        if c == '\t' {
            let pad = TAB_SIZE - column % TAB_SIZE;
            out.extend(std::iter::repeat_n(' ', pad));
            column += pad;
        } else {
            out.push(if is_wrap_space(c) { ' ' } else { c });
            column += 1;
        }
    }

    out
}

/// Split into alternating runs of spaces and non-spaces.
fn chunks(text: &str) -> Vec<String> {
    let mut chunks: Vec<String> = Vec::new();
    let mut blank = None;

    for c in text.chars() {
        let space = c == ' ';
        match chunks.last_mut() {
            Some(chunk) if blank == Some(space) => chunk.push(c),
            _ => {
                chunks.push(c.to_string());
                blank = Some(space);
            }
        }
    }

    chunks
}

/// Byte offset of the `n`th character (or the end of the string).
fn char_boundary(s: &str, n: usize) -> usize {
    s.char_indices().nth(n).map(|(i, _)| i).unwrap_or(s.len())
}

/// Lay out `text` for a face whose lines advance by `line_height`.
pub fn layout(text: &str, wrap_width: usize, line_height: u32) -> WrappedLayout {
    let mut total = (TOP_MARGIN + BOTTOM_MARGIN) * SCALE + HEIGHT_PADDING;
    let mut paragraphs = Vec::new();

    for raw in split_paragraphs(text) {
        if raw.trim().is_empty() {
            total = total.saturating_add(line_height + PARAGRAPH_GAP);
            paragraphs.push(Paragraph::Blank);
            continue;
        }

        let lines = wrap(raw, wrap_width);
        let block = (lines.len() as u32)
            .saturating_mul(line_height)
            .saturating_add(PARAGRAPH_GAP);
        total = total.saturating_add(block);
        paragraphs.push(Paragraph::Lines(lines));
    }

    WrappedLayout {
        paragraphs,
        line_height,
        canvas_height: total.max(MIN_OVERSAMPLED_HEIGHT),
    }
}
