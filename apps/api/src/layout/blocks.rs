//! Content blocks: the units the layout engine stacks onto pages.
//!
//! Every block can report the vertical space it needs for a given content
//! width (`measure`) and is handed to a `Renderer` for drawing once placed.
//! Heights depend only on the block and the width, never on page position.

use std::ops::Range;

use serde::{Deserialize, Serialize};

use crate::layout::font_metrics::{get_metrics, FontFamily, FontMetricTable};

// ────────────────────────────────────────────────────────────────────────────
// Styles
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TextStyle {
    pub font: FontFamily,
    pub size_pt: f32,
    /// Baseline-to-baseline distance; one printed line consumes this much height.
    pub leading_pt: f32,
}

impl TextStyle {
    pub const TITLE: TextStyle = TextStyle {
        font: FontFamily::HelveticaBold,
        size_pt: 20.0,
        leading_pt: 26.0,
    };
    pub const DOCUMENT_TITLE: TextStyle = TextStyle {
        font: FontFamily::HelveticaBold,
        size_pt: 16.0,
        leading_pt: 22.0,
    };
    pub const HEADING: TextStyle = TextStyle {
        font: FontFamily::HelveticaBold,
        size_pt: 12.0,
        leading_pt: 18.0,
    };
    pub const SUBHEADING: TextStyle = TextStyle {
        font: FontFamily::HelveticaBold,
        size_pt: 10.0,
        leading_pt: 14.0,
    };
    pub const BODY: TextStyle = TextStyle {
        font: FontFamily::Helvetica,
        size_pt: 10.0,
        leading_pt: 13.0,
    };
    pub const BODY_BOLD: TextStyle = TextStyle {
        font: FontFamily::HelveticaBold,
        size_pt: 10.0,
        leading_pt: 13.0,
    };
    pub const SMALL: TextStyle = TextStyle {
        font: FontFamily::Helvetica,
        size_pt: 9.0,
        leading_pt: 12.0,
    };

    pub fn metrics(&self) -> &'static FontMetricTable {
        get_metrics(&self.font)
    }

    fn line_count(&self, text: &str, width: f32) -> usize {
        self.metrics().line_count(text, width, self.size_pt)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Align {
    #[default]
    Left,
    Center,
    Right,
}

// ────────────────────────────────────────────────────────────────────────────
// Block variants
// ────────────────────────────────────────────────────────────────────────────

/// A single unwrapped line of text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextLine {
    pub text: String,
    pub style: TextStyle,
    pub align: Align,
    /// Drawn highlighted (e.g. red) so a reviewer notices it.
    pub alert: bool,
}

/// Text that wraps to the available width.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paragraph {
    pub text: String,
    pub style: TextStyle,
    pub indent_pt: f32,
    pub alert: bool,
}

impl Paragraph {
    pub fn lines(&self, width: f32) -> Vec<String> {
        self.style
            .metrics()
            .wrap_lines(&self.text, width - self.indent_pt, self.style.size_pt)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyValueEntry {
    pub label: String,
    pub value: String,
    /// The value is a sentinel standing in for absent data.
    pub missing: bool,
}

/// Label/value pairs in two columns. Values wrap inside their column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyValueBlock {
    pub entries: Vec<KeyValueEntry>,
    pub label_width_pt: f32,
    pub indent_pt: f32,
    pub label_style: TextStyle,
    pub value_style: TextStyle,
}

impl KeyValueBlock {
    pub fn value_width(&self, width: f32) -> f32 {
        width - self.indent_pt - self.label_width_pt
    }

    pub fn entry_height(&self, entry: &KeyValueEntry, width: f32) -> f32 {
        let label_lines = self.label_style.line_count(&entry.label, self.label_width_pt);
        let value_lines = self.value_style.line_count(&entry.value, self.value_width(width));
        let leading = self.label_style.leading_pt.max(self.value_style.leading_pt);
        label_lines.max(value_lines) as f32 * leading
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableColumn {
    pub title: String,
    pub width_pt: f32,
    pub align: Align,
}

/// A table with a header row and fixed column widths.
///
/// The layout engine may split the body between rows; each piece is a
/// `Table` holding a contiguous range of the source rows, and every piece
/// after the first has `continued` set and repeats the header.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Table {
    pub columns: Vec<TableColumn>,
    pub rows: Vec<Vec<String>>,
    pub header_style: TextStyle,
    pub body_style: TextStyle,
    pub cell_padding_pt: f32,
    pub continued: bool,
}

impl Table {
    pub fn header_height(&self) -> f32 {
        let lines = self
            .columns
            .iter()
            .map(|c| self.header_style.line_count(&c.title, self.cell_width(c)))
            .max()
            .unwrap_or(1);
        self.cell_height(lines, &self.header_style)
    }

    pub fn row_height(&self, row: &[String]) -> f32 {
        let lines = self
            .columns
            .iter()
            .zip(row)
            .map(|(c, cell)| self.body_style.line_count(cell, self.cell_width(c)))
            .max()
            .unwrap_or(1);
        self.cell_height(lines, &self.body_style)
    }

    /// Width available to text inside a cell of `column`.
    pub fn cell_width(&self, column: &TableColumn) -> f32 {
        column.width_pt - 2.0 * self.cell_padding_pt
    }

    /// A piece of this table holding `range` of the body rows.
    pub fn slice(&self, range: Range<usize>, continued: bool) -> Table {
        Table {
            columns: self.columns.clone(),
            rows: self.rows[range].to_vec(),
            header_style: self.header_style,
            body_style: self.body_style,
            cell_padding_pt: self.cell_padding_pt,
            continued,
        }
    }

    fn cell_height(&self, lines: usize, style: &TextStyle) -> f32 {
        lines as f32 * style.leading_pt + 2.0 * self.cell_padding_pt
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignatureLine {
    pub caption: String,
    /// Text printed under the caption, e.g. the signatory's name.
    pub printed: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignatureParty {
    pub heading: String,
    pub lines: Vec<SignatureLine>,
}

/// One column per signing party, drawn side by side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignatureBlock {
    pub parties: Vec<SignatureParty>,
    /// Blank space above each rule, where the signature goes.
    pub line_gap_pt: f32,
    pub style: TextStyle,
}

impl SignatureBlock {
    fn party_height(&self, party: &SignatureParty) -> f32 {
        let leading = self.style.leading_pt;
        let lines: f32 = party
            .lines
            .iter()
            .map(|l| self.line_gap_pt + leading + if l.printed.is_some() { leading } else { 0.0 })
            .sum();
        leading + lines
    }
}

// ────────────────────────────────────────────────────────────────────────────
// ContentBlock
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ContentBlock {
    TextLine(TextLine),
    Paragraph(Paragraph),
    KeyValue(KeyValueBlock),
    Table(Table),
    Spacer { height_pt: f32 },
    Signature(SignatureBlock),
    PageBreak,
}

impl ContentBlock {
    pub fn text(text: impl Into<String>, style: TextStyle) -> Self {
        ContentBlock::TextLine(TextLine {
            text: text.into(),
            style,
            align: Align::Left,
            alert: false,
        })
    }

    pub fn paragraph(text: impl Into<String>, style: TextStyle) -> Self {
        ContentBlock::Paragraph(Paragraph {
            text: text.into(),
            style,
            indent_pt: 0.0,
            alert: false,
        })
    }

    pub fn spacer(height_pt: f32) -> Self {
        ContentBlock::Spacer { height_pt }
    }

    /// Vertical space the block needs at the given content width.
    pub fn measure(&self, width: f32) -> f32 {
        match self {
            ContentBlock::TextLine(line) => line.style.leading_pt,
            ContentBlock::Paragraph(p) => p.lines(width).len().max(1) as f32 * p.style.leading_pt,
            ContentBlock::KeyValue(kv) => kv
                .entries
                .iter()
                .map(|e| kv.entry_height(e, width))
                .sum(),
            ContentBlock::Table(table) => {
                table.header_height()
                    + table
                        .rows
                        .iter()
                        .map(|r| table.row_height(r))
                        .sum::<f32>()
            }
            ContentBlock::Spacer { height_pt } => *height_pt,
            ContentBlock::Signature(sig) => sig
                .parties
                .iter()
                .map(|p| sig.party_height(p))
                .fold(0.0, f32::max),
            ContentBlock::PageBreak => 0.0,
        }
    }

    /// Short name used in logs and layout errors.
    pub fn kind(&self) -> &'static str {
        match self {
            ContentBlock::TextLine(_) => "text_line",
            ContentBlock::Paragraph(_) => "paragraph",
            ContentBlock::KeyValue(_) => "key_value",
            ContentBlock::Table(_) => "table",
            ContentBlock::Spacer { .. } => "spacer",
            ContentBlock::Signature(_) => "signature",
            ContentBlock::PageBreak => "page_break",
        }
    }
}
