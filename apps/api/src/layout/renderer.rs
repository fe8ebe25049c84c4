//! Drawing interface for render plans, plus a monospace text preview.
//!
//! A `Renderer` receives one call per page and one `draw` per placed block,
//! in plan order. It owns glyph drawing and output encoding; positions and
//! page breaks are already decided by the layout engine.

use crate::layout::blocks::{
    Align, ContentBlock, KeyValueBlock, Paragraph, SignatureBlock, Table, TextLine,
};
use crate::layout::plan::{Origin, PageGeometry, RenderPlan};

pub trait Renderer {
    type Output;

    /// Page geometry this renderer draws on.
    fn page_size(&self) -> PageGeometry;

    /// `number` is 1-based.
    fn begin_page(&mut self, number: usize, total: usize);

    fn draw(&mut self, block: &ContentBlock, origin: Origin, width: f32);

    fn end_page(&mut self);

    fn finish(self) -> Self::Output;
}

/// Walks the plan and hands every page and block to `renderer`.
pub fn render<R: Renderer>(plan: &RenderPlan, mut renderer: R) -> R::Output {
    let total = plan.page_count();
    let width = plan.geometry.content_width();

    for page in &plan.pages {
        renderer.begin_page(page.number(), total);
        for placed in &page.blocks {
            renderer.draw(&placed.block, placed.origin, width);
        }
        renderer.end_page();
    }

    renderer.finish()
}

// ────────────────────────────────────────────────────────────────────────────
// TextRenderer
// ────────────────────────────────────────────────────────────────────────────

/// Points per character cell of the preview.
const CHAR_WIDTH_PT: f32 = 5.0;
/// Points per preview line, used to size spacers.
const LINE_HEIGHT_PT: f32 = 13.0;

/// Renders a plan as plain text, one character cell per 5pt of width.
///
/// Alerts are prefixed with `!`, each page ends with a `Sida n av N` footer
/// and pages are separated by a form feed.
pub struct TextRenderer {
    geometry: PageGeometry,
    out: String,
    page: Option<(usize, usize)>,
}

impl TextRenderer {
    pub fn new(geometry: PageGeometry) -> Self {
        TextRenderer {
            geometry,
            out: String::new(),
            page: None,
        }
    }

    fn columns(width_pt: f32) -> usize {
        ((width_pt / CHAR_WIDTH_PT).floor() as usize).max(1)
    }

    fn push_line(&mut self, line: &str) {
        self.out.push_str(line.trim_end());
        self.out.push('\n');
    }

    fn text_line(&mut self, line: &TextLine, cols: usize) {
        let text = if line.alert {
            format!("! {}", line.text)
        } else {
            line.text.clone()
        };
        let aligned = align(&text, cols, line.align);
        self.push_line(&aligned);
    }

    fn paragraph(&mut self, p: &Paragraph, cols: usize) {
        let indent = if p.indent_pt > 0.0 {
            Self::columns(p.indent_pt).min(cols / 2)
        } else {
            0
        };
        let prefix = if p.alert { "! " } else { "" };
        let text = format!("{prefix}{}", p.text);
        let lines = wrap(&text, cols - indent);
        if lines.is_empty() {
            self.push_line("");
        }
        for line in lines {
            self.push_line(&format!("{}{line}", " ".repeat(indent)));
        }
    }

    fn key_value(&mut self, kv: &KeyValueBlock, cols: usize) {
        let indent = if kv.indent_pt > 0.0 {
            Self::columns(kv.indent_pt)
        } else {
            0
        };
        let label_cols = Self::columns(kv.label_width_pt);
        let value_cols = cols.saturating_sub(indent + label_cols).max(1);

        for entry in &kv.entries {
            let value = if entry.missing {
                format!("! {}", entry.value)
            } else {
                entry.value.clone()
            };
            let labels = wrap(&format!("{}:", entry.label), label_cols);
            let values = wrap(&value, value_cols);
            let rows = labels.len().max(values.len()).max(1);
            for i in 0..rows {
                let label = labels.get(i).map(String::as_str).unwrap_or("");
                let value = values.get(i).map(String::as_str).unwrap_or("");
                self.push_line(&format!(
                    "{}{}{value}",
                    " ".repeat(indent),
                    pad(label, label_cols)
                ));
            }
        }
    }

    fn table(&mut self, table: &Table) {
        let widths: Vec<usize> = table
            .columns
            .iter()
            .map(|c| Self::columns(c.width_pt))
            .collect();
        let aligns: Vec<Align> = table.columns.iter().map(|c| c.align).collect();

        if table.continued {
            self.push_line("(forts.)");
        }
        let header: Vec<String> = table.columns.iter().map(|c| c.title.clone()).collect();
        self.table_row(&header, &widths, &aligns);
        let rule: usize = widths.iter().sum();
        self.push_line(&"-".repeat(rule));
        for row in &table.rows {
            self.table_row(row, &widths, &aligns);
        }
    }

    fn table_row(&mut self, cells: &[String], widths: &[usize], aligns: &[Align]) {
        let wrapped: Vec<Vec<String>> = cells
            .iter()
            .zip(widths)
            .map(|(cell, w)| wrap(cell, w.saturating_sub(1).max(1)))
            .collect();
        let height = wrapped.iter().map(Vec::len).max().unwrap_or(0).max(1);

        for i in 0..height {
            let mut line = String::new();
            for ((cell, width), alignment) in wrapped.iter().zip(widths).zip(aligns) {
                let text = cell.get(i).map(String::as_str).unwrap_or("");
                let inner = width.saturating_sub(1);
                line.push_str(&align(text, inner, *alignment));
                line.push(' ');
            }
            self.push_line(&line);
        }
    }

    fn signature(&mut self, sig: &SignatureBlock, cols: usize) {
        if sig.parties.is_empty() {
            return;
        }
        let col = cols / sig.parties.len();
        let gap_lines = (sig.line_gap_pt / LINE_HEIGHT_PT).round() as usize;

        let columns: Vec<Vec<String>> = sig
            .parties
            .iter()
            .map(|party| {
                let mut lines = vec![party.heading.clone()];
                for line in &party.lines {
                    lines.extend(std::iter::repeat(String::new()).take(gap_lines));
                    lines.push("_".repeat(col.saturating_sub(4).max(1)));
                    lines.push(line.caption.clone());
                    if let Some(printed) = &line.printed {
                        lines.push(printed.clone());
                    }
                }
                lines
            })
            .collect();

        let height = columns.iter().map(Vec::len).max().unwrap_or(0);
        for i in 0..height {
            let line: String = columns
                .iter()
                .map(|c| pad(c.get(i).map(String::as_str).unwrap_or(""), col))
                .collect();
            self.push_line(&line);
        }
    }
}

impl Renderer for TextRenderer {
    type Output = String;

    fn page_size(&self) -> PageGeometry {
        self.geometry
    }

    fn begin_page(&mut self, number: usize, total: usize) {
        if number > 1 {
            self.out.push('\u{c}');
        }
        self.page = Some((number, total));
    }

    fn draw(&mut self, block: &ContentBlock, _origin: Origin, width: f32) {
        let cols = Self::columns(width);
        match block {
            ContentBlock::TextLine(line) => self.text_line(line, cols),
            ContentBlock::Paragraph(p) => self.paragraph(p, cols),
            ContentBlock::KeyValue(kv) => self.key_value(kv, cols),
            ContentBlock::Table(table) => self.table(table),
            ContentBlock::Spacer { height_pt } => {
                for _ in 0..(height_pt / LINE_HEIGHT_PT).round() as usize {
                    self.push_line("");
                }
            }
            ContentBlock::Signature(sig) => self.signature(sig, cols),
            ContentBlock::PageBreak => {}
        }
    }

    fn end_page(&mut self) {
        if let Some((number, total)) = self.page.take() {
            let cols = Self::columns(self.geometry.content_width());
            self.push_line("");
            self.push_line(&align(&format!("Sida {number} av {total}"), cols, Align::Center));
        }
    }

    fn finish(self) -> String {
        self.out
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Text helpers
// ────────────────────────────────────────────────────────────────────────────

/// Greedy word wrap by character count. Overlong words are hard-split.
fn wrap(text: &str, cols: usize) -> Vec<String> {
    let cols = cols.max(1);
    let mut lines = Vec::new();

    for source in text.lines() {
        let mut current = String::new();
        for word in source.split_whitespace() {
            let mut word: Vec<char> = word.chars().collect();
            while word.len() > cols {
                if !current.is_empty() {
                    lines.push(std::mem::take(&mut current));
                }
                let rest = word.split_off(cols);
                lines.push(word.into_iter().collect());
                word = rest;
            }
            let word: String = word.into_iter().collect();
            let len = current.chars().count();
            if current.is_empty() {
                current = word;
            } else if len + 1 + word.chars().count() > cols {
                lines.push(std::mem::replace(&mut current, word));
            } else {
                current.push(' ');
                current.push_str(&word);
            }
        }
        if !current.is_empty() {
            lines.push(current);
        }
    }

    lines
}

fn pad(text: &str, cols: usize) -> String {
    align(text, cols, Align::Left)
}

fn align(text: &str, cols: usize, alignment: Align) -> String {
    let len = text.chars().count();
    if len >= cols {
        return text.to_string();
    }
    let space = cols - len;
    match alignment {
        Align::Left => format!("{text}{}", " ".repeat(space)),
        Align::Right => format!("{}{text}", " ".repeat(space)),
        Align::Center => {
            let left = space / 2;
            format!("{}{text}{}", " ".repeat(left), " ".repeat(space - left))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::blocks::{KeyValueEntry, SignatureLine, SignatureParty, TableColumn, TextStyle};
    use crate::layout::engine::LayoutEngine;

    /// Records the calls `render` makes.
    struct Recorder {
        events: Vec<String>,
    }

    impl Renderer for Recorder {
        type Output = Vec<String>;

        fn page_size(&self) -> PageGeometry {
            PageGeometry::a4()
        }

        fn begin_page(&mut self, number: usize, total: usize) {
            self.events.push(format!("begin {number}/{total}"));
        }

        fn draw(&mut self, block: &ContentBlock, _origin: Origin, _width: f32) {
            self.events.push(format!("draw {}", block.kind()));
        }

        fn end_page(&mut self) {
            self.events.push("end".to_string());
        }

        fn finish(self) -> Vec<String> {
            self.events
        }
    }

    fn two_page_plan() -> RenderPlan {
        let engine = LayoutEngine::new(PageGeometry::a4());
        engine
            .paginate(&[
                ContentBlock::text("OFFERT", TextStyle::DOCUMENT_TITLE),
                ContentBlock::PageBreak,
                ContentBlock::paragraph("Villkor", TextStyle::BODY),
            ])
            .unwrap()
    }

    #[test]
    fn test_render_visits_pages_and_blocks_in_order() {
        let events = render(&two_page_plan(), Recorder { events: vec![] });
        assert_eq!(
            events,
            vec![
                "begin 1/2",
                "draw text_line",
                "end",
                "begin 2/2",
                "draw paragraph",
                "end"
            ]
        );
    }

    #[test]
    fn test_engine_takes_geometry_from_renderer() {
        let renderer = TextRenderer::new(PageGeometry::a4());
        let plan = LayoutEngine::for_renderer(&renderer)
            .paginate(&[ContentBlock::text("OFFERT", TextStyle::TITLE)])
            .unwrap();
        assert_eq!(plan.geometry, PageGeometry::a4());
    }

    #[test]
    fn test_text_preview_has_page_footers() {
        let text = render(&two_page_plan(), TextRenderer::new(PageGeometry::a4()));
        assert!(text.contains("OFFERT"));
        assert!(text.contains("Sida 1 av 2"));
        assert!(text.contains("Sida 2 av 2"));
        assert_eq!(text.matches('\u{c}').count(), 1);
    }

    #[test]
    fn test_text_preview_marks_missing_values() {
        let mut renderer = TextRenderer::new(PageGeometry::a4());
        let block = ContentBlock::KeyValue(KeyValueBlock {
            entries: vec![KeyValueEntry {
                label: "Telefon".to_string(),
                value: "SAKNAS".to_string(),
                missing: true,
            }],
            label_width_pt: 100.0,
            indent_pt: 0.0,
            label_style: TextStyle::BODY_BOLD,
            value_style: TextStyle::BODY,
        });
        renderer.draw(&block, Origin { x: 0.0, y: 0.0 }, 480.0);
        let out = renderer.finish();
        assert!(out.starts_with("Telefon:"));
        assert!(out.contains("! SAKNAS"));
    }

    #[test]
    fn test_text_preview_right_aligns_amount_columns() {
        let mut renderer = TextRenderer::new(PageGeometry::a4());
        let block = ContentBlock::Table(Table {
            columns: vec![
                TableColumn {
                    title: "Beskrivning".to_string(),
                    width_pt: 100.0,
                    align: Align::Left,
                },
                TableColumn {
                    title: "Summa".to_string(),
                    width_pt: 60.0,
                    align: Align::Right,
                },
            ],
            rows: vec![vec!["Larm".to_string(), "2 000 kr".to_string()]],
            header_style: TextStyle::BODY_BOLD,
            body_style: TextStyle::BODY,
            cell_padding_pt: 3.5,
            continued: true,
        });
        renderer.draw(&block, Origin { x: 0.0, y: 0.0 }, 480.0);
        let out = renderer.finish();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "(forts.)");
        // 20 + 12 columns; each cell leaves one column of gutter
        assert_eq!(lines[3], format!("Larm{}   2 000 kr", " ".repeat(16)));
    }

    #[test]
    fn test_text_preview_places_signature_parties_side_by_side() {
        let mut renderer = TextRenderer::new(PageGeometry::a4());
        let party = |heading: &str| SignatureParty {
            heading: heading.to_string(),
            lines: vec![SignatureLine {
                caption: "Underskrift".to_string(),
                printed: None,
            }],
        };
        let block = ContentBlock::Signature(SignatureBlock {
            parties: vec![party("För leverantören"), party("För kunden")],
            line_gap_pt: 26.0,
            style: TextStyle::BODY,
        });
        renderer.draw(&block, Origin { x: 0.0, y: 0.0 }, 400.0);
        let out = renderer.finish();
        let first = out.lines().next().unwrap();
        assert!(first.starts_with("För leverantören"));
        assert!(first.contains("För kunden"));
    }

    #[test]
    fn test_wrap_hard_splits_long_words() {
        assert_eq!(wrap("abcdefgh ij", 3), vec!["abc", "def", "gh", "ij"]);
        assert!(wrap("", 10).is_empty());
    }
}
