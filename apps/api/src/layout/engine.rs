//! Pagination: stacks content blocks onto fixed-size pages.
//!
//! # State machine
//! The engine is either on a page (`PageState`: index, cursor, remaining
//! height) or done. For every block:
//! 1. measure it at the content width,
//! 2. place it when it fits the remaining height (ties place),
//! 3. split a table between rows when its header and at least one row fit,
//! 4. otherwise close the page, open the next one and retry.
//!
//! Pages open lazily, so a leading or repeated `PageBreak` never produces an
//! empty page. A block that does not fit on an empty page is an error.

use tracing::debug;

use crate::errors::DocumentError;
use crate::layout::blocks::{ContentBlock, Table};
use crate::layout::plan::{Origin, Page, PageGeometry, PlacedBlock, RenderPlan};
use crate::layout::renderer::Renderer;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutEngine {
    geometry: PageGeometry,
}

impl LayoutEngine {
    pub fn new(geometry: PageGeometry) -> Self {
        LayoutEngine { geometry }
    }

    /// Lays out for the page size the renderer will draw on.
    pub fn for_renderer<R: Renderer>(renderer: &R) -> Self {
        LayoutEngine::new(renderer.page_size())
    }

    /// Places every block and returns the finished plan.
    ///
    /// Deterministic: the same blocks and geometry always yield the same plan.
    pub fn paginate(&self, blocks: &[ContentBlock]) -> Result<RenderPlan, DocumentError> {
        let mut run = Run::new(self.geometry);

        for (block_index, block) in blocks.iter().enumerate() {
            match block {
                ContentBlock::PageBreak => run.break_page(),
                ContentBlock::Table(table) if !table.rows.is_empty() => {
                    run.place_table(block_index, table)?
                }
                _ => run.place(block_index, block)?,
            }
        }

        let plan = run.finish();
        debug!(
            blocks = blocks.len(),
            pages = plan.page_count(),
            "Pagination complete"
        );
        Ok(plan)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Internal state
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug)]
struct PageState {
    index: usize,
    cursor_y: f32,
    remaining: f32,
    placed: Vec<PlacedBlock>,
}

impl PageState {
    fn is_empty(&self) -> bool {
        self.placed.is_empty()
    }
}

struct Run {
    geometry: PageGeometry,
    width: f32,
    pages: Vec<Page>,
    current: Option<PageState>,
}

impl Run {
    fn new(geometry: PageGeometry) -> Self {
        Run {
            width: geometry.content_width(),
            geometry,
            pages: Vec::new(),
            current: None,
        }
    }

    /// The open page, opening a fresh one if needed.
    fn page(&mut self) -> &mut PageState {
        let geometry = self.geometry;
        let index = self.pages.len();
        self.current.get_or_insert_with(|| PageState {
            index,
            cursor_y: geometry.top(),
            remaining: geometry.usable_height(),
            placed: Vec::new(),
        })
    }

    fn remaining(&self) -> Option<f32> {
        self.current.as_ref().map(|p| p.remaining)
    }

    fn page_is_empty(&self) -> bool {
        self.current.as_ref().map_or(true, PageState::is_empty)
    }

    /// Closes the open page. Empty pages are discarded.
    fn close_page(&mut self) {
        if let Some(state) = self.current.take() {
            if !state.is_empty() {
                self.pages.push(Page {
                    index: state.index,
                    blocks: state.placed,
                });
            }
        }
    }

    fn break_page(&mut self) {
        if !self.page_is_empty() {
            self.close_page();
        }
    }

    fn put(&mut self, block_index: usize, block: ContentBlock, height: f32) {
        let x = self.geometry.margin_left;
        let page = self.page();
        let y = page.cursor_y;
        page.placed.push(PlacedBlock {
            block_index,
            origin: Origin { x, y },
            height,
            block,
        });
        page.cursor_y -= height;
        page.remaining -= height;
    }

    fn place(&mut self, block_index: usize, block: &ContentBlock) -> Result<(), DocumentError> {
        let height = block.measure(self.width);

        if self.remaining().map_or(true, |r| height > r) {
            self.break_page();
            let available = self.geometry.usable_height();
            if height > available {
                return Err(DocumentError::BlockExceedsPageHeight {
                    page_index: self.pages.len(),
                    block_index,
                    block_kind: block.kind(),
                    height,
                    available,
                });
            }
        }

        self.put(block_index, block.clone(), height);
        Ok(())
    }

    /// Places a table, splitting it between rows across as many pages as
    /// needed. Every piece carries the header.
    fn place_table(&mut self, block_index: usize, table: &Table) -> Result<(), DocumentError> {
        let header = table.header_height();
        let row_heights: Vec<f32> = table.rows.iter().map(|r| table.row_height(r)).collect();
        let mut start = 0;

        while start < row_heights.len() {
            let remaining = self.page().remaining;

            let mut used = header;
            let mut end = start;
            while end < row_heights.len() && used + row_heights[end] <= remaining {
                used += row_heights[end];
                end += 1;
            }

            if end == start {
                if self.page_is_empty() {
                    return Err(DocumentError::BlockExceedsPageHeight {
                        page_index: self.pages.len(),
                        block_index,
                        block_kind: "table",
                        height: header + row_heights[start],
                        available: self.geometry.usable_height(),
                    });
                }
                self.close_page();
                continue;
            }

            let piece = table.slice(start..end, start > 0);
            self.put(block_index, ContentBlock::Table(piece), used);
            start = end;

            if start < row_heights.len() {
                self.close_page();
            }
        }

        Ok(())
    }

    fn finish(mut self) -> RenderPlan {
        self.close_page();
        RenderPlan {
            geometry: self.geometry,
            pages: self.pages,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
