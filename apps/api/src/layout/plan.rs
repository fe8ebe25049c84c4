//! Page geometry and the render plan produced by the layout engine.
//!
//! Coordinates are PDF points with the origin at the bottom-left corner of
//! the page. A placed block's `origin.y` is its top edge; the block occupies
//! `origin.y - height ..= origin.y`.

use serde::{Deserialize, Serialize};

use crate::layout::blocks::ContentBlock;

const MM_TO_PT: f32 = 72.0 / 25.4;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PageGeometry {
    pub width: f32,
    pub height: f32,
    pub margin_top: f32,
    pub margin_bottom: f32,
    pub margin_left: f32,
    pub margin_right: f32,
}

impl PageGeometry {
    /// A4 portrait with 20 mm margins on every side.
    pub fn a4() -> Self {
        let margin = 20.0 * MM_TO_PT;
        PageGeometry {
            width: 210.0 * MM_TO_PT,
            height: 297.0 * MM_TO_PT,
            margin_top: margin,
            margin_bottom: margin,
            margin_left: margin,
            margin_right: margin,
        }
    }

    pub fn content_width(&self) -> f32 {
        self.width - self.margin_left - self.margin_right
    }

    /// Page height minus top and bottom margins.
    pub fn usable_height(&self) -> f32 {
        self.height - self.margin_top - self.margin_bottom
    }

    /// The y coordinate where the first block of a page starts.
    pub fn top(&self) -> f32 {
        self.height - self.margin_top
    }
}

impl Default for PageGeometry {
    fn default() -> Self {
        PageGeometry::a4()
    }
}

/// Converts millimetres to points.
pub fn mm(value: f32) -> f32 {
    value * MM_TO_PT
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Origin {
    pub x: f32,
    pub y: f32,
}

/// One block positioned on a page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlacedBlock {
    /// Position of the block in the sequence submitted to the engine. A table
    /// split across pages appears once per page with the same index.
    pub block_index: usize,
    pub origin: Origin,
    pub height: f32,
    pub block: ContentBlock,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page {
    /// 0-based position in the plan.
    pub index: usize,
    pub blocks: Vec<PlacedBlock>,
}

impl Page {
    /// 1-based page number for anything shown to a reader.
    pub fn number(&self) -> usize {
        self.index + 1
    }

    pub fn used_height(&self) -> f32 {
        self.blocks.iter().map(|b| b.height).sum()
    }
}

/// The paginated, positioned document. Independent of any drawing backend.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderPlan {
    pub geometry: PageGeometry,
    pub pages: Vec<Page>,
}

impl RenderPlan {
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }
}
