//! Per-render drawing surface: a write cursor, a font selection and the pages
//! filled so far. Coordinates are millimetres from the top-left page corner.

use crate::layout::font_metrics::{get_metrics, Font, PageConfig};
use crate::layout::wrap::wrap_text;

// ────────────────────────────────────────────────────────────────────────────
// Draw operations
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
}

/// One line of text, already measured and positioned.
#[derive(Debug, Clone, PartialEq)]
pub struct TextRun {
    /// Left edge of the first glyph.
    pub x_mm: f32,
    /// Top of the line box the text sits in.
    pub y_mm: f32,
    pub width_mm: f32,
    pub line_height_mm: f32,
    pub font: Font,
    pub size_pt: f32,
    pub text: String,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImagePlacement {
    pub x_mm: f32,
    pub y_mm: f32,
    pub width_mm: f32,
    pub height_mm: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Text(TextRun),
    Image(ImagePlacement),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Page {
    pub ops: Vec<DrawOp>,
}

impl Page {
    pub fn texts(&self) -> impl Iterator<Item = &TextRun> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Text(run) => Some(run),
            DrawOp::Image(_) => None,
        })
    }

    pub fn images(&self) -> impl Iterator<Item = &ImagePlacement> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Image(placement) => Some(placement),
            DrawOp::Text(_) => None,
        })
    }
}

/// The finished layout: what a backend needs to serialize the document.
#[derive(Debug, Clone, PartialEq)]
pub struct LaidOutDocument {
    pub page_width_mm: f32,
    pub page_height_mm: f32,
    pub pages: Vec<Page>,
}

impl LaidOutDocument {
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Every text run, page by page, in emission order.
    pub fn texts(&self) -> impl Iterator<Item = &TextRun> {
        self.pages.iter().flat_map(|p| p.texts())
    }

    pub fn has_image(&self) -> bool {
        self.pages.iter().any(|p| p.images().next().is_some())
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Canvas
// ────────────────────────────────────────────────────────────────────────────

pub struct DocumentCanvas<'a> {
    config: &'a PageConfig,
    x: f32,
    y: f32,
    font: Font,
    size_pt: f32,
    pages: Vec<Page>,
}

impl<'a> DocumentCanvas<'a> {
    /// One empty page, cursor at the top-left margin, body font selected.
    pub fn new(config: &'a PageConfig) -> Self {
        Self {
            config,
            x: config.margin_left_mm,
            y: config.margin_top_mm,
            font: Font::Helvetica,
            size_pt: config.body_font_pt,
            pages: vec![Page::default()],
        }
    }

    pub fn set_font(&mut self, font: Font, size_pt: f32) {
        self.font = font;
        self.size_pt = size_pt;
    }

    pub fn set_xy(&mut self, x_mm: f32, y_mm: f32) {
        self.x = x_mm;
        self.y = y_mm;
    }

    #[cfg(test)]
    pub fn cursor(&self) -> (f32, f32) {
        (self.x, self.y)
    }

    #[cfg(test)]
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Carriage return plus `h` of vertical space. Never breaks the page.
    pub fn ln(&mut self, h_mm: f32) {
        self.x = self.config.margin_left_mm;
        self.y += h_mm;
    }

    /// Writes `text` in the current font, wrapped to the printable width.
    /// Each wrapped line takes one line height and may start a new page.
    pub fn write(&mut self, text: &str, align: Align) {
        let metrics = get_metrics(self.font);
        let cell_width = self.config.page_width_mm() - self.config.margin_right_mm - self.x;
        let padding = self.config.cell_padding_mm;
        let line_height = self.config.line_height_mm;

        for line in wrap_text(text, metrics, self.size_pt, cell_width - 2.0 * padding) {
            self.ensure_room(line_height);

            let width = metrics.width_mm(&line, self.size_pt);
            let x = match align {
                Align::Left => self.x + padding,
                Align::Center => self.x + (cell_width - width) / 2.0,
            };
            let run = TextRun {
                x_mm: x,
                y_mm: self.y,
                width_mm: width,
                line_height_mm: line_height,
                font: self.font,
                size_pt: self.size_pt,
                text: line,
            };
            self.current_page().ops.push(DrawOp::Text(run));
            self.ln(line_height);
        }
    }

    /// Places an image on the current page. Does not move the cursor.
    pub fn image(&mut self, placement: ImagePlacement) {
        self.current_page().ops.push(DrawOp::Image(placement));
    }

    pub fn finish(self) -> LaidOutDocument {
        LaidOutDocument {
            page_width_mm: self.config.page_width_mm(),
            page_height_mm: self.config.page_height_mm(),
            pages: self.pages,
        }
    }

    /// Starts a new page when a block of height `h` would cross the bottom margin.
    /// A fresh page is never broken again, so oversized blocks cannot loop.
    fn ensure_room(&mut self, h_mm: f32) {
        let at_top = self.y <= self.config.margin_top_mm;
        if !at_top && self.y + h_mm > self.config.page_break_y_mm() {
            self.pages.push(Page::default());
            self.y = self.config.margin_top_mm;
        }
    }

    fn current_page(&mut self) -> &mut Page {
        let last = self.pages.len() - 1;
        &mut self.pages[last]
    }
}
