//! Pagination state machine
//!
//! Tracks the vertical cursor and decides when a row no longer fits above
//! the reserved bottom padding. A page break emits a fresh page with the
//! background and the table header redrawn at the same geometry.

use log::{debug, warn};

use crate::canvas::Canvas;
use crate::config::DocumentConfig;
use crate::table;
use crate::text_layout::RowMetrics;
use crate::types::{Rect, RundownItem};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutState {
    /// Chrome drawn, no data row on the page yet
    AtPageTop,
    Drawing,
    /// The next row did not fit; a new page is being opened
    PageFull,
}

/// Running draw position within the current page
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutCursor {
    pub current_y: f64,
    pub page_index: usize,
}

/// Where a row ended up
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RowPlacement {
    pub page_index: usize,
    pub top: f64,
    pub height: f64,
    /// The row was placed on a fresh page but still crosses the bottom limit
    pub overflows: bool,
}

pub struct PageLayoutEngine<'a> {
    config: &'a DocumentConfig,
    background: Option<&'a str>,
    cursor: LayoutCursor,
    state: LayoutState,
    rows_on_page: usize,
    started: bool,
}

impl<'a> PageLayoutEngine<'a> {
    /// `background` is the image key drawn under every page, if any.
    pub fn new(config: &'a DocumentConfig, background: Option<&'a str>) -> Self {
        Self {
            config,
            background,
            cursor: LayoutCursor {
                current_y: config.body_top(),
                page_index: 0,
            },
            state: LayoutState::AtPageTop,
            rows_on_page: 0,
            started: false,
        }
    }

    pub fn cursor(&self) -> LayoutCursor {
        self.cursor
    }

    pub fn state(&self) -> LayoutState {
        self.state
    }

    /// Data rows placed on the current page
    pub fn rows_on_page(&self) -> usize {
        self.rows_on_page
    }

    pub fn page_count(&self) -> usize {
        if self.started {
            self.cursor.page_index + 1
        } else {
            0
        }
    }

    /// Open page 0 and draw the one-time document title on it.
    pub fn begin<C: Canvas>(&mut self, canvas: &mut C, title: &str) {
        self.open_page(canvas, Some(title));
    }

    /// Whether a row of `height` fits between the cursor and the bottom padding
    pub fn fits(&self, height: f64) -> bool {
        self.cursor.current_y + height + self.config.padding_bottom <= self.config.page_height
    }

    /// Lay out one row, breaking to a new page first when it does not fit.
    pub fn place_row<C: Canvas>(&mut self, canvas: &mut C, item: &RundownItem) -> RowPlacement {
        if !self.started {
            self.begin(canvas, "");
        }

        let metrics = RowMetrics::compute(item, self.config, &*canvas);

        if !self.fits(metrics.height) {
            self.state = LayoutState::PageFull;
            debug!(
                "Page {} full at y={:.1} (row height {:.1}), breaking",
                self.cursor.page_index, self.cursor.current_y, metrics.height
            );
            self.open_page(canvas, None);
        }

        let overflows = !self.fits(metrics.height);
        if overflows {
            warn!(
                "Row '{}'-'{}' is {:.1}pt tall but a page only has {:.1}pt of usable height; it will overflow",
                item.start,
                item.end,
                metrics.height,
                self.config.usable_height()
            );
        }

        self.state = LayoutState::Drawing;
        let top = self.cursor.current_y;
        table::draw_row(canvas, self.config, top, item, &metrics);
        self.cursor.current_y += metrics.height;
        self.rows_on_page += 1;

        RowPlacement {
            page_index: self.cursor.page_index,
            top,
            height: metrics.height,
            overflows,
        }
    }

    fn open_page<C: Canvas>(&mut self, canvas: &mut C, title: Option<&str>) {
        let config = self.config;
        if self.started {
            self.cursor.page_index += 1;
        }
        self.started = true;

        canvas.new_page(config.page_width, config.page_height);
        if let Some(key) = self.background {
            canvas.add_image(key, Rect::new(0.0, 0.0, config.page_width, config.page_height));
        }
        if let Some(title) = title.filter(|t| !t.is_empty()) {
            draw_title(canvas, config, title);
        }

        table::draw_header(canvas, config, config.table_top());
        self.cursor.current_y = config.body_top();
        table::draw_header_divider(canvas, config, self.cursor.current_y);

        self.rows_on_page = 0;
        self.state = LayoutState::AtPageTop;
    }
}

/// Title centered above the table. A title wider than the table starts at
/// the table's left edge instead of running off the page.
fn draw_title<C: Canvas>(canvas: &mut C, config: &DocumentConfig, title: &str) {
    let font = config.title_font;
    let width = canvas.measure_text_width(title, font.face, font.size);
    let x = ((config.page_width - width) / 2.0).max(config.dynamic_margin());
    canvas.draw_text(x, config.title_baseline(), title, font, config.header_text_color());
}
