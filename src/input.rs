//! Key presses and clicks, reduced to game action IDs.

use ratzilla::ratatui::layout::{Position, Rect};

#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    Key(char),
    /// A click on a registered target, identified by an action ID from
    /// [`crate::actions`].
    Click(u16),
}

/// Where the terminal grid sits on the page, in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridBounds {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

/// Map a page pixel onto a `(col, row)` cell of a `cols` x `rows` grid.
///
/// Returns `None` outside the grid or for an empty grid.
pub fn pixel_to_cell(x: f64, y: f64, bounds: &GridBounds, cols: u16, rows: u16) -> Option<(u16, u16)> {
    if cols == 0 || rows == 0 || bounds.width <= 0.0 || bounds.height <= 0.0 {
        return None;
    }
    let fx = (x - bounds.left) / bounds.width;
    let fy = (y - bounds.top) / bounds.height;
    if !(0.0..1.0).contains(&fx) || !(0.0..1.0).contains(&fy) {
        return None;
    }
    let col = (fx * f64::from(cols)) as u16;
    let row = (fy * f64::from(rows)) as u16;
    Some((col.min(cols - 1), row.min(rows - 1)))
}

/// Click targets of the current frame, shared by the render loop and the
/// mouse handler.
#[derive(Debug, Default)]
pub struct ClickState {
    /// `(cells, action_id)`; later entries sit on top.
    pub targets: Vec<(Rect, u16)>,
    /// Terminal size at the last frame.
    pub grid: Rect,
}

impl ClickState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop last frame's targets and record the terminal size.
    pub fn begin_frame(&mut self, grid: Rect) {
        self.targets.clear();
        self.grid = grid;
    }

    pub fn add_click_target(&mut self, rect: Rect, action_id: u16) {
        self.targets.push((rect, action_id));
    }

    /// Action under a terminal cell. The topmost target wins.
    pub fn hit_test(&self, col: u16, row: u16) -> Option<u16> {
        let cell = Position::new(col, row);
        self.targets
            .iter()
            .rev()
            .find(|(rect, _)| rect.contains(cell))
            .map(|&(_, action_id)| action_id)
    }
}
