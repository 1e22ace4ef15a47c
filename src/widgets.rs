//! Clickable UI building blocks.
//!
//! [`ClickableList`] keeps rendered lines and their click actions together
//! so row offsets never drift from what is on screen.

use ratzilla::ratatui::layout::Rect;
use ratzilla::ratatui::text::Line;

use crate::input::ClickState;

/// A builder that pairs rendered [`Line`]s with click actions.
///
/// # Example
/// ```ignore
/// let mut cl = ClickableList::new();
/// cl.push(Line::from("Header (not clickable)"));
/// cl.push_clickable(Line::from("Buy"), BUY_UPGRADE_BASE);
/// cl.register_targets(area, &mut cs, 1, 1);
/// f.render_widget(Paragraph::new(cl.into_lines()).block(block), area);
/// ```
pub struct ClickableList<'a> {
    lines: Vec<Line<'a>>,
    /// `(line_index, action_id)` pairs — line_index is the index into `lines`.
    actions: Vec<(u16, u16)>,
}

impl<'a> Default for ClickableList<'a> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> ClickableList<'a> {
    pub fn new() -> Self {
        Self {
            lines: Vec::new(),
            actions: Vec::new(),
        }
    }

    /// Add a non-clickable line.
    pub fn push(&mut self, line: Line<'a>) {
        self.lines.push(line);
    }

    /// Add a clickable line bound to `action_id`.
    pub fn push_clickable(&mut self, line: Line<'a>, action_id: u16) {
        let idx = self.lines.len() as u16;
        self.actions.push((idx, action_id));
        self.lines.push(line);
    }

    /// Consume the builder, returning the lines for rendering.
    pub fn into_lines(self) -> Vec<Line<'a>> {
        self.lines
    }

    /// Register click targets for all clickable lines, one row per line.
    ///
    /// * `top_offset` — rows before content (e.g. 1 for a top border).
    /// * `bottom_offset` — rows after content (e.g. 1 for a bottom border).
    pub fn register_targets(
        &self,
        area: Rect,
        cs: &mut ClickState,
        top_offset: u16,
        bottom_offset: u16,
    ) {
        let content_y = area.y + top_offset;
        let content_end = area.y + area.height.saturating_sub(bottom_offset);
        for &(line_idx, action_id) in &self.actions {
            let row = content_y + line_idx;
            if row >= content_end {
                continue;
            }
            cs.add_click_target(Rect::new(area.x, row, area.width, 1), action_id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registers_rows_below_border() {
        let mut cl = ClickableList::new();
        cl.push(Line::from("header"));
        cl.push_clickable(Line::from("first"), 7);
        cl.push_clickable(Line::from("second"), 8);

        let mut cs = ClickState::new();
        let area = Rect::new(0, 10, 40, 6);
        cl.register_targets(area, &mut cs, 1, 1);

        assert_eq!(cs.hit_test(3, 11), None);
        assert_eq!(cs.hit_test(3, 12), Some(7));
        assert_eq!(cs.hit_test(3, 13), Some(8));
    }

    #[test]
    fn clips_rows_past_area() {
        let mut cl = ClickableList::new();
        for i in 0..5 {
            cl.push_clickable(Line::from("row"), i);
        }
        let mut cs = ClickState::new();
        // 4 rows tall: border + 2 content rows + border
        cl.register_targets(Rect::new(0, 0, 20, 4), &mut cs, 1, 1);
        assert_eq!(cs.targets.len(), 2);
    }
}
