//! Clickable list builder.
//!
//! Pairs rendered lines with click actions so that row offsets for click
//! targets never have to be computed by hand.

use ratzilla::ratatui::layout::Rect;
use ratzilla::ratatui::text::Line;

use crate::input::ClickState;

/// A list of lines, some of which are bound to an action ID.
///
/// ```ignore
/// let mut cl = ClickableList::new();
/// cl.push(Line::from("Upgrades"));
/// cl.push_clickable(Line::from(" [1] Pauls"), BUY_UPGRADE_BASE);
/// cl.register_targets(area, &mut cs, 1, 1);
/// f.render_widget(Paragraph::new(cl.into_lines()).block(block), area);
/// ```
pub struct ClickableList<'a> {
    lines: Vec<Line<'a>>,
    /// `(line_index, action_id)`
    actions: Vec<(u16, u16)>,
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

    /// Add a line that triggers `action_id` when tapped.
    pub fn push_clickable(&mut self, line: Line<'a>, action_id: u16) {
        self.actions.push((self.lines.len() as u16, action_id));
        self.lines.push(line);
    }

    pub fn into_lines(self) -> Vec<Line<'a>> {
        self.lines
    }

    /// Register click targets for all clickable lines, one row per line.
    ///
    /// `top_offset`/`bottom_offset` are the rows taken by borders above and
    /// below the content. Lines that fall outside the content area are skipped.
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
            cs.add_row_target(area, row, action_id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clickable_rows_follow_line_positions() {
        let mut cl = ClickableList::new();
        cl.push(Line::from("Upgrades"));
        cl.push_clickable(Line::from("[1] Pauls"), 100);
        cl.push_clickable(Line::from("[2] Biggs"), 101);
        cl.push(Line::from("footer"));

        let area = Rect::new(0, 5, 40, 10);
        let mut cs = ClickState::new();
        cl.register_targets(area, &mut cs, 1, 1);

        assert_eq!(cs.targets.len(), 2);
        assert_eq!(cs.hit_test(3, 7), Some(100));
        assert_eq!(cs.hit_test(3, 8), Some(101));
        assert_eq!(cs.hit_test(3, 6), None);
        assert_eq!(cs.hit_test(3, 9), None);
    }

    #[test]
    fn rows_past_bottom_border_are_dropped() {
        let mut cl = ClickableList::new();
        for i in 0..10 {
            cl.push_clickable(Line::from(format!("item {}", i)), 50 + i as u16);
        }
        // height 5 with borders → 3 content rows
        let area = Rect::new(0, 0, 40, 5);
        let mut cs = ClickState::new();
        cl.register_targets(area, &mut cs, 1, 1);

        assert_eq!(cs.targets.len(), 3);
        assert_eq!(cs.hit_test(0, 3), Some(52));
        assert_eq!(cs.hit_test(0, 4), None);
    }

    #[test]
    fn inserting_header_shifts_targets() {
        let mut cl = ClickableList::new();
        cl.push(Line::from("header 1"));
        cl.push(Line::from("header 2"));
        cl.push_clickable(Line::from("[r] Reset"), 42);

        let area = Rect::new(0, 0, 40, 10);
        let mut cs = ClickState::new();
        cl.register_targets(area, &mut cs, 1, 1);
        assert_eq!(cs.hit_test(10, 3), Some(42));
        assert_eq!(cs.hit_test(10, 2), None);
    }

    #[test]
    fn into_lines_keeps_all_lines() {
        let mut cl = ClickableList::new();
        cl.push(Line::from("a"));
        cl.push_clickable(Line::from("b"), 1);
        assert_eq!(cl.into_lines().len(), 2);
    }
}
