use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Produce a rectangle centered within `area` that spans the requested percent
/// of the width and height. Used for modal dialogs and the menu panel.
pub(crate) fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(area);

    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(horizontal[1]);

    vertical[1]
}

/// Cursor x for `text` typed after `prefix` inside a widget starting at `x`,
/// clamped to the widget's right edge.
pub(crate) fn cursor_x(x: u16, width: u16, prefix: &str, text: &str) -> u16 {
    let offset = prefix.chars().count() + text.chars().count();
    let max = width.saturating_sub(1);
    x + (offset.min(u16::MAX as usize) as u16).min(max)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cursor_stays_inside_widget() {
        assert_eq!(cursor_x(2, 40, "Search: ", "dune"), 14);
        assert_eq!(cursor_x(2, 10, "Search: ", "a long query"), 11);
    }
}
