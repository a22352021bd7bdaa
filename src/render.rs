use ratatui::style::Modifier;
use ratatui::text::{Line, Span};

use crate::types::{ConflictRegion, Side};
use crate::ui::theme;

/// Colorize a conflicted file for the merge view.
///
/// Produces one line per line of `content`. Marker lines of every region
/// use the alert color and all other lines the neutral color. When the view
/// has focus, the selected side of the current region (bounding markers
/// included) is additionally bold.
///
/// `regions` must be sorted by `start`, as returned by the scanner.
pub fn render(
    content: &str,
    regions: &[ConflictRegion],
    current: usize,
    side: Side,
    has_focus: bool,
) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    let mut region_idx = 0;

    for (i, text) in content.lines().enumerate() {
        while region_idx < regions.len() && regions[region_idx].end < i {
            region_idx += 1;
        }
        let region = regions
            .get(region_idx)
            .filter(|r| r.start <= i);

        let mut style = match region {
            Some(r) if r.is_marker(i) => theme::conflict_marker_style(),
            _ => theme::neutral_style(),
        };
        if has_focus
            && region_idx == current
            && region.is_some_and(|r| r.side_contains(side, i))
        {
            style = style.add_modifier(Modifier::BOLD);
        }

        lines.push(Line::from(Span::styled(text.to_string(), style)));
    }

    lines
}

/// Vertical scroll offset that centres `region` in a view `height` rows tall.
pub fn scroll_target(region: &ConflictRegion, height: u16) -> u16 {
    let middle = (region.start + region.end) / 2;
    let offset = middle.saturating_sub(height as usize / 2);
    offset.min(u16::MAX as usize) as u16
}
