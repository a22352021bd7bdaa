use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::session::MergeSession;
use crate::ui::theme;

/// Render the merge view panel showing the open conflicted file.
pub fn render(
    frame: &mut Frame,
    area: Rect,
    session: Option<&MergeSession>,
    scroll_offset: u16,
    focused: bool,
) {
    let border_style = if focused {
        theme::border_focused_style()
    } else {
        theme::border_unfocused_style()
    };

    let title = match session {
        Some(s) if s.is_resolved() => format!(" {} (resolved) ", s.path().display()),
        Some(s) => format!(
            " {} [conflict {}/{}] ",
            s.path().display(),
            s.cursor().index + 1,
            s.regions().len()
        ),
        None => " No file open ".to_string(),
    };

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(border_style);

    let session = match session {
        Some(s) => s,
        None => {
            let paragraph = Paragraph::new(Line::from(
                "Select a conflicted file and press Enter to resolve it.",
            ))
            .block(block);
            frame.render_widget(paragraph, area);
            return;
        }
    };

    let paragraph = Paragraph::new(session.render(focused))
        .block(block)
        .scroll((scroll_offset, 0));

    frame.render_widget(paragraph, area);
}
