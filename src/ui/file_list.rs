use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState};

use crate::types::{ConflictedFile, FileState};
use crate::ui::theme;

/// Render the conflicted file list panel.
pub fn render(
    frame: &mut Frame,
    area: Rect,
    files: &[ConflictedFile],
    selected: usize,
    focused: bool,
) {
    let border_style = if focused {
        theme::border_focused_style()
    } else {
        theme::border_unfocused_style()
    };

    let block = Block::default()
        .title(" Conflicts ")
        .borders(Borders::ALL)
        .border_style(border_style);

    let items: Vec<ListItem> = files
        .iter()
        .enumerate()
        .map(|(i, file)| {
            let style = if i == selected {
                theme::selected_style().add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };

            let line = Line::from(vec![
                Span::styled(state_icon(file.state), state_style(file.state)),
                Span::raw(" "),
                Span::styled(file.path.to_string_lossy().to_string(), style),
            ]);

            ListItem::new(line)
        })
        .collect();

    let mut state = ListState::default();
    if !files.is_empty() {
        state.select(Some(selected));
    }

    let list = List::new(items)
        .block(block)
        .highlight_style(theme::selected_style())
        .highlight_symbol("▶ ");

    frame.render_stateful_widget(list, area, &mut state);
}

fn state_icon(state: FileState) -> &'static str {
    match state {
        FileState::Conflicted => "UU",
        FileState::Resolved => "✎ ",
        FileState::Staged => "✓ ",
    }
}

fn state_style(state: FileState) -> Style {
    match state {
        FileState::Conflicted => Style::default().fg(theme::status_conflicted_fg()),
        FileState::Resolved => Style::default().fg(theme::status_resolved_fg()),
        FileState::Staged => Style::default().fg(theme::status_staged_fg()),
    }
}
