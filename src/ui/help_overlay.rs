use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

/// Render a centered help overlay listing all keybindings.
pub fn render(frame: &mut Frame, area: Rect) {
    let width = 60u16.min(area.width.saturating_sub(4));
    let height = 24u16.min(area.height.saturating_sub(2));
    let overlay = centered_rect(width, height, area);

    frame.render_widget(Clear, overlay);

    let title_style = Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD);
    let key_style = Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD);
    let desc_style = Style::default().fg(Color::White);
    let section_style = Style::default()
        .fg(Color::Green)
        .add_modifier(Modifier::BOLD);
    let footer_style = Style::default()
        .fg(Color::DarkGray)
        .add_modifier(Modifier::ITALIC);

    // Inner width is overlay width minus 2 for borders
    let inner_width = width.saturating_sub(2) as usize;

    let lines = vec![
        centered_line("Keyboard Shortcuts", title_style, inner_width),
        Line::from(""),
        centered_line("── File list ──", section_style, inner_width),
        key_line("j / k  ↑ / ↓", "Select file", key_style, desc_style),
        key_line("Enter / m / l", "Resolve selected file", key_style, desc_style),
        key_line("r", "Reload conflicted files", key_style, desc_style),
        key_line("A", "Abort merge (reset to HEAD)", key_style, desc_style),
        Line::from(""),
        centered_line("── Merge view ──", section_style, inner_width),
        key_line("k / ↑", "Select top hunk (ours)", key_style, desc_style),
        key_line("j / ↓", "Select bottom hunk (theirs)", key_style, desc_style),
        key_line("h / ←", "Previous conflict", key_style, desc_style),
        key_line("l / →", "Next conflict", key_style, desc_style),
        key_line("Space", "Pick selected hunk", key_style, desc_style),
        key_line("b", "Pick both hunks", key_style, desc_style),
        key_line("z", "Undo last pick", key_style, desc_style),
        key_line("r", "Reload file from disk", key_style, desc_style),
        key_line("Esc", "Back to file list", key_style, desc_style),
        Line::from(""),
        key_line("q", "Quit", key_style, desc_style),
        Line::from(""),
        centered_line("Press any key to close", footer_style, inner_width),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(" Help ")
        .title_style(title_style);

    frame.render_widget(Paragraph::new(lines).block(block), overlay);
}

fn key_line<'a>(key: &'a str, desc: &'a str, key_style: Style, desc_style: Style) -> Line<'a> {
    Line::from(vec![
        Span::styled(format!("  {:<18}", key), key_style),
        Span::styled(desc, desc_style),
    ])
}

fn centered_line(text: &str, style: Style, width: usize) -> Line<'static> {
    let text_len = text.chars().count();
    let padding = width.saturating_sub(text_len) / 2;
    let padded = format!("{:>width$}", text, width = padding + text_len);
    Line::from(Span::styled(padded, style))
}

/// Create a centered rect of given width and height within `area`.
fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length((area.height.saturating_sub(height)) / 2),
            Constraint::Length(height),
            Constraint::Min(0),
        ])
        .split(area);

    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length((area.width.saturating_sub(width)) / 2),
            Constraint::Length(width),
            Constraint::Min(0),
        ])
        .split(vertical[1]);

    horizontal[1]
}
