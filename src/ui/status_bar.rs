use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::types::{AppMode, ConflictedFile, FileState, FocusPanel};
use crate::ui::theme;

pub const FILE_LIST_HINTS: &str = " enter:resolve  r:refresh  A:abort merge  q:quit  ?:help ";
pub const MERGE_HINTS: &str =
    " ↑↓:select hunk  ←→:navigate conflicts  space:pick hunk  b:pick both  z:undo  esc:back ";

/// Render the status bar at the bottom of the screen.
pub fn render(
    frame: &mut Frame,
    area: Rect,
    files: &[ConflictedFile],
    mode: AppMode,
    focus: FocusPanel,
    message: Option<&str>,
) {
    let line = match mode {
        AppMode::Help => Line::from(Span::styled(
            " Press any key to dismiss help ",
            theme::status_bar_style(),
        )),
        AppMode::Browsing => {
            if let Some(msg) = message {
                Line::from(Span::styled(format!(" {} ", msg), theme::status_bar_style()))
            } else {
                let hints = match focus {
                    FocusPanel::FileList => FILE_LIST_HINTS,
                    FocusPanel::MergeView => MERGE_HINTS,
                };
                let (done, total) = compute_progress(files);
                Line::from(vec![
                    Span::styled(hints, theme::status_bar_style()),
                    Span::styled(format!(" [{}/{}] ", done, total), theme::status_bar_style()),
                ])
            }
        }
    };

    frame.render_widget(Paragraph::new(line), area);
}

/// Compute (resolved_files, total_files) for progress display.
fn compute_progress(files: &[ConflictedFile]) -> (usize, usize) {
    let done = files
        .iter()
        .filter(|f| f.state != FileState::Conflicted)
        .count();
    (done, files.len())
}
