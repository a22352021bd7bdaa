pub mod file_list;
pub mod help_overlay;
pub mod merge_view;
pub mod status_bar;
pub mod theme;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout};

use crate::app::App;
use crate::types::{AppMode, FocusPanel};

/// Render the full TUI layout.
pub fn render(frame: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(3),    // Main content area
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    let main_area = chunks[0];
    let status_area = chunks[1];

    let main_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(25), Constraint::Percentage(75)])
        .split(main_area);

    let file_list_area = main_chunks[0];
    let merge_view_area = main_chunks[1];

    // Cached for mouse mapping and scroll-to-conflict
    app.file_list_area = file_list_area;
    app.merge_view_height = merge_view_area.height.saturating_sub(2);

    file_list::render(
        frame,
        file_list_area,
        &app.files,
        app.selected_file,
        app.focus == FocusPanel::FileList,
    );

    merge_view::render(
        frame,
        merge_view_area,
        app.session.as_ref(),
        app.scroll_offset,
        app.focus == FocusPanel::MergeView,
    );

    status_bar::render(
        frame,
        status_area,
        &app.files,
        app.mode,
        app.focus,
        app.message.as_deref(),
    );

    if app.mode == AppMode::Help {
        help_overlay::render(frame, frame.area());
    }
}
