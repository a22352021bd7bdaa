use anyhow::{Context, Result};
use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEventKind,
};
use git2::Repository;
use ratatui::layout::Rect;
use std::io;
use std::path::PathBuf;
use std::time::Duration;

use crate::git;
use crate::session::{DiskStore, MergeSession, PickOutcome};
use crate::types::{AppMode, ConflictedFile, FileState, FocusPanel, Pick};
use crate::ui;

/// Application state for the TUI.
pub struct App {
    pub files: Vec<ConflictedFile>,
    pub selected_file: usize,
    /// Open merge session, if the user is resolving a file.
    pub session: Option<MergeSession>,
    pub scroll_offset: u16,
    pub mode: AppMode,
    pub focus: FocusPanel,
    pub message: Option<String>,
    /// Leave resolved files unstaged.
    pub no_stage: bool,
    /// Directory the file paths are relative to.
    pub workdir: PathBuf,
    /// Cached file list area for mouse click mapping.
    pub file_list_area: Rect,
    /// Inner height of the merge view, for scroll-to-conflict.
    pub merge_view_height: u16,
    /// Whether the UI needs to be redrawn.
    pub dirty: bool,
    abort_armed: bool,
    store: DiskStore,
}

impl App {
    pub fn new(files: Vec<ConflictedFile>, workdir: impl Into<PathBuf>, no_stage: bool) -> Self {
        Self {
            files,
            selected_file: 0,
            session: None,
            scroll_offset: 0,
            mode: AppMode::Browsing,
            focus: FocusPanel::FileList,
            message: None,
            no_stage,
            workdir: workdir.into(),
            file_list_area: Rect::default(),
            merge_view_height: 0,
            dirty: true,
            abort_armed: false,
            store: DiskStore,
        }
    }

    /// Get the currently selected file, if any.
    pub fn current_file(&self) -> Option<&ConflictedFile> {
        self.files.get(self.selected_file)
    }

    /// Select the next file (wraps around).
    pub fn select_next_file(&mut self) {
        if self.files.is_empty() {
            return;
        }
        if self.selected_file + 1 < self.files.len() {
            self.selected_file += 1;
        } else {
            self.selected_file = 0;
        }
        self.dirty = true;
    }

    /// Select the previous file (wraps around).
    pub fn select_prev_file(&mut self) {
        if self.files.is_empty() {
            return;
        }
        if self.selected_file > 0 {
            self.selected_file -= 1;
        } else {
            self.selected_file = self.files.len() - 1;
        }
        self.dirty = true;
    }

    /// Enter merge mode for the selected file.
    ///
    /// A file that no longer contains markers is completed straight away.
    pub fn open_selected_file(&mut self, repo: Option<&Repository>) -> Result<()> {
        let Some(file) = self.current_file() else {
            self.message = Some("No conflicted files".to_string());
            self.dirty = true;
            return Ok(());
        };
        let full_path = self.workdir.join(&file.path);

        let session = MergeSession::open(&self.store, full_path)?;
        let resolved = session.is_resolved();
        self.session = Some(session);
        self.focus = FocusPanel::MergeView;
        self.message = None;
        self.scroll_to_conflict();
        self.dirty = true;

        if resolved {
            self.complete_merge(repo)?;
        }
        Ok(())
    }

    /// Leave merge mode without touching the file. Drops undo history.
    pub fn close_session(&mut self) {
        self.session = None;
        self.focus = FocusPanel::FileList;
        self.scroll_offset = 0;
        self.dirty = true;
    }

    pub fn select_top(&mut self) {
        if let Some(session) = self.session.as_mut() {
            session.select_top();
        }
        self.dirty = true;
    }

    pub fn select_bottom(&mut self) {
        if let Some(session) = self.session.as_mut() {
            session.select_bottom();
        }
        self.dirty = true;
    }

    pub fn next_conflict(&mut self) {
        if let Some(session) = self.session.as_mut() {
            session.next_conflict();
        }
        self.scroll_to_conflict();
        self.dirty = true;
    }

    pub fn previous_conflict(&mut self) {
        if let Some(session) = self.session.as_mut() {
            session.previous_conflict();
        }
        self.scroll_to_conflict();
        self.dirty = true;
    }

    /// Resolve the current conflict. `None` keeps the selected side.
    pub fn pick_hunk(&mut self, repo: Option<&Repository>, pick: Option<Pick>) -> Result<()> {
        let store = self.store;
        let Some(session) = self.session.as_mut() else {
            return Ok(());
        };
        let pick = pick.unwrap_or_else(|| session.cursor().side.into());

        match session.pick(&store, pick)? {
            PickOutcome::NoConflict if session.is_resolved() => {
                // Completion failed earlier, most likely while staging
                self.complete_merge(repo)?;
            }
            PickOutcome::NoConflict => {
                self.message = Some("No conflict selected".to_string());
            }
            PickOutcome::Resolved { remaining: 0 } => {
                self.complete_merge(repo)?;
            }
            PickOutcome::Resolved { remaining } => {
                self.message = Some(format!("Picked {} ({} conflicts left)", pick, remaining));
            }
        }
        self.scroll_to_conflict();
        self.dirty = true;
        Ok(())
    }

    /// Undo the last pick in the open file.
    pub fn undo(&mut self) -> Result<()> {
        let store = self.store;
        let Some(session) = self.session.as_mut() else {
            return Ok(());
        };
        self.message = Some(if session.undo(&store)? {
            "Undid last pick".to_string()
        } else {
            "Nothing to undo".to_string()
        });
        self.scroll_to_conflict();
        self.dirty = true;
        Ok(())
    }

    /// Reload the open file, or the conflicted file list when no file is open.
    pub fn reload(&mut self, repo: Option<&Repository>) -> Result<()> {
        let store = self.store;
        if let Some(session) = self.session.as_mut() {
            session.reload(&store)?;
            self.message = Some("Reloaded file".to_string());
            self.scroll_to_conflict();
        } else if let Some(repo) = repo {
            self.files = git::conflicted_files(repo)?;
            if self.selected_file >= self.files.len() {
                self.selected_file = self.files.len().saturating_sub(1);
            }
            self.message = Some(format!("{} conflicted files", self.files.len()));
        } else {
            self.message = Some("Nothing to reload".to_string());
        }
        self.dirty = true;
        Ok(())
    }

    /// Abort the merge. Needs two presses; the first one only arms it.
    pub fn abort_merge(&mut self, repo: Option<&Repository>) -> Result<()> {
        let Some(repo) = repo else {
            self.message = Some("Not in a git repository".to_string());
            self.dirty = true;
            return Ok(());
        };
        if !self.abort_armed {
            self.abort_armed = true;
            self.message = Some("Press A again to abort the merge".to_string());
            self.dirty = true;
            return Ok(());
        }
        self.abort_armed = false;
        self.close_session();
        git::abort_merge(repo)?;
        self.files = git::conflicted_files(repo)?;
        self.selected_file = 0;
        self.message = Some("Merge aborted".to_string());
        Ok(())
    }

    /// Toggle focus between file list and merge view (only with a file open).
    pub fn toggle_focus(&mut self) {
        if self.session.is_none() {
            return;
        }
        self.focus = match self.focus {
            FocusPanel::FileList => FocusPanel::MergeView,
            FocusPanel::MergeView => FocusPanel::FileList,
        };
        self.dirty = true;
    }

    /// Mark the open file resolved, stage it when allowed, and return to
    /// the file list.
    fn complete_merge(&mut self, repo: Option<&Repository>) -> Result<()> {
        let Some(full_path) = self.session.as_ref().map(|s| s.path().to_path_buf()) else {
            return Ok(());
        };
        let rel_path = full_path
            .strip_prefix(&self.workdir)
            .unwrap_or(&full_path)
            .to_path_buf();

        // Staging failure leaves the session open so the user can retry
        let mut state = FileState::Resolved;
        if let Some(repo) = repo.filter(|_| !self.no_stage) {
            git::stage_file(repo, &rel_path).context("Press space to retry")?;
            state = FileState::Staged;
        }

        let workdir = &self.workdir;
        if let Some(file) = self
            .files
            .iter_mut()
            .find(|f| workdir.join(&f.path) == full_path)
        {
            file.state = state;
        }
        self.message = Some(match state {
            FileState::Staged => format!("All conflicts resolved, staged {}", rel_path.display()),
            _ => format!("All conflicts resolved in {}", rel_path.display()),
        });
        self.close_session();
        Ok(())
    }

    fn scroll_to_conflict(&mut self) {
        self.scroll_offset = self
            .session
            .as_ref()
            .map(|s| s.scroll_target(self.merge_view_height))
            .unwrap_or(0);
    }

    /// Handle a mouse click at the given coordinates.
    pub fn handle_mouse_click(&mut self, column: u16, row: u16) {
        let area = self.file_list_area;
        if column >= area.x
            && column < area.x + area.width
            && row >= area.y
            && row < area.y + area.height
        {
            // +1 for the border, row within the list content
            let idx = row.saturating_sub(area.y + 1) as usize;
            if idx < self.files.len() {
                self.selected_file = idx;
                self.focus = FocusPanel::FileList;
                self.dirty = true;
            }
        }
    }

    /// Dispatch one key press. Returns `true` when the app should quit.
    pub fn handle_key(&mut self, key: KeyEvent, repo: Option<&Repository>) -> bool {
        if self.mode == AppMode::Help {
            self.mode = AppMode::Browsing;
            self.dirty = true;
            return false;
        }

        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return true;
        }

        if key.code != KeyCode::Char('A') {
            self.abort_armed = false;
        }
        // Messages last until the next key so the key hints come back
        if self.message.take().is_some() {
            self.dirty = true;
        }

        let result = match key.code {
            KeyCode::Char('q') => return true,
            KeyCode::Char('?') => {
                self.mode = AppMode::Help;
                self.dirty = true;
                Ok(())
            }
            KeyCode::Tab => {
                self.toggle_focus();
                Ok(())
            }
            _ => match self.focus {
                FocusPanel::FileList => self.handle_file_list_key(key.code, repo),
                FocusPanel::MergeView => self.handle_merge_key(key.code, repo),
            },
        };

        if let Err(e) = result {
            log::warn!("{:#}", e);
            self.message = Some(format!("Error: {:#}", e));
            self.dirty = true;
        }
        false
    }

    fn handle_file_list_key(&mut self, code: KeyCode, repo: Option<&Repository>) -> Result<()> {
        match code {
            KeyCode::Down | KeyCode::Char('j') => self.select_next_file(),
            KeyCode::Up | KeyCode::Char('k') => self.select_prev_file(),
            KeyCode::Enter | KeyCode::Right | KeyCode::Char('m') | KeyCode::Char('l') => {
                self.open_selected_file(repo)?
            }
            KeyCode::Char('r') => self.reload(repo)?,
            KeyCode::Char('A') => self.abort_merge(repo)?,
            _ => {}
        }
        Ok(())
    }

    fn handle_merge_key(&mut self, code: KeyCode, repo: Option<&Repository>) -> Result<()> {
        match code {
            KeyCode::Up | KeyCode::Char('k') => self.select_top(),
            KeyCode::Down | KeyCode::Char('j') => self.select_bottom(),
            KeyCode::Left | KeyCode::Char('h') => self.previous_conflict(),
            KeyCode::Right | KeyCode::Char('l') => self.next_conflict(),
            KeyCode::Char(' ') => self.pick_hunk(repo, None)?,
            KeyCode::Char('b') => self.pick_hunk(repo, Some(Pick::Both))?,
            KeyCode::Char('z') => self.undo()?,
            KeyCode::Char('r') => self.reload(repo)?,
            KeyCode::Esc => self.close_session(),
            _ => {}
        }
        Ok(())
    }
}

/// Guard that restores terminal state on drop (including panics).
struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = crossterm::terminal::disable_raw_mode();
        let _ = crossterm::execute!(
            io::stdout(),
            crossterm::terminal::LeaveAlternateScreen,
            crossterm::event::DisableMouseCapture,
        );
    }
}

/// Run the TUI application. Returns the final state of the file list.
pub fn run(
    files: Vec<ConflictedFile>,
    workdir: PathBuf,
    repo: Option<&Repository>,
    no_stage: bool,
) -> Result<Vec<ConflictedFile>> {
    crossterm::terminal::enable_raw_mode()?;
    let mut stdout = io::stdout();
    crossterm::execute!(
        stdout,
        crossterm::terminal::EnterAlternateScreen,
        crossterm::event::EnableMouseCapture,
    )?;

    // Guard ensures terminal is restored even on panic
    let _guard = TerminalGuard;

    let backend = ratatui::backend::CrosstermBackend::new(stdout);
    let mut terminal = ratatui::Terminal::new(backend)?;

    let mut app = App::new(files, workdir, no_stage);

    loop {
        // Draw only when state has changed
        if app.dirty {
            terminal.draw(|frame| ui::render(frame, &mut app))?;
            app.dirty = false;
        }

        if event::poll(Duration::from_millis(50))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if app.handle_key(key, repo) {
                        break;
                    }
                }
                Event::Mouse(mouse) => match mouse.kind {
                    MouseEventKind::ScrollDown => {
                        app.scroll_offset = app.scroll_offset.saturating_add(1);
                        app.dirty = true;
                    }
                    MouseEventKind::ScrollUp => {
                        app.scroll_offset = app.scroll_offset.saturating_sub(1);
                        app.dirty = true;
                    }
                    MouseEventKind::Down(MouseButton::Left) => {
                        app.handle_mouse_click(mouse.column, mouse.row);
                    }
                    _ => {}
                },
                Event::Resize(_, _) => {
                    app.dirty = true;
                }
                _ => {}
            }
        }
    }

    Ok(app.files)
}
