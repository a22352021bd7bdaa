use anyhow::{Context, Result};
use ratatui::text::Line;
use std::path::{Path, PathBuf};

use crate::conflict;
use crate::history::SnapshotStack;
use crate::navigation::ConflictCursor;
use crate::render;
use crate::types::{ConflictRegion, Pick, Side};

/// Full-file read/write collaborator used by a merge session.
pub trait FileStore {
    fn read(&self, path: &Path) -> Result<String>;
    fn write(&self, path: &Path, content: &str) -> Result<()>;
}

/// Reads and overwrites files on the local filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct DiskStore;

impl FileStore for DiskStore {
    fn read(&self, path: &Path) -> Result<String> {
        std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
    }

    fn write(&self, path: &Path, content: &str) -> Result<()> {
        std::fs::write(path, content).with_context(|| format!("Failed to write {}", path.display()))
    }
}

/// Result of a pick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickOutcome {
    /// No region to pick from.
    NoConflict,
    /// The region was resolved; `remaining` regions are left in the file.
    Resolved { remaining: usize },
}

/// Conflict-resolution state for one open file.
///
/// Created when merge mode opens a file and dropped when it closes, which
/// also discards the undo history. All mutations go through the session so
/// the file content, region list, cursor and history stay in step: every
/// write is followed by a re-scan and a cursor clamp.
#[derive(Debug)]
pub struct MergeSession {
    path: PathBuf,
    content: String,
    regions: Vec<ConflictRegion>,
    cursor: ConflictCursor,
    history: SnapshotStack,
}

impl MergeSession {
    /// Read `path` and scan it. The cursor starts on the first conflict with
    /// the top side selected.
    pub fn open(store: &dyn FileStore, path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let content = store.read(&path)?;
        let regions = conflict::scan(&content);
        log::info!(
            "Opened merge session for {} ({} conflicts)",
            path.display(),
            regions.len()
        );
        Ok(Self {
            path,
            content,
            regions,
            cursor: ConflictCursor::new(),
            history: SnapshotStack::new(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn regions(&self) -> &[ConflictRegion] {
        &self.regions
    }

    pub fn cursor(&self) -> ConflictCursor {
        self.cursor
    }

    pub fn current_region(&self) -> Option<&ConflictRegion> {
        self.regions.get(self.cursor.index)
    }

    pub fn is_resolved(&self) -> bool {
        self.regions.is_empty()
    }

    pub fn can_undo(&self) -> bool {
        !self.history.is_empty()
    }

    pub fn select_top(&mut self) {
        self.cursor.select_top();
    }

    pub fn select_bottom(&mut self) {
        self.cursor.select_bottom();
    }

    pub fn select_side(&mut self, side: Side) {
        match side {
            Side::Top => self.cursor.select_top(),
            Side::Bottom => self.cursor.select_bottom(),
        }
    }

    pub fn next_conflict(&mut self) -> bool {
        self.cursor.next_conflict(self.regions.len())
    }

    pub fn previous_conflict(&mut self) -> bool {
        self.cursor.previous_conflict()
    }

    /// Resolve the current region keeping the currently selected side.
    pub fn pick_selected(&mut self, store: &dyn FileStore) -> Result<PickOutcome> {
        self.pick(store, self.cursor.side.into())
    }

    /// Resolve the current region, write the file, and re-scan.
    ///
    /// The pre-resolve content is pushed onto the undo history first; if
    /// the resolve or the write fails, that snapshot is popped again and the
    /// session is left unchanged.
    pub fn pick(&mut self, store: &dyn FileStore, pick: Pick) -> Result<PickOutcome> {
        let Some(region) = self.current_region().copied() else {
            return Ok(PickOutcome::NoConflict);
        };

        self.history.push(self.content.clone());
        let written = conflict::resolve(&self.content, &region, pick)
            .map_err(anyhow::Error::from)
            .and_then(|resolved| store.write(&self.path, &resolved).map(|_| resolved));

        let resolved = match written {
            Ok(resolved) => resolved,
            Err(e) => {
                self.history.pop();
                return Err(e.context(format!("Failed to resolve conflict in {}", self.path.display())));
            }
        };

        log::info!(
            "Picked {} for conflict {} in {}",
            pick,
            self.cursor.index + 1,
            self.path.display()
        );
        self.replace_content(resolved);
        Ok(PickOutcome::Resolved {
            remaining: self.regions.len(),
        })
    }

    /// Restore the content from before the most recent pick.
    ///
    /// Returns `Ok(false)` when there is nothing to undo.
    pub fn undo(&mut self, store: &dyn FileStore) -> Result<bool> {
        let Some(previous) = self.history.pop() else {
            return Ok(false);
        };
        if let Err(e) = store.write(&self.path, &previous) {
            self.history.push(previous);
            return Err(e);
        }
        log::info!("Undid last pick in {}", self.path.display());
        self.replace_content(previous);
        Ok(true)
    }

    /// Re-read the file from disk, keeping the cursor where possible.
    pub fn reload(&mut self, store: &dyn FileStore) -> Result<()> {
        let content = store.read(&self.path)?;
        self.replace_content(content);
        Ok(())
    }

    /// Colorized lines for the merge view.
    pub fn render(&self, has_focus: bool) -> Vec<Line<'static>> {
        render::render(
            &self.content,
            &self.regions,
            self.cursor.index,
            self.cursor.side,
            has_focus,
        )
    }

    /// Scroll offset centring the current conflict in a view `height` rows tall.
    pub fn scroll_target(&self, height: u16) -> u16 {
        self.current_region()
            .map(|r| render::scroll_target(r, height))
            .unwrap_or(0)
    }

    fn replace_content(&mut self, content: String) {
        self.content = content;
        self.regions = conflict::scan(&self.content);
        self.cursor.clamp(self.regions.len());
    }
}
