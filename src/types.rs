use std::path::PathBuf;

/// One `<<<<<<<` / `=======` / `>>>>>>>` block, described by zero-based
/// line indices into the file it was scanned from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConflictRegion {
    /// Line of the `<<<<<<< HEAD` marker.
    pub start: usize,
    /// Line of the `=======` separator.
    pub middle: usize,
    /// Line of the `>>>>>>> <ref>` marker.
    pub end: usize,
}

impl ConflictRegion {
    pub fn new(start: usize, middle: usize, end: usize) -> Self {
        Self { start, middle, end }
    }

    /// Whether `index` is one of the three marker lines.
    pub fn is_marker(&self, index: usize) -> bool {
        index == self.start || index == self.middle || index == self.end
    }

    /// Whether `index` falls on the given side, bounding markers included.
    pub fn side_contains(&self, side: Side, index: usize) -> bool {
        match side {
            Side::Top => index >= self.start && index <= self.middle,
            Side::Bottom => index >= self.middle && index <= self.end,
        }
    }
}

/// Which half of a conflict region is selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Side {
    /// "Ours": the lines between `start` and `middle`.
    #[default]
    Top,
    /// "Theirs": the lines between `middle` and `end`.
    Bottom,
}

/// What to keep when resolving a region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pick {
    Top,
    Bottom,
    Both,
}

impl From<Side> for Pick {
    fn from(side: Side) -> Self {
        match side {
            Side::Top => Pick::Top,
            Side::Bottom => Pick::Bottom,
        }
    }
}

impl std::fmt::Display for Pick {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Pick::Top => write!(f, "top"),
            Pick::Bottom => write!(f, "bottom"),
            Pick::Both => write!(f, "both"),
        }
    }
}

/// A file that had merge conflicts when the file list was loaded.
#[derive(Debug, Clone)]
pub struct ConflictedFile {
    /// Path relative to the working directory.
    pub path: PathBuf,
    pub state: FileState,
}

impl ConflictedFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            state: FileState::Conflicted,
        }
    }
}

/// Resolution progress for a file in the list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileState {
    Conflicted,
    /// All markers removed but not staged (`--no-stage` or file mode).
    Resolved,
    Staged,
}

/// The current mode of the TUI application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppMode {
    Browsing,
    Help,
}

/// Which panel is focused in the TUI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusPanel {
    FileList,
    MergeView,
}
