/// Last-in-first-out stack of full file contents captured before each
/// resolve, used to undo picks.
#[derive(Debug, Clone, Default)]
pub struct SnapshotStack {
    snapshots: Vec<String>,
}

impl SnapshotStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, content: impl Into<String>) {
        self.snapshots.push(content.into());
    }

    /// Remove and return the most recent snapshot. Returns `None` when empty.
    pub fn pop(&mut self) -> Option<String> {
        self.snapshots.pop()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn clear(&mut self) {
        self.snapshots.clear();
    }
}
