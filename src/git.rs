use anyhow::{Context, Result};
use git2::{Repository, ResetType, StatusOptions};
use std::path::{Path, PathBuf};

use crate::types::ConflictedFile;

/// Open a git repository at the given path.
pub fn open_repo(path: impl AsRef<Path>) -> Result<Repository> {
    Repository::discover(path.as_ref())
        .context("Failed to open git repository. Are you in a git repo?")
}

/// Working directory of a non-bare repository.
pub fn workdir(repo: &Repository) -> Result<PathBuf> {
    repo.workdir()
        .map(Path::to_path_buf)
        .context("Bare repositories are not supported")
}

/// List files with unresolved merge conflicts, sorted by path.
pub fn conflicted_files(repo: &Repository) -> Result<Vec<ConflictedFile>> {
    let mut opts = StatusOptions::new();
    opts.include_untracked(false).include_ignored(false);

    let statuses = repo
        .statuses(Some(&mut opts))
        .context("Failed to get repo status")?;

    let mut paths: Vec<String> = statuses
        .iter()
        .filter(|e| e.status().is_conflicted())
        .filter_map(|e| e.path().map(String::from))
        .collect();
    paths.sort();
    paths.dedup();

    Ok(paths.into_iter().map(ConflictedFile::new).collect())
}

/// Stage a resolved file (`git add <path>`), which also clears its
/// conflict entries from the index.
pub fn stage_file(repo: &Repository, path: &Path) -> Result<()> {
    let mut index = repo.index().context("Failed to open index")?;
    index
        .add_path(path)
        .with_context(|| format!("Failed to stage {}", path.display()))?;
    index.write().context("Failed to write index")?;
    log::info!("Staged {}", path.display());
    Ok(())
}

/// Abort an in-progress merge: reset index and working tree to `HEAD` and
/// clear the merge state files.
pub fn abort_merge(repo: &Repository) -> Result<()> {
    let head = repo
        .head()
        .context("Failed to resolve HEAD")?
        .peel_to_commit()
        .context("HEAD does not point at a commit")?;
    repo.reset(head.as_object(), ResetType::Hard, None)
        .context("Failed to reset to HEAD")?;
    repo.cleanup_state()
        .context("Failed to clear merge state")?;
    log::info!("Aborted merge, reset to {}", head.id());
    Ok(())
}
