#![allow(dead_code)]

use git2::build::CheckoutBuilder;
use git2::{Repository, Signature};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// Create a temporary git repository with an initial commit.
pub fn create_temp_repo() -> (TempDir, Repository) {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let repo = Repository::init(dir.path()).expect("Failed to init repo");

    // Create initial commit so HEAD exists
    {
        let mut index = repo.index().unwrap();
        let tree_oid = index.write_tree().unwrap();
        let tree = repo.find_tree(tree_oid).unwrap();
        let sig = Signature::now("Test", "test@test.com").unwrap();
        repo.commit(Some("HEAD"), &sig, &sig, "Initial commit", &tree, &[])
            .unwrap();
    }

    (dir, repo)
}

/// Add and commit a file to the repository.
pub fn commit_file(repo: &Repository, path: &str, content: &str) {
    let workdir = repo.workdir().expect("Not a bare repo");
    let full_path = workdir.join(path);

    if let Some(parent) = full_path.parent() {
        fs::create_dir_all(parent).unwrap();
    }

    fs::write(&full_path, content).unwrap();

    let mut index = repo.index().unwrap();
    index.add_path(Path::new(path)).unwrap();
    index.write().unwrap();

    let tree_oid = index.write_tree().unwrap();
    let tree = repo.find_tree(tree_oid).unwrap();
    let sig = Signature::now("Test", "test@test.com").unwrap();

    let parent_commit = repo.head().unwrap().peel_to_commit().unwrap();

    repo.commit(
        Some("HEAD"),
        &sig,
        &sig,
        &format!("Update {}", path),
        &tree,
        &[&parent_commit],
    )
    .unwrap();
}

/// Put `repo` into a conflicted merge on a top-level file `path`.
///
/// `base` is committed first. A `feature` branch then changes it to
/// `theirs` while the current branch changes it to `ours`, and `feature`
/// is merged in. Conflict markers are labelled `HEAD` and `feature`.
pub fn create_merge_conflict(repo: &Repository, path: &str, base: &str, ours: &str, theirs: &str) {
    commit_file(repo, path, base);
    let base_commit = repo.head().unwrap().peel_to_commit().unwrap();

    // Commit `theirs` on the feature branch without checking it out
    let sig = Signature::now("Test", "test@test.com").unwrap();
    let blob = repo.blob(theirs.as_bytes()).unwrap();
    let base_tree = base_commit.tree().unwrap();
    let mut builder = repo.treebuilder(Some(&base_tree)).unwrap();
    builder.insert(path, blob, 0o100644).unwrap();
    let tree = repo.find_tree(builder.write().unwrap()).unwrap();
    repo.commit(
        Some("refs/heads/feature"),
        &sig,
        &sig,
        "Change on feature",
        &tree,
        &[&base_commit],
    )
    .unwrap();

    commit_file(repo, path, ours);

    let feature = repo.find_reference("refs/heads/feature").unwrap();
    let annotated = repo.reference_to_annotated_commit(&feature).unwrap();
    let mut checkout = CheckoutBuilder::new();
    checkout
        .allow_conflicts(true)
        .conflict_style_merge(true)
        .our_label("HEAD")
        .their_label("feature");
    repo.merge(&[&annotated], None, Some(&mut checkout)).unwrap();
}

/// Read a file from the working directory.
pub fn read_file(repo: &Repository, path: &str) -> String {
    let workdir = repo.workdir().expect("Not a bare repo");
    fs::read_to_string(workdir.join(path)).unwrap()
}

/// Write a file in a plain directory.
pub fn write_file(dir: &Path, name: &str, content: &str) {
    fs::write(dir.join(name), content).unwrap();
}
