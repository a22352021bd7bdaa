use anyhow::{Result, bail};
use clap::Parser;
use std::path::{Path, PathBuf};

use mergepick::types::{ConflictedFile, FileState};

#[derive(Parser, Debug)]
#[command(
    name = "mergepick",
    about = "Interactive TUI for resolving git merge conflicts hunk by hunk"
)]
pub struct Cli {
    /// Resolve these files directly instead of asking git for conflicted files
    #[arg(value_name = "PATH")]
    paths: Vec<PathBuf>,

    /// Don't stage files once all their conflicts are resolved
    #[arg(long)]
    no_stage: bool,

    /// Only show files matching this glob pattern
    #[arg(long, value_name = "GLOB")]
    files: Option<String>,

    /// Color theme: dark, light, or auto
    #[arg(long, default_value = "auto")]
    theme: String,

    /// Append log output to this file
    #[arg(long, value_name = "FILE")]
    log_file: Option<PathBuf>,

    /// Log at debug level
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    mergepick::logging::init(cli.log_file.as_deref(), cli.verbose)?;
    mergepick::ui::theme::init(&cli.theme);

    if cli.paths.is_empty() {
        run_git_mode(&cli)
    } else {
        run_file_mode(&cli)
    }
}

/// Resolve the files git reports as conflicted, staging each when done.
fn run_git_mode(cli: &Cli) -> Result<()> {
    let repo = mergepick::git::open_repo(".")?;
    let workdir = mergepick::git::workdir(&repo)?;
    let files = mergepick::git::conflicted_files(&repo)?;
    log::info!("Found {} conflicted files in {}", files.len(), workdir.display());

    run_pipeline(files, workdir, Some(&repo), cli.no_stage, cli)
}

/// Resolve the files named on the command line. Nothing is staged.
fn run_file_mode(cli: &Cli) -> Result<()> {
    let cwd = std::env::current_dir()?;
    let mut files = Vec::new();
    for path in &cli.paths {
        if !path.is_file() {
            bail!("File does not exist: {}", path.display());
        }
        let rel = path.strip_prefix(&cwd).unwrap_or(path);
        files.push(ConflictedFile::new(rel));
    }

    run_pipeline(files, cwd, None, true, cli)
}

/// Shared pipeline: filter files, run TUI, print a summary.
fn run_pipeline(
    mut files: Vec<ConflictedFile>,
    workdir: PathBuf,
    repo: Option<&git2::Repository>,
    no_stage: bool,
    cli: &Cli,
) -> Result<()> {
    if let Some(ref glob_pattern) = cli.files {
        match glob::Pattern::new(glob_pattern) {
            Ok(pattern) => {
                files.retain(|f| pattern.matches_path(&f.path));
            }
            Err(e) => {
                eprintln!("Warning: invalid glob pattern '{}': {}", glob_pattern, e);
            }
        }
    }

    if files.is_empty() {
        println!("No merge conflicts to resolve.");
        return Ok(());
    }

    let files = mergepick::app::run(files, workdir, repo, no_stage)?;
    print_summary(&files);
    Ok(())
}

fn print_summary(files: &[ConflictedFile]) {
    let done: Vec<&Path> = files
        .iter()
        .filter(|f| f.state != FileState::Conflicted)
        .map(|f| f.path.as_path())
        .collect();
    println!("Resolved {} of {} conflicted files.", done.len(), files.len());
    for path in done {
        println!("  {}", path.display());
    }
}
