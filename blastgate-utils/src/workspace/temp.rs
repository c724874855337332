/// Per-request scratch directories
///
/// Every search writes its query (and optionally its report) into a
/// directory owned by exactly one request. The directory is removed when the
/// `RequestWorkspace` is dropped, whichever way the request ends.
use blastgate_core::{BlastgateError, BlastgateResult};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use uuid::Uuid;

const QUERY_FILE: &str = "query.fa";
const REPORT_FILE: &str = "report.html";

/// Scratch directory owned by a single search
#[derive(Debug)]
pub struct RequestWorkspace {
    id: String,
    root: PathBuf,
}

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

impl RequestWorkspace {
    /// Create `<parent>/<timestamp>_<uuid>`
    pub fn create(parent: &Path) -> BlastgateResult<Self> {
        fs::create_dir_all(parent).map_err(|e| {
            BlastgateError::Workspace(format!(
                "Failed to create workspace root {}: {}",
                parent.display(),
                e
            ))
        })?;

        let id = format!("{}_{}", unix_now(), Uuid::new_v4());
        let root = parent.join(&id);
        fs::create_dir(&root).map_err(|e| {
            BlastgateError::Workspace(format!(
                "Failed to create workspace {}: {}",
                root.display(),
                e
            ))
        })?;

        tracing::debug!("Created workspace {}", root.display());
        Ok(Self { id, root })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn query_path(&self) -> PathBuf {
        self.root.join(QUERY_FILE)
    }

    pub fn report_path(&self) -> PathBuf {
        self.root.join(REPORT_FILE)
    }

    /// Write the query FASTA and return its path
    pub fn write_query(&self, fasta: &str) -> BlastgateResult<PathBuf> {
        let path = self.query_path();
        let mut contents = String::with_capacity(fasta.len() + 1);
        contents.push_str(fasta);
        if !contents.ends_with('\n') {
            contents.push('\n');
        }
        fs::write(&path, contents).map_err(|e| {
            BlastgateError::Workspace(format!("Failed to write {}: {}", path.display(), e))
        })?;
        Ok(path)
    }

    fn remove(&self) -> io::Result<()> {
        match fs::remove_dir_all(&self.root) {
            Err(e) if e.kind() != io::ErrorKind::NotFound => Err(e),
            _ => Ok(()),
        }
    }
}

impl Drop for RequestWorkspace {
    fn drop(&mut self) {
        // Attempt cleanup, but don't panic on failure
        match self.remove() {
            Ok(()) => tracing::debug!("Removed workspace {}", self.root.display()),
            Err(e) => tracing::warn!("Failed to remove workspace {}: {}", self.root.display(), e),
        }
    }
}

/// Remove workspaces older than `max_age` left behind by a previous process
///
/// Only directories named `<timestamp>_<...>` are considered. Returns the
/// number of directories removed.
pub fn purge_stale_workspaces(parent: &Path, max_age: Duration) -> BlastgateResult<usize> {
    if !parent.is_dir() {
        return Ok(0);
    }

    let now = unix_now();
    let mut removed = 0;

    for entry in fs::read_dir(parent)? {
        let path = entry?.path();
        if !path.is_dir() {
            continue;
        }

        let timestamp = path
            .file_name()
            .and_then(|n| n.to_str())
            .and_then(|name| name.split('_').next())
            .and_then(|ts| ts.parse::<u64>().ok());

        if let Some(created) = timestamp {
            if now.saturating_sub(created) > max_age.as_secs() {
                match fs::remove_dir_all(&path) {
                    Ok(()) => removed += 1,
                    Err(e) => tracing::warn!("Failed to purge {}: {}", path.display(), e),
                }
            }
        }
    }

    if removed > 0 {
        tracing::info!("Purged {} stale workspace(s) from {}", removed, parent.display());
    }
    Ok(removed)
}
