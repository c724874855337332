/// Lookup of BLAST databases by name
use blastgate_core::config::DatabaseConfig;
use blastgate_core::{BlastgateError, BlastgateResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Component, Path, PathBuf};

/// Which kind of index marked the database as present
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IndexKind {
    Nucleotide,
    Protein,
}

/// A requested database that exists on disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedDatabase {
    /// Name as given in the request
    pub name: String,
    /// Path prefix BLAST expects for `-db`
    pub base_path: PathBuf,
    pub kind: IndexKind,
}

/// Trait for resolving database names to paths
pub trait DatabaseResolver: Send + Sync {
    /// Directory all database names are relative to
    fn base_path(&self) -> &Path;

    /// Find a single database, `None` when no index file is present
    fn locate(&self, name: &str) -> Option<ResolvedDatabase>;

    /// List the databases available in the base directory
    fn list_databases(&self) -> BlastgateResult<Vec<ResolvedDatabase>>;

    /// Check if a database exists
    fn exists(&self, name: &str) -> bool {
        self.locate(name).is_some()
    }

    /// Resolve every requested name, in request order
    ///
    /// Fails with `DatabaseNotFound` listing each missing name once.
    fn resolve(&self, names: &[String]) -> BlastgateResult<Vec<ResolvedDatabase>> {
        let mut resolved = Vec::with_capacity(names.len());
        let mut missing: Vec<String> = Vec::new();

        for name in names {
            match self.locate(name) {
                Some(db) => resolved.push(db),
                None => {
                    if !missing.contains(name) {
                        missing.push(name.clone());
                    }
                }
            }
        }

        if missing.is_empty() {
            Ok(resolved)
        } else {
            Err(BlastgateError::DatabaseNotFound(missing))
        }
    }
}

/// Resolver backed by index files in a directory
///
/// `<base>/<name>.<marker>` must exist for at least one configured marker.
/// Files are only inspected, never created or removed.
#[derive(Debug, Clone)]
pub struct FilesystemDatabaseResolver {
    base_path: PathBuf,
    nucleotide_markers: Vec<String>,
    protein_markers: Vec<String>,
}

impl FilesystemDatabaseResolver {
    pub fn new(base_path: PathBuf) -> Self {
        Self {
            base_path,
            nucleotide_markers: vec!["nin".to_string()],
            protein_markers: vec!["pin".to_string()],
        }
    }

    pub fn from_config(config: &DatabaseConfig) -> Self {
        Self::new(config.database_dir.clone())
            .with_markers(&config.nucleotide_markers, &config.protein_markers)
    }

    pub fn with_markers(mut self, nucleotide: &[String], protein: &[String]) -> Self {
        let clean = |markers: &[String]| -> Vec<String> {
            markers
                .iter()
                .map(|m| m.trim_start_matches('.').to_string())
                .filter(|m| !m.is_empty())
                .collect()
        };
        self.nucleotide_markers = clean(nucleotide);
        self.protein_markers = clean(protein);
        self
    }

    fn markers(&self) -> impl Iterator<Item = (&str, IndexKind)> {
        self.nucleotide_markers
            .iter()
            .map(|m| (m.as_str(), IndexKind::Nucleotide))
            .chain(
                self.protein_markers
                    .iter()
                    .map(|m| (m.as_str(), IndexKind::Protein)),
            )
    }

    /// Append `.marker` to a base path without replacing an existing extension
    fn index_file(base: &Path, marker: &str) -> PathBuf {
        let mut file = base.as_os_str().to_owned();
        file.push(".");
        file.push(marker);
        PathBuf::from(file)
    }
}

/// Names must stay inside the database directory
fn is_contained_name(name: &str) -> bool {
    !name.trim().is_empty()
        && Path::new(name)
            .components()
            .all(|c| matches!(c, Component::Normal(_)))
}

impl DatabaseResolver for FilesystemDatabaseResolver {
    fn base_path(&self) -> &Path {
        &self.base_path
    }

    fn locate(&self, name: &str) -> Option<ResolvedDatabase> {
        if !is_contained_name(name) {
            tracing::warn!("Rejected database name outside the database directory: {:?}", name);
            return None;
        }

        let base = self.base_path.join(name);
        self.markers()
            .find(|(marker, _)| Self::index_file(&base, marker).is_file())
            .map(|(_, kind)| ResolvedDatabase {
                name: name.to_string(),
                base_path: base.clone(),
                kind,
            })
    }

    fn list_databases(&self) -> BlastgateResult<Vec<ResolvedDatabase>> {
        let mut found: BTreeMap<String, IndexKind> = BTreeMap::new();
        if !self.base_path.is_dir() {
            return Ok(Vec::new());
        }

        for entry in fs::read_dir(&self.base_path)? {
            let path = entry?.path();
            let (Some(stem), Some(ext)) = (
                path.file_stem().and_then(|s| s.to_str()),
                path.extension().and_then(|e| e.to_str()),
            ) else {
                continue;
            };

            if let Some((_, kind)) = self.markers().find(|(marker, _)| *marker == ext) {
                found
                    .entry(stem.to_string())
                    .and_modify(|k| *k = (*k).min(kind))
                    .or_insert(kind);
            }
        }

        Ok(found
            .into_iter()
            .map(|(name, kind)| ResolvedDatabase {
                base_path: self.base_path.join(&name),
                name,
                kind,
            })
            .collect())
    }
}
