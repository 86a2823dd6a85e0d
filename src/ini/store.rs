//! File-backed access to a project's `Config/*.ini` files

use crate::error::{Error, Result};
use crate::ini::document::{IniDocument, SetOutcome};
use crate::ini::index::SectionIndex;
use std::collections::BTreeMap;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

const CONFIG_DIR: &str = "Config";
const INI_EXTENSION: &str = ".ini";

/// Reads and edits the `.ini` files under `<project root>/Config/`.
///
/// Files are addressed by stem (`DefaultEngine`, `DefaultGame`, ...). Reads
/// parse the file into a fresh [`SectionIndex`]; writes edit the raw
/// [`IniDocument`] and replace the whole file.
///
/// There is no locking: two processes running `set` on the same file race,
/// and the last one to write wins.
///
/// # Examples
///
/// ```
/// use unreal_headless::ini::ConfigStore;
/// use tempfile::TempDir;
///
/// # fn main() -> unreal_headless::error::Result<()> {
/// let project = TempDir::new().unwrap();
/// let store = ConfigStore::new(project.path())?;
///
/// store.set("DefaultEngine", "Pelorus.BaseMap", "DemGridSize", "4096")?;
/// assert_eq!(store.get("DefaultEngine", "Pelorus.BaseMap", "DemGridSize")?, "4096");
/// assert_eq!(store.list_sections("DefaultEngine")?, vec!["Pelorus.BaseMap"]);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ConfigStore {
    root: PathBuf,
}

impl ConfigStore {
    /// Create a store for the project rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        if root.as_os_str().is_empty() {
            return Err(Error::Config(
                "no project root configured; set UE_PROJECT or run inside a project".to_string(),
            ));
        }
        Ok(ConfigStore { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory holding the project's `.ini` files.
    pub fn config_dir(&self) -> PathBuf {
        self.root.join(CONFIG_DIR)
    }

    /// Resolve a file stem to its path under `Config/`.
    ///
    /// A trailing `.ini` is accepted and stripped. Stems with `..` or a path
    /// separator are rejected outright, and the resolved absolute path must
    /// still be inside the absolute `Config/` directory.
    pub fn resolve(&self, file: &str) -> Result<PathBuf> {
        let stem = file.strip_suffix(INI_EXTENSION).unwrap_or(file);
        if stem.is_empty() {
            return Err(Error::InvalidArgument("file is required".to_string()));
        }
        if stem.contains("..") || stem.contains('/') || stem.contains('\\') {
            tracing::warn!(file, "rejected config file name");
            return Err(Error::InvalidArgument(format!(
                "invalid file name {:?}; use just the file name without path separators (e.g. DefaultEngine)",
                stem
            )));
        }

        let config_dir = self.config_dir();
        let path = config_dir.join(format!("{}{}", stem, INI_EXTENSION));

        let abs_path = std::path::absolute(&path)?;
        let abs_config_dir = std::path::absolute(&config_dir)?;
        if !abs_path.starts_with(&abs_config_dir) {
            tracing::warn!(file, path = %abs_path.display(), "config path escapes Config/");
            return Err(Error::PathTraversal(format!(
                "{} is outside {}",
                stem,
                abs_config_dir.display()
            )));
        }

        Ok(path)
    }

    /// All section names in the file, sorted.
    pub fn list_sections(&self, file: &str) -> Result<Vec<String>> {
        let (_, index) = self.read_index(file)?;
        Ok(index.section_names())
    }

    /// Every key of one section with its (last) value.
    pub fn list_section(&self, file: &str, section: &str) -> Result<BTreeMap<String, String>> {
        require("section", section)?;
        let (path, index) = self.read_index(file)?;
        index
            .section(section)
            .cloned()
            .ok_or_else(|| section_not_found(section, &path))
    }

    /// Read one value.
    pub fn get(&self, file: &str, section: &str, key: &str) -> Result<String> {
        require("section", section)?;
        require("key", key)?;
        let (path, index) = self.read_index(file)?;
        let keys = index
            .section(section)
            .ok_or_else(|| section_not_found(section, &path))?;
        keys.get(key).cloned().ok_or_else(|| Error::KeyNotFound {
            key: key.to_string(),
            section: section.to_string(),
        })
    }

    /// Write one value, creating the file and section when needed.
    pub fn set(&self, file: &str, section: &str, key: &str, value: &str) -> Result<SetOutcome> {
        require("section", section)?;
        require("key", key)?;
        if key.contains('=') {
            return Err(Error::InvalidArgument(format!(
                "key {:?} must not contain '='",
                key
            )));
        }
        for (name, arg) in [("section", section), ("key", key), ("value", value)] {
            if arg.contains(['\n', '\r']) {
                return Err(Error::InvalidArgument(format!(
                    "{} must be a single line",
                    name
                )));
            }
        }

        let path = self.resolve(file)?;
        let mut doc = match read_document(&path) {
            Ok(doc) => doc,
            Err(Error::FileNotFound(_)) => IniDocument::default(),
            Err(e) => return Err(e),
        };

        let outcome = doc.set(section, key, value);
        write_document(&path, &doc)?;
        tracing::info!(
            path = %path.display(),
            section,
            key,
            ?outcome,
            "config value set"
        );
        Ok(outcome)
    }

    /// Remove one key. A key that is not there is an error, and the file is
    /// left untouched.
    pub fn delete(&self, file: &str, section: &str, key: &str) -> Result<()> {
        require("section", section)?;
        require("key", key)?;
        let path = self.resolve(file)?;
        let mut doc = read_document(&path)?;

        if !doc.delete(section, key) {
            return Err(Error::KeyNotFound {
                key: key.to_string(),
                section: section.to_string(),
            });
        }

        write_document(&path, &doc)?;
        tracing::info!(path = %path.display(), section, key, "config value deleted");
        Ok(())
    }

    fn read_index(&self, file: &str) -> Result<(PathBuf, SectionIndex)> {
        let path = self.resolve(file)?;
        let index = read_document(&path)?.index();
        tracing::debug!(path = %path.display(), sections = index.len(), "read config index");
        Ok((path, index))
    }
}

fn require(name: &str, value: &str) -> Result<()> {
    if value.is_empty() {
        return Err(Error::InvalidArgument(format!("{} is required", name)));
    }
    Ok(())
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn section_not_found(section: &str, path: &Path) -> Error {
    Error::SectionNotFound {
        section: section.to_string(),
        file: file_name(path),
    }
}

/// Load an `.ini` file into a line buffer. The bytes are taken as they are;
/// no encoding is assumed.
pub fn read_document(path: &Path) -> Result<IniDocument> {
    match fs::read(path) {
        Ok(content) => Ok(IniDocument::parse(&content)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Err(Error::FileNotFound(path.to_path_buf())),
        Err(e) => Err(Error::Io(io::Error::new(
            e.kind(),
            format!("reading {}: {}", path.display(), e),
        ))),
    }
}

/// Replace `path` with the rendered document.
///
/// The content goes to a temporary file next to the target which is then
/// renamed over it, so the file is never seen half written. An existing
/// file keeps its permissions, and a symlink is followed so the link itself
/// survives. Missing parent directories are created.
pub fn write_document(path: &Path, doc: &IniDocument) -> Result<()> {
    let target = match fs::symlink_metadata(path) {
        Ok(meta) if meta.file_type().is_symlink() => fs::canonicalize(path)?,
        _ => path.to_path_buf(),
    };
    let dir = match target.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir)?;

    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(&doc.to_bytes())?;
    tmp.flush()?;
    match fs::metadata(&target) {
        Ok(meta) => fs::set_permissions(tmp.path(), meta.permissions())?,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => return Err(e.into()),
    }
    tmp.persist(&target).map_err(|e| Error::Persist {
        path: target.clone(),
        source: e.error,
    })?;
    Ok(())
}
