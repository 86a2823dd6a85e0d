//! Settings for locating the Unreal project
//!
//! Values come from, in order of precedence:
//!
//! 1. Environment variables (`UE_PROJECT`, `UE_HEADLESS_LOG_LEVEL`)
//! 2. A `.ue-headless.conf` file in the working directory, INI format with a
//!    `[DEFAULT]` section (`project=`, `log_level=`)
//! 3. Discovery: walk up from the working directory to the first directory
//!    containing a `.uproject` file

use crate::error::{Error, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Name of the optional settings file.
pub const SETTINGS_FILE: &str = ".ue-headless.conf";

/// Environment variable naming the project directory or `.uproject` file.
pub const PROJECT_ENV: &str = "UE_PROJECT";

/// Environment variable with the tracing level.
pub const LOG_LEVEL_ENV: &str = "UE_HEADLESS_LOG_LEVEL";

const DEFAULT_LOG_LEVEL: &str = "warn";

/// Contents of `.ue-headless.conf`.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct SettingsFile {
    /// Project directory or `.uproject` path, relative to the settings file.
    pub project: Option<String>,

    /// Tracing level: error, warn, info, debug or trace.
    pub log_level: Option<String>,
}

impl SettingsFile {
    /// Load settings from a file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Failed to read {}: {}", SETTINGS_FILE, e)))?;

        Self::parse(&contents)
    }

    /// Parse settings from a string
    pub fn parse(contents: &str) -> Result<Self> {
        let ini: HashMap<String, HashMap<String, String>> = serde_ini::from_str(contents)
            .map_err(|e| Error::Config(format!("Failed to parse {}: {}", SETTINGS_FILE, e)))?;

        let Some(default) = ini.get("DEFAULT") else {
            return Err(Error::Config(format!(
                "No [DEFAULT] section in {}",
                SETTINGS_FILE
            )));
        };

        let non_empty = |key: &str| default.get(key).filter(|v| !v.is_empty()).cloned();
        let settings = SettingsFile {
            project: non_empty("project"),
            log_level: non_empty("log_level"),
        };

        if let Some(level) = &settings.log_level {
            normalize_log_level(level)?;
        }

        Ok(settings)
    }
}

/// Resolved runtime settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Project root (the directory holding the `.uproject`), if known.
    pub project_root: Option<PathBuf>,

    /// The `.uproject` file itself, if one was found.
    pub uproject_file: Option<PathBuf>,

    /// Normalized tracing level.
    pub log_level: String,
}

impl Settings {
    /// Load settings from the process environment and working directory.
    pub fn load() -> Result<Self> {
        let cwd = env::current_dir()?;
        Self::from_sources(|key| env::var(key).ok(), &cwd)
    }

    /// Load settings with an explicit environment lookup and working
    /// directory.
    pub fn from_sources<F>(env_var: F, cwd: &Path) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let file_path = cwd.join(SETTINGS_FILE);
        let file = if file_path.is_file() {
            SettingsFile::load_from_file(&file_path)?
        } else {
            SettingsFile::default()
        };

        let env_nonempty = |key: &str| env_var(key).filter(|v| !v.is_empty());

        let project = env_nonempty(PROJECT_ENV)
            .map(PathBuf::from)
            .or_else(|| file.project.as_deref().map(|p| cwd.join(p)));

        let (project_root, uproject_file) = match project {
            Some(project) => from_project_setting(&project),
            None => {
                let (root, uproject) = detect_project_root(cwd);
                (Some(root), uproject)
            }
        };

        let log_level = match env_nonempty(LOG_LEVEL_ENV).or(file.log_level) {
            Some(level) => normalize_log_level(&level)?,
            None => DEFAULT_LOG_LEVEL.to_string(),
        };

        Ok(Settings {
            project_root,
            uproject_file,
            log_level,
        })
    }

    /// Settings for an explicitly given project directory.
    pub fn for_project(project: &Path) -> Self {
        let (project_root, uproject_file) = from_project_setting(project);
        Settings {
            project_root,
            uproject_file,
            log_level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }

    /// Settings for a project named on the command line.
    ///
    /// The settings file is not read. The log level still comes from
    /// `UE_HEADLESS_LOG_LEVEL`; an unknown level falls back to the default
    /// instead of failing, since it only affects diagnostics.
    pub fn for_project_with_env<F>(project: &Path, env_var: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut settings = Self::for_project(project);
        if let Some(level) = env_var(LOG_LEVEL_ENV).and_then(|l| normalize_log_level(&l).ok()) {
            settings.log_level = level;
        }
        settings
    }

    /// The project root, or a configuration error when none is known.
    pub fn project_root(&self) -> Result<&Path> {
        self.project_root.as_deref().ok_or_else(|| {
            Error::Config(format!(
                "no Unreal project root detected; set {} or run inside a project",
                PROJECT_ENV
            ))
        })
    }
}

/// Interpret a configured project path, which may name a `.uproject` file or
/// the project directory.
fn from_project_setting(project: &Path) -> (Option<PathBuf>, Option<PathBuf>) {
    if project.extension().is_some_and(|ext| ext == "uproject") {
        let root = project.parent().map(Path::to_path_buf);
        let uproject = project.is_file().then(|| project.to_path_buf());
        (root, uproject)
    } else {
        (Some(project.to_path_buf()), find_uproject_file(project))
    }
}

/// Walk up from `start` to the first directory holding a `.uproject` file.
///
/// Falls back to `start` itself (with no `.uproject`) when the filesystem
/// root is reached without finding one.
pub fn detect_project_root(start: &Path) -> (PathBuf, Option<PathBuf>) {
    for dir in start.ancestors() {
        if let Some(uproject) = find_uproject_file(dir) {
            return (dir.to_path_buf(), Some(uproject));
        }
    }
    (start.to_path_buf(), None)
}

/// First `.uproject` file directly inside `dir`, by name.
pub fn find_uproject_file(dir: &Path) -> Option<PathBuf> {
    let entries = fs::read_dir(dir).ok()?;
    let mut found: Vec<PathBuf> = entries
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().map(|t| t.is_file()).unwrap_or(false))
        .map(|e| e.path())
        .filter(|p| p.extension().is_some_and(|ext| ext == "uproject"))
        .collect();
    found.sort();
    found.into_iter().next()
}

fn normalize_log_level(level: &str) -> Result<String> {
    let normalized = match level.to_ascii_lowercase().as_str() {
        "trace" => "trace",
        "debug" => "debug",
        "info" => "info",
        "warn" | "warning" => "warn",
        "error" => "error",
        other => {
            return Err(Error::Config(format!("unknown log level {:?}", other)));
        }
    };
    Ok(normalized.to_string())
}
