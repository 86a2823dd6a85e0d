//! Utility functions for command implementation

use crate::error::{Error, Result};
use crate::ui::UI;
use serde::Serialize;
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

/// Where a command reads tool output from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    /// Standard input (also selected by the path `-`).
    Stdin,
    File(PathBuf),
    /// Text already in memory.
    Text(String),
}

impl Input {
    /// Input from an optional path argument; no path or `-` means stdin.
    pub fn from_arg(path: Option<&str>) -> Self {
        match path {
            None | Some("-") => Input::Stdin,
            Some(p) => Input::File(PathBuf::from(p)),
        }
    }

    /// Read the whole input. Invalid UTF-8 is replaced rather than rejected,
    /// since tool output is not guaranteed to be clean.
    pub fn read(&self) -> Result<String> {
        let bytes = match self {
            Input::Text(text) => return Ok(text.clone()),
            Input::Stdin => {
                let mut buf = Vec::new();
                io::stdin().read_to_end(&mut buf)?;
                buf
            }
            Input::File(path) => read_file(path)?,
        };
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}

fn read_file(path: &Path) -> Result<Vec<u8>> {
    fs::read(path).map_err(|e| {
        if e.kind() == io::ErrorKind::NotFound {
            Error::FileNotFound(path.to_path_buf())
        } else {
            Error::Io(e)
        }
    })
}

/// The project root, or a configuration error if none was found.
pub fn require_project(project: Option<&Path>) -> Result<&Path> {
    project.ok_or_else(|| {
        Error::Config(
            "no Unreal project root detected; pass --project or set UE_PROJECT".to_string(),
        )
    })
}

/// Write a value to the UI as pretty-printed JSON.
pub fn output_json<T: Serialize>(ui: &mut dyn UI, value: &T) -> Result<()> {
    ui.output(&serde_json::to_string_pretty(value)?)
}
