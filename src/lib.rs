//! unreal-headless - headless helpers for Unreal Engine projects
//!
//! Turns the raw text produced by Unreal build and automation tools into
//! structured results, and edits a project's `Config/*.ini` files without
//! disturbing their layout.
//!
//! # Architecture
//!
//! - [`diagnostics`]: Compiler error/warning extraction from build output
//! - [`automation`]: Automation test results and test catalogs from engine logs
//! - [`ini`]: Line-preserving `.ini` editing and the per-project config store
//! - [`logview`]: Filtered, paged views of engine log files
//! - [`config`]: Project discovery and tool settings
//! - [`commands`]: User-facing commands behind the `ue-headless` binary
//! - [`ui`]: Output abstraction used by the commands
//! - [`error`]: Error types and Result alias
//!
//! # Example
//!
//! ```no_run
//! use unreal_headless::ini::ConfigStore;
//!
//! # fn main() -> unreal_headless::Result<()> {
//! let store = ConfigStore::new("/projects/Pelorus")?;
//! store.set("DefaultGame", "Pelorus.UI", "DistanceUnit", "NM")?;
//! assert_eq!(store.get("DefaultGame", "Pelorus.UI", "DistanceUnit")?, "NM");
//! # Ok(())
//! # }
//! ```

pub mod automation;
pub mod commands;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod ini;
pub mod logging;
pub mod logview;
pub mod ui;

pub use error::{Error, Result};
