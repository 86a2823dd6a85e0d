//! Format-preserving editing of Unreal `.ini` config files
//!
//! - [`document`]: the authoritative line buffer and its edits
//! - [`index`]: the derived, read-only section/key view
//! - [`store`]: path resolution under `Config/` and file I/O

pub mod document;
pub mod index;
pub mod store;

pub use document::{IniDocument, LineKind, SetOutcome};
pub use index::SectionIndex;
pub use store::ConfigStore;
