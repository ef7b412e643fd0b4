//! Data models for release exports.
//!
//! - [`ReleaseConfig`]: the settings aggregate for one release (filters, explicit
//!   assets, extern files and directories, output options)
//! - [`AssetRef`]: an engine content asset identified by package path and object name
//! - [`ExternFileRef`] / [`ExternDirRef`]: non-asset payload bundled verbatim
//! - [`PakEntry`]: one split pak-list line, the raw input to asset and extern file refs
//!
//! All persisted types derive `Serialize`/`Deserialize` for YAML settings files.

pub mod asset;
pub mod extern_file;
pub mod release;

pub use asset::{AssetRef, DependencyKind, PakEntry};
pub use extern_file::{ExternDirRef, ExternFileRef};
pub use release::{ReleaseConfig, ReleaseField};
