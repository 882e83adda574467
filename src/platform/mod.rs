//! Platform backends for the game's capabilities
//!
//! - Native: JSON file storage, log-only tone sink
//! - Web: LocalStorage, Web Audio oscillator beeps, Canvas 2D drawing

#[cfg(not(target_arch = "wasm32"))]
mod native;
#[cfg(not(target_arch = "wasm32"))]
pub use native::{FileStore, LogToneSink};

#[cfg(target_arch = "wasm32")]
mod web;
#[cfg(target_arch = "wasm32")]
pub use web::{CanvasSurface, LocalStorageStore, WebToneSink};
