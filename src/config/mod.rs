//! Configuration: path resolution and user settings.

pub mod paths;
pub mod settings;

pub use paths::ConfigPaths;
pub use settings::{ClipboardSettings, Settings};
