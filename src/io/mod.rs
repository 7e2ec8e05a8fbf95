pub mod clipboard;
pub mod export;
pub mod import;

pub use clipboard::{ClipboardError, ClipboardSink};
pub use export::{ExportDocument, export_items_csv, export_json, serialize};
pub use import::{ImportError, ImportSummary, import_text, parse, read_import_file, validate_and_merge};
