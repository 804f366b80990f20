// Playlist export pipeline: probe -> fetch + parse -> CSV

pub mod dates;
pub mod diagnostics;
pub mod errors;
pub mod export;
pub mod fetcher;
pub mod models;
pub mod parser;
pub mod tools;
pub mod traits;

#[cfg(all(test, unix))]
pub(crate) mod test_support;

pub use errors::ExportError;
pub use export::{write_entries, FIELDNAMES};
pub use fetcher::{collect_entries, FetchReport, PlaylistFetcher};
pub use models::VideoEntry;
pub use parser::parse_entry;
pub use tools::ToolProbe;
pub use traits::{LineSource, ReaderLines};
