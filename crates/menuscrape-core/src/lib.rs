//! Flattening, normalization, export, configuration, and the `get_menu` pipeline.

pub mod assemble;
pub mod config;
pub mod csv;
pub mod flatten;
pub mod normalize;
pub mod pipeline;
pub mod record;
pub mod sink;

pub use assemble::{Assembled, assemble};
pub use config::{Config, OutputConfig, SaveFormat};
pub use flatten::{Flattened, flatten};
pub use pipeline::{DefaultScraper, MenuOutcome, MenuScraper, ScrapeError, Stage, get_menu};
pub use record::{COLUMNS, MenuRecord, Price};
pub use sink::{CsvFileSink, JsonFileSink, MenuSink, SinkError};
