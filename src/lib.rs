pub mod annotate;
pub mod config;
pub mod status;
pub mod table;

pub use annotate::{annotate, annotate_with_rng, augment, AnnotateSummary};
pub use config::Config;
pub use status::{StatusTally, StockStatus, STATUS_COLUMN};
pub use table::{read_table, write_table, Table};
