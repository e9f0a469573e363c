//! Output format modules for reposcraper
//!
//! Formatters write to any `std::io::Write`; path-based helpers create the
//! target directories first.

pub mod json_writer;

pub use json_writer::{
    record_to_json, save_all, save_record, save_records, to_aggregated_json, write_aggregated, write_record,
    write_records, AggregatedDocument, AggregatedEntry,
};
