//! Time entry extraction from OCR text.

pub mod assembler;
pub mod cascade;
pub mod classifier;
pub mod demo;
pub mod normalizer;
mod parser;
pub mod rules;
pub mod table;

pub use assembler::{DiscardReason, DiscardedRecord};
pub use classifier::classify;
pub use demo::{demo_entry, DemoReason};
pub use normalizer::{normalize_line, normalize_text};
pub use parser::{ParseReport, TimesheetParser};
