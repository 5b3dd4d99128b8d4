//! Report output

pub mod writer;

pub use writer::ReportWriter;
