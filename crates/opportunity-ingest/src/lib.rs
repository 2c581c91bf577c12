//! # opportunity-ingest
//!
//! Loads candidate documents for the opportunity pipeline.
//!
//! Collection and preprocessing happen upstream. This crate only reads the
//! stored posts that were marked preprocessed and candidate, and hands them
//! over as [`Document`](opportunity_types::Document)s.
//!
//! ## Sources
//! - [`JsonlPostStore`]: JSON-lines file of stored posts
//! - [`InMemorySource`]: fixed document list for tests and embedding

pub mod error;
pub mod memory;
pub mod record;
pub mod source;
pub mod store;

pub use error::IngestError;
pub use memory::InMemorySource;
pub use record::PostRecord;
pub use source::DocumentSource;
pub use store::JsonlPostStore;
