//! Sluice Domain Layer
//!
//! Value types shared by every Sluice crate: license metadata, dataset
//! flags, ingested records and the per-source context the gatekeeper
//! evaluates against. Nothing in here performs I/O or reads a clock.
//!
//! ## Key Concepts
//!
//! - **Record**: an ingested item, an arbitrary field-keyed JSON object
//! - **LicenseRecord**: validated license metadata attached to a source
//! - **CommercialStatus**: whether a license permits production display
//! - **DatasetFlags**: publisher-declared flags that drive quarantine
//! - **SourceContext**: everything the gate needs to know about a source
//!
//! ## Architecture
//!
//! - Pure data and validation only
//! - Infrastructure (fetching, storage) lives behind the traits in [`traits`]
//! - Policy decisions live in `sluice-gatekeeper`

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod batch;
pub mod commercial_status;
pub mod dataset;
pub mod error;
pub mod license;
pub mod record;
pub mod source;
pub mod traits;

// Re-exports for convenience
pub use batch::BatchId;
pub use commercial_status::CommercialStatus;
pub use dataset::DatasetFlags;
pub use error::DomainError;
pub use license::LicenseRecord;
pub use record::Record;
pub use source::{SourceContext, SourceScope};
