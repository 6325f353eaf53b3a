#![deny(missing_docs)]
#![doc = "Shared error, work-range and provenance types for the simplex extremum search."]

pub mod errors;
pub mod provenance;
pub mod range;

pub use errors::{ErrorInfo, SxeError};
pub use provenance::{RunProvenance, SchemaVersion};
pub use range::WorkRange;
