//! Domain models and types for ifcbatch.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **Work units** ([`UnitDescriptor`], [`WorkItem`]) and per-target outcomes ([`ExportResult`])
//! - **Extracted records** ([`IfcRecord`], [`RecordSet`]) and view/schedule record sets
//! - **Error types** ([`IfcBatchError`], [`HostError`])
//! - **Result type alias** ([`Result`])
//!
//! # Error Handling
//!
//! All fallible operations return [`Result<T, IfcBatchError>`]:
//!
//! ```rust,no_run
//! use ifcbatch::domain::Result;
//!
//! fn example() -> Result<()> {
//!     let config = ifcbatch::config::load_config("ifcbatch.toml")?;
//!     println!("{}", config.export.profile);
//!     Ok(())
//! }
//! ```

pub mod context;
pub mod errors;
pub mod record;
pub mod result;
pub mod view;
pub mod work;

// Re-export commonly used types for convenience
pub use errors::{HostError, IfcBatchError};
pub use record::{IfcRecord, RecordSet};
pub use result::Result;
pub use view::{
    CategoryElements, ElementLocation, ElementRecord, ParameterValue, Point3, ScheduleField,
    ScheduleRecord, ScheduleRow, ViewRecord,
};
pub use work::{ExportOutcome, ExportResult, UnitDescriptor, WorkItem};
