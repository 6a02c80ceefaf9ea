//! sq-core: unit registry for simulation catalog data.
//!
//! Contains:
//! - scheme (output unit schemes and their base scales)
//! - dims (declarative code-unit descriptions)
//! - catalog (field tables for particle, halo and subhalo data)
//! - cosmology (scale-factor resolution per snapshot)
//! - table (ready-to-use conversion tables)
//! - numeric / error (shared float helpers and error types)
//!
//! No I/O happens here; the data-access crate layers on top.

pub mod catalog;
pub mod constants;
pub mod cosmology;
pub mod dims;
pub mod error;
pub mod numeric;
pub mod scheme;
pub mod table;

// Re-exports: nice ergonomics for downstream crates
pub use catalog::{CatalogKind, FieldEntry};
pub use cosmology::{CosmoContext, MAX_SNAPSHOT_SKIP, RedshiftTable, ResolvedSnapshot};
pub use dims::CodeUnit;
pub use error::{CoreError, CoreResult};
pub use numeric::*;
pub use scheme::{BaseScales, UnitScheme};
pub use table::ConversionTable;
