//! HTTP client for simulation data services.
//!
//! Everything network- and file-shaped lives in this crate:
//!
//! - `config`: endpoint and credential handling
//! - `transport`: the HTTP seam, with a blocking implementation
//! - `api`: wire documents the service returns
//! - `cutout`: particle cutout requests and field plans
//! - `reader`: container-file seam and the arrays read through it
//! - `client`: the facade tying retrieval to unit conversion
//!
//! Unit semantics come from `sq-core`; this crate only applies them.

pub mod api;
pub mod client;
pub mod config;
pub mod cutout;
pub mod error;
#[cfg(feature = "hdf5")]
pub mod hdf5;
pub mod reader;
pub mod transport;

pub use api::{
    redshift_table, ObjectRecord, SimulationInfo, SnapshotListEntry, SnapshotSummary, SubhaloLinks,
};
pub use client::{SimClient, SubhaloHistory};
pub use config::{ApiKey, ClientConfig, API_KEY_ENV, BASE_URL_ENV, DEFAULT_BASE_URL};
pub use cutout::{CacheMode, CutoutPlan, CutoutRequest, CutoutScope, ParticleType};
pub use error::{ClientError, ClientResult};
#[cfg(feature = "hdf5")]
pub use hdf5::Hdf5Format;
pub use reader::{ContainerFormat, ContainerRead, NumericArray};
pub use transport::{ApiTransport, HttpTransport};
