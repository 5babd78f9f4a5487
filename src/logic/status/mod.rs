//! Status Module - Diagnostics snapshots
//!
//! - `types.rs`: `ModelStatus`, `FleetStatus`
//! - `collect.rs`: builds them from live models

pub mod collect;
pub mod types;

pub use collect::{collect, collect_fleet};
pub use types::{FleetStatus, ModelStatus};
