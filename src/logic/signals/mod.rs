//! Signals Module - Sensor input definitions
//!
//! - `layout`: signal order, typed `Signal` index, layout hash
//! - `sample`: `Sample` / `IngestRecord` input contract
//! - `normalize`: physical bounds and [0, 1] scaling

pub mod layout;
pub mod sample;
pub mod normalize;

pub use layout::{Signal, SignalVector, SIGNAL_COUNT, SIGNAL_LAYOUT};
pub use sample::{IngestRecord, Sample, READING_LIMIT};
pub use normalize::{NormalizationConfig, SignalBounds};
