//! Health Module - Deterministic scoring
//!
//! - `estimator`: penalty model (linear / sigmoid), training target source
//! - `rul`: remaining useful life from health
//! - `status`: healthy / warning / critical bands

pub mod estimator;
pub mod rul;
pub mod status;

pub use estimator::{EstimatorConfig, HealthEstimator, PenaltyModel};
pub use rul::{RulConfig, RulEstimator};
pub use status::{HealthBands, HealthStatus};
