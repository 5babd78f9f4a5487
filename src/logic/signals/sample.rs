//! Sensor Sample - Input record from the ingestion collaborator
//!
//! Missing numeric fields default to 0, the short names used by field
//! gateways (`temp`, `vib`, `nodeId`) are accepted as aliases.

use serde::{Deserialize, Serialize};

use super::layout::{Signal, SignalVector, SIGNAL_COUNT};
use crate::constants::DEFAULT_ASSET_ID;

/// Largest magnitude accepted for any reading, beyond any physical sensor range
pub const READING_LIMIT: f32 = 1.0e6;

// ============================================================================
// SAMPLE
// ============================================================================

/// One periodic reading from a monitored asset
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Sample {
    #[serde(default, alias = "temp")]
    pub temperature: f32,

    #[serde(default, alias = "vib")]
    pub vibration: f32,

    #[serde(default)]
    pub current: f32,

    /// Milliseconds since epoch, as stamped by the gateway
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<i64>,
}

impl Sample {
    pub fn new(temperature: f32, vibration: f32, current: f32) -> Self {
        Self {
            temperature,
            vibration,
            current,
            timestamp: None,
        }
    }

    /// Signal values in layout order. Non-finite readings become 0, the
    /// rest are clamped to `±READING_LIMIT`.
    pub fn values(&self) -> SignalVector {
        let raw = [self.temperature, self.vibration, self.current];
        let mut out = [0.0f32; SIGNAL_COUNT];

        for (signal, &v) in Signal::ALL.iter().zip(raw.iter()) {
            out[signal.index()] = if !v.is_finite() {
                log::debug!("Non-finite {} reading replaced by 0", signal);
                0.0
            } else if v.abs() > READING_LIMIT {
                log::warn!("{} reading {} {} clamped to +/-{}", signal, v, signal.unit(), READING_LIMIT);
                v.clamp(-READING_LIMIT, READING_LIMIT)
            } else {
                v
            };
        }

        out
    }
}

// ============================================================================
// INGEST ENVELOPE
// ============================================================================

/// Sample plus the asset it belongs to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IngestRecord {
    #[serde(default = "default_asset_id", alias = "nodeId", alias = "assetId")]
    pub asset_id: String,

    #[serde(flatten)]
    pub sample: Sample,
}

fn default_asset_id() -> String {
    DEFAULT_ASSET_ID.to_string()
}

impl IngestRecord {
    pub fn new(asset_id: &str, sample: Sample) -> Self {
        Self {
            asset_id: asset_id.to_string(),
            sample,
        }
    }

    /// Parse one JSON payload
    pub fn from_json(payload: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gateway_payload_aliases() {
        let record = IngestRecord::from_json(
            r#"{"nodeId":"pump-01","temp":75.5,"vib":2.1,"current":12.5,"timestamp":1700000000000}"#,
        )
        .unwrap();

        assert_eq!(record.asset_id, "pump-01");
        assert_eq!(record.sample.temperature, 75.5);
        assert_eq!(record.sample.vibration, 2.1);
        assert_eq!(record.sample.current, 12.5);
        assert_eq!(record.sample.timestamp, Some(1_700_000_000_000));
    }

    #[test]
    fn test_missing_fields_default_to_zero() {
        let record = IngestRecord::from_json(r#"{"assetId":"fan-7","temperature":41.0}"#).unwrap();

        assert_eq!(record.asset_id, "fan-7");
        assert_eq!(record.sample.values(), [41.0, 0.0, 0.0]);
        assert_eq!(record.sample.timestamp, None);
    }

    #[test]
    fn test_missing_asset_uses_default() {
        let record = IngestRecord::from_json(r#"{"temperature":41.0,"vibration":0.4,"current":5}"#).unwrap();
        assert_eq!(record.asset_id, DEFAULT_ASSET_ID);
    }

    #[test]
    fn test_non_finite_values_sanitized() {
        let sample = Sample::new(f32::NAN, f32::INFINITY, 4.0);
        assert_eq!(sample.values(), [0.0, 0.0, 4.0]);
    }

    #[test]
    fn test_extreme_values_clamped() {
        let record = IngestRecord::from_json(r#"{"temperature":3e38,"vibration":-3e38,"current":12}"#).unwrap();
        assert_eq!(record.sample.temperature, 3.0e38);
        assert_eq!(record.sample.values(), [READING_LIMIT, -READING_LIMIT, 12.0]);
    }

    #[test]
    fn test_unparseable_payload_is_error() {
        assert!(IngestRecord::from_json("not json").is_err());
        assert!(IngestRecord::from_json(r#"{"temp":"hot"}"#).is_err());
    }
}
