//! Analysis result types

use crate::features::key::KeyEstimate;
use crate::features::period::TempoEstimate;
use serde::{Deserialize, Serialize};

/// Complete analysis result.
///
/// Serializes to the shape the orchestration layer displays:
/// `{ "tempo": { "bpm", "confidence" },
///    "key": { "pitchClass", "mode", "camelot", "score" }, ... }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Tempo estimate
    pub tempo: TempoEstimate,

    /// Key estimate
    pub key: KeyEstimate,

    /// Analysis metadata
    pub metadata: AnalysisMetadata,
}

/// Metadata about one analysis pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisMetadata {
    /// Audio duration in seconds
    pub duration_seconds: f32,

    /// Sample rate in Hz
    pub sample_rate: u32,

    /// Wall-clock processing time in milliseconds
    pub processing_time_ms: f32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::key::Mode;

    #[test]
    fn test_serialized_field_names_match_display_contract() {
        let result = AnalysisResult {
            tempo: TempoEstimate {
                bpm: 120.2,
                confidence: 0.85,
            },
            key: KeyEstimate {
                pitch_class: 9,
                mode: Mode::Minor,
                camelot: "8A".to_string(),
                score: 0.73,
            },
            metadata: AnalysisMetadata {
                duration_seconds: 5.0,
                sample_rate: 48000,
                processing_time_ms: 12.0,
            },
        };

        let json = serde_json::to_value(&result).unwrap();
        assert!((json["tempo"]["bpm"].as_f64().unwrap() - 120.2).abs() < 1e-4);
        assert!(json["tempo"]["confidence"].is_number());
        assert_eq!(json["key"]["pitchClass"], 9);
        assert_eq!(json["key"]["mode"], "minor");
        assert_eq!(json["key"]["camelot"], "8A");
        assert!(json["key"]["score"].is_number());
        assert_eq!(json["metadata"]["sampleRate"], 48000);
    }

    #[test]
    fn test_roundtrip() {
        let result = AnalysisResult {
            tempo: TempoEstimate {
                bpm: 0.0,
                confidence: 0.0,
            },
            key: KeyEstimate::none(),
            metadata: AnalysisMetadata {
                duration_seconds: 0.0,
                sample_rate: 44100,
                processing_time_ms: 0.1,
            },
        };
        let json = serde_json::to_string(&result).unwrap();
        let back: AnalysisResult = serde_json::from_str(&json).unwrap();
        assert_eq!(back, result);
    }
}
