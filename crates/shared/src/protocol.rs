use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{
    domain::{format_confidence, format_probability_line, RiskLevel},
    error::ScreeningErrorBody,
};

/// Path of the analysis endpoint, relative to the service base URL.
pub const SCREEN_PATH: &str = "screen";
/// Multipart field carrying the uploaded audio file.
pub const FILE_FIELD: &str = "file";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub confidence: f64,
    #[serde(default)]
    pub risk_level: Option<String>,
    #[serde(default)]
    pub disclaimer: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub probabilities: Option<BTreeMap<String, f64>>,
}

impl AnalysisResult {
    pub fn risk(&self) -> RiskLevel {
        RiskLevel::normalize(self.risk_level.as_deref().unwrap_or_default())
    }

    pub fn confidence_text(&self) -> String {
        format_confidence(self.confidence)
    }

    pub fn disclaimer_text(&self) -> &str {
        self.disclaimer.as_deref().unwrap_or_default()
    }

    pub fn probability_lines(&self) -> Vec<String> {
        self.probabilities
            .iter()
            .flatten()
            .map(|(label, probability)| format_probability_line(label, *probability))
            .collect()
    }
}

/// Any JSON object the service may answer with. Bodies that do not carry a confidence are
/// treated as error payloads.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ScreeningResponse {
    Analysis(AnalysisResult),
    Rejected(ScreeningErrorBody),
}

impl ScreeningResponse {
    pub fn from_slice(bytes: &[u8]) -> serde_json::Result<Self> {
        serde_json::from_slice(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_success_payload() {
        let body = br#"{
            "risk_level": "High",
            "confidence": 0.8123,
            "probabilities": {"Low": 0.1877, "High": 0.8123},
            "disclaimer": "This is a screening tool and not a medical diagnosis."
        }"#;
        let ScreeningResponse::Analysis(result) = ScreeningResponse::from_slice(body).expect("parse")
        else {
            panic!("expected analysis");
        };
        assert_eq!(result.risk(), RiskLevel::High);
        assert_eq!(result.confidence_text(), "81.23 %");
        assert_eq!(
            result.probability_lines(),
            vec!["High: 81.23 %".to_string(), "Low: 18.77 %".to_string()]
        );
    }

    #[test]
    fn missing_optional_fields_default_to_empty() {
        let ScreeningResponse::Analysis(result) =
            ScreeningResponse::from_slice(br#"{"confidence": 0.5}"#).expect("parse")
        else {
            panic!("expected analysis");
        };
        assert_eq!(result.risk(), RiskLevel::Unrecognized);
        assert_eq!(result.disclaimer_text(), "");
        assert!(result.probability_lines().is_empty());
    }

    #[test]
    fn null_fields_are_treated_as_missing() {
        let ScreeningResponse::Analysis(result) = ScreeningResponse::from_slice(
            br#"{"confidence": 0.5, "risk_level": null, "disclaimer": null}"#,
        )
        .expect("parse") else {
            panic!("expected analysis");
        };
        assert_eq!(result.risk(), RiskLevel::Unrecognized);
        assert_eq!(result.disclaimer_text(), "");
    }

    #[test]
    fn error_payload_parses_as_rejection() {
        assert_eq!(
            ScreeningResponse::from_slice(br#"{"error": "bad format"}"#).expect("parse"),
            ScreeningResponse::Rejected(ScreeningErrorBody::new("bad format"))
        );
    }

    #[test]
    fn non_object_body_fails_to_parse() {
        assert!(ScreeningResponse::from_slice(b"<html>oops</html>").is_err());
        assert!(ScreeningResponse::from_slice(b"[1, 2]").is_err());
    }
}
