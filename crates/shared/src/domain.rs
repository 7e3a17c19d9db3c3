pub const LOW_CLASS: &str = "low";
pub const HIGH_CLASS: &str = "high";
pub const UNRECOGNIZED_LABEL: &str = "-";

/// Two-class risk outcome as shown to the user.
///
/// The service is free to phrase its verdict as `low`/`high` or `negative`/`positive` in any
/// casing; anything else (including its own `Uncertain`) collapses to [`RiskLevel::Unrecognized`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RiskLevel {
    Low,
    High,
    Unrecognized,
}

impl RiskLevel {
    pub fn normalize(raw: &str) -> Self {
        match raw.to_lowercase().as_str() {
            "low" | "negative" => Self::Low,
            "high" | "positive" => Self::High,
            _ => Self::Unrecognized,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::High => "High",
            Self::Unrecognized => UNRECOGNIZED_LABEL,
        }
    }

    pub fn style_class(self) -> Option<&'static str> {
        match self {
            Self::Low => Some(LOW_CLASS),
            Self::High => Some(HIGH_CLASS),
            Self::Unrecognized => None,
        }
    }
}

/// Renders a `[0, 1]` confidence as a percentage with two fractional digits, e.g. `73.20 %`.
pub fn format_confidence(confidence: f64) -> String {
    format!("{} %", fixed_two_decimals(confidence * 100.0))
}

/// Two-decimal rendering where an exact halfway value rounds away from zero.
///
/// `{:.2}` already picks the nearest representation; it only differs on exact ties, where it
/// rounds to even. A finite `f64` sits exactly halfway between two hundredths only when it is
/// an odd multiple of 1/8, so those are the only values rounded by hand.
fn fixed_two_decimals(value: f64) -> String {
    let eighths = value * 8.0;
    if eighths.fract() != 0.0 || eighths % 2.0 == 0.0 {
        return format!("{value:.2}");
    }

    let hundredths = (value.abs() * 100.0).round() as u64;
    let sign = if value < 0.0 { "-" } else { "" };
    format!("{sign}{}.{:02}", hundredths / 100, hundredths % 100)
}

pub fn format_probability_line(label: &str, probability: f64) -> String {
    format!("{label}: {}", format_confidence(probability))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_low_synonyms_in_any_case() {
        for raw in ["low", "Low", "negative", "NEGATIVE", "nEgAtIvE"] {
            let level = RiskLevel::normalize(raw);
            assert_eq!(level, RiskLevel::Low, "raw={raw}");
            assert_eq!(level.label(), "Low");
            assert_eq!(level.style_class(), Some("low"));
        }
    }

    #[test]
    fn normalizes_high_synonyms_in_any_case() {
        for raw in ["high", "HIGH", "positive", "Positive", "PoSiTiVe"] {
            let level = RiskLevel::normalize(raw);
            assert_eq!(level, RiskLevel::High, "raw={raw}");
            assert_eq!(level.label(), "High");
            assert_eq!(level.style_class(), Some("high"));
        }
    }

    #[test]
    fn unknown_levels_render_as_dash_without_class() {
        for raw in ["", "unknown", "Uncertain", " low", "medium"] {
            let level = RiskLevel::normalize(raw);
            assert_eq!(level, RiskLevel::Unrecognized, "raw={raw:?}");
            assert_eq!(level.label(), "-");
            assert_eq!(level.style_class(), None);
        }
    }

    #[test]
    fn formats_confidence_with_two_decimals() {
        assert_eq!(format_confidence(0.5), "50.00 %");
        assert_eq!(format_confidence(0.999), "99.90 %");
        assert_eq!(format_confidence(1.0), "100.00 %");
        assert_eq!(format_confidence(0.0), "0.00 %");
        assert_eq!(format_confidence(0.732), "73.20 %");
    }

    #[test]
    fn exact_halfway_confidence_rounds_up() {
        assert_eq!(format_confidence(0.00125), "0.13 %");
        assert_eq!(format_confidence(0.00625), "0.63 %");
        assert_eq!(format_confidence(0.50125), "50.13 %");
        assert_eq!(format_confidence(0.00375), "0.38 %");
    }

    #[test]
    fn values_near_a_tie_keep_nearest_rounding() {
        assert_eq!(format_confidence(0.001249), "0.12 %");
        assert_eq!(format_confidence(0.001251), "0.13 %");
        assert_eq!(format_confidence(0.12345), "12.35 %");
        assert_eq!(fixed_two_decimals(-0.125), "-0.13");
    }

    #[test]
    fn formats_probability_lines() {
        assert_eq!(format_probability_line("High", 0.25), "High: 25.00 %");
    }
}
