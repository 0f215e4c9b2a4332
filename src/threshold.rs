//! Severity classification of live percentage readings.

use thiserror::Error;

use crate::constants::{CRITICAL_THRESHOLD, WARNING_THRESHOLD};
use crate::theme::Rgb;

/// Severity band of a gauge reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    Normal,
    Warning,
    Critical,
}

impl Severity {
    pub const fn label(self) -> &'static str {
        match self {
            Severity::Normal => "normal",
            Severity::Warning => "warning",
            Severity::Critical => "critical",
        }
    }
}

/// Maps a reading to its band.
///
/// Intervals are closed-open ascending: a value equal to a threshold belongs
/// to the higher band. The critical test runs first, so inverted thresholds
/// never yield `Warning` above `critical`. NaN compares false everywhere and
/// classifies as `Normal`.
pub fn classify(value: f64, warning: f64, critical: f64) -> Severity {
    if value >= critical {
        Severity::Critical
    } else if value >= warning {
        Severity::Warning
    } else {
        Severity::Normal
    }
}

/// Picks the color for a band from the three supplied colors.
pub fn color_for(band: Severity, accent: Rgb, warning: Rgb, critical: Rgb) -> Rgb {
    match band {
        Severity::Normal => accent,
        Severity::Warning => warning,
        Severity::Critical => critical,
    }
}

/// Rejected threshold pair.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ThresholdError {
    #[error("threshold {0} is outside 0..=100")]
    OutOfRange(f64),
    #[error("warning threshold {warning} is above critical threshold {critical}")]
    Inverted { warning: f64, critical: f64 },
}

/// Warning and critical percentages configured for the gauges.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThresholdConfig {
    warning: f64,
    critical: f64,
}

impl ThresholdConfig {
    /// Validates `0 <= warning <= critical <= 100`.
    pub fn new(warning: f64, critical: f64) -> Result<Self, ThresholdError> {
        for value in [warning, critical] {
            if !(0.0..=100.0).contains(&value) {
                return Err(ThresholdError::OutOfRange(value));
            }
        }
        if warning > critical {
            return Err(ThresholdError::Inverted { warning, critical });
        }
        Ok(Self { warning, critical })
    }

    pub fn warning(&self) -> f64 {
        self.warning
    }

    pub fn critical(&self) -> f64 {
        self.critical
    }

    pub fn classify(&self, value: f64) -> Severity {
        classify(value, self.warning, self.critical)
    }
}

impl Default for ThresholdConfig {
    fn default() -> Self {
        Self {
            warning: WARNING_THRESHOLD,
            critical: CRITICAL_THRESHOLD,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_band_boundaries() {
        assert_eq!(classify(79.0, 80.0, 90.0), Severity::Normal);
        assert_eq!(classify(80.0, 80.0, 90.0), Severity::Warning);
        assert_eq!(classify(89.999, 80.0, 90.0), Severity::Warning);
        assert_eq!(classify(90.0, 80.0, 90.0), Severity::Critical);
        assert_eq!(classify(100.0, 80.0, 90.0), Severity::Critical);
    }

    #[test]
    fn test_classify_extremes() {
        assert_eq!(classify(0.0, 80.0, 90.0), Severity::Normal);
        assert_eq!(classify(-5.0, 80.0, 90.0), Severity::Normal);
        assert_eq!(classify(250.0, 80.0, 90.0), Severity::Critical);
        assert_eq!(classify(f64::NAN, 80.0, 90.0), Severity::Normal);
    }

    #[test]
    fn test_classify_inverted_thresholds_is_consistent() {
        // warning above critical: nothing at or above critical is ever Warning
        assert_eq!(classify(50.0, 90.0, 80.0), Severity::Normal);
        assert_eq!(classify(85.0, 90.0, 80.0), Severity::Critical);
        assert_eq!(classify(95.0, 90.0, 80.0), Severity::Critical);
    }

    #[test]
    fn test_equal_thresholds_skip_warning() {
        assert_eq!(classify(69.9, 70.0, 70.0), Severity::Normal);
        assert_eq!(classify(70.0, 70.0, 70.0), Severity::Critical);
    }

    #[test]
    fn test_color_for_each_band() {
        let accent = Rgb::from_hex(0x111111);
        let warning = Rgb::from_hex(0x222222);
        let critical = Rgb::from_hex(0x333333);

        assert_eq!(color_for(Severity::Normal, accent, warning, critical), accent);
        assert_eq!(color_for(Severity::Warning, accent, warning, critical), warning);
        assert_eq!(color_for(Severity::Critical, accent, warning, critical), critical);
    }

    #[test]
    fn test_threshold_config_validation() {
        assert!(ThresholdConfig::new(80.0, 90.0).is_ok());
        assert!(ThresholdConfig::new(0.0, 100.0).is_ok());
        assert!(ThresholdConfig::new(50.0, 50.0).is_ok());
        assert_eq!(
            ThresholdConfig::new(-1.0, 90.0),
            Err(ThresholdError::OutOfRange(-1.0))
        );
        assert_eq!(
            ThresholdConfig::new(80.0, 101.0),
            Err(ThresholdError::OutOfRange(101.0))
        );
        assert!(matches!(
            ThresholdConfig::new(95.0, 90.0),
            Err(ThresholdError::Inverted { .. })
        ));
        assert!(ThresholdConfig::new(f64::NAN, 90.0).is_err());
    }

    #[test]
    fn test_default_thresholds() {
        let thresholds = ThresholdConfig::default();
        assert_eq!(thresholds.warning(), 80.0);
        assert_eq!(thresholds.critical(), 90.0);
        assert_eq!(thresholds.classify(85.0), Severity::Warning);
    }
}
