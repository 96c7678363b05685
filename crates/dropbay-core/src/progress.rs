//! Transfer progress for a single entry.
//!
//! Progress only moves forward. An entry starts `Pending`, reports a
//! non-decreasing percentage while in flight and ends `Complete`, or drops to
//! `Error` from any non-terminal state.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Transfer state of one entry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Progress {
    /// Added but not yet handed to an uploader
    #[default]
    Pending,
    /// In flight, percentage in `0.0..=100.0`
    Uploading(f64),
    /// Transfer finished successfully
    Complete,
    /// Transfer failed
    Error,
}

impl Progress {
    /// Builds an in-flight value, clamping into `0.0..=100.0`.
    ///
    /// NaN is treated as zero.
    pub fn uploading(percent: f64) -> Self {
        if percent.is_nan() {
            return Progress::Uploading(0.0);
        }
        Progress::Uploading(percent.clamp(0.0, 100.0))
    }

    /// Same value with any in-flight percentage clamped as by [`uploading`](Self::uploading).
    pub fn normalized(self) -> Self {
        match self {
            Progress::Uploading(p) => Progress::uploading(p),
            other => other,
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, Progress::Pending)
    }

    /// Returns true for `Complete` and `Error`.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Progress::Complete | Progress::Error)
    }

    /// Percentage for progress bars, if the transfer is in flight.
    pub fn percent(&self) -> Option<f64> {
        match self {
            Progress::Uploading(p) => Some(*p),
            _ => None,
        }
    }

    /// Whether moving from `self` to `next` keeps progress monotonic.
    ///
    /// Re-applying the current value is allowed so repeated callbacks with the
    /// same percentage are harmless.
    pub fn can_advance_to(&self, next: &Progress) -> bool {
        match (self, next) {
            (Progress::Complete, Progress::Complete) => true,
            (Progress::Error, Progress::Error) => true,
            (Progress::Complete | Progress::Error, _) => false,
            (_, Progress::Pending) => self.is_pending(),
            (Progress::Uploading(cur), Progress::Uploading(new)) => new >= cur,
            (Progress::Pending, _) => true,
            (Progress::Uploading(_), Progress::Complete | Progress::Error) => true,
        }
    }
}

impl fmt::Display for Progress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Progress::Pending => write!(f, "pending"),
            Progress::Uploading(p) => write!(f, "{:.0}%", p),
            Progress::Complete => write!(f, "complete"),
            Progress::Error => write!(f, "error"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forward_transitions() {
        assert!(Progress::Pending.can_advance_to(&Progress::Uploading(0.0)));
        assert!(Progress::Pending.can_advance_to(&Progress::Complete));
        assert!(Progress::Pending.can_advance_to(&Progress::Error));
        assert!(Progress::Uploading(10.0).can_advance_to(&Progress::Uploading(42.0)));
        assert!(Progress::Uploading(42.0).can_advance_to(&Progress::Complete));
        assert!(Progress::Uploading(42.0).can_advance_to(&Progress::Error));
    }

    #[test]
    fn test_backward_transitions_rejected() {
        assert!(!Progress::Uploading(50.0).can_advance_to(&Progress::Uploading(49.0)));
        assert!(!Progress::Uploading(50.0).can_advance_to(&Progress::Pending));
        assert!(!Progress::Complete.can_advance_to(&Progress::Error));
        assert!(!Progress::Complete.can_advance_to(&Progress::Uploading(100.0)));
        assert!(!Progress::Error.can_advance_to(&Progress::Complete));
        assert!(!Progress::Error.can_advance_to(&Progress::Pending));
    }

    #[test]
    fn test_same_value_is_idempotent() {
        assert!(Progress::Pending.can_advance_to(&Progress::Pending));
        assert!(Progress::Uploading(30.0).can_advance_to(&Progress::Uploading(30.0)));
        assert!(Progress::Complete.can_advance_to(&Progress::Complete));
    }

    #[test]
    fn test_uploading_clamps() {
        assert_eq!(Progress::uploading(-5.0), Progress::Uploading(0.0));
        assert_eq!(Progress::uploading(150.0), Progress::Uploading(100.0));
        assert_eq!(Progress::uploading(f64::NAN), Progress::Uploading(0.0));
    }

    #[test]
    fn test_normalized() {
        assert_eq!(Progress::Uploading(150.0).normalized(), Progress::Uploading(100.0));
        assert_eq!(Progress::Uploading(f64::NAN).normalized(), Progress::Uploading(0.0));
        assert_eq!(Progress::Uploading(42.0).normalized(), Progress::Uploading(42.0));
        assert_eq!(Progress::Complete.normalized(), Progress::Complete);
    }

    #[test]
    fn test_display() {
        assert_eq!(Progress::Uploading(41.6).to_string(), "42%");
        assert_eq!(Progress::Error.to_string(), "error");
    }
}
