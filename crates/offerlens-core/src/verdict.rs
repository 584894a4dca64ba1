//! Verdict types: status labels, hard stops, and the auditable result

use serde::{Deserialize, Serialize};
use std::fmt;

/// A condition that unconditionally prevents a GREEN verdict or Winner
/// eligibility, regardless of how well everything else scored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HardStop {
    MerchantTrustCritical,
    NoDemandEvidence,
    ProgramPaused,
    RefundExcessive,
}

impl fmt::Display for HardStop {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            HardStop::MerchantTrustCritical => write!(f, "merchant rating below 2.5"),
            HardStop::NoDemandEvidence => write!(f, "no demand evidence at all"),
            HardStop::ProgramPaused => write!(f, "affiliate program is paused"),
            HardStop::RefundExcessive => write!(f, "refund rate above 25%"),
        }
    }
}

/// Overall recommendation label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VerdictStatus {
    Green,
    Yellow,
    Red,
    TestFirst,
}

impl fmt::Display for VerdictStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            VerdictStatus::Green => write!(f, "GREEN"),
            VerdictStatus::Yellow => write!(f, "YELLOW"),
            VerdictStatus::Red => write!(f, "RED"),
            VerdictStatus::TestFirst => write!(f, "TEST_FIRST"),
        }
    }
}

/// Verdict plus everything needed to audit it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerdictResult {
    pub status: VerdictStatus,
    pub primary_action: String,
    #[serde(default)]
    pub hard_stops: Vec<HardStop>,
    #[serde(default)]
    pub top_pros: Vec<String>,
    #[serde(default)]
    pub top_risks: Vec<String>,
    #[serde(default)]
    pub key_assumptions: Vec<String>,
}

impl VerdictResult {
    pub fn is_promotable(&self) -> bool {
        self.status == VerdictStatus::Green
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_wire_format() {
        assert_eq!(
            serde_json::to_string(&VerdictStatus::TestFirst).unwrap(),
            "\"TEST_FIRST\""
        );
        assert_eq!(serde_json::to_string(&VerdictStatus::Green).unwrap(), "\"GREEN\"");
    }

    #[test]
    fn test_hard_stop_messages() {
        assert_eq!(
            HardStop::ProgramPaused.to_string(),
            "affiliate program is paused"
        );
    }
}
