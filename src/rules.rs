//! Deterministic threshold rules that seed downstream summarization.
//!
//! The rule set is an ordered table of independent predicate + template
//! pairs. Every rule is evaluated against every record (no short-circuit),
//! so one record can trigger several findings; a rule whose required inputs
//! are absent contributes nothing. Findings are emitted in row order, then
//! rule order within a row.

use serde::Serialize;

use crate::error::InsightError;
use crate::record::MetricRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

/// Actionable guidance attached to a finding.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    pub summary: String,
    pub actions: Vec<String>,
    pub priority: Priority,
}

/// A rule-triggered observation with a recommendation and confidence.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Finding {
    pub label: String,
    pub signal: String,
    pub recommendation: Recommendation,
    pub confidence: f64,
}

impl Finding {
    /// Build a finding, rejecting confidences outside `[0.0, 1.0]`.
    pub fn new(
        label: impl Into<String>,
        signal: impl Into<String>,
        recommendation: Recommendation,
        confidence: f64,
    ) -> Result<Self, InsightError> {
        if !(0.0..=1.0).contains(&confidence) {
            return Err(InsightError::InvalidFinding(confidence));
        }
        Ok(Finding {
            label: label.into(),
            signal: signal.into(),
            recommendation,
            confidence,
        })
    }
}

struct RuleDef {
    label: &'static str,
    signal: &'static str,
    summary: &'static str,
    actions: &'static [&'static str],
    priority: Priority,
    confidence: f64,
    applies: fn(&MetricRecord) -> bool,
}

impl RuleDef {
    fn finding(&self) -> Result<Finding, InsightError> {
        Finding::new(
            self.label,
            self.signal,
            Recommendation {
                summary: self.summary.to_string(),
                actions: self.actions.iter().map(|a| a.to_string()).collect(),
                priority: self.priority,
            },
            self.confidence,
        )
    }
}

/// Evaluation order is the table order. The two ROAS bands do not overlap,
/// so at most one of them fires per record.
const RULES: &[RuleDef] = &[
    RuleDef {
        label: "ROAS 1\u{2013}2",
        signal: "Efficiency is muted with ROAS between 1 and 2",
        summary: "Test new hooks and cap frequency to push ROAS above target",
        actions: &[
            "Launch 2\u{2013}3 new creatives focusing on fresh angles",
            "Rotate new thumbnail variants to fight fatigue",
            "Apply frequency cap or refresh audience",
        ],
        priority: Priority::High,
        confidence: 0.7,
        applies: |m| m.roas.is_some_and(|roas| (1.0..=2.0).contains(&roas)),
    },
    RuleDef {
        label: "ROAS < 1",
        signal: "Campaign is losing money",
        summary: "Pause and rebuild offer targeting to reach profitability",
        actions: &[
            "Pause worst performing ad sets",
            "Reassess targeting and bidding",
            "Rebuild funnel messaging",
        ],
        priority: Priority::High,
        confidence: 0.8,
        applies: |m| m.roas.is_some_and(|roas| roas < 1.0),
    },
    RuleDef {
        label: "CTR healthy but conversion lagging",
        signal: "Traffic quality is solid but conversion funnel underperforms",
        summary: "Audit landing page and checkout to fix conversion leakage",
        actions: &[
            "A/B test landing page copy and load speed",
            "Analyze checkout drop-off recordings",
            "Validate tracking for adds to cart vs purchases",
        ],
        priority: Priority::Medium,
        confidence: 0.75,
        applies: |m| match (m.ctr_percent, m.atc_to_purchase_percent) {
            (Some(ctr), Some(atc)) => ctr >= 1.5 && atc < 20.0,
            _ => false,
        },
    },
];

/// All findings triggered by one record, in rule order.
pub fn evaluate_record(record: &MetricRecord) -> Result<Vec<Finding>, InsightError> {
    RULES
        .iter()
        .filter(|rule| (rule.applies)(record))
        .map(RuleDef::finding)
        .collect()
}

/// Findings for a batch of records, concatenated in row order.
pub fn generate_findings(records: &[MetricRecord]) -> Result<Vec<Finding>, InsightError> {
    let mut findings = Vec::new();
    for record in records {
        findings.extend(evaluate_record(record)?);
    }
    Ok(findings)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finding_rejects_out_of_range_confidence() {
        let recommendation = Recommendation {
            summary: "noop".to_string(),
            actions: Vec::new(),
            priority: Priority::Low,
        };
        let err = Finding::new("x", "y", recommendation, 1.2).unwrap_err();
        assert_eq!(err, InsightError::InvalidFinding(1.2));
    }

    #[test]
    fn absent_inputs_fire_no_rules() {
        let findings = evaluate_record(&MetricRecord::default()).unwrap();
        assert!(findings.is_empty());
    }
}
