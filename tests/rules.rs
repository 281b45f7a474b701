use insight_metrics::record::MetricRecord;
use insight_metrics::rules::{Priority, evaluate_record, generate_findings};
use proptest::prelude::*;

fn record() -> MetricRecord {
    MetricRecord::default()
}

#[test]
fn roas_in_band_emits_exactly_one_high_priority_finding() {
    let mut metric = record();
    metric.roas = Some(1.6);
    let findings = evaluate_record(&metric).unwrap();
    assert_eq!(findings.len(), 1);
    assert_eq!(findings[0].label, "ROAS 1\u{2013}2");
    assert_eq!(findings[0].recommendation.priority, Priority::High);
    assert_eq!(findings[0].confidence, 0.7);
    assert!(!findings[0].recommendation.actions.is_empty());
}

#[test]
fn roas_below_one_emits_the_loss_finding() {
    let mut metric = record();
    metric.roas = Some(0.8);
    let findings = evaluate_record(&metric).unwrap();
    assert_eq!(findings.len(), 1);
    assert_eq!(findings[0].label, "ROAS < 1");
    assert_eq!(findings[0].recommendation.priority, Priority::High);
    assert_eq!(findings[0].confidence, 0.8);
}

#[test]
fn roas_band_boundaries_are_inclusive() {
    for roas in [1.0, 2.0] {
        let mut metric = record();
        metric.roas = Some(roas);
        let findings = evaluate_record(&metric).unwrap();
        assert_eq!(findings.len(), 1, "roas={roas}");
        assert_eq!(findings[0].label, "ROAS 1\u{2013}2");
    }
    let mut metric = record();
    metric.roas = Some(2.5);
    assert!(evaluate_record(&metric).unwrap().is_empty());
}

#[test]
fn healthy_ctr_with_weak_conversion_flags_the_funnel() {
    let mut metric = record();
    metric.ctr_percent = Some(2.2);
    metric.atc_to_purchase_percent = Some(10.0);
    let findings = evaluate_record(&metric).unwrap();
    assert_eq!(findings.len(), 1);
    assert!(findings[0].signal.to_lowercase().contains("conversion"));
    assert_eq!(findings[0].recommendation.priority, Priority::Medium);
    assert_eq!(findings[0].confidence, 0.75);
}

#[test]
fn conversion_gap_rule_needs_both_inputs() {
    let mut metric = record();
    metric.ctr_percent = Some(2.2);
    assert!(evaluate_record(&metric).unwrap().is_empty());

    let mut metric = record();
    metric.atc_to_purchase_percent = Some(10.0);
    assert!(evaluate_record(&metric).unwrap().is_empty());
}

#[test]
fn one_record_can_trigger_multiple_rules_in_table_order() {
    let mut metric = record();
    metric.roas = Some(1.6);
    metric.ctr_percent = Some(2.2);
    metric.atc_to_purchase_percent = Some(10.0);
    let findings = evaluate_record(&metric).unwrap();
    assert_eq!(findings.len(), 2);
    assert_eq!(findings[0].label, "ROAS 1\u{2013}2");
    assert_eq!(findings[1].label, "CTR healthy but conversion lagging");
}

#[test]
fn batch_findings_concatenate_in_row_order() {
    let mut losing = record();
    losing.roas = Some(0.5);
    let mut muted = record();
    muted.roas = Some(1.5);
    let findings = generate_findings(&[losing, muted]).unwrap();
    assert_eq!(findings.len(), 2);
    assert_eq!(findings[0].label, "ROAS < 1");
    assert_eq!(findings[1].label, "ROAS 1\u{2013}2");
}

proptest! {
    #[test]
    fn roas_band_and_loss_rules_never_both_fire(roas in -100.0f64..100.0) {
        let mut metric = record();
        metric.roas = Some(roas);
        let findings = evaluate_record(&metric).unwrap();
        let roas_labels = findings
            .iter()
            .filter(|f| f.label.starts_with("ROAS"))
            .count();
        prop_assert!(roas_labels <= 1);
    }
}
