//! Aggregate statistics over one numeric field across a batch of records.
//!
//! Diagnostic utility outside the main resolve → extract → rule pipeline.
//! Only present values participate; a field with zero present values yields
//! all-absent statistics rather than NaN.

use clap::ValueEnum;
use serde::Serialize;

use crate::record::MetricRecord;

/// Numeric fields of a [`MetricRecord`] that can be profiled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum NumericField {
    Spend,
    Impressions,
    Clicks,
    CtrPercent,
    Frequency,
    Roas,
    Purchases,
    PurchaseValue,
    AddsToCart,
    AtcToPurchasePercent,
    Ctr7dPercent,
    CtrPrev7Percent,
    CtrDropVsPrev7Percent,
}

impl NumericField {
    pub fn value(self, record: &MetricRecord) -> Option<f64> {
        match self {
            NumericField::Spend => record.spend,
            NumericField::Impressions => record.impressions.map(|v| v as f64),
            NumericField::Clicks => record.clicks.map(|v| v as f64),
            NumericField::CtrPercent => record.ctr_percent,
            NumericField::Frequency => record.frequency,
            NumericField::Roas => record.roas,
            NumericField::Purchases => record.purchases.map(|v| v as f64),
            NumericField::PurchaseValue => record.purchase_value,
            NumericField::AddsToCart => record.adds_to_cart.map(|v| v as f64),
            NumericField::AtcToPurchasePercent => record.atc_to_purchase_percent,
            NumericField::Ctr7dPercent => record.ctr_7d_percent,
            NumericField::CtrPrev7Percent => record.ctr_prev7_percent,
            NumericField::CtrDropVsPrev7Percent => record.ctr_drop_vs_prev7_percent,
        }
    }
}

/// Summary statistics over the present values of one field.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FieldStats {
    pub mean: Option<f64>,
    pub median: Option<f64>,
    pub std_dev: Option<f64>,
    pub min: Option<f64>,
    pub max: Option<f64>,
}

/// Compute mean, median, population standard deviation, min, and max over
/// the present values of `field`.
pub fn compute_field_stats(records: &[MetricRecord], field: NumericField) -> FieldStats {
    let mut values: Vec<f64> = records
        .iter()
        .filter_map(|record| field.value(record))
        .collect();
    if values.is_empty() {
        return FieldStats::default();
    }
    values.sort_by(|a, b| a.total_cmp(b));

    let count = values.len() as f64;
    let mean = values.iter().sum::<f64>() / count;
    let variance = values
        .iter()
        .map(|value| {
            let delta = value - mean;
            delta * delta
        })
        .sum::<f64>()
        / count;
    let mid = values.len() / 2;
    let median = if values.len().is_multiple_of(2) {
        (values[mid - 1] + values[mid]) / 2.0
    } else {
        values[mid]
    };

    FieldStats {
        mean: Some(mean),
        median: Some(median),
        std_dev: Some(variance.max(0.0).sqrt()),
        min: values.first().copied(),
        max: values.last().copied(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record_with_roas(roas: Option<f64>) -> MetricRecord {
        MetricRecord {
            roas,
            ..MetricRecord::default()
        }
    }

    #[test]
    fn stats_skip_absent_values() {
        let records = vec![
            record_with_roas(Some(1.0)),
            record_with_roas(None),
            record_with_roas(Some(3.0)),
        ];
        let stats = compute_field_stats(&records, NumericField::Roas);
        assert_eq!(stats.mean, Some(2.0));
        assert_eq!(stats.median, Some(2.0));
        assert_eq!(stats.std_dev, Some(1.0));
        assert_eq!(stats.min, Some(1.0));
        assert_eq!(stats.max, Some(3.0));
    }

    #[test]
    fn stats_over_no_present_values_are_all_absent() {
        let records = vec![record_with_roas(None)];
        assert_eq!(
            compute_field_stats(&records, NumericField::Roas),
            FieldStats::default()
        );
        assert_eq!(
            compute_field_stats(&[], NumericField::Spend),
            FieldStats::default()
        );
    }

    #[test]
    fn median_of_even_count_averages_the_middle_pair() {
        let records = vec![
            record_with_roas(Some(4.0)),
            record_with_roas(Some(1.0)),
            record_with_roas(Some(2.0)),
            record_with_roas(Some(3.0)),
        ];
        let stats = compute_field_stats(&records, NumericField::Roas);
        assert_eq!(stats.median, Some(2.5));
    }
}
