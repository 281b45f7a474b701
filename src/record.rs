//! Row extraction: raw string-keyed rows into normalized [`MetricRecord`]s.
//!
//! Every base field goes through the batch's [`HeaderMapping`]: a canonical
//! key with no resolved header is absent regardless of row contents, and a
//! resolved header whose cell is missing or unparseable degrades to absent as
//! well. Absence and zero are distinct throughout; derived formulas and the
//! rule engine both depend on that.
//!
//! Derived fields are computed strictly after base resolution and take
//! precedence over directly-resolved same-named columns: a literal "CTR %"
//! column is overwritten by `clicks / impressions * 100`, including being
//! overwritten with an absent value when either operand is missing.

use serde::Serialize;
use serde_json::Value;

use crate::formula::{safe_delta, safe_pct};
use crate::resolve::HeaderMapping;
use crate::schema::{CanonicalKey, Status};

/// One raw input row: arbitrary source headers mapped to scalar values.
pub type Row = serde_json::Map<String, Value>;

/// Normalized per-row metrics, base fields plus derived KPIs.
///
/// Constructed once by [`extract_record`], read-only thereafter. `None`
/// means the column was not present or not parseable, never "zero".
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MetricRecord {
    pub campaign_name: Option<String>,
    pub ad_set_name: Option<String>,
    pub ad_name: Option<String>,
    pub ad_id: Option<String>,
    pub spend: Option<f64>,
    pub impressions: Option<i64>,
    pub clicks: Option<i64>,
    pub ctr_percent: Option<f64>,
    pub frequency: Option<f64>,
    pub roas: Option<f64>,
    pub purchases: Option<i64>,
    pub purchase_value: Option<f64>,
    pub adds_to_cart: Option<i64>,
    pub atc_to_purchase_percent: Option<f64>,
    pub ctr_7d_percent: Option<f64>,
    pub ctr_prev7_percent: Option<f64>,
    pub ctr_drop_vs_prev7_percent: Option<f64>,
    pub status: Option<Status>,
}

/// Extract one normalized record from a raw row using the batch mapping.
pub fn extract_record(row: &Row, mapping: &HeaderMapping) -> MetricRecord {
    let cell = |key: CanonicalKey| mapping.get(&key).and_then(|header| row.get(header));
    let text = |key: CanonicalKey| cell(key).and_then(coerce_text);
    let float = |key: CanonicalKey| cell(key).and_then(coerce_float);
    let count = |key: CanonicalKey| cell(key).and_then(coerce_count);

    let mut record = MetricRecord {
        campaign_name: text(CanonicalKey::CampaignName),
        ad_set_name: text(CanonicalKey::AdSetName),
        ad_name: text(CanonicalKey::AdName),
        ad_id: text(CanonicalKey::AdId),
        spend: float(CanonicalKey::Spend),
        impressions: count(CanonicalKey::Impressions),
        clicks: count(CanonicalKey::Clicks),
        ctr_percent: float(CanonicalKey::CtrPercent),
        frequency: float(CanonicalKey::Frequency),
        roas: float(CanonicalKey::Roas),
        purchases: count(CanonicalKey::Purchases),
        purchase_value: float(CanonicalKey::PurchaseValue),
        adds_to_cart: count(CanonicalKey::AddsToCart),
        atc_to_purchase_percent: None,
        ctr_7d_percent: float(CanonicalKey::Ctr7dPercent),
        ctr_prev7_percent: float(CanonicalKey::CtrPrev7Percent),
        ctr_drop_vs_prev7_percent: None,
        status: cell(CanonicalKey::Status)
            .and_then(coerce_text)
            .and_then(|value| value.parse::<Status>().ok()),
    };

    // Derived formulas run last and replace any directly-resolved value for
    // the same canonical key.
    record.ctr_percent = safe_pct(
        record.clicks.map(|v| v as f64),
        record.impressions.map(|v| v as f64),
    );
    record.atc_to_purchase_percent = safe_pct(
        record.purchases.map(|v| v as f64),
        record.adds_to_cart.map(|v| v as f64),
    );
    record.ctr_drop_vs_prev7_percent =
        safe_delta(record.ctr_7d_percent, record.ctr_prev7_percent);

    record
}

/// Extract one record per row, preserving input order.
pub fn extract_records(rows: &[Row], mapping: &HeaderMapping) -> Vec<MetricRecord> {
    rows.iter().map(|row| extract_record(row, mapping)).collect()
}

fn coerce_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        _ => None,
    }
}

fn coerce_float(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|f| f.is_finite()),
        _ => None,
    }
}

fn coerce_count(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64)),
        Value::String(s) => {
            let trimmed = s.trim();
            trimmed.parse::<i64>().ok().or_else(|| {
                trimmed
                    .parse::<f64>()
                    .ok()
                    .filter(|f| f.is_finite() && f.fract() == 0.0)
                    .map(|f| f as i64)
            })
        }
        _ => None,
    }
}
