//! Canonical metric schema: the closed set of metric keys and their accepted
//! header aliases.
//!
//! Vendor exports spell the same column a dozen ways ("Spend", "Amount
//! spent", "amount  spent "). Each [`CanonicalKey`] carries an ordered list of
//! lower-cased alias strings; the resolver compares trimmed, lower-cased
//! headers against them. Adding a key is a schema change, not a runtime
//! event.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

/// Fixed internal metric identifiers, independent of source header spelling.
///
/// The declaration order here is the resolver's enumeration order and must
/// stay stable: it decides which key gets first pick of the headers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CanonicalKey {
    CampaignName,
    AdSetName,
    AdName,
    AdId,
    Spend,
    Impressions,
    Clicks,
    CtrPercent,
    Frequency,
    Roas,
    Purchases,
    PurchaseValue,
    AddsToCart,
    Ctr7dPercent,
    CtrPrev7Percent,
    Status,
}

impl CanonicalKey {
    pub const ALL: [CanonicalKey; 16] = [
        CanonicalKey::CampaignName,
        CanonicalKey::AdSetName,
        CanonicalKey::AdName,
        CanonicalKey::AdId,
        CanonicalKey::Spend,
        CanonicalKey::Impressions,
        CanonicalKey::Clicks,
        CanonicalKey::CtrPercent,
        CanonicalKey::Frequency,
        CanonicalKey::Roas,
        CanonicalKey::Purchases,
        CanonicalKey::PurchaseValue,
        CanonicalKey::AddsToCart,
        CanonicalKey::Ctr7dPercent,
        CanonicalKey::CtrPrev7Percent,
        CanonicalKey::Status,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            CanonicalKey::CampaignName => "campaign_name",
            CanonicalKey::AdSetName => "ad_set_name",
            CanonicalKey::AdName => "ad_name",
            CanonicalKey::AdId => "ad_id",
            CanonicalKey::Spend => "spend",
            CanonicalKey::Impressions => "impressions",
            CanonicalKey::Clicks => "clicks",
            CanonicalKey::CtrPercent => "ctr_percent",
            CanonicalKey::Frequency => "frequency",
            CanonicalKey::Roas => "roas",
            CanonicalKey::Purchases => "purchases",
            CanonicalKey::PurchaseValue => "purchase_value",
            CanonicalKey::AddsToCart => "adds_to_cart",
            CanonicalKey::Ctr7dPercent => "ctr_7d_percent",
            CanonicalKey::CtrPrev7Percent => "ctr_prev7_percent",
            CanonicalKey::Status => "status",
        }
    }

    /// Accepted raw header spellings, lower-cased, in match-priority order.
    pub fn aliases(self) -> &'static [&'static str] {
        match self {
            CanonicalKey::CampaignName => &["campaign name", "campaign"],
            CanonicalKey::AdSetName => &["ad set name", "ad set"],
            CanonicalKey::AdName => &["ad name", "ad"],
            CanonicalKey::AdId => &["ad id", "ad identifier"],
            CanonicalKey::Spend => &["spend", "amount spent"],
            CanonicalKey::Impressions => &["impressions", "impr"],
            CanonicalKey::Clicks => &["clicks", "link clicks"],
            CanonicalKey::CtrPercent => &["ctr %", "ctr", "click through rate"],
            CanonicalKey::Frequency => &["frequency"],
            CanonicalKey::Roas => &["roas", "return on ad spend"],
            CanonicalKey::Purchases => &["purchases", "purchase"],
            CanonicalKey::PurchaseValue => &["purchase value", "conversion value", "revenue"],
            CanonicalKey::AddsToCart => &["adds to cart", "atc"],
            CanonicalKey::Ctr7dPercent => &["ctr 7d %", "ctr 7 day"],
            CanonicalKey::CtrPrev7Percent => &["ctr prev7 %", "ctr previous 7"],
            CanonicalKey::Status => &["status"],
        }
    }
}

impl fmt::Display for CanonicalKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Closed status vocabulary carried through from source rows.
///
/// Anything outside this set degrades to an absent status rather than an
/// error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Pause,
    Fix,
    Test,
    Keep,
}

impl FromStr for Status {
    type Err = ();

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "pause" => Ok(Status::Pause),
            "fix" => Ok(Status::Fix),
            "test" => Ok(Status::Test),
            "keep" => Ok(Status::Keep),
            _ => Err(()),
        }
    }
}
