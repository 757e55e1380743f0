// Freshness classification from reading age
use serde::{Serialize, Serializer};
use std::fmt;

const MS_PER_HOUR: f64 = 3_600_000.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FreshnessClass {
    Segar,
    CukupSegar,
    TidakSegar,
}

impl fmt::Display for FreshnessClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            FreshnessClass::Segar => "Segar",
            FreshnessClass::CukupSegar => "Cukup Segar",
            FreshnessClass::TidakSegar => "Tidak Segar",
        };
        f.write_str(label)
    }
}

impl Serialize for FreshnessClass {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Labels a reading by its age at `now_ms`: under 2h fresh, under 6h fairly fresh.
///
/// Ages beyond the `i64` range saturate, so any timestamp yields a class.
pub fn assess_freshness(timestamp_ms: i64, now_ms: i64) -> FreshnessClass {
    let age_hours = now_ms.saturating_sub(timestamp_ms) as f64 / MS_PER_HOUR;

    match age_hours {
        h if h < 2.0 => FreshnessClass::Segar,
        h if h < 6.0 => FreshnessClass::CukupSegar,
        _ => FreshnessClass::TidakSegar,
    }
}
