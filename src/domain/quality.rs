// Quality classes and their display metadata
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QualityClass {
    Baik,
    Sedang,
    Buruk,
}

impl QualityClass {
    pub const ALL: [QualityClass; 3] = [QualityClass::Baik, QualityClass::Sedang, QualityClass::Buruk];

    pub fn score(&self) -> u8 {
        match self {
            QualityClass::Baik => 85,
            QualityClass::Sedang => 60,
            QualityClass::Buruk => 30,
        }
    }

    /// Hex colour used by dashboards (green, amber, red).
    pub fn color(&self) -> &'static str {
        match self {
            QualityClass::Baik => "#10b981",
            QualityClass::Sedang => "#f59e0b",
            QualityClass::Buruk => "#ef4444",
        }
    }

    pub fn recommendation(&self) -> &'static str {
        match self {
            QualityClass::Baik => {
                "Susu dalam kondisi baik dan layak konsumsi. Simpan pada suhu 4-8°C."
            }
            QualityClass::Sedang => {
                "Susu masih layak konsumsi namun perlu segera digunakan. Perhatikan suhu penyimpanan dan kebersihan."
            }
            QualityClass::Buruk => {
                "Susu tidak layak konsumsi. Buang susu dan pastikan kebersihan peralatan pemerahan serta kondisi penyimpanan."
            }
        }
    }

    /// Chart legend label, e.g. "Kualitas Baik".
    pub fn distribution_label(&self) -> String {
        format!("Kualitas {}", self)
    }
}

impl fmt::Display for QualityClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            QualityClass::Baik => "Baik",
            QualityClass::Sedang => "Sedang",
            QualityClass::Buruk => "Buruk",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProcessedResult {
    pub quality: QualityClass,
    pub score: u8,
    pub color: &'static str,
    pub recommendation: &'static str,
}

impl From<QualityClass> for ProcessedResult {
    fn from(quality: QualityClass) -> Self {
        Self {
            quality,
            score: quality.score(),
            color: quality.color(),
            recommendation: quality.recommendation(),
        }
    }
}
