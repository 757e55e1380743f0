// Feature derivation - raw hardware measurements to classifier features
use crate::domain::reading::{FeatureVector, RawReading};

/// Colour used when the `rgb` field cannot be parsed (pure white).
pub const DEFAULT_COLOUR: f64 = 255.0;
/// No turbidity sensor is fitted; readings are assumed clear.
pub const DEFAULT_TURBIDITY: f64 = 0.0;
/// No fat sensor is fitted; typical goat milk fat percentage.
pub const DEFAULT_FAT: f64 = 3.8;

/// Maps a raw reading onto the feature vector consumed by the decision tree.
///
/// Total: malformed sub-fields degrade to defaults instead of failing.
pub fn derive(raw: &RawReading) -> FeatureVector {
    FeatureVector {
        ph: Some(raw.ph),
        temperature: raw.temperature,
        taste: Some(taste_from_ph(raw.ph)),
        odor: Some(odor_from_mq135(raw.mq135)),
        fat: Some(DEFAULT_FAT),
        turbidity: Some(DEFAULT_TURBIDITY),
        colour: Some(colour_from_rgb(&raw.rgb)),
    }
}

/// Lower MQ135 readings mean fewer volatile compounds, i.e. fresher smell.
pub fn odor_from_mq135(mq135: f64) -> f64 {
    if mq135 < 70.0 {
        1.0
    } else if mq135 < 100.0 {
        0.0
    } else {
        -1.0
    }
}

pub fn taste_from_ph(ph: f64) -> f64 {
    if (6.4..=6.7).contains(&ph) {
        1.0
    } else if (6.2..=6.9).contains(&ph) {
        0.0
    } else {
        -1.0
    }
}

/// Rounded mean of an `"r,g,b"` triple, or [`DEFAULT_COLOUR`] if it does not parse.
pub fn colour_from_rgb(rgb: &str) -> f64 {
    match parse_rgb(rgb) {
        Some([r, g, b]) => ((r + g + b) as f64 / 3.0).round(),
        None => {
            tracing::debug!("Unparseable rgb value {:?}, falling back to white", rgb);
            DEFAULT_COLOUR
        }
    }
}

fn parse_rgb(rgb: &str) -> Option<[i64; 3]> {
    let parts: Vec<&str> = rgb.split(',').collect();
    if parts.len() != 3 {
        return None;
    }

    let mut components = [0i64; 3];
    for (slot, part) in components.iter_mut().zip(parts) {
        *slot = part.trim().parse().ok()?;
    }
    Some(components)
}
