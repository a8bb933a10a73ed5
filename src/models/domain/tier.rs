use serde::{Deserialize, Serialize};

/// Qualitative buckets shown next to the numeric result. The bands are
/// inclusive on both ends and together cover 0..=100 with no gaps and no
/// overlaps.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResultTier {
    Exploring,
    Emerging,
    Ready,
}

impl ResultTier {
    pub const BANDS: [(ResultTier, i32, i32); 3] = [
        (ResultTier::Exploring, 0, 33),
        (ResultTier::Emerging, 34, 66),
        (ResultTier::Ready, 67, 100),
    ];

    pub fn for_percentage(percentage: i32) -> Self {
        match percentage {
            i32::MIN..=33 => ResultTier::Exploring,
            34..=66 => ResultTier::Emerging,
            _ => ResultTier::Ready,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ResultTier::Exploring => "Exploring",
            ResultTier::Emerging => "Emerging",
            ResultTier::Ready => "Ready",
        }
    }
}
