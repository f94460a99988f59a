//! Affinity scoring and best-mask selection.
//!
//! When a field accepts several formats (a primary one plus affine ones),
//! every candidate is applied to the current text and scored. The candidate
//! with the highest score wins; on a tie the primary format wins.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::cache::MaskCache;
use crate::format::FormatError;
use crate::mask::Mask;
use crate::model::{CaretString, Notation};

/// How a mask is scored against a text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AffinityCalculationStrategy {
    /// Affinity reported by `apply`: +1 per consumed character, -1 per
    /// inserted or dropped one
    #[default]
    WholeString,
    /// Length of the common prefix of the input and the formatted text
    Prefix,
    /// Remaining room in the formatted text; `i32::MIN` when the input is
    /// longer than the mask's maximum text length
    Capacity,
    /// Remaining room in the extracted value; `i32::MIN` when the value
    /// overflows the mask's maximum value length
    ExtractedValueCapacity,
}

impl AffinityCalculationStrategy {
    pub const ALL: [Self; 4] = [
        Self::WholeString,
        Self::Prefix,
        Self::Capacity,
        Self::ExtractedValueCapacity,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::WholeString => "WHOLE_STRING",
            Self::Prefix => "PREFIX",
            Self::Capacity => "CAPACITY",
            Self::ExtractedValueCapacity => "EXTRACTED_VALUE_CAPACITY",
        }
    }

    /// Score `mask` against `text`. Higher is better.
    pub fn calculate_affinity_of_mask(self, mask: &Mask, text: &CaretString) -> i32 {
        match self {
            Self::WholeString => mask.apply(text).affinity,
            Self::Prefix => {
                let formatted = mask.apply(text).formatted_text.string;
                saturating_i32(common_prefix_len(&formatted, &text.string))
            }
            Self::Capacity => capacity_score(text.len(), mask.total_text_length()),
            Self::ExtractedValueCapacity => {
                let extracted_len = mask.apply(text).extracted_value.chars().count();
                capacity_score(extracted_len, mask.total_value_length())
            }
        }
    }
}

impl fmt::Display for AffinityCalculationStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unrecognized strategy name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidStrategy(pub String);

impl fmt::Display for InvalidStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown affinity strategy '{}' (expected one of: whole_string, prefix, capacity, extracted_value_capacity)",
            self.0
        )
    }
}

impl std::error::Error for InvalidStrategy {}

impl FromStr for AffinityCalculationStrategy {
    type Err = InvalidStrategy;

    /// Accepts `WHOLE_STRING`, `whole_string` and `whole-string` spellings.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_uppercase().replace('-', "_");
        Self::ALL
            .into_iter()
            .find(|strategy| strategy.as_str() == normalized)
            .ok_or_else(|| InvalidStrategy(s.to_string()))
    }
}

fn common_prefix_len(a: &str, b: &str) -> usize {
    a.chars()
        .zip(b.chars())
        .take_while(|(x, y)| x == y)
        .count()
}

fn capacity_score(len: usize, capacity: usize) -> i32 {
    if len > capacity {
        i32::MIN
    } else {
        -saturating_i32(capacity - len)
    }
}

fn saturating_i32(value: usize) -> i32 {
    i32::try_from(value).unwrap_or(i32::MAX)
}

/// A candidate mask with its score
#[derive(Debug, Clone)]
pub struct MaskAffinity {
    pub mask: Arc<Mask>,
    pub affinity: i32,
}

/// Score every candidate and return them best first.
///
/// Affine masks are sorted by descending affinity (stable, so equal scores
/// keep their configured order); the primary mask goes in front of the first
/// affine mask it scores at least as high as.
pub fn rank_masks(
    cache: &MaskCache,
    primary_format: &str,
    affine_formats: &[String],
    custom_notations: &[Notation],
    strategy: AffinityCalculationStrategy,
    right_to_left: bool,
    text: &CaretString,
) -> Result<Vec<MaskAffinity>, FormatError> {
    let primary = cache.get_or_create(primary_format, custom_notations, right_to_left)?;
    if affine_formats.is_empty() {
        return Ok(vec![MaskAffinity {
            affinity: strategy.calculate_affinity_of_mask(&primary, text),
            mask: primary,
        }]);
    }

    let primary_affinity = strategy.calculate_affinity_of_mask(&primary, text);

    let mut masks_and_affinities = affine_formats
        .iter()
        .map(|format| {
            let mask = cache.get_or_create(format, custom_notations, right_to_left)?;
            let affinity = strategy.calculate_affinity_of_mask(&mask, text);
            Ok(MaskAffinity { mask, affinity })
        })
        .collect::<Result<Vec<_>, FormatError>>()?;

    masks_and_affinities.sort_by(|a, b| b.affinity.cmp(&a.affinity));

    let insert_index = masks_and_affinities
        .iter()
        .position(|candidate| primary_affinity >= candidate.affinity)
        .unwrap_or(masks_and_affinities.len());
    masks_and_affinities.insert(
        insert_index,
        MaskAffinity {
            mask: primary,
            affinity: primary_affinity,
        },
    );

    Ok(masks_and_affinities)
}

/// Pick the mask that fits `text` best.
///
/// Same winner as the head of [`rank_masks`]: the primary mask wins ties,
/// and among affine masks the first configured one does.
pub fn select_best_mask(
    cache: &MaskCache,
    primary_format: &str,
    affine_formats: &[String],
    custom_notations: &[Notation],
    strategy: AffinityCalculationStrategy,
    right_to_left: bool,
    text: &CaretString,
) -> Result<Arc<Mask>, FormatError> {
    let primary = cache.get_or_create(primary_format, custom_notations, right_to_left)?;
    if affine_formats.is_empty() {
        return Ok(primary);
    }

    let mut best = MaskAffinity {
        affinity: strategy.calculate_affinity_of_mask(&primary, text),
        mask: primary,
    };
    for format in affine_formats {
        let mask = cache.get_or_create(format, custom_notations, right_to_left)?;
        let affinity = strategy.calculate_affinity_of_mask(&mask, text);
        if affinity > best.affinity {
            best = MaskAffinity { mask, affinity };
        }
    }

    tracing::debug!(
        format = best.mask.format(),
        affinity = best.affinity,
        %strategy,
        "selected mask"
    );
    Ok(best.mask)
}
