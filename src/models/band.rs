use bitflags::bitflags;
use serde::{Deserialize, Serialize};

/// Band category assigned to a location.
///
/// `Ring` claims priority within the location's 10° latitude band, `Stripe`
/// within its 10° longitude band, `Both` claims both axes, `None` neither.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BandCategory {
    Ring,
    Stripe,
    Both,
    None,
}

impl BandCategory {
    pub const ALL: [Self; 4] = [Self::Ring, Self::Stripe, Self::Both, Self::None];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ring => "ring",
            Self::Stripe => "stripe",
            Self::Both => "both",
            Self::None => "none",
        }
    }

    /// Exact-token lookup over the four canonical words.
    #[must_use]
    pub fn from_exact(token: &str) -> Option<Self> {
        match token {
            "ring" => Some(Self::Ring),
            "stripe" => Some(Self::Stripe),
            "both" => Some(Self::Both),
            "none" => Some(Self::None),
            _ => Option::None,
        }
    }

    /// Map an arbitrary string to a band category, tolerating the free-text
    /// category columns found in uploaded datasets.
    ///
    /// Precedence: exact canonical token, explicit shorthand ("rs"/"sr"),
    /// first-letter prefix (n/b/s/r), the words "stripe"/"ring" anywhere in
    /// the token, then whichever of the letters 'r'/'s' are present (both
    /// letters classify as `Both`). Absence of input defaults to `Both`.
    /// This function never fails.
    #[must_use]
    pub fn normalize(raw: &str) -> Self {
        let token = raw.trim().to_lowercase();
        if token.is_empty() {
            return Self::Both;
        }

        if let Some(exact) = Self::from_exact(&token) {
            return exact;
        }

        if token == "rs" || token == "sr" {
            return Self::Both;
        }

        match token.chars().next() {
            Some('n') => return Self::None,
            Some('b') => return Self::Both,
            Some('s') => return Self::Stripe,
            Some('r') => return Self::Ring,
            _ => {}
        }

        if token.contains("stripe") {
            return Self::Stripe;
        }
        if token.contains("ring") {
            return Self::Ring;
        }

        match (token.contains('r'), token.contains('s')) {
            (true, true) | (false, false) => Self::Both,
            (true, false) => Self::Ring,
            (false, true) => Self::Stripe,
        }
    }
}

/// Strict predicate: true only when the trimmed, lower-cased raw string is
/// exactly one of the four canonical words. Distinguishes explicit
/// classifications from ones [`BandCategory::normalize`] merely guessed.
#[must_use]
pub fn is_valid_band_raw(raw: &str) -> bool {
    BandCategory::from_exact(&raw.trim().to_lowercase()).is_some()
}

bitflags! {
    /// The active category filter: the subset of band categories whose
    /// markers are currently shown.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct BandFilter: u8 {
        const RING = 1;
        const STRIPE = 1 << 1;
        const BOTH = 1 << 2;
        const NONE = 1 << 3;
    }
}

impl BandFilter {
    #[must_use]
    pub const fn flag(category: BandCategory) -> Self {
        match category {
            BandCategory::Ring => Self::RING,
            BandCategory::Stripe => Self::STRIPE,
            BandCategory::Both => Self::BOTH,
            BandCategory::None => Self::NONE,
        }
    }

    #[must_use]
    pub fn allows(self, category: BandCategory) -> bool {
        self.contains(Self::flag(category))
    }
}

impl Default for BandFilter {
    fn default() -> Self {
        Self::all()
    }
}

// Custom serialization to store as u8
impl Serialize for BandFilter {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_u8(self.bits())
    }
}

impl<'de> Deserialize<'de> for BandFilter {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let bits = u8::deserialize(deserializer)?;
        Self::from_bits(bits).ok_or_else(|| serde::de::Error::custom("Invalid BandFilter bits"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_exact_tokens() {
        assert_eq!(BandCategory::normalize("ring"), BandCategory::Ring);
        assert_eq!(BandCategory::normalize(" Stripe "), BandCategory::Stripe);
        assert_eq!(BandCategory::normalize("BOTH"), BandCategory::Both);
        assert_eq!(BandCategory::normalize("none"), BandCategory::None);
    }

    #[test]
    fn test_normalize_shorthand_pairs() {
        assert_eq!(BandCategory::normalize("rs"), BandCategory::Both);
        assert_eq!(BandCategory::normalize("SR"), BandCategory::Both);
    }

    #[test]
    fn test_normalize_prefix() {
        assert_eq!(BandCategory::normalize("n/a"), BandCategory::None);
        assert_eq!(BandCategory::normalize("banded"), BandCategory::Both);
        assert_eq!(BandCategory::normalize("solid"), BandCategory::Stripe);
        assert_eq!(BandCategory::normalize("red"), BandCategory::Ring);
    }

    #[test]
    fn test_normalize_substring_words() {
        assert_eq!(BandCategory::normalize("pinstripe"), BandCategory::Stripe);
        assert_eq!(BandCategory::normalize("o-ring"), BandCategory::Ring);
    }

    #[test]
    fn test_normalize_letter_fallback() {
        // Contains both 'r' and 's': deliberately mapped to Both
        assert_eq!(BandCategory::normalize("yards"), BandCategory::Both);
        assert_eq!(BandCategory::normalize("far"), BandCategory::Ring);
        assert_eq!(BandCategory::normalize("gas"), BandCategory::Stripe);
        assert_eq!(BandCategory::normalize("1234"), BandCategory::Both);
    }

    #[test]
    fn test_normalize_empty_defaults_to_both() {
        assert_eq!(BandCategory::normalize(""), BandCategory::Both);
        assert_eq!(BandCategory::normalize("   "), BandCategory::Both);
    }

    #[test]
    fn test_is_valid_band_raw() {
        assert!(is_valid_band_raw("ring"));
        assert!(is_valid_band_raw("  NONE "));
        assert!(!is_valid_band_raw("rs"));
        assert!(!is_valid_band_raw("ringed"));
        assert!(!is_valid_band_raw(""));
    }

    #[test]
    fn test_filter_allows() {
        let filter = BandFilter::RING | BandFilter::BOTH;
        assert!(filter.allows(BandCategory::Ring));
        assert!(filter.allows(BandCategory::Both));
        assert!(!filter.allows(BandCategory::Stripe));
        assert!(!filter.allows(BandCategory::None));
    }

    #[test]
    fn test_filter_default_allows_everything() {
        let filter = BandFilter::default();
        for category in BandCategory::ALL {
            assert!(filter.allows(category));
        }
    }
}
