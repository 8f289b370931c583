use std::collections::HashMap;

use indexmap::IndexMap;
use uuid::Uuid;

use crate::constants::{LAT_MAX, LAT_MIN, LON_MAX, LON_MIN};
use crate::dates::{parse_date, ParsedDate};
use crate::geometry::{lat_bin, lon_bin, normalize_longitude};
use crate::import::csv::RawRow;
use crate::models::{is_valid_band_raw, BandCategory, Marker};

/// The only row-level skip reason currently produced
pub const SKIP_REASON_COORDS: &str = "Invalid or out-of-range lat/lon";

/// Coordinates are rounded to 6 decimals when forming location keys
const KEY_SCALE: f64 = 1e6;

const COMMENT_SEPARATOR: &str = "; ";

/// A row excluded from all downstream processing, with its file line number
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedRow {
    pub line_number: usize,
    pub reason: &'static str,
}

/// One member row of a location set
#[derive(Debug, Clone, PartialEq)]
pub struct SetMember {
    pub band_raw: String,
    pub date: Option<ParsedDate>,
    pub comment: String,
}

/// The aggregation unit for classification: all rows sharing rounded
/// coordinates and a (case-insensitive) label.
#[derive(Debug, Clone, PartialEq)]
pub struct LocationSet {
    /// Representative position: the first member's parsed latitude and
    /// normalized longitude
    pub lat: f64,
    pub lon: f64,
    /// First-seen spelling of the label
    pub label: String,
    pub lat_bin: i32,
    pub lon_bin: i32,
    pub members: Vec<SetMember>,
    /// Earliest valid date among members; ties keep the first encountered
    pub earliest: Option<ParsedDate>,
    /// Distinct explicit band types among members, in encounter order
    pub explicit_types: Vec<BandCategory>,
    /// Unique non-empty member comments, in encounter order
    pub comments: Vec<String>,
    /// Resolved band category; meaningful once classification has run
    pub category: BandCategory,
    /// First member's recognized raw columns, for the popup display table
    pub display_fields: IndexMap<String, String>,
}

impl LocationSet {
    #[must_use]
    pub fn merged_comment(&self) -> String {
        self.comments.join(COMMENT_SEPARATOR)
    }
}

/// Output of the grouping and resolution engine
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Classification {
    pub sets: Vec<LocationSet>,
    pub skipped: Vec<SkippedRow>,
}

/// Group raw rows into location sets and resolve every set's band category.
///
/// Deterministic: rows are processed in their original order, which fixes
/// first-seen display fields, earliest-date tie-breaks, and set ordering.
/// Rows with invalid coordinates land in the skip report; they never abort
/// the batch.
#[must_use]
pub fn classify_rows(rows: &[RawRow]) -> Classification {
    let mut classification = group_rows(rows);
    resolve_explicit(&mut classification.sets);
    resolve_by_epoch(&mut classification.sets);
    classification
}

type LocationKey = (i64, i64, String);

fn location_key(lat: f64, lon: f64, label: &str) -> LocationKey {
    #[allow(clippy::cast_possible_truncation)]
    let lat_key = (lat * KEY_SCALE).round() as i64;
    #[allow(clippy::cast_possible_truncation)]
    let lon_key = (lon * KEY_SCALE).round() as i64;
    (lat_key, lon_key, label.trim().to_lowercase())
}

/// Validate, bin and bucket rows by location key.
fn group_rows(rows: &[RawRow]) -> Classification {
    let mut buckets: IndexMap<LocationKey, LocationSet> = IndexMap::new();
    let mut skipped = Vec::new();

    for row in rows {
        let lat: Option<f64> = row.lat.trim().parse().ok();
        let lon: Option<f64> = row.lon.trim().parse().ok();

        let (Some(lat), Some(lon)) = (lat, lon) else {
            skipped.push(SkippedRow {
                line_number: row.line_number,
                reason: SKIP_REASON_COORDS,
            });
            continue;
        };
        if !lat.is_finite()
            || !lon.is_finite()
            || !(LAT_MIN..=LAT_MAX).contains(&lat)
            || !(LON_MIN..=LON_MAX).contains(&lon)
        {
            skipped.push(SkippedRow {
                line_number: row.line_number,
                reason: SKIP_REASON_COORDS,
            });
            continue;
        }

        let lon = normalize_longitude(lon);
        let member = SetMember {
            band_raw: row.band.clone(),
            date: parse_date(&row.date),
            comment: row.comment.trim().to_string(),
        };

        let set = buckets
            .entry(location_key(lat, lon, &row.label))
            .or_insert_with(|| LocationSet {
                lat,
                lon,
                label: row.label.trim().to_string(),
                lat_bin: lat_bin(lat),
                lon_bin: lon_bin(lon),
                members: Vec::new(),
                earliest: None,
                explicit_types: Vec::new(),
                comments: Vec::new(),
                category: BandCategory::None,
                display_fields: row.fields.clone(),
            });

        if let Some(date) = &member.date {
            let is_earlier = set
                .earliest
                .as_ref()
                .is_none_or(|current| date.timestamp_ms < current.timestamp_ms);
            if is_earlier {
                set.earliest = Some(date.clone());
            }
        }

        if is_valid_band_raw(&member.band_raw) {
            let explicit = BandCategory::normalize(&member.band_raw);
            if !set.explicit_types.contains(&explicit) {
                set.explicit_types.push(explicit);
            }
        }

        if !member.comment.is_empty() && !set.comments.contains(&member.comment) {
            set.comments.push(member.comment.clone());
        }

        set.members.push(member);
    }

    Classification {
        sets: buckets.into_values().collect(),
        skipped,
    }
}

/// Resolve sets that carry at least one explicit band type.
///
/// Explicit data always wins over dates: a single type resolves to itself,
/// a pair where one is `none` resolves to the other, and conflicting strong
/// categories merge to `both`.
fn resolve_explicit(sets: &mut [LocationSet]) {
    for set in sets.iter_mut() {
        set.category = match set.explicit_types.as_slice() {
            [] => continue,
            [single] => *single,
            [BandCategory::None, other] | [other, BandCategory::None] => *other,
            _ => BandCategory::Both,
        };
    }
}

/// Resolve sets with zero explicit types via the global epoch tie-break.
///
/// Epoch indexes (minimum earliest-timestamp per longitude and per latitude
/// bin) are built across all dated sets, including those already resolved
/// explicitly. The first claimant of a bin's epoch wins that axis.
fn resolve_by_epoch(sets: &mut [LocationSet]) {
    let mut stripe_epochs: HashMap<i32, i64> = HashMap::new();
    let mut ring_epochs: HashMap<i32, i64> = HashMap::new();

    for set in sets.iter() {
        let Some(earliest) = &set.earliest else {
            continue;
        };
        let ts = earliest.timestamp_ms;
        stripe_epochs
            .entry(set.lon_bin)
            .and_modify(|epoch| *epoch = (*epoch).min(ts))
            .or_insert(ts);
        ring_epochs
            .entry(set.lat_bin)
            .and_modify(|epoch| *epoch = (*epoch).min(ts))
            .or_insert(ts);
    }

    for set in sets.iter_mut() {
        if !set.explicit_types.is_empty() {
            continue;
        }

        let Some(earliest) = &set.earliest else {
            set.category = BandCategory::None;
            continue;
        };

        let ts = earliest.timestamp_ms;
        let claims_stripe = stripe_epochs.get(&set.lon_bin) == Some(&ts);
        let claims_ring = ring_epochs.get(&set.lat_bin) == Some(&ts);

        set.category = match (claims_ring, claims_stripe) {
            (true, true) => BandCategory::Both,
            (true, false) => BandCategory::Ring,
            (false, true) => BandCategory::Stripe,
            (false, false) => BandCategory::None,
        };
    }
}

/// Construct one marker per resolved location set.
///
/// The display table starts from the first-seen raw columns and appends the
/// canonical computed fields, overwriting raw values where names collide.
#[must_use]
pub fn markers_from_sets(sets: &[LocationSet]) -> Vec<Marker> {
    sets.iter()
        .map(|set| {
            let mut fields = set.display_fields.clone();
            fields.insert("lat".to_string(), set.lat.to_string());
            fields.insert("lon".to_string(), set.lon.to_string());
            fields.insert("label".to_string(), set.label.clone());
            fields.insert("band_type".to_string(), set.category.as_str().to_string());
            fields.insert(
                "date".to_string(),
                set.earliest
                    .as_ref()
                    .map(|date| date.original.clone())
                    .unwrap_or_default(),
            );
            fields.insert("comment".to_string(), set.merged_comment());
            fields.insert("lat_bin".to_string(), set.lat_bin.to_string());
            fields.insert("lon_bin".to_string(), set.lon_bin.to_string());

            Marker {
                id: Uuid::new_v4(),
                lat: set.lat,
                lon: set.lon,
                label: set.label.clone(),
                category: set.category,
                fields,
            }
        })
        .collect()
}

/// Format the human-readable row-level error report.
#[must_use]
pub fn format_skip_report(skipped: &[SkippedRow], unknown_columns: &[String]) -> String {
    let mut lines = Vec::new();

    if !skipped.is_empty() {
        lines.push(format!("Skipped {} row(s):", skipped.len()));
        for skip in skipped {
            lines.push(format!("  line {}: {}", skip.line_number, skip.reason));
        }
    }

    if !unknown_columns.is_empty() {
        lines.push(format!(
            "Unrecognized column(s) ignored: {}",
            unknown_columns.join(", ")
        ));
    }

    lines.join("\n")
}
