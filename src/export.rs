use crate::classify::LocationSet;

/// Column order of the normalized export
pub const EXPORT_HEADER: [&str; 8] = [
    "lat", "lon", "label", "band_type", "date", "comment", "lat_bin", "lon_bin",
];

/// Serialize resolved location sets as a normalized CSV string.
///
/// One row per location set (input duplicates are collapsed); fields are
/// quote-escaped by the writer per standard CSV quoting.
///
/// # Errors
///
/// Returns an error if the CSV writer fails, which does not happen for
/// in-memory output with well-formed rows.
pub fn export_normalized(sets: &[LocationSet]) -> Result<String, String> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    writer
        .write_record(EXPORT_HEADER)
        .map_err(|err| err.to_string())?;

    for set in sets {
        writer
            .write_record([
                set.lat.to_string(),
                set.lon.to_string(),
                set.label.clone(),
                set.category.as_str().to_string(),
                set.earliest
                    .as_ref()
                    .map(|date| date.original.clone())
                    .unwrap_or_default(),
                set.merged_comment(),
                set.lat_bin.to_string(),
                set.lon_bin.to_string(),
            ])
            .map_err(|err| err.to_string())?;
    }

    let bytes = writer.into_inner().map_err(|err| err.to_string())?;
    String::from_utf8(bytes).map_err(|err| err.to_string())
}
