use std::collections::HashMap;

use indexmap::IndexMap;

/// The recognized input columns, resolved from CSV headers by synonym.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Latitude,
    Longitude,
    Label,
    Band,
    Date,
    Comment,
}

impl Field {
    pub const ALL: [Self; 6] = [
        Self::Latitude,
        Self::Longitude,
        Self::Label,
        Self::Band,
        Self::Date,
        Self::Comment,
    ];

    /// Columns that must be present for a load to succeed
    pub const REQUIRED: [Self; 3] = [Self::Latitude, Self::Longitude, Self::Label];

    /// Canonical column name used in reports and exports
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Latitude => "lat",
            Self::Longitude => "lon",
            Self::Label => "label",
            Self::Band => "band_type",
            Self::Date => "date",
            Self::Comment => "comment",
        }
    }

    /// Accepted header spellings, matched case-insensitively
    #[must_use]
    pub const fn synonyms(self) -> &'static [&'static str] {
        match self {
            Self::Latitude => &["lat", "latitude"],
            Self::Longitude => &["lon", "lng", "long", "longitude"],
            Self::Label => &["label", "name", "title"],
            Self::Band => &["band_type", "band", "type", "stripe", "ring"],
            Self::Date => &["date"],
            Self::Comment => &["comment", "notes", "note", "description"],
        }
    }

    fn matches(self, header: &str) -> bool {
        let lower = header.trim().to_lowercase();
        self.synonyms().contains(&lower.as_str())
    }
}

/// Errors that abort a CSV load entirely.
///
/// Row-level problems never abort; they land in the classifier's skip
/// report instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportError {
    /// One or more of the required lat/lon/label columns is missing
    MissingColumns(Vec<&'static str>),
    /// The CSV reader could not produce records at all
    Read(String),
    /// The file had no header row
    Empty,
}

impl ImportError {
    /// Format a human-readable message describing the failure
    #[must_use]
    pub fn format_message(&self) -> String {
        match self {
            Self::MissingColumns(missing) => {
                format!("Missing required column(s): {}", missing.join(", "))
            }
            Self::Read(detail) => format!("Could not read CSV: {detail}"),
            Self::Empty => "The file contains no header row".to_string(),
        }
    }
}

/// One data row of the input file, still as raw strings.
///
/// `fields` holds the recognized raw columns (header spelled as in the
/// file); it seeds the marker display table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRow {
    /// 1-based file line number; the header is line 1
    pub line_number: usize,
    pub lat: String,
    pub lon: String,
    pub label: String,
    pub band: String,
    pub date: String,
    pub comment: String,
    pub fields: IndexMap<String, String>,
}

impl RawRow {
    /// Build a row from canonical values, as the manual add form does.
    #[must_use]
    pub fn from_values(
        lat: &str,
        lon: &str,
        label: &str,
        band: &str,
        date: &str,
        comment: &str,
    ) -> Self {
        let mut fields = IndexMap::new();
        for (field, value) in [
            (Field::Latitude, lat),
            (Field::Longitude, lon),
            (Field::Label, label),
            (Field::Band, band),
            (Field::Date, date),
            (Field::Comment, comment),
        ] {
            if !value.is_empty() {
                fields.insert(field.as_str().to_string(), value.to_string());
            }
        }

        Self {
            line_number: 0,
            lat: lat.to_string(),
            lon: lon.to_string(),
            label: label.to_string(),
            band: band.to_string(),
            date: date.to_string(),
            comment: comment.to_string(),
            fields,
        }
    }
}

/// Result of reading a CSV file: the raw rows plus the headers that did not
/// resolve to any recognized column.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ParsedCsv {
    pub rows: Vec<RawRow>,
    pub unknown_columns: Vec<String>,
}

/// Read CSV content into raw rows.
///
/// Headers resolve case-insensitively through each field's synonym table;
/// the first matching column wins per field. Unrecognized columns are
/// collected, not merged into row data.
///
/// # Errors
///
/// Returns an error if the file has no header row, the reader fails, or a
/// required column (lat, lon, label) cannot be resolved.
pub fn parse_rows(content: &str) -> Result<ParsedCsv, ImportError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(content.as_bytes());

    let mut records = reader.records();

    let header = match records.next() {
        Some(Ok(record)) => record,
        Some(Err(err)) => return Err(ImportError::Read(err.to_string())),
        None => return Err(ImportError::Empty),
    };

    let (columns, unknown_columns) = resolve_headers(&header)?;

    let mut rows = Vec::new();
    for (data_index, record) in records.enumerate() {
        let record = match record {
            Ok(record) => record,
            Err(err) => return Err(ImportError::Read(err.to_string())),
        };

        let value_of = |field: Field| -> String {
            columns
                .get(&field)
                .and_then(|&idx| record.get(idx))
                .unwrap_or("")
                .to_string()
        };

        // Raw values for the display table, in canonical field order
        let mut fields = IndexMap::new();
        for field in Field::ALL {
            if let Some(&idx) = columns.get(&field) {
                if let Some(value) = record.get(idx) {
                    if !value.is_empty() {
                        let name = header.get(idx).unwrap_or(field.as_str());
                        fields.insert(name.to_string(), value.to_string());
                    }
                }
            }
        }

        rows.push(RawRow {
            line_number: data_index + 2,
            lat: value_of(Field::Latitude),
            lon: value_of(Field::Longitude),
            label: value_of(Field::Label),
            band: value_of(Field::Band),
            date: value_of(Field::Date),
            comment: value_of(Field::Comment),
            fields,
        });
    }

    Ok(ParsedCsv {
        rows,
        unknown_columns,
    })
}

/// Resolve the header record into a field-to-column map.
fn resolve_headers(
    header: &csv::StringRecord,
) -> Result<(HashMap<Field, usize>, Vec<String>), ImportError> {
    let mut columns: HashMap<Field, usize> = HashMap::new();
    let mut unknown = Vec::new();

    for (idx, name) in header.iter().enumerate() {
        let matched = Field::ALL
            .into_iter()
            .find(|field| !columns.contains_key(field) && field.matches(name));

        match matched {
            Some(field) => {
                columns.insert(field, idx);
            }
            None => {
                if !name.trim().is_empty() {
                    unknown.push(name.trim().to_string());
                }
            }
        }
    }

    let missing: Vec<&'static str> = Field::REQUIRED
        .into_iter()
        .filter(|field| !columns.contains_key(field))
        .map(Field::as_str)
        .collect();

    if missing.is_empty() {
        Ok((columns, unknown))
    } else {
        Err(ImportError::MissingColumns(missing))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_rows_basic() {
        let content = "lat,lon,label\n1.5,2.5,Alpha\n-3,4,Beta\n";
        let parsed = parse_rows(content).expect("should parse");
        assert_eq!(parsed.rows.len(), 2);
        assert!(parsed.unknown_columns.is_empty());

        let first = &parsed.rows[0];
        assert_eq!(first.line_number, 2);
        assert_eq!(first.lat, "1.5");
        assert_eq!(first.lon, "2.5");
        assert_eq!(first.label, "Alpha");
        assert_eq!(first.band, "");
    }

    #[test]
    fn test_header_synonyms() {
        let content = "Latitude,LNG,Name,Type,Date,Notes\n1,2,X,ring,2000-01-01,hello\n";
        let parsed = parse_rows(content).expect("should parse");
        let row = &parsed.rows[0];
        assert_eq!(row.lat, "1");
        assert_eq!(row.lon, "2");
        assert_eq!(row.label, "X");
        assert_eq!(row.band, "ring");
        assert_eq!(row.date, "2000-01-01");
        assert_eq!(row.comment, "hello");
    }

    #[test]
    fn test_missing_required_columns() {
        let result = parse_rows("lat,label\n1,X\n");
        assert_eq!(result, Err(ImportError::MissingColumns(vec!["lon"])));

        let result = parse_rows("foo,bar\n1,2\n");
        assert_eq!(
            result,
            Err(ImportError::MissingColumns(vec!["lat", "lon", "label"]))
        );
    }

    #[test]
    fn test_unknown_columns_reported() {
        let content = "lat,lon,label,velocity\n1,2,X,99\n";
        let parsed = parse_rows(content).expect("should parse");
        assert_eq!(parsed.unknown_columns, vec!["velocity".to_string()]);
        // Unknown values are not merged into row display fields
        assert!(!parsed.rows[0].fields.contains_key("velocity"));
    }

    #[test]
    fn test_first_matching_column_wins() {
        let content = "lat,lon,label,name\n1,2,First,Second\n";
        let parsed = parse_rows(content).expect("should parse");
        assert_eq!(parsed.rows[0].label, "First");
        assert_eq!(parsed.unknown_columns, vec!["name".to_string()]);
    }

    #[test]
    fn test_display_fields_use_header_spelling() {
        let content = "Latitude,lon,label\n1,2,X\n";
        let parsed = parse_rows(content).expect("should parse");
        assert!(parsed.rows[0].fields.contains_key("Latitude"));
    }

    #[test]
    fn test_quoted_fields() {
        let content = "lat,lon,label\n1,2,\"Castle, Old\"\n";
        let parsed = parse_rows(content).expect("should parse");
        assert_eq!(parsed.rows[0].label, "Castle, Old");
    }

    #[test]
    fn test_short_rows_tolerated() {
        let content = "lat,lon,label,comment\n1,2,X\n";
        let parsed = parse_rows(content).expect("should parse");
        assert_eq!(parsed.rows[0].comment, "");
    }

    #[test]
    fn test_empty_file() {
        assert_eq!(parse_rows(""), Err(ImportError::Empty));
    }

    #[test]
    fn test_from_values_skips_empty_fields() {
        let row = RawRow::from_values("1", "2", "X", "", "", "");
        assert_eq!(row.fields.len(), 3);
        assert_eq!(row.lat, "1");
    }

    #[test]
    fn test_format_message() {
        let err = ImportError::MissingColumns(vec!["lat", "lon"]);
        assert_eq!(err.format_message(), "Missing required column(s): lat, lon");
    }
}
