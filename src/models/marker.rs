use indexmap::IndexMap;
use uuid::Uuid;

use super::BandCategory;

/// A renderable map entity, derived 1:1 from a resolved location set.
///
/// `fields` is the popup display table: the first-seen raw columns of the
/// set followed by the canonical computed fields, in insertion order.
#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub id: Uuid,
    pub lat: f64,
    pub lon: f64,
    pub label: String,
    pub category: BandCategory,
    pub fields: IndexMap<String, String>,
}
