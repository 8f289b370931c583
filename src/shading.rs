use std::collections::BTreeSet;

use crate::constants::BIN_SIZE_DEG;
use crate::geometry::{lat_bin, lon_bin};
use crate::models::{BandCategory, BandFilter, Marker};

/// How a grid cell is shaded, in priority order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellShade {
    /// Cell sits in both a ring-shaded latitude bin and a stripe-shaded
    /// longitude bin
    Both,
    Ring,
    Stripe,
}

/// One shaded 10°×10° grid cell, identified by its bin pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShadedCell {
    pub lat_bin: i32,
    pub lon_bin: i32,
    pub shade: CellShade,
}

/// The occupied bins derived from the visible markers
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ShadedBins {
    /// Latitude bins containing a passing marker with category ring or both
    pub ring_lat_bins: BTreeSet<i32>,
    /// Longitude bins containing a passing marker with category stripe or both
    pub stripe_lon_bins: BTreeSet<i32>,
}

/// Derive the occupied bins from markers passing the active filter.
#[must_use]
pub fn shaded_bins(markers: &[Marker], filter: BandFilter) -> ShadedBins {
    let mut bins = ShadedBins::default();

    for marker in markers {
        if !filter.allows(marker.category) {
            continue;
        }

        if matches!(marker.category, BandCategory::Ring | BandCategory::Both) {
            bins.ring_lat_bins.insert(lat_bin(marker.lat));
        }
        if matches!(marker.category, BandCategory::Stripe | BandCategory::Both) {
            bins.stripe_lon_bins.insert(lon_bin(marker.lon));
        }
    }

    bins
}

/// Walk the full 18×36 grid and emit every shaded cell.
///
/// A cell is emitted when its latitude bin is ring-shaded or its longitude
/// bin is stripe-shaded; cells matching both get `CellShade::Both`.
#[must_use]
pub fn shaded_cells(bins: &ShadedBins) -> Vec<ShadedCell> {
    let mut cells = Vec::new();

    let mut lat = -90;
    while lat < 90 {
        let ring = bins.ring_lat_bins.contains(&lat);

        let mut lon = -180;
        while lon < 180 {
            let stripe = bins.stripe_lon_bins.contains(&lon);

            let shade = match (ring, stripe) {
                (true, true) => Some(CellShade::Both),
                (true, false) => Some(CellShade::Ring),
                (false, true) => Some(CellShade::Stripe),
                (false, false) => None,
            };
            if let Some(shade) = shade {
                cells.push(ShadedCell {
                    lat_bin: lat,
                    lon_bin: lon,
                    shade,
                });
            }

            lon += BIN_SIZE_DEG;
        }
        lat += BIN_SIZE_DEG;
    }

    cells
}

#[cfg(test)]
mod tests {
    use super::*;
    use indexmap::IndexMap;
    use uuid::Uuid;

    fn marker(lat: f64, lon: f64, category: BandCategory) -> Marker {
        Marker {
            id: Uuid::new_v4(),
            lat,
            lon,
            label: String::new(),
            category,
            fields: IndexMap::new(),
        }
    }

    #[test]
    fn test_ring_marker_shades_latitude_bin() {
        let markers = vec![marker(15.0, 100.0, BandCategory::Ring)];
        let bins = shaded_bins(&markers, BandFilter::default());
        assert!(bins.ring_lat_bins.contains(&10));
        assert!(bins.stripe_lon_bins.is_empty());
    }

    #[test]
    fn test_both_marker_shades_both_axes() {
        let markers = vec![marker(15.0, 105.0, BandCategory::Both)];
        let bins = shaded_bins(&markers, BandFilter::default());
        assert!(bins.ring_lat_bins.contains(&10));
        assert!(bins.stripe_lon_bins.contains(&100));
    }

    #[test]
    fn test_none_marker_shades_nothing() {
        let markers = vec![marker(15.0, 105.0, BandCategory::None)];
        let bins = shaded_bins(&markers, BandFilter::default());
        assert!(bins.ring_lat_bins.is_empty());
        assert!(bins.stripe_lon_bins.is_empty());
    }

    #[test]
    fn test_filter_excludes_categories() {
        let markers = vec![
            marker(15.0, 105.0, BandCategory::Ring),
            marker(-15.0, -105.0, BandCategory::Stripe),
        ];
        let bins = shaded_bins(&markers, BandFilter::STRIPE);
        assert!(bins.ring_lat_bins.is_empty());
        assert!(bins.stripe_lon_bins.contains(&-110));
    }

    #[test]
    fn test_cell_priority_both_over_single_axis() {
        let markers = vec![
            marker(15.0, 105.0, BandCategory::Ring),
            marker(-15.0, -105.0, BandCategory::Stripe),
        ];
        let bins = shaded_bins(&markers, BandFilter::default());
        let cells = shaded_cells(&bins);

        // The intersection of the ring row and the stripe column
        let crossing = cells
            .iter()
            .find(|cell| cell.lat_bin == 10 && cell.lon_bin == -110)
            .expect("crossing cell shaded");
        assert_eq!(crossing.shade, CellShade::Both);

        let ring_only = cells
            .iter()
            .find(|cell| cell.lat_bin == 10 && cell.lon_bin == 0)
            .expect("ring row cell shaded");
        assert_eq!(ring_only.shade, CellShade::Ring);

        let stripe_only = cells
            .iter()
            .find(|cell| cell.lat_bin == -90 && cell.lon_bin == -110)
            .expect("stripe column cell shaded");
        assert_eq!(stripe_only.shade, CellShade::Stripe);
    }

    #[test]
    fn test_cell_counts_for_one_row_and_one_column() {
        let markers = vec![
            marker(15.0, 105.0, BandCategory::Ring),
            marker(-15.0, -105.0, BandCategory::Stripe),
        ];
        let bins = shaded_bins(&markers, BandFilter::default());
        let cells = shaded_cells(&bins);
        // One full latitude row (36) plus one longitude column (18),
        // minus the doubly-counted crossing cell
        assert_eq!(cells.len(), 36 + 18 - 1);
    }

    #[test]
    fn test_empty_markers_shade_nothing() {
        let bins = shaded_bins(&[], BandFilter::default());
        assert!(shaded_cells(&bins).is_empty());
    }
}
