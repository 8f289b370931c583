use crate::geometry::{
    circle_intersects_rect, line_segments_intersect, segment_intersects_rect, Rect,
};

// Label placement constants
const LABEL_PADDING: f64 = 4.0;
const VIEWPORT_MARGIN: f64 = 4.0;
const CARDINAL_GAP: f64 = 14.0;
const RING_RADIUS_STEP: f64 = 18.0;
const RING_ANGLE_STEP_DEG: usize = 30;
const LEADER_MIN_DISTANCE: f64 = 60.0;
const LEADER_CONTROL_OFFSET: f64 = 12.0;
const RECT_OVERLAP_PENALTY: u32 = 1000;
const LEADER_CROSSING_PENALTY: u32 = 100;

/// Source of rendered text dimensions.
///
/// The map canvas implements this with `CanvasRenderingContext2d` text
/// metrics; tests use a fixed-width measurer.
pub trait MeasureText {
    /// Width and height of the rendered text, in pixels
    fn measure(&self, text: &str) -> (f64, f64);
}

/// A marker projected into screen space, ready for label placement
#[derive(Debug, Clone, PartialEq)]
pub struct ScreenMarker {
    /// Index into the caller's marker list
    pub index: usize,
    pub x: f64,
    pub y: f64,
    /// Icon footprint radius in pixels
    pub radius: f64,
    pub label: String,
}

/// Quadratic leader curve from a marker to its displaced label
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LeaderLine {
    pub from: (f64, f64),
    pub control: (f64, f64),
    pub to: (f64, f64),
}

/// A label rectangle assigned to one visible marker
#[derive(Debug, Clone, PartialEq)]
pub struct LabelPlacement {
    pub marker_index: usize,
    pub rect: Rect,
    pub leader: Option<LeaderLine>,
}

struct PlacedLabel {
    rect: Rect,
    leader_segment: Option<((f64, f64), (f64, f64))>,
}

/// Assign each labeled on-screen marker a non-overlapping label rectangle.
///
/// Greedy and order-dependent by design: markers are processed in list
/// order, each taking the lowest-scoring candidate given the labels placed
/// so far (first minimum wins ties). This is not a global optimizer; the
/// result depends on marker order.
#[must_use]
pub fn place_labels(
    markers: &[ScreenMarker],
    viewport: (f64, f64),
    measurer: &dyn MeasureText,
) -> Vec<LabelPlacement> {
    let (view_width, view_height) = viewport;
    let mut placements = Vec::new();
    let mut placed: Vec<PlacedLabel> = Vec::new();

    for marker in markers {
        if marker.label.is_empty() {
            continue;
        }
        // Off-screen markers get no label and no leader line
        if marker.x < 0.0 || marker.x > view_width || marker.y < 0.0 || marker.y > view_height {
            continue;
        }

        let (text_width, text_height) = measurer.measure(&marker.label);
        let width = text_width + 2.0 * LABEL_PADDING;
        let height = text_height + 2.0 * LABEL_PADDING;

        let candidates = generate_candidates(marker, width, height, viewport, markers);
        if candidates.is_empty() {
            continue;
        }

        let mut best: Option<(u32, Rect)> = None;
        for candidate in candidates {
            let score = score_candidate(&candidate, (marker.x, marker.y), &placed);
            let improves = best
                .as_ref()
                .is_none_or(|(best_score, _)| score < *best_score);
            if improves {
                best = Some((score, candidate));
            }
        }

        let Some((_, rect)) = best else {
            continue;
        };

        let leader = build_leader((marker.x, marker.y), &rect);
        placed.push(PlacedLabel {
            rect,
            leader_segment: leader.map(|line| (line.from, line.to)),
        });
        placements.push(LabelPlacement {
            marker_index: marker.index,
            rect,
            leader,
        });
    }

    placements
}

/// Generate the candidate rectangles for one marker: the four cardinal
/// offsets first, then concentric rings when all cardinals are unusable.
fn generate_candidates(
    marker: &ScreenMarker,
    width: f64,
    height: f64,
    viewport: (f64, f64),
    markers: &[ScreenMarker],
) -> Vec<Rect> {
    let offset = marker.radius + CARDINAL_GAP;
    let cardinal = [
        // Right, left, above, below
        Rect::new(marker.x + offset, marker.y - height / 2.0, width, height),
        Rect::new(marker.x - offset - width, marker.y - height / 2.0, width, height),
        Rect::new(marker.x - width / 2.0, marker.y - offset - height, width, height),
        Rect::new(marker.x - width / 2.0, marker.y + offset, width, height),
    ];

    let valid: Vec<Rect> = cardinal
        .into_iter()
        .filter(|rect| candidate_is_usable(rect, viewport, markers, marker.index))
        .collect();
    if !valid.is_empty() {
        return valid;
    }

    // All cardinals blocked or out of view: sample rings of increasing
    // radius around the marker, up to half the smaller viewport dimension
    let max_radius = viewport.0.min(viewport.1) / 2.0;
    let mut candidates = Vec::new();
    let mut radius = RING_RADIUS_STEP;
    while radius <= max_radius {
        for angle_deg in (0..360).step_by(RING_ANGLE_STEP_DEG) {
            let angle = f64::from(angle_deg).to_radians();
            let center = (
                marker.x + radius * angle.cos(),
                marker.y + radius * angle.sin(),
            );
            let rect = Rect::centered_at(center, width, height);
            if candidate_is_usable(&rect, viewport, markers, marker.index) {
                candidates.push(rect);
            }
        }
        radius += RING_RADIUS_STEP;
    }

    candidates
}

/// A candidate must lie fully inside the viewport (with a small margin) and
/// must not overlap any other marker's circular footprint.
fn candidate_is_usable(
    rect: &Rect,
    viewport: (f64, f64),
    markers: &[ScreenMarker],
    own_index: usize,
) -> bool {
    let (view_width, view_height) = viewport;
    if rect.x < VIEWPORT_MARGIN
        || rect.y < VIEWPORT_MARGIN
        || rect.right() > view_width - VIEWPORT_MARGIN
        || rect.bottom() > view_height - VIEWPORT_MARGIN
    {
        return false;
    }

    !markers.iter().any(|other| {
        other.index != own_index && circle_intersects_rect((other.x, other.y), other.radius, rect)
    })
}

/// Score a candidate against the labels placed so far: overlapping an
/// existing label rectangle is far worse than a leader-line crossing.
fn score_candidate(rect: &Rect, marker: (f64, f64), placed: &[PlacedLabel]) -> u32 {
    let own_leader = (marker, rect.center());
    let mut score = 0;

    for existing in placed {
        if rect.intersects(&existing.rect) {
            score += RECT_OVERLAP_PENALTY;
        }
        if segment_intersects_rect(own_leader.0, own_leader.1, &existing.rect) {
            score += LEADER_CROSSING_PENALTY;
        }
        if let Some((from, to)) = existing.leader_segment {
            if line_segments_intersect(own_leader.0, own_leader.1, from, to) {
                score += LEADER_CROSSING_PENALTY;
            }
        }
    }

    score
}

/// A label placed beyond the distance threshold gets a gentle quadratic arc
/// from the marker, its control point offset perpendicular to the straight
/// connecting line.
fn build_leader(marker: (f64, f64), rect: &Rect) -> Option<LeaderLine> {
    let to = rect.center();
    let dx = to.0 - marker.0;
    let dy = to.1 - marker.1;
    let distance = (dx * dx + dy * dy).sqrt();

    if distance <= LEADER_MIN_DISTANCE {
        return None;
    }

    let midpoint = ((marker.0 + to.0) / 2.0, (marker.1 + to.1) / 2.0);
    let perpendicular = (-dy / distance, dx / distance);
    let control = (
        midpoint.0 + perpendicular.0 * LEADER_CONTROL_OFFSET,
        midpoint.1 + perpendicular.1 * LEADER_CONTROL_OFFSET,
    );

    Some(LeaderLine {
        from: marker,
        control,
        to,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Deterministic stand-in for canvas text metrics
    struct FixedMeasure;

    impl MeasureText for FixedMeasure {
        fn measure(&self, text: &str) -> (f64, f64) {
            #[allow(clippy::cast_precision_loss)]
            let width = text.chars().count() as f64 * 7.0;
            (width, 12.0)
        }
    }

    fn screen_marker(index: usize, x: f64, y: f64, label: &str) -> ScreenMarker {
        ScreenMarker {
            index,
            x,
            y,
            radius: 8.0,
            label: label.to_string(),
        }
    }

    const VIEWPORT: (f64, f64) = (800.0, 600.0);

    #[test]
    fn test_separated_markers_get_non_overlapping_labels() {
        let markers = vec![
            screen_marker(0, 150.0, 150.0, "Alpha"),
            screen_marker(1, 600.0, 150.0, "Beta"),
            screen_marker(2, 150.0, 450.0, "Gamma"),
            screen_marker(3, 600.0, 450.0, "Delta"),
        ];
        let placements = place_labels(&markers, VIEWPORT, &FixedMeasure);
        assert_eq!(placements.len(), 4);

        for (i, a) in placements.iter().enumerate() {
            for b in placements.iter().skip(i + 1) {
                assert!(
                    !a.rect.intersects(&b.rect),
                    "labels {} and {} overlap",
                    a.marker_index,
                    b.marker_index
                );
            }
        }
    }

    #[test]
    fn test_placement_is_deterministic() {
        let markers = vec![
            screen_marker(0, 100.0, 100.0, "One"),
            screen_marker(1, 112.0, 100.0, "Two"),
            screen_marker(2, 124.0, 104.0, "Three"),
        ];
        let first = place_labels(&markers, VIEWPORT, &FixedMeasure);
        let second = place_labels(&markers, VIEWPORT, &FixedMeasure);
        assert_eq!(first, second);
    }

    #[test]
    fn test_second_label_avoids_occupied_side() {
        // Two markers on the same horizontal line: the second marker's
        // right-side candidate overlaps the first label, so it must settle
        // on a candidate that does not
        let markers = vec![
            screen_marker(0, 100.0, 100.0, "First"),
            screen_marker(1, 110.0, 100.0, "Second"),
        ];
        let placements = place_labels(&markers, VIEWPORT, &FixedMeasure);
        assert_eq!(placements.len(), 2);
        assert!(!placements[0].rect.intersects(&placements[1].rect));
    }

    #[test]
    fn test_empty_labels_are_skipped() {
        let markers = vec![
            screen_marker(0, 100.0, 100.0, ""),
            screen_marker(1, 200.0, 200.0, "Named"),
        ];
        let placements = place_labels(&markers, VIEWPORT, &FixedMeasure);
        assert_eq!(placements.len(), 1);
        assert_eq!(placements[0].marker_index, 1);
    }

    #[test]
    fn test_offscreen_markers_are_skipped() {
        let markers = vec![
            screen_marker(0, -50.0, 100.0, "West"),
            screen_marker(1, 100.0, 700.0, "South"),
        ];
        let placements = place_labels(&markers, VIEWPORT, &FixedMeasure);
        assert!(placements.is_empty());
    }

    #[test]
    fn test_corner_marker_falls_back_to_ring_candidates() {
        // Too close to the corner for any cardinal candidate to fit
        let markers = vec![screen_marker(0, 6.0, 6.0, "Corner")];
        let placements = place_labels(&markers, VIEWPORT, &FixedMeasure);
        assert_eq!(placements.len(), 1);

        let rect = placements[0].rect;
        assert!(rect.x >= VIEWPORT_MARGIN);
        assert!(rect.y >= VIEWPORT_MARGIN);
        assert!(rect.right() <= VIEWPORT.0 - VIEWPORT_MARGIN);
        assert!(rect.bottom() <= VIEWPORT.1 - VIEWPORT_MARGIN);
    }

    #[test]
    fn test_no_viable_candidate_means_no_label() {
        // A viewport too small for the label anywhere
        let markers = vec![screen_marker(0, 10.0, 10.0, "An extremely long label")];
        let placements = place_labels(&markers, (24.0, 24.0), &FixedMeasure);
        assert!(placements.is_empty());
    }

    #[test]
    fn test_distant_label_gets_curved_leader() {
        let markers = vec![screen_marker(0, 400.0, 300.0, "A fairly long label text")];
        let placements = place_labels(&markers, VIEWPORT, &FixedMeasure);
        assert_eq!(placements.len(), 1);

        let leader = placements[0].leader.expect("distant label needs a leader");
        assert_eq!(leader.from, (400.0, 300.0));
        assert_eq!(leader.to, placements[0].rect.center());

        // Control point must sit off the straight connecting line
        let midpoint = (
            (leader.from.0 + leader.to.0) / 2.0,
            (leader.from.1 + leader.to.1) / 2.0,
        );
        let off_line = (leader.control.0 - midpoint.0).hypot(leader.control.1 - midpoint.1);
        assert!((off_line - LEADER_CONTROL_OFFSET).abs() < 1e-9);
    }

    #[test]
    fn test_nearby_label_has_no_leader() {
        let markers = vec![screen_marker(0, 400.0, 300.0, "Ab")];
        let placements = place_labels(&markers, VIEWPORT, &FixedMeasure);
        assert_eq!(placements.len(), 1);
        assert!(placements[0].leader.is_none());
    }

    #[test]
    fn test_first_cardinal_wins_ties() {
        // An unobstructed marker scores 0 for every cardinal candidate, so
        // the first generated one (right of the marker) must win
        let marker = screen_marker(0, 400.0, 300.0, "Tie");
        let placements = place_labels(&[marker.clone()], VIEWPORT, &FixedMeasure);
        let rect = placements[0].rect;
        assert!(rect.x > marker.x);
        assert!((rect.center().1 - marker.y).abs() < 1e-9);
    }
}
