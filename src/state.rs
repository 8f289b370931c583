use crate::classify::{classify_rows, markers_from_sets, LocationSet, SkippedRow};
use crate::import::csv::RawRow;
use crate::models::{BandCategory, BandFilter, CategoryStyles, Marker};

/// The complete application state: the raw rows plus everything derived
/// from them, the active filter, and the display settings.
///
/// Derived data is never mutated incrementally; the reducer rebuilds it
/// wholesale from the row list on every data change.
#[derive(Debug, Clone, PartialEq)]
pub struct WorldState {
    pub rows: Vec<RawRow>,
    pub sets: Vec<LocationSet>,
    pub markers: Vec<Marker>,
    pub skipped: Vec<SkippedRow>,
    pub unknown_columns: Vec<String>,
    pub filter: BandFilter,
    pub styles: CategoryStyles,
    pub status: Option<String>,
}

impl Default for WorldState {
    fn default() -> Self {
        Self {
            rows: Vec::new(),
            sets: Vec::new(),
            markers: Vec::new(),
            skipped: Vec::new(),
            unknown_columns: Vec::new(),
            filter: BandFilter::default(),
            styles: CategoryStyles::default(),
            status: None,
        }
    }
}

/// Events the UI dispatches into the reducer
#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    /// A CSV file was parsed successfully
    DatasetLoaded {
        rows: Vec<RawRow>,
        unknown_columns: Vec<String>,
    },
    /// A CSV load failed before producing rows (header error, read error)
    LoadFailed { message: String },
    /// A point was added through the manual entry form
    PointAdded { row: RawRow },
    /// Remove all data
    Cleared,
    /// Toggle one category in the filter
    FilterToggled { category: BandCategory },
    StylesChanged { styles: CategoryStyles },
    StylesReset,
}

/// Pure reducer: previous state + event -> next state.
///
/// Data events re-run the full grouping and resolution pipeline; filter and
/// style events leave derived data untouched.
#[must_use]
pub fn reduce(state: &WorldState, event: AppEvent) -> WorldState {
    match event {
        AppEvent::DatasetLoaded {
            rows,
            unknown_columns,
        } => {
            let mut next = state.clone();
            next.rows = rows;
            next.unknown_columns = unknown_columns;
            rebuild(&mut next);
            next
        }
        AppEvent::LoadFailed { message } => {
            let mut next = state.clone();
            next.status = Some(message);
            next
        }
        AppEvent::PointAdded { row } => {
            let mut next = state.clone();
            next.rows.push(row);
            rebuild(&mut next);
            next
        }
        AppEvent::Cleared => {
            let mut next = state.clone();
            next.rows.clear();
            next.unknown_columns.clear();
            rebuild(&mut next);
            next.status = None;
            next
        }
        AppEvent::FilterToggled { category } => {
            let mut next = state.clone();
            next.filter.toggle(BandFilter::flag(category));
            next
        }
        AppEvent::StylesChanged { styles } => {
            let mut next = state.clone();
            next.styles = styles;
            next
        }
        AppEvent::StylesReset => {
            let mut next = state.clone();
            next.styles = CategoryStyles::default();
            next
        }
    }
}

/// Re-derive sets, markers, skip report and the status line from the rows.
fn rebuild(state: &mut WorldState) {
    let classification = classify_rows(&state.rows);
    state.markers = markers_from_sets(&classification.sets);
    state.sets = classification.sets;
    state.skipped = classification.skipped;

    state.status = if state.rows.is_empty() {
        None
    } else if state.skipped.is_empty() {
        Some(format!("{} location(s) loaded", state.sets.len()))
    } else {
        Some(format!(
            "{} location(s) loaded, {} row(s) skipped",
            state.sets.len(),
            state.skipped.len()
        ))
    };
}
