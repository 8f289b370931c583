use leptos::{component, view, IntoView, ReadSignal, SignalWith};

use crate::classify::format_skip_report;
use crate::state::WorldState;

/// The row-level error report: skipped input rows and unrecognized columns.
#[component]
pub fn ImportReport(state: ReadSignal<WorldState>) -> impl IntoView {
    let report = move || {
        state.with(|s| {
            if s.skipped.is_empty() && s.unknown_columns.is_empty() {
                None
            } else {
                Some(format_skip_report(&s.skipped, &s.unknown_columns))
            }
        })
    };

    view! {
        {move || report().map(|text| view! { <pre class="import-report">{text}</pre> })}
    }
}
