use leptos::{component, view, Callable, Callback, IntoView, ReadSignal, Show, SignalWith};

use crate::models::BandCategory;
use crate::state::{AppEvent, WorldState};

/// One checkbox per band category, plus a warning once everything is
/// filtered out.
#[component]
pub fn FilterControls(
    state: ReadSignal<WorldState>,
    dispatch: Callback<AppEvent>,
) -> impl IntoView {
    view! {
        <div class="filter-controls">
            {BandCategory::ALL
                .into_iter()
                .map(|category| {
                    view! {
                        <label class="filter-option">
                            <input
                                type="checkbox"
                                prop:checked=move || state.with(|s| s.filter.allows(category))
                                on:change=move |_| dispatch.call(AppEvent::FilterToggled { category })
                            />
                            {category.as_str()}
                        </label>
                    }
                })
                .collect::<Vec<_>>()}
            <Show when=move || state.with(|s| s.filter.is_empty())>
                <span class="filter-warning">
                    "No categories selected - nothing is shown"
                </span>
            </Show>
        </div>
    }
}
