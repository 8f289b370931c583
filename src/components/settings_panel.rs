use leptos::{
    component, event_target_value, view, Callable, Callback, IntoView, ReadSignal, Signal, SignalGet,
    SignalWith, SignalWithUntracked,
};

use crate::components::window::Modal;
use crate::models::{BandCategory, MarkerShape};
use crate::state::{AppEvent, WorldState};

/// Per-category color, shape and size editors, persisted across sessions.
#[component]
pub fn SettingsPanel(
    is_open: ReadSignal<bool>,
    state: ReadSignal<WorldState>,
    dispatch: Callback<AppEvent>,
    on_close: impl Fn() + Clone + 'static,
) -> impl IntoView {
    view! {
        <Modal is_open=is_open title="Marker settings" on_close=on_close>
            <div class="settings-list">
                {BandCategory::ALL
                    .into_iter()
                    .map(|category| {
                        let style = Signal::derive(move || {
                            state.with(|s| s.styles.get(category).clone())
                        });

                        let update_color = move |ev: web_sys::Event| {
                            let mut styles = state.with_untracked(|s| s.styles.clone());
                            styles.get_mut(category).color = event_target_value(&ev);
                            dispatch.call(AppEvent::StylesChanged { styles });
                        };
                        let update_shape = move |ev: web_sys::Event| {
                            let Some(shape) = MarkerShape::from_str_opt(&event_target_value(&ev))
                            else {
                                return;
                            };
                            let mut styles = state.with_untracked(|s| s.styles.clone());
                            styles.get_mut(category).shape = shape;
                            dispatch.call(AppEvent::StylesChanged { styles });
                        };
                        let update_size = move |ev: web_sys::Event| {
                            let Ok(size) = event_target_value(&ev).parse::<f64>() else {
                                return;
                            };
                            let mut styles = state.with_untracked(|s| s.styles.clone());
                            styles.get_mut(category).size = size.clamp(4.0, 24.0);
                            dispatch.call(AppEvent::StylesChanged { styles });
                        };

                        view! {
                            <div class="settings-row">
                                <span class="settings-label">{category.as_str()}</span>
                                <input
                                    type="color"
                                    prop:value=move || style.get().color
                                    on:input=update_color
                                />
                                <select on:change=update_shape>
                                    {MarkerShape::ALL
                                        .into_iter()
                                        .map(|shape| {
                                            view! {
                                                <option
                                                    value=shape.as_str()
                                                    selected=move || style.get().shape == shape
                                                >
                                                    {shape.as_str()}
                                                </option>
                                            }
                                        })
                                        .collect::<Vec<_>>()}
                                </select>
                                <input
                                    type="number"
                                    min="4"
                                    max="24"
                                    prop:value=move || style.get().size.to_string()
                                    on:input=update_size
                                />
                            </div>
                        }
                    })
                    .collect::<Vec<_>>()}
            </div>
            <div class="settings-buttons">
                <button on:click=move |_| dispatch.call(AppEvent::StylesReset)>
                    "Restore defaults"
                </button>
            </div>
        </Modal>
    }
}
