use leptos::{component, view, IntoView, ReadSignal, SignalGet, SignalSet, WriteSignal};

use crate::models::Marker;

/// Side panel listing every known attribute of the selected marker.
#[component]
pub fn MarkerDetails(
    selected: ReadSignal<Option<Marker>>,
    set_selected: WriteSignal<Option<Marker>>,
) -> impl IntoView {
    view! {
        {move || {
            selected.get().map(|marker| {
                view! {
                    <aside class="marker-details">
                        <div class="marker-details-header">
                            <h3>{marker.label.clone()}</h3>
                            <button
                                class="marker-details-close"
                                title="Close"
                                on:click=move |_| set_selected.set(None)
                            >
                                "\u{d7}"
                            </button>
                        </div>
                        <table class="marker-fields">
                            <tbody>
                                {marker
                                    .fields
                                    .iter()
                                    .map(|(key, value)| {
                                        view! {
                                            <tr>
                                                <th>{key.clone()}</th>
                                                <td>{value.clone()}</td>
                                            </tr>
                                        }
                                    })
                                    .collect::<Vec<_>>()}
                            </tbody>
                        </table>
                    </aside>
                }
            })
        }}
    }
}
