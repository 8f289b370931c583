use leptos::{
    component, create_signal, event_target_value, view, Callable, Callback, IntoView, SignalGet,
    SignalSet,
};

use crate::components::window::Modal;
use crate::constants::{LAT_MAX, LAT_MIN, LON_MAX, LON_MIN};
use crate::import::csv::RawRow;
use crate::state::AppEvent;

/// Manual point entry: a small form that feeds one row into the reducer.
///
/// Coordinates are validated here so a typo surfaces immediately instead of
/// landing in the skip report.
#[component]
pub fn AddPoint(dispatch: Callback<AppEvent>) -> impl IntoView {
    let (show_form, set_show_form) = create_signal(false);
    let (lat, set_lat) = create_signal(String::new());
    let (lon, set_lon) = create_signal(String::new());
    let (label, set_label) = create_signal(String::new());
    let (band, set_band) = create_signal(String::new());
    let (date, set_date) = create_signal(String::new());
    let (comment, set_comment) = create_signal(String::new());
    let (error, set_error) = create_signal(None::<String>);

    let reset_form = move || {
        set_lat.set(String::new());
        set_lon.set(String::new());
        set_label.set(String::new());
        set_band.set(String::new());
        set_date.set(String::new());
        set_comment.set(String::new());
        set_error.set(None);
    };

    let handle_submit = move |_| {
        let lat_value: Option<f64> = lat.get().trim().parse().ok();
        let lon_value: Option<f64> = lon.get().trim().parse().ok();

        let coords_valid = matches!(
            (lat_value, lon_value),
            (Some(lat), Some(lon))
                if (LAT_MIN..=LAT_MAX).contains(&lat) && (LON_MIN..=LON_MAX).contains(&lon)
        );
        if !coords_valid {
            set_error.set(Some("Invalid or out-of-range lat/lon".to_string()));
            return;
        }
        if label.get().trim().is_empty() {
            set_error.set(Some("A label is required".to_string()));
            return;
        }

        dispatch.call(AppEvent::PointAdded {
            row: RawRow::from_values(
                lat.get().trim(),
                lon.get().trim(),
                label.get().trim(),
                band.get().trim(),
                date.get().trim(),
                comment.get().trim(),
            ),
        });
        reset_form();
        set_show_form.set(false);
    };

    view! {
        <button
            class="add-point-button"
            title="Add a point manually"
            on:click=move |_| set_show_form.set(true)
        >
            "Add point"
        </button>

        <Modal
            is_open=show_form
            title="Add point"
            on_close=move || set_show_form.set(false)
        >
            <div class="add-point-form">
                <label>
                    "Latitude"
                    <input
                        type="text"
                        prop:value=move || lat.get()
                        on:input=move |ev| set_lat.set(event_target_value(&ev))
                    />
                </label>
                <label>
                    "Longitude"
                    <input
                        type="text"
                        prop:value=move || lon.get()
                        on:input=move |ev| set_lon.set(event_target_value(&ev))
                    />
                </label>
                <label>
                    "Label"
                    <input
                        type="text"
                        prop:value=move || label.get()
                        on:input=move |ev| set_label.set(event_target_value(&ev))
                    />
                </label>
                <label>
                    "Band type"
                    <input
                        type="text"
                        placeholder="ring, stripe, both or none"
                        prop:value=move || band.get()
                        on:input=move |ev| set_band.set(event_target_value(&ev))
                    />
                </label>
                <label>
                    "Date"
                    <input
                        type="text"
                        placeholder="2024-01-01 or 44 BCE"
                        prop:value=move || date.get()
                        on:input=move |ev| set_date.set(event_target_value(&ev))
                    />
                </label>
                <label>
                    "Comment"
                    <input
                        type="text"
                        prop:value=move || comment.get()
                        on:input=move |ev| set_comment.set(event_target_value(&ev))
                    />
                </label>

                {move || error.get().map(|message| view! { <p class="form-error">{message}</p> })}

                <div class="add-point-buttons">
                    <button on:click=move |_| set_show_form.set(false)>"Cancel"</button>
                    <button class="primary" on:click=handle_submit>"Add"</button>
                </div>
            </div>
        </Modal>
    }
}
