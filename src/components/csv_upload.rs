use leptos::{component, create_node_ref, view, Callable, Callback, IntoView};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

use crate::import::csv::parse_rows;
use crate::state::AppEvent;

/// Parse CSV text and dispatch the outcome into the reducer.
pub fn dispatch_csv_text(text: &str, dispatch: Callback<AppEvent>) {
    match parse_rows(text) {
        Ok(parsed) => dispatch.call(AppEvent::DatasetLoaded {
            rows: parsed.rows,
            unknown_columns: parsed.unknown_columns,
        }),
        Err(err) => dispatch.call(AppEvent::LoadFailed {
            message: err.format_message(),
        }),
    }
}

/// File upload button with drag-and-drop, feeding parsed rows into the
/// reducer through a `FileReader` completion callback.
#[component]
pub fn CsvUpload(dispatch: Callback<AppEvent>) -> impl IntoView {
    let file_input_ref = create_node_ref::<leptos::html::Input>();

    let load_file = move |file: web_sys::File| {
        // Accept only .csv files (by extension or MIME type)
        if !file.name().to_lowercase().ends_with(".csv") && file.type_() != "text/csv" {
            dispatch.call(AppEvent::LoadFailed {
                message: "Please upload a valid CSV file.".to_string(),
            });
            return;
        }

        let Ok(reader) = web_sys::FileReader::new() else {
            leptos::logging::error!("Failed to create FileReader");
            return;
        };
        let reader_clone = reader.clone();

        let onload = Closure::wrap(Box::new(move |_: web_sys::Event| {
            let Ok(result) = reader_clone.result() else {
                return;
            };
            let Some(text) = result.as_string() else {
                return;
            };
            dispatch_csv_text(&text, dispatch);
        }) as Box<dyn FnMut(_)>);

        reader.set_onload(Some(onload.as_ref().unchecked_ref()));
        onload.forget();

        let _ = reader.read_as_text(&file);
    };

    let handle_file_change = move |_| {
        let Some(input_elem) = file_input_ref.get() else {
            return;
        };
        let input: &web_sys::HtmlInputElement = &input_elem;
        let Some(files) = input.files() else { return };
        let Some(file) = files.get(0) else { return };

        load_file(file);
        input.set_value("");
    };

    let handle_drop = move |ev: web_sys::DragEvent| {
        ev.prevent_default();
        let Some(transfer) = ev.data_transfer() else {
            return;
        };
        let Some(files) = transfer.files() else { return };
        let Some(file) = files.get(0) else { return };
        load_file(file);
    };

    view! {
        <div
            class="csv-upload"
            on:dragover=move |ev: web_sys::DragEvent| ev.prevent_default()
            on:drop=handle_drop
        >
            <input
                type="file"
                accept=".csv,text/csv"
                node_ref=file_input_ref
                on:change=handle_file_change
                style="display: none;"
            />
            <button
                class="upload-button"
                title="Upload a CSV of labeled coordinates"
                on:click=move |_| {
                    if let Some(input) = file_input_ref.get() {
                        input.click();
                    }
                }
            >
                "Upload CSV"
            </button>
        </div>
    }
}
