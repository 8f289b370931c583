use leptos::*;
use leptos_meta::*;
use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;

use crate::components::add_point::AddPoint;
use crate::components::csv_upload::{dispatch_csv_text, CsvUpload};
use crate::components::filter_controls::FilterControls;
use crate::components::help_modal::HelpModal;
use crate::components::import_report::ImportReport;
use crate::components::map_canvas::MapCanvas;
use crate::components::marker_details::MarkerDetails;
use crate::components::settings_panel::SettingsPanel;
use crate::export::export_normalized;
use crate::log;
use crate::models::Marker;
use crate::state::{reduce, AppEvent, WorldState};
use crate::storage;

/// Small built-in dataset: ancient cities with BCE founding dates, used to
/// demonstrate date-based band classification.
const SAMPLE_CSV: &str = include_str!("../sample_data.csv");

const EXPORT_FILENAME: &str = "band_atlas_export.csv";

#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let initial = {
        let mut state = WorldState::default();
        if let Some(styles) = storage::load_styles() {
            state.styles = styles;
        }
        state
    };
    let (state, set_state) = create_signal(initial);
    let dispatch = Callback::new(move |event: AppEvent| {
        set_state.set(reduce(&state.get_untracked(), event));
    });

    let (selected, set_selected) = create_signal(None::<Marker>);
    let (show_help, set_show_help) = create_signal(false);
    let (show_settings, set_show_settings) = create_signal(false);

    // Persist style changes across sessions
    create_effect(move |previous: Option<crate::models::CategoryStyles>| {
        let styles = state.with(|s| s.styles.clone());
        if previous.is_some_and(|p| p != styles) {
            if let Err(err) = storage::save_styles(&styles) {
                leptos::logging::error!("Failed to persist settings: {err}");
            }
        }
        styles
    });

    let load_sample = move |_| {
        log!("Loading built-in sample dataset");
        dispatch_csv_text(SAMPLE_CSV, dispatch);
    };

    let handle_export = move |_| {
        let sets = state.with_untracked(|s| s.sets.clone());
        match export_normalized(&sets) {
            Ok(contents) => {
                if let Err(err) = download_csv(EXPORT_FILENAME, &contents) {
                    leptos::logging::error!("Download failed: {err}");
                }
            }
            Err(err) => leptos::logging::error!("Export failed: {err}"),
        }
    };

    view! {
        <Stylesheet id="leptos" href="/pkg/band_atlas.css"/>
        <Title text="Band Atlas"/>

        <div class="app">
            <header class="toolbar">
                <h1 class="app-title">"Band Atlas"</h1>
                <CsvUpload dispatch=dispatch/>
                <AddPoint dispatch=dispatch/>
                <button on:click=load_sample>"Load sample"</button>
                <button on:click=handle_export>"Export CSV"</button>
                <button on:click=move |_| {
                    dispatch.call(AppEvent::Cleared);
                    set_selected.set(None);
                }>
                    "Clear"
                </button>
                <button on:click=move |_| set_show_settings.set(true)>"Settings"</button>
                <button on:click=move |_| set_show_help.set(true)>"Help"</button>
            </header>

            <FilterControls state=state dispatch=dispatch/>

            {move || {
                state
                    .with(|s| s.status.clone())
                    .map(|status| view! { <div class="status-line">{status}</div> })
            }}

            <ImportReport state=state/>

            <div class="main-area">
                <MapCanvas state=state set_selected=set_selected/>
                <MarkerDetails selected=selected set_selected=set_selected/>
            </div>

            <HelpModal is_open=show_help on_close=move || set_show_help.set(false)/>
            <SettingsPanel
                is_open=show_settings
                state=state
                dispatch=dispatch
                on_close=move || set_show_settings.set(false)
            />
        </div>
    }
}

/// Offer a string as a file download through a temporary object URL.
fn download_csv(filename: &str, contents: &str) -> Result<(), String> {
    let parts = js_sys::Array::of1(&JsValue::from_str(contents));
    let options = web_sys::BlobPropertyBag::new();
    options.set_type("text/csv");

    let blob = web_sys::Blob::new_with_str_sequence_and_options(&parts, &options)
        .map_err(|_| "Failed to build blob".to_string())?;
    let url = web_sys::Url::create_object_url_with_blob(&blob)
        .map_err(|_| "Failed to create object URL".to_string())?;

    let document = web_sys::window()
        .and_then(|window| window.document())
        .ok_or_else(|| "No document".to_string())?;
    let anchor: web_sys::HtmlAnchorElement = document
        .create_element("a")
        .map_err(|_| "Failed to create anchor".to_string())?
        .dyn_into()
        .map_err(|_| "Failed to cast anchor".to_string())?;

    anchor.set_href(&url);
    anchor.set_download(filename);
    anchor.click();

    let _ = web_sys::Url::revoke_object_url(&url);
    Ok(())
}
