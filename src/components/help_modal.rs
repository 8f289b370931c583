use leptos::{component, view, IntoView, ReadSignal};

use crate::components::window::Modal;

const HELP_TEXT: &str = r"# Band Atlas

Upload a CSV of labeled coordinates to classify and map them.

## Recognized columns

- **lat** / latitude (required)
- **lon** / lng / long / longitude (required)
- **label** / name / title (required)
- **band_type** / band / type / stripe / ring
- **date** (supports BCE dates, e.g. `44 BCE` or `-0043-03-15`)
- **comment** / notes / note / description

Headers are matched case-insensitively. Unrecognized columns are reported
and ignored.

## Band categories

- **ring** claims priority in the location's 10-degree latitude band
- **stripe** claims priority in its 10-degree longitude band
- **both** claims both, **none** claims neither

Rows sharing coordinates and label are merged into one location. Explicit
categories always win; locations without one are classified by date: the
earliest dated location in a band claims it.

## Map

Drag to pan, scroll to zoom, click a marker for details. Shaded grid cells
show claimed bands; use the checkboxes to filter categories.
";

/// Built-in help, rendered from markdown.
#[component]
pub fn HelpModal(is_open: ReadSignal<bool>, on_close: impl Fn() + Clone + 'static) -> impl IntoView {
    let html = {
        let parser = pulldown_cmark::Parser::new(HELP_TEXT);
        let mut rendered = String::new();
        pulldown_cmark::html::push_html(&mut rendered, parser);
        rendered
    };

    view! {
        <Modal is_open=is_open title="Help" on_close=on_close>
            <div class="help-content" inner_html=html></div>
        </Modal>
    }
}
