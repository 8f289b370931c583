use leptos::leptos_dom::helpers::window_event_listener;
use leptos::{component, on_cleanup, view, Children, IntoView, ReadSignal, SignalGet, SignalGetUntracked};

/// A minimal modal dialog: dimmed backdrop, title bar, close button.
///
/// Closes on the close button, a backdrop click, or Escape. The content is
/// rendered once and toggled with a class so `children` stays `FnOnce`.
#[component]
pub fn Modal(
    is_open: ReadSignal<bool>,
    #[prop(into)] title: String,
    on_close: impl Fn() + Clone + 'static,
    children: Children,
) -> impl IntoView {
    let close_on_escape = on_close.clone();
    let handle = window_event_listener(leptos::ev::keydown, move |ev| {
        if is_open.get_untracked() && ev.key() == "Escape" {
            close_on_escape();
        }
    });
    on_cleanup(move || handle.remove());

    let close_on_backdrop = on_close.clone();
    let close_on_button = on_close;

    view! {
        <div
            class="modal-overlay"
            class:active=move || is_open.get()
            on:click=move |_| close_on_backdrop()
        >
            <div class="modal-window" on:click=|ev| ev.stop_propagation()>
                <div class="modal-header">
                    <h2>{title}</h2>
                    <button
                        class="modal-close"
                        title="Close"
                        on:click=move |_| close_on_button()
                    >
                        "\u{d7}"
                    </button>
                </div>
                <div class="modal-content">{children()}</div>
            </div>
        </div>
    }
}
