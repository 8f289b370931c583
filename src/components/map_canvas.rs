use leptos::{
    component, create_effect, create_node_ref, create_signal, view, IntoView, ReadSignal,
    SignalGet, SignalGetUntracked, SignalSet, WriteSignal,
};
use leptos_use::{use_debounce_fn, use_event_listener, use_window};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, MouseEvent, WheelEvent};

use crate::constants::{BIN_SIZE_DEG, ZOOM_STEP};
use crate::labels::{place_labels, MeasureText, ScreenMarker};
use crate::models::{MapViewport, Marker, MarkerShape};
use crate::shading::{shaded_bins, shaded_cells, CellShade};
use crate::state::WorldState;

const BACKGROUND_COLOR: &str = "#f2efe9";
const GRID_COLOR: &str = "#2b2b2b";
const GRID_ALPHA: f64 = 0.6;
const SHADE_ALPHA: f64 = 0.18;
const LABEL_FONT: &str = "12px sans-serif";
const LABEL_TEXT_HEIGHT: f64 = 12.0;
const LABEL_BACKGROUND: &str = "rgba(255, 255, 255, 0.85)";
const LABEL_TEXT_COLOR: &str = "#1a1a1a";
const LEADER_COLOR: &str = "#555555";
const SELECTION_COLOR: &str = "#111111";
/// Mouse-up within this distance of mouse-down counts as a click
const CLICK_TOLERANCE: f64 = 3.0;
/// Extra pixels around a marker accepted as a hit
const HIT_SLACK: f64 = 2.0;

/// Text metrics backed by the 2D canvas context
struct CanvasMeasure<'a> {
    ctx: &'a CanvasRenderingContext2d,
}

impl MeasureText for CanvasMeasure<'_> {
    fn measure(&self, text: &str) -> (f64, f64) {
        let width = self
            .ctx
            .measure_text(text)
            .map_or(0.0, |metrics| metrics.width());
        (width, LABEL_TEXT_HEIGHT)
    }
}

/// The interactive world map: grid, shaded cells, markers, labels and
/// leader lines on a single canvas, with drag-to-pan and wheel zoom.
#[component]
pub fn MapCanvas(
    state: ReadSignal<WorldState>,
    set_selected: WriteSignal<Option<Marker>>,
) -> impl IntoView {
    let canvas_ref = create_node_ref::<leptos::html::Canvas>();
    let (viewport, set_viewport) = create_signal(MapViewport::new(800.0, 600.0));
    let (is_panning, set_is_panning) = create_signal(false);
    let (last_mouse, set_last_mouse) = create_signal((0.0, 0.0));
    let (drag_origin, set_drag_origin) = create_signal((0.0, 0.0));
    let (hovered, set_hovered) = create_signal(None::<(String, f64, f64)>);

    // Keep the viewport in sync with the canvas element size
    let sync_size = move || {
        let Some(canvas) = canvas_ref.get_untracked() else {
            return;
        };
        let element: &web_sys::HtmlCanvasElement = &canvas;
        let width = f64::from(element.client_width());
        let height = f64::from(element.client_height());
        if width > 0.0 && height > 0.0 {
            set_viewport.set(viewport.get_untracked().resized(width, height));
        }
    };
    create_effect(move |_| {
        if canvas_ref.get().is_some() {
            sync_size();
        }
    });
    let debounced_sync = use_debounce_fn(sync_size, 150.0);
    let _ = use_event_listener(use_window(), leptos::ev::resize, move |_| {
        debounced_sync();
    });

    // Render on state or viewport changes, batched to animation frames
    let (render_requested, set_render_requested) = create_signal(false);
    create_effect(move |_| {
        let _ = state.get();
        let _ = viewport.get();

        if !render_requested.get_untracked() {
            set_render_requested.set(true);

            let Some(window) = web_sys::window() else {
                return;
            };
            let callback = Closure::once(move || {
                set_render_requested.set(false);

                let Some(canvas) = canvas_ref.get_untracked() else {
                    return;
                };
                let current_state = state.get_untracked();
                let current_viewport = viewport.get_untracked();
                render_map(&canvas, &current_state, &current_viewport);
            });
            let _ = window.request_animation_frame(callback.as_ref().unchecked_ref());
            callback.forget();
        }
    });

    let handle_mouse_down = move |ev: MouseEvent| {
        let position = (f64::from(ev.offset_x()), f64::from(ev.offset_y()));
        set_is_panning.set(true);
        set_last_mouse.set(position);
        set_drag_origin.set(position);
    };

    let handle_mouse_move = move |ev: MouseEvent| {
        let x = f64::from(ev.offset_x());
        let y = f64::from(ev.offset_y());

        if is_panning.get_untracked() {
            let (last_x, last_y) = last_mouse.get_untracked();
            set_viewport.set(viewport.get_untracked().panned(x - last_x, y - last_y));
            set_last_mouse.set((x, y));
            set_hovered.set(None);
        } else {
            let hit = hit_test(&state.get_untracked(), &viewport.get_untracked(), x, y);
            set_hovered.set(hit.map(|marker| (marker.label, x, y)));
        }
    };

    let handle_mouse_up = move |ev: MouseEvent| {
        set_is_panning.set(false);

        let x = f64::from(ev.offset_x());
        let y = f64::from(ev.offset_y());
        let (origin_x, origin_y) = drag_origin.get_untracked();
        if (x - origin_x).hypot(y - origin_y) <= CLICK_TOLERANCE {
            let hit = hit_test(&state.get_untracked(), &viewport.get_untracked(), x, y);
            set_selected.set(hit);
        }
    };

    let handle_wheel = move |ev: WheelEvent| {
        ev.prevent_default();
        let factor = if ev.delta_y() < 0.0 {
            ZOOM_STEP
        } else {
            1.0 / ZOOM_STEP
        };
        set_viewport.set(viewport.get_untracked().zoomed_at(
            f64::from(ev.offset_x()),
            f64::from(ev.offset_y()),
            factor,
        ));
    };

    view! {
        <div class="map-container">
            <canvas
                class="map-canvas"
                node_ref=canvas_ref
                on:mousedown=handle_mouse_down
                on:mousemove=handle_mouse_move
                on:mouseup=handle_mouse_up
                on:mouseleave=move |_| {
                    set_is_panning.set(false);
                    set_hovered.set(None);
                }
                on:wheel=handle_wheel
            ></canvas>
            {move || {
                hovered
                    .get()
                    .map(|(label, x, y)| {
                        view! {
                            <div
                                class="marker-tooltip"
                                style=format!("left: {}px; top: {}px;", x + 12.0, y - 28.0)
                            >
                                {label}
                            </div>
                        }
                    })
            }}
        </div>
    }
}

fn render_map(
    canvas: &leptos::HtmlElement<leptos::html::Canvas>,
    state: &WorldState,
    viewport: &MapViewport,
) {
    let element: &web_sys::HtmlCanvasElement = canvas;

    // Browser dimensions are always non-negative
    #[allow(clippy::cast_sign_loss)]
    let container_width = element.client_width() as u32;
    #[allow(clippy::cast_sign_loss)]
    let container_height = element.client_height() as u32;
    if container_width > 0 && container_height > 0 {
        element.set_width(container_width);
        element.set_height(container_height);
    }

    let Ok(Some(context)) = element.get_context("2d") else {
        leptos::logging::warn!("Failed to get 2D context");
        return;
    };
    let Ok(ctx) = context.dyn_into::<CanvasRenderingContext2d>() else {
        leptos::logging::warn!("Failed to cast to 2D rendering context");
        return;
    };

    let width = f64::from(element.width());
    let height = f64::from(element.height());

    ctx.set_fill_style_str(BACKGROUND_COLOR);
    ctx.fill_rect(0.0, 0.0, width, height);

    draw_grid(&ctx, viewport);
    draw_shading(&ctx, state, viewport, width, height);
    draw_markers(&ctx, state, viewport);
    draw_labels(&ctx, state, viewport);
}

/// Dashed 10° graticule: meridians span latitudes ±85, parallels ±80.
fn draw_grid(ctx: &CanvasRenderingContext2d, viewport: &MapViewport) {
    ctx.save();
    ctx.set_stroke_style_str(GRID_COLOR);
    ctx.set_global_alpha(GRID_ALPHA);
    ctx.set_line_width(1.0);
    let dash = js_sys::Array::of2(&4.0.into(), &4.0.into());
    let _ = ctx.set_line_dash(&dash.into());

    let mut lon = -180;
    while lon <= 180 {
        let (x, y_top) = viewport.project(85.0, f64::from(lon));
        let (_, y_bottom) = viewport.project(-85.0, f64::from(lon));
        ctx.begin_path();
        ctx.move_to(x, y_top);
        ctx.line_to(x, y_bottom);
        ctx.stroke();
        lon += BIN_SIZE_DEG;
    }

    let mut lat = -80;
    while lat <= 80 {
        let (x_left, y) = viewport.project(f64::from(lat), -180.0);
        let (x_right, _) = viewport.project(f64::from(lat), 180.0);
        ctx.begin_path();
        ctx.move_to(x_left, y);
        ctx.line_to(x_right, y);
        ctx.stroke();
        lat += BIN_SIZE_DEG;
    }

    ctx.restore();
}

fn draw_shading(
    ctx: &CanvasRenderingContext2d,
    state: &WorldState,
    viewport: &MapViewport,
    width: f64,
    height: f64,
) {
    let bins = shaded_bins(&state.markers, state.filter);

    ctx.save();
    ctx.set_global_alpha(SHADE_ALPHA);

    for cell in shaded_cells(&bins) {
        let color = match cell.shade {
            CellShade::Both => state.styles.both.color.as_str(),
            CellShade::Ring => state.styles.ring.color.as_str(),
            CellShade::Stripe => state.styles.stripe.color.as_str(),
        };

        // Top-left corner is the cell's upper latitude at its lower longitude
        let (x1, y1) = viewport.project(
            f64::from(cell.lat_bin + BIN_SIZE_DEG),
            f64::from(cell.lon_bin),
        );
        let (x2, y2) = viewport.project(
            f64::from(cell.lat_bin),
            f64::from(cell.lon_bin + BIN_SIZE_DEG),
        );
        if x2 < 0.0 || x1 > width || y2 < 0.0 || y1 > height {
            continue;
        }

        ctx.set_fill_style_str(color);
        ctx.fill_rect(x1, y1, x2 - x1, y2 - y1);
    }

    ctx.restore();
}

fn draw_markers(ctx: &CanvasRenderingContext2d, state: &WorldState, viewport: &MapViewport) {
    for marker in &state.markers {
        if !state.filter.allows(marker.category) {
            continue;
        }

        let (x, y) = viewport.project(marker.lat, marker.lon);
        let style = state.styles.get(marker.category);

        ctx.set_fill_style_str(&style.color);
        ctx.set_stroke_style_str(SELECTION_COLOR);
        ctx.set_line_width(1.0);
        draw_shape(ctx, style.shape, x, y, style.size);
    }
}

fn draw_shape(ctx: &CanvasRenderingContext2d, shape: MarkerShape, x: f64, y: f64, size: f64) {
    match shape {
        MarkerShape::Circle => {
            ctx.begin_path();
            let _ = ctx.arc(x, y, size, 0.0, std::f64::consts::TAU);
            ctx.fill();
            ctx.stroke();
        }
        MarkerShape::Square => {
            ctx.fill_rect(x - size, y - size, size * 2.0, size * 2.0);
            ctx.stroke_rect(x - size, y - size, size * 2.0, size * 2.0);
        }
        MarkerShape::Diamond => {
            ctx.begin_path();
            ctx.move_to(x, y - size);
            ctx.line_to(x + size, y);
            ctx.line_to(x, y + size);
            ctx.line_to(x - size, y);
            ctx.close_path();
            ctx.fill();
            ctx.stroke();
        }
        MarkerShape::Triangle => {
            ctx.begin_path();
            ctx.move_to(x, y - size);
            ctx.line_to(x + size, y + size);
            ctx.line_to(x - size, y + size);
            ctx.close_path();
            ctx.fill();
            ctx.stroke();
        }
    }
}

fn draw_labels(ctx: &CanvasRenderingContext2d, state: &WorldState, viewport: &MapViewport) {
    // Only on-screen markers passing the filter get labels
    let screen_markers: Vec<ScreenMarker> = state
        .markers
        .iter()
        .enumerate()
        .filter(|(_, marker)| state.filter.allows(marker.category))
        .filter(|(_, marker)| viewport.contains(marker.lat, marker.lon))
        .map(|(index, marker)| {
            let (x, y) = viewport.project(marker.lat, marker.lon);
            ScreenMarker {
                index,
                x,
                y,
                radius: state.styles.get(marker.category).size,
                label: marker.label.clone(),
            }
        })
        .collect();

    ctx.set_font(LABEL_FONT);
    let placements = {
        let measure = CanvasMeasure { ctx };
        place_labels(
            &screen_markers,
            (viewport.width, viewport.height),
            &measure,
        )
    };

    for placement in &placements {
        if let Some(leader) = placement.leader {
            ctx.save();
            ctx.set_stroke_style_str(LEADER_COLOR);
            ctx.set_line_width(1.0);
            ctx.begin_path();
            ctx.move_to(leader.from.0, leader.from.1);
            ctx.quadratic_curve_to(leader.control.0, leader.control.1, leader.to.0, leader.to.1);
            ctx.stroke();
            ctx.restore();
        }

        let Some(marker) = state.markers.get(placement.marker_index) else {
            continue;
        };
        let rect = placement.rect;

        ctx.set_fill_style_str(LABEL_BACKGROUND);
        ctx.fill_rect(rect.x, rect.y, rect.width, rect.height);

        ctx.set_fill_style_str(LABEL_TEXT_COLOR);
        ctx.set_text_baseline("middle");
        let _ = ctx.fill_text(&marker.label, rect.x + 4.0, rect.center().1);
    }
}

/// First marker (in list order) whose icon footprint covers the pixel,
/// among markers passing the active filter.
fn hit_test(state: &WorldState, viewport: &MapViewport, x: f64, y: f64) -> Option<Marker> {
    state
        .markers
        .iter()
        .filter(|marker| state.filter.allows(marker.category))
        .find(|marker| {
            let (marker_x, marker_y) = viewport.project(marker.lat, marker.lon);
            let radius = state.styles.get(marker.category).size;
            (marker_x - x).hypot(marker_y - y) <= radius + HIT_SLACK
        })
        .cloned()
}
