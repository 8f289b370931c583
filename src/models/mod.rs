mod band;
mod marker;
mod settings;
mod viewport;

pub use band::{is_valid_band_raw, BandCategory, BandFilter};
pub use marker::Marker;
pub use settings::{CategoryStyle, CategoryStyles, MarkerShape};
pub use viewport::{GeoBounds, MapViewport};
