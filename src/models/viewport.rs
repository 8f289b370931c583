use crate::constants::{DEFAULT_CENTER, DEFAULT_SCALE, MAX_SCALE, MIN_SCALE};

/// Geographic bounds of the visible map area
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoBounds {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lon: f64,
    pub max_lon: f64,
}

/// Equirectangular map viewport: a geographic center, a scale in pixels per
/// degree, and the canvas size in pixels.
///
/// Screen y grows downward, so latitude decreases with y.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapViewport {
    pub center_lat: f64,
    pub center_lon: f64,
    pub scale: f64,
    pub width: f64,
    pub height: f64,
}

impl MapViewport {
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            center_lat: DEFAULT_CENTER.0,
            center_lon: DEFAULT_CENTER.1,
            scale: DEFAULT_SCALE,
            width,
            height,
        }
    }

    /// Pixel position of a geographic coordinate
    #[must_use]
    pub fn project(&self, lat: f64, lon: f64) -> (f64, f64) {
        let x = self.width / 2.0 + (lon - self.center_lon) * self.scale;
        let y = self.height / 2.0 + (self.center_lat - lat) * self.scale;
        (x, y)
    }

    /// Geographic coordinate under a pixel position
    #[must_use]
    pub fn unproject(&self, x: f64, y: f64) -> (f64, f64) {
        let lon = self.center_lon + (x - self.width / 2.0) / self.scale;
        let lat = self.center_lat - (y - self.height / 2.0) / self.scale;
        (lat, lon)
    }

    /// Whether a geographic coordinate projects inside the canvas
    #[must_use]
    pub fn contains(&self, lat: f64, lon: f64) -> bool {
        let (x, y) = self.project(lat, lon);
        x >= 0.0 && x <= self.width && y >= 0.0 && y <= self.height
    }

    #[must_use]
    pub fn visible_bounds(&self) -> GeoBounds {
        let half_lat = self.height / 2.0 / self.scale;
        let half_lon = self.width / 2.0 / self.scale;
        GeoBounds {
            min_lat: (self.center_lat - half_lat).max(-90.0),
            max_lat: (self.center_lat + half_lat).min(90.0),
            min_lon: self.center_lon - half_lon,
            max_lon: self.center_lon + half_lon,
        }
    }

    /// Viewport after dragging the map by a pixel delta
    #[must_use]
    pub fn panned(&self, dx: f64, dy: f64) -> Self {
        let mut next = *self;
        next.center_lon -= dx / self.scale;
        next.center_lat += dy / self.scale;
        next.center_lat = next.center_lat.clamp(-90.0, 90.0);
        next
    }

    /// Viewport zoomed by `factor`, keeping the geographic point under the
    /// given pixel position fixed on screen
    #[must_use]
    pub fn zoomed_at(&self, x: f64, y: f64, factor: f64) -> Self {
        let (anchor_lat, anchor_lon) = self.unproject(x, y);

        let mut next = *self;
        next.scale = (self.scale * factor).clamp(MIN_SCALE, MAX_SCALE);
        next.center_lon = anchor_lon - (x - self.width / 2.0) / next.scale;
        next.center_lat = (anchor_lat + (y - self.height / 2.0) / next.scale).clamp(-90.0, 90.0);
        next
    }

    /// Viewport with an updated canvas size, preserving center and scale
    #[must_use]
    pub fn resized(&self, width: f64, height: f64) -> Self {
        let mut next = *self;
        next.width = width;
        next.height = height;
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_center_projects_to_canvas_center() {
        let viewport = MapViewport::new(800.0, 600.0);
        let (x, y) = viewport.project(viewport.center_lat, viewport.center_lon);
        assert!((x - 400.0).abs() < 1e-9);
        assert!((y - 300.0).abs() < 1e-9);
    }

    #[test]
    fn test_project_unproject_round_trip() {
        let viewport = MapViewport::new(1024.0, 768.0);
        let (x, y) = viewport.project(41.9, 12.5);
        let (lat, lon) = viewport.unproject(x, y);
        assert!((lat - 41.9).abs() < 1e-9);
        assert!((lon - 12.5).abs() < 1e-9);
    }

    #[test]
    fn test_latitude_decreases_with_y() {
        let viewport = MapViewport::new(800.0, 600.0);
        let (_, y_north) = viewport.project(60.0, 0.0);
        let (_, y_south) = viewport.project(-60.0, 0.0);
        assert!(y_north < y_south);
    }

    #[test]
    fn test_zoom_keeps_anchor_fixed() {
        let viewport = MapViewport::new(800.0, 600.0);
        let (anchor_lat, anchor_lon) = viewport.unproject(200.0, 150.0);
        let zoomed = viewport.zoomed_at(200.0, 150.0, 2.0);
        let (x, y) = zoomed.project(anchor_lat, anchor_lon);
        assert!((x - 200.0).abs() < 1e-6);
        assert!((y - 150.0).abs() < 1e-6);
    }

    #[test]
    fn test_zoom_scale_is_clamped() {
        let viewport = MapViewport::new(800.0, 600.0);
        let out = viewport.zoomed_at(400.0, 300.0, 1e-6);
        assert!((out.scale - MIN_SCALE).abs() < 1e-9);
        let far_in = viewport.zoomed_at(400.0, 300.0, 1e9);
        assert!((far_in.scale - MAX_SCALE).abs() < 1e-9);
    }

    #[test]
    fn test_pan_moves_center_against_drag() {
        let viewport = MapViewport::new(800.0, 600.0);
        let panned = viewport.panned(40.0, -20.0);
        assert!(panned.center_lon < viewport.center_lon);
        assert!(panned.center_lat < viewport.center_lat);
    }

    #[test]
    fn test_visible_bounds_clamped_to_poles() {
        let viewport = MapViewport {
            center_lat: 80.0,
            center_lon: 0.0,
            scale: 2.0,
            width: 800.0,
            height: 600.0,
        };
        let bounds = viewport.visible_bounds();
        assert_eq!(bounds.max_lat, 90.0);
        assert!((bounds.min_lat - (80.0_f64 - 150.0).max(-90.0)).abs() < 1e-9);
        assert!((bounds.min_lon - -200.0).abs() < 1e-9);
        assert!((bounds.max_lon - 200.0).abs() < 1e-9);
    }

    #[test]
    fn test_contains() {
        let viewport = MapViewport::new(800.0, 600.0);
        assert!(viewport.contains(viewport.center_lat, viewport.center_lon));
        assert!(!viewport.contains(viewport.center_lat, viewport.center_lon + 200.0));
    }
}
