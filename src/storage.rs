use crate::models::CategoryStyles;

const STYLES_KEY: &str = "band_atlas.category_styles";

/// Load persisted category styles from localStorage.
///
/// Returns `None` when storage is unavailable, the key is absent, or the
/// stored JSON no longer deserializes (stale format).
#[must_use]
pub fn load_styles() -> Option<CategoryStyles> {
    let storage = web_sys::window()?.local_storage().ok()??;
    let json = storage.get_item(STYLES_KEY).ok()??;
    serde_json::from_str(&json).ok()
}

/// Persist category styles to localStorage.
///
/// # Errors
///
/// Returns an error if storage is unavailable or the write fails.
pub fn save_styles(styles: &CategoryStyles) -> Result<(), String> {
    let window = web_sys::window().ok_or_else(|| "No window".to_string())?;
    let storage = window
        .local_storage()
        .map_err(|_| "localStorage unavailable".to_string())?
        .ok_or_else(|| "localStorage unavailable".to_string())?;

    let json = serde_json::to_string(styles).map_err(|err| err.to_string())?;
    storage
        .set_item(STYLES_KEY, &json)
        .map_err(|_| "Failed to write settings".to_string())
}

#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_save_and_load_round_trip() {
        let mut styles = CategoryStyles::default();
        styles.ring.color = "#010203".to_string();
        styles.none.size = 14.0;

        save_styles(&styles).unwrap();
        let loaded = load_styles().unwrap();

        assert_eq!(loaded, styles);
    }

    #[wasm_bindgen_test]
    fn test_load_tolerates_stale_format() {
        let storage = web_sys::window()
            .unwrap()
            .local_storage()
            .unwrap()
            .unwrap();
        storage.set_item(STYLES_KEY, "{not valid json").unwrap();

        assert!(load_styles().is_none());
    }
}
