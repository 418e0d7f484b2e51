//! WASM bridge for Scrawl: exposes the drawing surface to the page script.
//!
//! Compiled via `wasm-pack build --target web`. The page forwards pointer
//! and key events in canvas-local coordinates (client position minus the
//! canvas' bounding rect) and calls `render_dirty` whenever a handler
//! returns `true`.

mod form;
mod render2d;

use scrawl_core::config::{PadConfig, Route};
use scrawl_editor::DrawingSurface;
use scrawl_editor::input::{InputEvent, Modifiers};
use scrawl_editor::upload::UploadForm;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::future_to_promise;
use web_sys::CanvasRenderingContext2d;

/// The WASM-facing drawing pad.
///
/// Owns one `DrawingSurface` for the lifetime of the page view, plus the
/// configuration that names the backend and upload fields.
#[wasm_bindgen]
pub struct ScrawlPad {
    surface: DrawingSurface,
    config: PadConfig,
}

#[wasm_bindgen]
impl ScrawlPad {
    /// Create a pad with default configuration and the given canvas size.
    #[wasm_bindgen(constructor)]
    pub fn new(width: u32, height: u32) -> Self {
        init_wasm_diagnostics();
        let config = PadConfig {
            width,
            height,
            ..PadConfig::default()
        };
        Self::with_config(config)
    }

    /// Create a pad from a JSON configuration (see `PadConfig`).
    #[wasm_bindgen(js_name = fromConfig)]
    pub fn from_config(json: &str) -> Result<ScrawlPad, JsValue> {
        init_wasm_diagnostics();
        let config =
            PadConfig::from_json(json).map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(Self::with_config(config))
    }

    pub fn width(&self) -> u32 {
        self.surface.width()
    }

    pub fn height(&self) -> u32 {
        self.surface.height()
    }

    // ─── Pointer input ───────────────────────────────────────────────────

    /// Handle pointer down. Returns true if the canvas needs repainting.
    pub fn handle_pointer_down(&mut self, x: f32, y: f32) -> bool {
        self.surface.handle(&InputEvent::from_pointer_down(x, y))
    }

    /// Handle pointer move. Returns true if the canvas needs repainting.
    pub fn handle_pointer_move(&mut self, x: f32, y: f32) -> bool {
        self.surface.handle(&InputEvent::from_pointer_move(x, y))
    }

    /// Handle pointer up. Returns true if the canvas needs repainting.
    pub fn handle_pointer_up(&mut self, x: f32, y: f32) -> bool {
        self.surface.handle(&InputEvent::from_pointer_up(x, y))
    }

    /// Handle `pointercancel` / lost pointer capture.
    pub fn handle_pointer_cancel(&mut self) -> bool {
        self.surface.handle(&InputEvent::PointerCancel)
    }

    /// Handle a key press. Returns the triggered action name (`"clear"`,
    /// `"upload"`) or an empty string.
    ///
    /// `clear` is applied here; for `upload` the page calls `export_form`
    /// and submits the result itself.
    pub fn handle_key(
        &mut self,
        key: &str,
        ctrl: bool,
        shift: bool,
        alt: bool,
        meta: bool,
    ) -> String {
        let mods = Modifiers {
            shift,
            ctrl,
            alt,
            meta,
        };
        self.surface
            .apply_key(key, mods)
            .map(|action| action.name().to_string())
            .unwrap_or_default()
    }

    // ─── Editing ─────────────────────────────────────────────────────────

    /// Wipe the drawing. A stroke in progress continues after the wipe.
    pub fn clear(&mut self) {
        self.surface.clear();
    }

    /// Wipe the drawing and lift the pen (tab switches).
    pub fn reset(&mut self) {
        self.surface.reset();
    }

    pub fn is_drawing(&self) -> bool {
        self.surface.is_drawing()
    }

    pub fn is_blank(&self) -> bool {
        self.surface.is_blank()
    }

    /// Current pad state as JSON:
    /// `{"width":u32,"height":u32,"drawing":bool,"blank":bool}`.
    pub fn state_json(&self) -> String {
        serde_json::json!({
            "width": self.surface.width(),
            "height": self.surface.height(),
            "drawing": self.surface.is_drawing(),
            "blank": self.surface.is_blank(),
        })
        .to_string()
    }

    // ─── Rendering ───────────────────────────────────────────────────────

    /// Repaint the whole canvas from the raster.
    pub fn render(&mut self, ctx: &CanvasRenderingContext2d) -> Result<(), JsValue> {
        self.surface.take_dirty();
        render2d::blit_all(ctx, self.surface.raster())
    }

    /// Repaint only what changed since the last render.
    /// Returns false when nothing needed repainting.
    pub fn render_dirty(&mut self, ctx: &CanvasRenderingContext2d) -> Result<bool, JsValue> {
        match self.surface.take_dirty() {
            Some(rect) => {
                render2d::blit(ctx, self.surface.raster(), rect)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    // ─── Export & upload ─────────────────────────────────────────────────

    /// Export the drawing as PNG. Resolves to a `Uint8Array`; rejects with
    /// an error message when the canvas has no area.
    pub fn export_png(&self) -> js_sys::Promise {
        let export = self.surface.export_as_image();
        future_to_promise(async move {
            let image = export.await.map_err(|e| JsValue::from_str(&e.to_string()))?;
            Ok(js_sys::Uint8Array::from(image.bytes.as_slice()).into())
        })
    }

    /// Export the drawing and wrap it in the inference `FormData`
    /// (image field + optional model field), ready for `fetch`.
    pub fn export_form(&self, model: Option<String>) -> js_sys::Promise {
        let export = self.surface.export_as_image();
        let upload = self.config.upload.clone();
        future_to_promise(async move {
            let image = export.await.map_err(|e| JsValue::from_str(&e.to_string()))?;
            let form = UploadForm::for_inference(&upload, image, model.as_deref());
            Ok(form::to_form_data(&form)?.into())
        })
    }

    /// Absolute URL of a backend route: `list_data`, `list_models`, `predict`.
    pub fn endpoint(&self, route: &str) -> Result<String, JsValue> {
        let route = Route::from_name(route)
            .ok_or_else(|| JsValue::from_str(&format!("unknown route `{route}`")))?;
        Ok(self.config.endpoints.url(route))
    }
}

impl ScrawlPad {
    fn with_config(config: PadConfig) -> Self {
        Self {
            surface: DrawingSurface::from_config(&config),
            config,
        }
    }
}

// ─── Panic hook and console logging for WASM debugging ──────────────────

fn init_wasm_diagnostics() {
    #[cfg(target_arch = "wasm32")]
    {
        use std::sync::Once;
        static INIT: Once = Once::new();
        INIT.call_once(|| {
            std::panic::set_hook(Box::new(|info| {
                let msg = format!("Scrawl WASM panic: {info}");
                web_sys::console::error_1(&msg.into());
            }));
            if console_log::init_with_level(log::Level::Info).is_err() {
                web_sys::console::warn_1(&"Scrawl: logger already set".into());
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn pointer_handlers_report_repaints() {
        let mut pad = ScrawlPad::new(40, 40);
        assert!(!pad.handle_pointer_move(5.0, 5.0));
        assert!(!pad.handle_pointer_down(5.0, 5.0));
        assert!(pad.is_drawing());
        assert!(pad.handle_pointer_move(30.0, 5.0));
        assert!(!pad.handle_pointer_up(30.0, 5.0));
        assert!(!pad.is_drawing());
        assert!(!pad.is_blank());
    }

    #[test]
    fn key_clear_wipes_and_reports_action() {
        let mut pad = ScrawlPad::new(40, 40);
        pad.handle_pointer_down(5.0, 5.0);
        pad.handle_pointer_move(30.0, 30.0);
        assert_eq!(pad.handle_key("Escape", false, false, false, false), "clear");
        assert!(pad.is_blank());
        // Pen stays down after a clear.
        assert!(pad.is_drawing());
    }

    #[test]
    fn key_upload_is_left_to_the_page() {
        let mut pad = ScrawlPad::new(40, 40);
        pad.handle_pointer_down(5.0, 5.0);
        pad.handle_pointer_move(30.0, 30.0);
        assert_eq!(pad.handle_key("Enter", true, false, false, false), "upload");
        assert!(!pad.is_blank());
        assert_eq!(pad.handle_key("x", false, false, false, false), "");
    }

    #[test]
    fn reset_lifts_pen() {
        let mut pad = ScrawlPad::new(40, 40);
        pad.handle_pointer_down(5.0, 5.0);
        pad.reset();
        assert!(!pad.is_drawing());
    }

    #[test]
    fn state_json_reflects_surface() {
        let pad = ScrawlPad::new(28, 14);
        let state: serde_json::Value = serde_json::from_str(&pad.state_json()).unwrap();
        assert_eq!(
            state,
            serde_json::json!({ "width": 28, "height": 14, "drawing": false, "blank": true })
        );
    }

    #[test]
    fn endpoint_resolves_known_routes() {
        let pad = ScrawlPad::new(10, 10);
        assert_eq!(
            pad.endpoint("predict").unwrap(),
            "http://localhost:5000/inference/predict"
        );
        assert_eq!(
            pad.endpoint("list_data").unwrap(),
            "http://localhost:5000/train/list_data"
        );
    }
}
