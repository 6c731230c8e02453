//! Browser implementation of [`CaptureHost`].
//!
//! Rasterization is delegated to the `html2canvas` global loaded by
//! `index.html`. When the script failed to load, the frozen
//! [`PreviewDocument`] is painted directly instead (see [`super::paint`]).

use std::time::Duration;

use futures::future::{Either, select};
use leptos::prelude::*;
use schedule::preview::PreviewDocument;
use wasm_bindgen::prelude::wasm_bindgen;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Document, HtmlAnchorElement, HtmlCanvasElement, HtmlElement, Window};

use crate::components::story_preview::PREVIEW_ELEMENT_ID;
use crate::export::ExportError;
use crate::export::paint;
use crate::export::pipeline::{CaptureHost, ExportPipeline, RasterOptions, SettlePolicy, TargetSize, TriggerState};
use crate::state::app::AppState;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_name = html2canvas, catch)]
    fn html2canvas(node: &HtmlElement, options: &JsValue) -> Result<js_sys::Promise, JsValue>;
}

const HTML2CANVAS_GLOBAL: &str = "html2canvas";

/// Start an export of the current preview as a local task.
pub fn spawn_export(state: AppState) {
    let export = state.config.with_value(|c| c.export.clone());
    let date_stamp = state.export_date();
    let snapshot = state.preview_document();
    let pipeline = ExportPipeline::new(export);

    let host = match WebCaptureHost::new(state.trigger, snapshot, pipeline.target_size()) {
        Ok(host) => host,
        Err(e) => {
            log::error!("export unavailable: {e}");
            return;
        }
    };

    leptos::task::spawn_local(async move {
        let outcome = pipeline.generate_image(&host, &date_stamp).await;
        log::debug!("export finished: {outcome:?}");
    });
}

pub struct WebCaptureHost {
    window: Window,
    document: Document,
    trigger: RwSignal<TriggerState>,
    snapshot: PreviewDocument,
    size: TargetSize,
}

impl WebCaptureHost {
    /// # Errors
    ///
    /// Returns [`ExportError::MissingElement`] outside a browser window.
    pub fn new(
        trigger: RwSignal<TriggerState>,
        snapshot: PreviewDocument,
        size: TargetSize,
    ) -> Result<Self, ExportError> {
        let window = web_sys::window().ok_or_else(|| ExportError::MissingElement("window".into()))?;
        let document = window.document().ok_or_else(|| ExportError::MissingElement("document".into()))?;
        Ok(Self { window, document, trigger, snapshot, size })
    }

    fn has_html2canvas(&self) -> bool {
        js_sys::Reflect::get(&self.window, &JsValue::from_str(HTML2CANVAS_GLOBAL))
            .map(|value| value.is_function())
            .unwrap_or(false)
    }
}

fn js_error(value: &JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{value:?}"))
}

fn raster_options_object(options: &RasterOptions) -> Result<JsValue, ExportError> {
    let object = js_sys::Object::new();
    let background = options.background.as_deref().map_or(JsValue::NULL, JsValue::from_str);
    let entries = [
        ("scale", JsValue::from_f64(options.scale)),
        ("useCORS", JsValue::from_bool(options.use_cors)),
        ("backgroundColor", background),
        ("logging", JsValue::from_bool(options.logging)),
    ];
    for (key, value) in entries {
        js_sys::Reflect::set(&object, &JsValue::from_str(key), &value)
            .map_err(|e| ExportError::Rasterize(js_error(&e)))?;
    }
    Ok(object.into())
}

impl CaptureHost for WebCaptureHost {
    type Node = HtmlElement;
    type Raster = HtmlCanvasElement;

    fn trigger(&self) -> TriggerState {
        self.trigger.get_untracked()
    }

    fn set_trigger(&self, state: TriggerState) {
        self.trigger.set(state);
    }

    fn clone_preview(&self) -> Result<HtmlElement, ExportError> {
        let preview = self
            .document
            .get_element_by_id(PREVIEW_ELEMENT_ID)
            .ok_or_else(|| ExportError::MissingElement(format!("#{PREVIEW_ELEMENT_ID}")))?;
        let clone = preview
            .clone_node_with_deep(true)
            .map_err(|e| ExportError::Clone(js_error(&e)))?;
        clone
            .dyn_into::<HtmlElement>()
            .map_err(|_| ExportError::Clone("preview clone is not an HTML element".into()))
    }

    fn detach_from_layout(&self, node: &HtmlElement, size: TargetSize) -> Result<(), ExportError> {
        let width = format!("{}px", size.width);
        let height = format!("{}px", size.height);
        let style = node.style();
        for (property, value) in [
            ("transform", "none"),
            ("position", "fixed"),
            ("top", "0"),
            ("left", "0"),
            ("z-index", "-1000"),
            ("pointer-events", "none"),
            ("width", width.as_str()),
            ("height", height.as_str()),
        ] {
            style
                .set_property(property, value)
                .map_err(|e| ExportError::Layout(js_error(&e)))?;
        }
        Ok(())
    }

    fn attach(&self, node: &HtmlElement) -> Result<(), ExportError> {
        let body = self
            .document
            .body()
            .ok_or_else(|| ExportError::MissingElement("body".into()))?;
        body.append_child(node)
            .map(drop)
            .map_err(|e| ExportError::Layout(js_error(&e)))
    }

    fn remove(&self, node: &HtmlElement) {
        node.remove();
    }

    async fn settle(&self, policy: SettlePolicy) {
        let Ok(ready) = self.document.fonts().ready() else {
            log::debug!("no font-loading signal; waiting {} ms", policy.fallback_ms);
            gloo_timers::future::sleep(Duration::from_millis(u64::from(policy.fallback_ms))).await;
            return;
        };

        let fonts = std::pin::pin!(JsFuture::from(ready));
        let limit = std::pin::pin!(gloo_timers::future::sleep(Duration::from_millis(u64::from(
            policy.timeout_ms
        ))));
        match select(fonts, limit).await {
            Either::Left((Ok(_), _)) => log::debug!("fonts ready"),
            Either::Left((Err(e), _)) => log::warn!("font loading failed: {}", js_error(&e)),
            Either::Right(_) => log::warn!("fonts not ready after {} ms; capturing anyway", policy.timeout_ms),
        }
    }

    async fn rasterize(&self, node: &HtmlElement, options: &RasterOptions) -> Result<HtmlCanvasElement, ExportError> {
        if !self.has_html2canvas() {
            log::warn!("html2canvas not loaded; painting preview snapshot");
            return paint::paint_document(&self.document, &self.snapshot, self.size);
        }

        let promise = html2canvas(node, &raster_options_object(options)?)
            .map_err(|e| ExportError::Rasterize(js_error(&e)))?;
        let value = JsFuture::from(promise)
            .await
            .map_err(|e| ExportError::Rasterize(js_error(&e)))?;
        value
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| ExportError::Rasterize("html2canvas did not return a canvas".into()))
    }

    fn encode_png(&self, raster: &HtmlCanvasElement) -> Result<String, ExportError> {
        raster
            .to_data_url_with_type("image/png")
            .map_err(|e| ExportError::Encode(js_error(&e)))
    }

    fn download(&self, payload: &str, file_name: &str) -> Result<(), ExportError> {
        let link = self
            .document
            .create_element("a")
            .map_err(|e| ExportError::Download(js_error(&e)))?
            .dyn_into::<HtmlAnchorElement>()
            .map_err(|_| ExportError::Download("anchor element has the wrong type".into()))?;
        link.set_download(file_name);
        link.set_href(payload);
        link.click();
        Ok(())
    }

    fn notify_failure(&self, message: &str) {
        if let Err(e) = self.window.alert_with_message(message) {
            log::warn!("failure notice not shown: {}", js_error(&e));
        }
    }
}
