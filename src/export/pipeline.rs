//! Export orchestration.
//!
//! DESIGN
//! ======
//! One run: mark the trigger busy, clone the preview, pin the clone at the
//! target size outside the layout, attach it, wait for fonts, rasterize,
//! detach, encode, download. Two drop guards carry the cleanup rules: the
//! clone is detached as soon as rasterization returns (or the run is
//! dropped), and the trigger returns to idle however the run ends.
//!
//! The busy check and the busy mark happen before the first `.await`, so on
//! the single UI thread a second trigger always observes the first one.

use crate::config::ExportConfig;
use crate::export::ExportError;

#[cfg(test)]
#[path = "pipeline_test.rs"]
mod pipeline_test;

/// State of the export button.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TriggerState {
    pub enabled: bool,
    pub label: String,
}

impl TriggerState {
    #[must_use]
    pub fn idle(label: &str) -> Self {
        Self { enabled: true, label: label.to_owned() }
    }

    #[must_use]
    pub fn busy(label: &str) -> Self {
        Self { enabled: false, label: label.to_owned() }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TargetSize {
    pub width: u32,
    pub height: u32,
}

/// How long to wait for the page to be ready before capture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SettlePolicy {
    /// Fixed wait when no readiness signal exists.
    pub fallback_ms: u32,
    /// Upper bound on waiting for the readiness signal.
    pub timeout_ms: u32,
}

/// Options handed to the rasterizer.
#[derive(Debug, Clone, PartialEq)]
pub struct RasterOptions {
    pub scale: f64,
    /// Load cross-origin images with CORS.
    pub use_cors: bool,
    /// `None` renders a transparent background.
    pub background: Option<String>,
    pub logging: bool,
}

impl Default for RasterOptions {
    fn default() -> Self {
        Self { scale: 1.0, use_cors: true, background: None, logging: false }
    }
}

/// The document operations an export run needs.
///
/// `Node` is the detached clone of the preview; `Raster` is whatever the
/// rasterizer produces.
#[allow(async_fn_in_trait)]
pub trait CaptureHost {
    type Node;
    type Raster;

    fn trigger(&self) -> TriggerState;
    fn set_trigger(&self, state: TriggerState);

    /// Deep-clone the preview root.
    ///
    /// # Errors
    ///
    /// Fails when the preview is missing or cannot be cloned.
    fn clone_preview(&self) -> Result<Self::Node, ExportError>;

    /// Reset transform and position so `node` renders at `size`, fixed at
    /// the page origin behind all content.
    ///
    /// # Errors
    ///
    /// Fails when a style property is rejected.
    fn detach_from_layout(&self, node: &Self::Node, size: TargetSize) -> Result<(), ExportError>;

    /// Insert `node` into the document so layout is computed for it.
    ///
    /// # Errors
    ///
    /// Fails when the document has no body or refuses the insertion.
    fn attach(&self, node: &Self::Node) -> Result<(), ExportError>;

    /// Remove `node` from the document. Must tolerate repeated calls.
    fn remove(&self, node: &Self::Node);

    /// Wait until fonts and layout are ready, bounded by `policy`.
    async fn settle(&self, policy: SettlePolicy);

    /// Render `node` to a raster surface.
    ///
    /// # Errors
    ///
    /// Fails when the rasterizer rejects or returns something unusable.
    async fn rasterize(&self, node: &Self::Node, options: &RasterOptions) -> Result<Self::Raster, ExportError>;

    /// Encode `raster` as a PNG data URL.
    ///
    /// # Errors
    ///
    /// Fails when the surface cannot be encoded (e.g. tainted canvas).
    fn encode_png(&self, raster: &Self::Raster) -> Result<String, ExportError>;

    /// Offer `payload` to the user as `file_name`.
    ///
    /// # Errors
    ///
    /// Fails when the download link cannot be created.
    fn download(&self, payload: &str, file_name: &str) -> Result<(), ExportError>;

    /// Show a user-visible failure message.
    fn notify_failure(&self, message: &str);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportOutcome {
    Saved { file_name: String },
    Failed(ExportError),
    /// Another export was in flight.
    Rejected,
}

/// Download name for an export of `date_input`, e.g. `reservation_2024-06-02.png`.
#[must_use]
pub fn export_file_name(prefix: &str, date_input: &str) -> String {
    format!("{prefix}{date_input}.png")
}

pub struct ExportPipeline {
    config: ExportConfig,
}

impl ExportPipeline {
    #[must_use]
    pub fn new(config: ExportConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn target_size(&self) -> TargetSize {
        TargetSize { width: self.config.width, height: self.config.height }
    }

    #[must_use]
    pub fn settle_policy(&self) -> SettlePolicy {
        SettlePolicy {
            fallback_ms: self.config.settle_fallback_ms,
            timeout_ms: self.config.settle_timeout_ms,
        }
    }

    /// Run one export of the preview, named after `date_input`.
    ///
    /// Never fails: errors are logged, reported through
    /// [`CaptureHost::notify_failure`], and returned as
    /// [`ExportOutcome::Failed`].
    pub async fn generate_image<H: CaptureHost>(&self, host: &H, date_input: &str) -> ExportOutcome {
        if !host.trigger().enabled {
            log::warn!("export already in progress; trigger ignored");
            return ExportOutcome::Rejected;
        }
        host.set_trigger(TriggerState::busy(&self.config.busy_label));
        let _restore = RestoreTrigger { host, idle: TriggerState::idle(&self.config.idle_label) };

        let file_name = export_file_name(&self.config.file_prefix, date_input);
        match self.capture(host, &file_name).await {
            Ok(()) => {
                log::info!("exported {file_name}");
                ExportOutcome::Saved { file_name }
            }
            Err(e) => {
                log::error!("image generation failed: {e}");
                host.notify_failure(&self.config.failure_notice);
                ExportOutcome::Failed(e)
            }
        }
    }

    async fn capture<H: CaptureHost>(&self, host: &H, file_name: &str) -> Result<(), ExportError> {
        let node = host.clone_preview()?;
        host.detach_from_layout(&node, self.target_size())?;
        host.attach(&node)?;

        let raster = {
            let attached = Attached { host, node: &node };
            log::debug!("capture node attached; settling");
            host.settle(self.settle_policy()).await;
            host.rasterize(attached.node, &RasterOptions::default()).await
        };

        let payload = host.encode_png(&raster?)?;
        host.download(&payload, file_name)
    }
}

/// Detaches the capture node on drop.
struct Attached<'a, H: CaptureHost> {
    host: &'a H,
    node: &'a H::Node,
}

impl<H: CaptureHost> Drop for Attached<'_, H> {
    fn drop(&mut self) {
        self.host.remove(self.node);
    }
}

/// Returns the trigger to idle on drop.
struct RestoreTrigger<'a, H: CaptureHost> {
    host: &'a H,
    idle: TriggerState,
}

impl<H: CaptureHost> Drop for RestoreTrigger<'_, H> {
    fn drop(&mut self) {
        self.host.set_trigger(self.idle.clone());
    }
}
