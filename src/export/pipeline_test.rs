use std::cell::RefCell;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use futures::executor::block_on;

use super::*;

/// Step at which the fake host fails.
#[derive(Clone, Copy, PartialEq, Eq)]
enum FailAt {
    Nowhere,
    Clone,
    Attach,
    Rasterize,
    Encode,
    Download,
}

/// Records every host call in order.
struct FakeHost {
    trigger: RefCell<TriggerState>,
    calls: RefCell<Vec<String>>,
    triggers: RefCell<Vec<TriggerState>>,
    fail_at: FailAt,
    yield_on_settle: bool,
}

impl FakeHost {
    fn new(fail_at: FailAt) -> Self {
        Self {
            trigger: RefCell::new(TriggerState::idle(&ExportConfig::default().idle_label)),
            calls: RefCell::new(Vec::new()),
            triggers: RefCell::new(Vec::new()),
            fail_at,
            yield_on_settle: false,
        }
    }

    fn record(&self, call: impl Into<String>) {
        self.calls.borrow_mut().push(call.into());
    }

    fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    fn fail(&self, step: FailAt, err: ExportError) -> Result<(), ExportError> {
        if self.fail_at == step { Err(err) } else { Ok(()) }
    }
}

/// Pending once, then ready: lets a second task run mid-export.
struct YieldOnce(bool);

impl Future for YieldOnce {
    type Output = ();

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
        if self.0 {
            Poll::Ready(())
        } else {
            self.0 = true;
            cx.waker().wake_by_ref();
            Poll::Pending
        }
    }
}

impl CaptureHost for FakeHost {
    type Node = &'static str;
    type Raster = Vec<u8>;

    fn trigger(&self) -> TriggerState {
        self.trigger.borrow().clone()
    }

    fn set_trigger(&self, state: TriggerState) {
        self.triggers.borrow_mut().push(state.clone());
        *self.trigger.borrow_mut() = state;
    }

    fn clone_preview(&self) -> Result<Self::Node, ExportError> {
        self.record("clone");
        self.fail(FailAt::Clone, ExportError::MissingElement("#story-preview".into()))?;
        Ok("clone")
    }

    fn detach_from_layout(&self, node: &Self::Node, size: TargetSize) -> Result<(), ExportError> {
        self.record(format!("detach {node} {}x{}", size.width, size.height));
        Ok(())
    }

    fn attach(&self, node: &Self::Node) -> Result<(), ExportError> {
        self.record(format!("attach {node}"));
        self.fail(FailAt::Attach, ExportError::Layout("no body".into()))
    }

    fn remove(&self, node: &Self::Node) {
        self.record(format!("remove {node}"));
    }

    async fn settle(&self, policy: SettlePolicy) {
        self.record(format!("settle {}/{}", policy.fallback_ms, policy.timeout_ms));
        if self.yield_on_settle {
            YieldOnce(false).await;
        }
    }

    async fn rasterize(&self, node: &Self::Node, options: &RasterOptions) -> Result<Self::Raster, ExportError> {
        self.record(format!("rasterize {node} scale={} cors={} bg={:?}", options.scale, options.use_cors, options.background));
        self.fail(FailAt::Rasterize, ExportError::Rasterize("tainted".into()))?;
        Ok(vec![0x89, b'P', b'N', b'G'])
    }

    fn encode_png(&self, raster: &Self::Raster) -> Result<String, ExportError> {
        self.record(format!("encode {}", raster.len()));
        self.fail(FailAt::Encode, ExportError::Encode("SecurityError".into()))?;
        Ok("data:image/png;base64,AAAA".to_owned())
    }

    fn download(&self, payload: &str, file_name: &str) -> Result<(), ExportError> {
        self.record(format!("download {file_name} {}", payload.len()));
        self.fail(FailAt::Download, ExportError::Download("blocked".into()))
    }

    fn notify_failure(&self, message: &str) {
        self.record(format!("notify {message}"));
    }
}

fn pipeline() -> ExportPipeline {
    ExportPipeline::new(ExportConfig::default())
}

fn assert_idle(host: &FakeHost) {
    let idle = TriggerState::idle(&ExportConfig::default().idle_label);
    assert_eq!(host.trigger(), idle);
}

// =============================================================
// Success path
// =============================================================

#[test]
fn successful_export_runs_every_step_in_order() {
    let host = FakeHost::new(FailAt::Nowhere);

    let outcome = block_on(pipeline().generate_image(&host, "2024-06-02"));

    assert_eq!(outcome, ExportOutcome::Saved { file_name: "reservation_2024-06-02.png".into() });
    assert_eq!(
        host.calls(),
        [
            "clone",
            "detach clone 1080x1920",
            "attach clone",
            "settle 100/1500",
            "rasterize clone scale=1 cors=true bg=None",
            "remove clone",
            "encode 4",
            "download reservation_2024-06-02.png 26",
        ]
    );
    assert_idle(&host);
}

#[test]
fn trigger_goes_busy_then_idle() {
    let host = FakeHost::new(FailAt::Nowhere);

    block_on(pipeline().generate_image(&host, "2024-06-05"));

    let config = ExportConfig::default();
    assert_eq!(
        *host.triggers.borrow(),
        [TriggerState::busy(&config.busy_label), TriggerState::idle(&config.idle_label)]
    );
}

#[test]
fn file_name_uses_literal_date_input() {
    assert_eq!(export_file_name("reservation_", "2024-06-05"), "reservation_2024-06-05.png");
    assert_eq!(export_file_name("story-", ""), "story-.png");
}

// =============================================================
// Failure paths
// =============================================================

#[test]
fn rasterize_failure_removes_clone_notifies_and_restores_trigger() {
    let host = FakeHost::new(FailAt::Rasterize);

    let outcome = block_on(pipeline().generate_image(&host, "2024-06-02"));

    assert_eq!(outcome, ExportOutcome::Failed(ExportError::Rasterize("tainted".into())));
    let calls = host.calls();
    assert!(calls.contains(&"remove clone".to_owned()));
    assert!(!calls.iter().any(|c| c.starts_with("download")));
    assert_eq!(calls.last().map(String::as_str), Some("notify 画像の生成に失敗しました。"));
    assert_idle(&host);
}

#[test]
fn clone_failure_skips_attach_and_remove() {
    let host = FakeHost::new(FailAt::Clone);

    let outcome = block_on(pipeline().generate_image(&host, "2024-06-02"));

    assert!(matches!(outcome, ExportOutcome::Failed(ExportError::MissingElement(_))));
    assert_eq!(host.calls(), ["clone", "notify 画像の生成に失敗しました。"]);
    assert_idle(&host);
}

#[test]
fn attach_failure_does_not_remove_unattached_clone() {
    let host = FakeHost::new(FailAt::Attach);

    let outcome = block_on(pipeline().generate_image(&host, "2024-06-02"));

    assert!(matches!(outcome, ExportOutcome::Failed(ExportError::Layout(_))));
    assert!(!host.calls().iter().any(|c| c.starts_with("remove") || c.starts_with("settle")));
    assert_idle(&host);
}

#[test]
fn failures_after_capture_still_detach_exactly_once() {
    for fail_at in [FailAt::Encode, FailAt::Download] {
        let host = FakeHost::new(fail_at);

        let outcome = block_on(pipeline().generate_image(&host, "2024-06-02"));

        assert!(matches!(outcome, ExportOutcome::Failed(_)));
        let removes = host.calls().iter().filter(|c| c.starts_with("remove")).count();
        assert_eq!(removes, 1);
        assert_idle(&host);
    }
}

// =============================================================
// Busy guard
// =============================================================

#[test]
fn trigger_while_busy_is_rejected_without_side_effects() {
    let host = FakeHost::new(FailAt::Nowhere);
    host.set_trigger(TriggerState::busy("生成中..."));
    host.triggers.borrow_mut().clear();

    let outcome = block_on(pipeline().generate_image(&host, "2024-06-02"));

    assert_eq!(outcome, ExportOutcome::Rejected);
    assert!(host.calls().is_empty());
    assert!(host.triggers.borrow().is_empty());
}

#[test]
fn second_export_during_settle_is_rejected() {
    let mut host = FakeHost::new(FailAt::Nowhere);
    host.yield_on_settle = true;
    let pipeline = pipeline();

    let (first, second) = block_on(async {
        futures::join!(
            pipeline.generate_image(&host, "2024-06-02"),
            pipeline.generate_image(&host, "2024-06-02"),
        )
    });

    assert!(matches!(first, ExportOutcome::Saved { .. }));
    assert_eq!(second, ExportOutcome::Rejected);
    assert_eq!(host.calls().iter().filter(|c| *c == "clone").count(), 1);
    assert_idle(&host);
}
