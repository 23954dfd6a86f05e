//! End-to-end pointer flows through the slideout controller.
//!
//! Drives the controller with raw [`PointerEvent`]s (so velocity comes from
//! the sampler's estimator) and checks the committed state, the menu
//! lifecycle sequence, and the structured log output.
//!
//! Run with: `cargo test -p slideout --test pointer_flow`

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use slideout::{
    Instant, MainContent, MenuContent, MenuLifecycle, PointerEvent, PointerKind, Rect,
    SlideFrame, SlideoutConfig, SlideoutController, SlideoutPhase,
};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;

const FRAME: Duration = Duration::from_millis(16);

// ============================================================================
// Tracing capture infrastructure
// ============================================================================

#[derive(Debug, Clone)]
struct CapturedEvent {
    level: tracing::Level,
    fields: HashMap<String, String>,
}

#[derive(Clone, Default)]
struct Capture {
    spans: Arc<Mutex<Vec<String>>>,
    events: Arc<Mutex<Vec<CapturedEvent>>>,
}

impl Capture {
    fn spans(&self) -> Vec<String> {
        self.spans.lock().unwrap().clone()
    }

    fn events(&self) -> Vec<CapturedEvent> {
        self.events.lock().unwrap().clone()
    }

    fn messages(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|e| e.fields.get("message").cloned())
            .collect()
    }

    fn warnings(&self) -> usize {
        self.events()
            .iter()
            .filter(|e| e.level == tracing::Level::WARN)
            .count()
    }
}

struct FieldVisitor(Vec<(String, String)>);

impl tracing::field::Visit for FieldVisitor {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        self.0.push((field.name().to_string(), format!("{value:?}")));
    }
    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        self.0.push((field.name().to_string(), value.to_string()));
    }
    fn record_f64(&mut self, field: &tracing::field::Field, value: f64) {
        self.0.push((field.name().to_string(), value.to_string()));
    }
    fn record_bool(&mut self, field: &tracing::field::Field, value: bool) {
        self.0.push((field.name().to_string(), value.to_string()));
    }
}

impl<S> tracing_subscriber::Layer<S> for Capture
where
    S: tracing::Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_new_span(
        &self,
        attrs: &tracing::span::Attributes<'_>,
        _id: &tracing::span::Id,
        _ctx: tracing_subscriber::layer::Context<'_, S>,
    ) {
        self.spans
            .lock()
            .unwrap()
            .push(attrs.metadata().name().to_string());
    }

    fn on_event(&self, event: &tracing::Event<'_>, _ctx: tracing_subscriber::layer::Context<'_, S>) {
        let mut visitor = FieldVisitor(Vec::new());
        event.record(&mut visitor);
        self.events.lock().unwrap().push(CapturedEvent {
            level: *event.metadata().level(),
            fields: visitor.0.into_iter().collect(),
        });
    }
}

fn with_captured_tracing<F, R>(f: F) -> (R, Capture)
where
    F: FnOnce() -> R,
{
    let capture = Capture::default();
    let subscriber = tracing_subscriber::registry().with(capture.clone());
    let result = tracing::subscriber::with_default(subscriber, f);
    (result, capture)
}

// ============================================================================
// Fixtures
// ============================================================================

type HookLog = Rc<RefCell<Vec<MenuLifecycle>>>;

struct Main;

impl MainContent for Main {
    fn render(&mut self, _frame: &SlideFrame) {}
}

struct Menu(HookLog);

impl MenuContent for Menu {
    fn render(&mut self, _frame: &SlideFrame) {}
    fn will_appear(&mut self) {
        self.0.borrow_mut().push(MenuLifecycle::WillAppear);
    }
    fn did_appear(&mut self) {
        self.0.borrow_mut().push(MenuLifecycle::DidAppear);
    }
    fn will_disappear(&mut self) {
        self.0.borrow_mut().push(MenuLifecycle::WillDisappear);
    }
    fn did_disappear(&mut self) {
        self.0.borrow_mut().push(MenuLifecycle::DidDisappear);
    }
}

fn slideout() -> (SlideoutController, HookLog) {
    let hooks: HookLog = Rc::default();
    let controller = SlideoutController::new(
        SlideoutConfig::default(),
        Box::new(Main),
        Box::new(Menu(Rc::clone(&hooks))),
    )
    .unwrap()
    .with_bounds(Rect::new(0.0, 0.0, 320.0, 480.0));
    (controller, hooks)
}

/// Replays a pointer trace of `(kind, x, y, ms)` tuples.
fn replay(controller: &mut SlideoutController, base: Instant, trace: &[(PointerKind, f64, f64, u64)]) {
    for &(kind, x, y, ms) in trace {
        let time = base + Duration::from_millis(ms);
        controller.handle_pointer(&PointerEvent::new(kind, (x, y), time));
    }
}

fn settle(controller: &mut SlideoutController) {
    for _ in 0..1000 {
        if !controller.tick(FRAME) {
            return;
        }
    }
    panic!("animation never settled");
}

// ============================================================================
// Tests
// ============================================================================

#[test]
fn slow_long_drag_opens_menu() {
    let (mut c, hooks) = slideout();
    let base = Instant::now();
    let mut trace = vec![(PointerKind::Down, 10.0, 20.0, 0)];
    for k in 1..=16u32 {
        trace.push((PointerKind::Move, 10.0 + 10.0 * f64::from(k), 20.0, 16 * u64::from(k)));
    }
    trace.push((PointerKind::Up, 170.0, 20.0, 16 * 17));

    replay(&mut c, base, &trace[..trace.len() - 1]);
    assert_eq!(c.phase(), SlideoutPhase::Dragging);
    assert!((c.reveal_percentage() - 160.0 / 260.0).abs() < 1e-9);

    replay(&mut c, base, &trace[trace.len() - 1..]);
    assert!(!c.is_dragging());
    assert!(!c.is_open(), "commit waits for the settle animation");
    settle(&mut c);

    assert!(c.is_open());
    assert_eq!(c.reveal_percentage(), 1.0);
    assert_eq!(
        *hooks.borrow(),
        [MenuLifecycle::WillAppear, MenuLifecycle::DidAppear]
    );
}

#[test]
fn quick_flick_opens_from_short_drag() {
    let (mut c, _) = slideout();
    let base = Instant::now();
    replay(
        &mut c,
        base,
        &[
            (PointerKind::Down, 10.0, 20.0, 0),
            (PointerKind::Move, 34.0, 20.0, 8),
            (PointerKind::Move, 58.0, 20.0, 16),
            (PointerKind::Move, 82.0, 20.0, 24),
            (PointerKind::Up, 82.0, 20.0, 24),
        ],
    );
    // 72 / 260 is below the distance threshold; velocity carries it.
    settle(&mut c);
    assert!(c.is_open());
}

#[test]
fn quick_flick_closes_open_menu_from_anywhere() {
    let (mut c, hooks) = slideout();
    c.open(false);
    let base = Instant::now();
    replay(
        &mut c,
        base,
        &[
            (PointerKind::Down, 300.0, 300.0, 0),
            (PointerKind::Move, 276.0, 300.0, 8),
            (PointerKind::Move, 252.0, 300.0, 16),
            (PointerKind::Move, 228.0, 300.0, 24),
            (PointerKind::Up, 228.0, 300.0, 24),
        ],
    );
    settle(&mut c);
    assert!(!c.is_open());
    assert_eq!(
        *hooks.borrow(),
        [
            MenuLifecycle::WillAppear,
            MenuLifecycle::DidAppear,
            MenuLifecycle::WillDisappear,
            MenuLifecycle::DidDisappear,
        ]
    );
}

#[test]
fn vertical_scroll_is_left_alone_quietly() {
    let (mut c, hooks) = slideout();
    let base = Instant::now();
    let ((), capture) = with_captured_tracing(|| {
        replay(
            &mut c,
            base,
            &[
                (PointerKind::Down, 10.0, 20.0, 0),
                (PointerKind::Move, 11.0, 40.0, 16),
                (PointerKind::Move, 12.0, 80.0, 32),
                (PointerKind::Move, 13.0, 120.0, 48),
                (PointerKind::Up, 13.0, 120.0, 64),
            ],
        );
    });
    assert!(!c.is_dragging());
    assert_eq!(c.reveal_percentage(), 0.0);
    assert!(hooks.borrow().is_empty());
    assert_eq!(capture.warnings(), 0, "{:?}", capture.messages());
    assert!(capture.messages().iter().any(|m| m == "pan refused: vertical"));
}

#[test]
fn programmatic_close_mid_drag_swallows_rest_of_pan() {
    let (mut c, _) = slideout();
    let base = Instant::now();
    replay(
        &mut c,
        base,
        &[
            (PointerKind::Down, 10.0, 20.0, 0),
            (PointerKind::Move, 60.0, 20.0, 16),
        ],
    );
    assert!(c.is_dragging());

    let ((), capture) = with_captured_tracing(|| {
        c.close(false);
        replay(
            &mut c,
            base,
            &[
                (PointerKind::Move, 200.0, 20.0, 32),
                (PointerKind::Up, 200.0, 20.0, 48),
            ],
        );
    });
    assert!(!c.is_dragging());
    assert!(!c.is_open());
    assert_eq!(c.reveal_percentage(), 0.0);
    assert_eq!(capture.warnings(), 0, "{:?}", capture.messages());
}

#[test]
fn release_is_decided_inside_settle_span() {
    let (mut c, _) = slideout();
    let base = Instant::now();
    let ((), capture) = with_captured_tracing(|| {
        replay(
            &mut c,
            base,
            &[
                (PointerKind::Down, 10.0, 20.0, 0),
                (PointerKind::Move, 40.0, 20.0, 16),
                (PointerKind::Move, 70.0, 20.0, 32),
                (PointerKind::Up, 70.0, 20.0, 48),
            ],
        );
    });
    assert!(capture.spans().iter().any(|s| s == "slideout.settle"));
    let released = capture
        .events()
        .into_iter()
        .find(|e| e.fields.get("message").is_some_and(|m| m == "drag released"))
        .expect("release is logged");
    assert_eq!(released.level, tracing::Level::DEBUG);
    assert!(released.fields.contains_key("target"));
    assert!(released.fields.contains_key("duration"));
}

#[test]
fn stray_gesture_samples_warn_and_do_nothing() {
    let (mut c, _) = slideout();
    let ((), capture) = with_captured_tracing(|| {
        c.handle_gesture(&slideout::GestureSample::changed(
            slideout::Point::new(10.0, 10.0),
            slideout::Vec2::new(100.0, 0.0),
            slideout::Vec2::ZERO,
        ));
    });
    assert_eq!(c.reveal_percentage(), 0.0);
    assert_eq!(capture.warnings(), 1);
}
