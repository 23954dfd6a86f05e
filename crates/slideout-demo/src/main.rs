#![forbid(unsafe_code)]

//! Slideout demo.
//!
//! Replays a scripted session against a [`SlideoutController`] and logs every
//! frame and lifecycle hook:
//!
//! 1. menu button opens the menu
//! 2. a slow drag closes it again
//! 3. a short flick from the navigation bar opens it
//! 4. a tap on the main content closes it
//!
//! # Running
//!
//! ```sh
//! RUST_LOG=slideout=debug,slideout_demo=info cargo run -p slideout-demo -- [config.toml]
//! ```

use std::time::Duration;

use slideout::{
    ConfigError, FlyinSlide, Instant, MainContent, MenuContent, PointerEvent, PointerKind, Point,
    Rect, SlideFrame, SlideoutConfig, SlideoutController,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

const FRAME: Duration = Duration::from_millis(16);

struct LoggingMain;

impl MainContent for LoggingMain {
    fn render(&mut self, frame: &SlideFrame) {
        let origin = frame.main * Point::ZERO;
        info!(
            percentage = format_args!("{:.3}", frame.percentage),
            x = format_args!("{:.1}", origin.x),
            "main"
        );
    }
}

struct LoggingMenu;

impl MenuContent for LoggingMenu {
    fn render(&mut self, _frame: &SlideFrame) {}

    fn will_appear(&mut self) {
        info!("menu will appear");
    }

    fn did_appear(&mut self) {
        info!("menu did appear");
    }

    fn will_disappear(&mut self) {
        info!("menu will disappear");
    }

    fn did_disappear(&mut self) {
        info!("menu did disappear");
    }
}

/// Host clock: advances simulated time and drives the controller.
struct Clock {
    now: Instant,
}

impl Clock {
    fn advance(&mut self, by: Duration) -> Instant {
        self.now += by;
        self.now
    }

    fn run_frames(&mut self, slideout: &mut SlideoutController) {
        while slideout.is_animating() {
            self.advance(FRAME);
            slideout.tick(FRAME);
        }
    }

    fn drag(
        &mut self,
        slideout: &mut SlideoutController,
        from: (f64, f64),
        step: f64,
        steps: u32,
        interval: Duration,
    ) {
        let (x, y) = from;
        slideout.handle_pointer(&PointerEvent::new(PointerKind::Down, (x, y), self.now));
        for k in 1..=steps {
            let time = self.advance(interval);
            let position = (x + step * f64::from(k), y);
            slideout.handle_pointer(&PointerEvent::new(PointerKind::Move, position, time));
        }
        let end = (x + step * f64::from(steps), y);
        slideout.handle_pointer(&PointerEvent::new(PointerKind::Up, end, self.now));
    }
}

fn load_config() -> Result<SlideoutConfig, ConfigError> {
    match std::env::args().nth(1) {
        Some(path) => {
            info!(%path, "loading config");
            SlideoutConfig::from_toml_file(path)
        }
        None => Ok(SlideoutConfig::default()),
    }
}

fn main() -> Result<(), ConfigError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = load_config()?;
    let mut slideout =
        SlideoutController::new(config, Box::new(LoggingMain), Box::new(LoggingMenu))?
            .with_strategy(FlyinSlide::new())
            .with_bounds(Rect::new(0.0, 0.0, 320.0, 480.0));
    let mut clock = Clock { now: Instant::now() };

    info!("== menu button");
    slideout.toggle(true);
    clock.run_frames(&mut slideout);
    info!(open = slideout.is_open(), "settled");

    info!("== slow drag to close");
    clock.drag(&mut slideout, (300.0, 240.0), -12.0, 15, FRAME);
    clock.run_frames(&mut slideout);
    info!(open = slideout.is_open(), "settled");

    info!("== flick from the navigation bar");
    clock.drag(&mut slideout, (8.0, 30.0), 20.0, 3, Duration::from_millis(8));
    clock.run_frames(&mut slideout);
    info!(open = slideout.is_open(), "settled");

    info!("== tap outside");
    slideout.tap_main_content();
    clock.run_frames(&mut slideout);
    info!(open = slideout.is_open(), "settled");

    Ok(())
}
