#![no_main]

use std::time::Duration;

use libfuzzer_sys::fuzz_target;
use slideout::{
    Instant, MainContent, MenuContent, PointerEvent, PointerKind, Rect, SlideFrame,
    SlideoutConfig, SlideoutController,
};

struct Main;

impl MainContent for Main {
    fn render(&mut self, frame: &SlideFrame) {
        assert!((0.0..=1.0).contains(&frame.percentage), "frame out of range");
    }
}

struct Menu;

impl MenuContent for Menu {
    fn render(&mut self, _frame: &SlideFrame) {}
}

fuzz_target!(|data: &[u8]| {
    let Ok(controller) = SlideoutController::new(SlideoutConfig::default(), Box::new(Main), Box::new(Menu)) else {
        return;
    };
    let mut controller = controller.with_bounds(Rect::new(0.0, 0.0, 320.0, 480.0));
    let mut now = Instant::now();

    // Each 4-byte chunk: opcode, x, y, elapsed ms.
    for chunk in data.chunks_exact(4) {
        now += Duration::from_millis(u64::from(chunk[3] % 64));
        let position = (f64::from(chunk[1]) * 1.5, f64::from(chunk[2]) * 2.0);
        match chunk[0] % 10 {
            0 => controller.handle_pointer(&PointerEvent::new(PointerKind::Down, position, now)),
            1..=4 => controller.handle_pointer(&PointerEvent::new(PointerKind::Move, position, now)),
            5 => controller.handle_pointer(&PointerEvent::new(PointerKind::Up, position, now)),
            6 => controller.handle_pointer(&PointerEvent::new(PointerKind::Cancel, position, now)),
            7 => controller.toggle(chunk[1] % 2 == 0),
            8 => controller.set_menu_enabled(chunk[1] % 4 != 0),
            _ => {
                controller.tick(Duration::from_millis(u64::from(chunk[3])));
            }
        }

        // Post-conditions that must always hold:
        let p = controller.reveal_percentage();
        assert!((0.0..=1.0).contains(&p), "percentage out of range: {p}");
        if !controller.is_dragging() && !controller.is_animating() {
            let expected = if controller.is_open() { 1.0 } else { 0.0 };
            assert_eq!(p, expected, "resting percentage disagrees with committed state");
        }
    }
});
