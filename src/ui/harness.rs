//! Headless frames for panel tests

use std::num::NonZeroUsize;

use eframe::egui::{self, Event, Modifiers, PointerButton, Pos2, RawInput, Rect, Vec2};

/// An egui context driven by hand-made input
pub struct Harness {
    ctx: egui::Context,
}

impl Harness {
    pub fn new() -> Self {
        let ctx = egui::Context::default();
        ctx.options_mut(|o| o.max_passes = NonZeroUsize::MIN);
        Self { ctx }
    }

    /// Run one frame with `events`, drawing `show` in a central panel
    pub fn frame<R>(&self, events: Vec<Event>, mut show: impl FnMut(&mut egui::Ui) -> R) -> R {
        let input = RawInput {
            screen_rect: Some(Rect::from_min_size(Pos2::ZERO, Vec2::new(1280.0, 800.0))),
            events,
            ..Default::default()
        };
        let mut out = None;
        let _ = self.ctx.run(input, |ctx| {
            egui::CentralPanel::default().show(ctx, |ui| {
                out = Some(show(ui));
            });
        });
        out.expect("central panel was not drawn")
    }

    /// Press and release the primary button at `pos`; returns the release frame
    pub fn click<R>(&self, pos: Pos2, mut show: impl FnMut(&mut egui::Ui) -> R) -> R {
        self.frame(
            vec![Event::PointerMoved(pos), button(pos, true)],
            &mut show,
        );
        self.frame(vec![button(pos, false)], &mut show)
    }

    pub fn type_text<R>(&self, text: &str, show: impl FnMut(&mut egui::Ui) -> R) -> R {
        self.frame(vec![Event::Text(text.to_string())], show)
    }
}

fn button(pos: Pos2, pressed: bool) -> Event {
    Event::PointerButton {
        pos,
        button: PointerButton::Primary,
        pressed,
        modifiers: Modifiers::NONE,
    }
}
