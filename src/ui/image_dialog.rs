//! Dialog for choosing an image block's picture

use eframe::egui;

use crate::core::presentation::{BlockId, ImageContent, SlideId};

/// Image picker dialog state
#[derive(Debug, Default)]
pub struct ImagePickerDialog {
    pub visible: bool,
    pub query: String,
    target: Option<(SlideId, BlockId)>,
}

impl ImagePickerDialog {
    /// Open the dialog for an image block
    pub fn open(&mut self, slide: SlideId, block: BlockId) {
        self.visible = true;
        self.query.clear();
        self.target = Some((slide, block));
    }

    pub fn close(&mut self) {
        self.visible = false;
        self.query.clear();
        self.target = None;
    }

    /// Show the dialog; returns the chosen image and the block it belongs to
    pub fn show(&mut self, ctx: &egui::Context) -> Option<(SlideId, BlockId, ImageContent)> {
        if !self.visible {
            return None;
        }

        let mut result = None;
        let mut close = false;

        egui::Window::new("Choose image")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.label("Search query");
                ui.add(
                    egui::TextEdit::singleline(&mut self.query)
                        .hint_text("business meeting, startup, technology...")
                        .desired_width(320.0),
                );
                ui.add_space(4.0);
                ui.label(
                    egui::RichText::new(
                        "Images will be generated from the slide content in a future version",
                    )
                    .small()
                    .weak(),
                );
                ui.add_space(8.0);

                ui.horizontal(|ui| {
                    if ui.button("Cancel").clicked() {
                        close = true;
                    }
                    if ui.button("Apply").clicked() {
                        if let Some((slide, block)) = self.target {
                            result = Some((slide, block, ImageContent::from_search(&self.query)));
                        }
                        close = true;
                    }
                });
            });

        if close {
            self.close();
        }

        result
    }
}
