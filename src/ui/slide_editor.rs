//! Slide editor panel

use eframe::egui::{self, RichText};

use crate::app::DeckwrightApp;
use crate::core::attachment;
use crate::core::presentation::{BlockContent, BlockId, BlockKind, DocumentContent, SlideId};

use super::block_card::{self, BlockAction};

/// Edit requested while drawing the slide, applied once the frame is laid out
enum SlideEdit {
    Title(String),
    AddBlock(BlockKind),
    Block(BlockId, BlockAction),
}

/// Slide editor panel
pub struct SlideEditorPanel;

/// What the slide editor drew this frame
pub struct SlideEditorResponse {
    pub title: egui::Response,
    pub blocks: Vec<(BlockId, egui::Response)>,
    pub palette: Vec<(BlockKind, egui::Response)>,
}

impl SlideEditorPanel {
    /// Show the editor for the selected slide
    pub fn show(ui: &mut egui::Ui, app: &mut DeckwrightApp) -> Option<SlideEditorResponse> {
        let Some(slide) = app.session.active_slide() else {
            Self::show_empty(ui);
            return None;
        };
        let slide_id = slide.id();
        let mut edits = Vec::new();
        let mut blocks = Vec::new();
        let mut palette = Vec::new();

        let title = ui
            .vertical(|ui| {
                ui.label(RichText::new("Slide title").strong());
                let mut title = slide.title().to_string();
                let response = ui.add(
                    egui::TextEdit::singleline(&mut title)
                        .id_salt(("slide_title", slide_id))
                        .hint_text("Enter a title...")
                        .desired_width(f32::INFINITY),
                );
                if response.changed() {
                    edits.push(SlideEdit::Title(title));
                }

                ui.separator();

                egui::ScrollArea::vertical()
                    .id_salt("slide_editor_scroll")
                    .auto_shrink([false, false])
                    .show(ui, |ui| {
                        for block in slide.blocks() {
                            let card = ui
                                .push_id(block.id(), |ui| block_card::render_block(ui, block))
                                .inner;
                            if let Some(action) = card.action {
                                edits.push(SlideEdit::Block(block.id(), action));
                            }
                            blocks.push((block.id(), card.delete));
                            ui.add_space(8.0);
                        }

                        palette = Self::show_block_palette(ui);
                        if let Some((kind, _)) = palette.iter().find(|(_, button)| button.clicked()) {
                            edits.push(SlideEdit::AddBlock(*kind));
                        }
                    });
                response
            })
            .inner;

        for edit in edits {
            Self::apply(app, slide_id, edit);
        }

        Some(SlideEditorResponse {
            title,
            blocks,
            palette,
        })
    }

    /// Buttons for adding blocks
    fn show_block_palette(ui: &mut egui::Ui) -> Vec<(BlockKind, egui::Response)> {
        egui::Frame::group(ui.style())
            .show(ui, |ui| {
                ui.set_width(ui.available_width());
                ui.horizontal_wrapped(|ui| {
                    BlockKind::ALL
                        .into_iter()
                        .map(|kind| {
                            let button = ui.button(format!("{} {}", kind.icon(), kind.label()));
                            (kind, button)
                        })
                        .collect::<Vec<_>>()
                })
                .inner
            })
            .inner
    }

    fn apply(app: &mut DeckwrightApp, slide_id: SlideId, edit: SlideEdit) {
        match edit {
            SlideEdit::Title(title) => {
                app.session.edits().update_slide_title(slide_id, &title);
            }
            SlideEdit::AddBlock(kind) => {
                if let Err(e) = app.session.edits().add_block(slide_id, kind) {
                    tracing::error!("Failed to add block: {}", e);
                }
            }
            SlideEdit::Block(block_id, BlockAction::Update(content)) => {
                app.session.edits().update_block_content(slide_id, block_id, content);
            }
            SlideEdit::Block(block_id, BlockAction::Delete) => {
                app.session.edits().delete_block(slide_id, block_id);
            }
            SlideEdit::Block(block_id, BlockAction::PickImage) => {
                app.image_dialog.open(slide_id, block_id);
            }
            SlideEdit::Block(block_id, BlockAction::AttachFile(kind)) => {
                let Some(file) = attachment::pick_file(kind.label(), kind.file_extensions()) else {
                    return;
                };
                if let Some(content) =
                    BlockContent::document(kind, DocumentContent::attached(file))
                {
                    app.session.edits().update_block_content(slide_id, block_id, content);
                }
            }
            SlideEdit::Block(_, BlockAction::OpenFile(file)) => {
                if let Err(e) = file.open_external() {
                    tracing::error!("{:#}", e);
                }
            }
        }
    }

    /// Show empty state
    fn show_empty(ui: &mut egui::Ui) {
        ui.vertical_centered(|ui| {
            ui.add_space(100.0);
            ui.label("Select a slide to edit");
        });
    }
}
