//! Block cards for the slide editor
//!
//! Each block kind gets its own body. Cards never touch the presentation;
//! they report what the user asked for as a [`BlockAction`].

use eframe::egui::{self, Color32, RichText, Ui};

use crate::core::attachment::AttachedFile;
use crate::core::presentation::{Block, BlockContent, BlockKind, DocumentContent, ImageContent};

/// Action requested from a block card
#[derive(Debug, Clone)]
pub enum BlockAction {
    /// Replace the block content
    Update(BlockContent),
    /// Remove the block
    Delete,
    /// Open the image picker for this block
    PickImage,
    /// Ask for a file to attach
    AttachFile(BlockKind),
    /// Open an attached file in the system viewer
    OpenFile(AttachedFile),
}

const PROMPT_FILL: Color32 = Color32::from_rgb(52, 40, 74);

/// A drawn block card
pub struct BlockCard {
    pub action: Option<BlockAction>,
    pub delete: egui::Response,
}

/// Render a block card
pub fn render_block(ui: &mut Ui, block: &Block) -> BlockCard {
    egui::Frame::group(ui.style())
        .inner_margin(egui::Margin::same(12))
        .show(ui, |ui| {
            ui.set_width(ui.available_width());

            let delete = render_header(ui, block.kind());
            ui.add_space(6.0);

            let body = match block.content() {
                BlockContent::Text(text) => render_text(ui, text),
                BlockContent::Prompt(prompt) => render_prompt(ui, prompt),
                BlockContent::Image(image) => render_image(ui, image),
                BlockContent::Pdf(doc) | BlockContent::Pptx(doc) | BlockContent::Xlsx(doc) => {
                    render_document(ui, block.kind(), doc)
                }
            };

            let action = if delete.clicked() {
                Some(BlockAction::Delete)
            } else {
                body
            };
            BlockCard { action, delete }
        })
        .inner
}

/// Kind label and delete button
fn render_header(ui: &mut Ui, kind: BlockKind) -> egui::Response {
    ui.horizontal(|ui| {
        ui.label(RichText::new(format!("{} {}", kind.icon(), kind.label())).strong());
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            let delete = RichText::new("\u{1F5D1}").color(Color32::from_rgb(224, 108, 117));
            ui.button(delete).on_hover_text("Delete block")
        })
        .inner
    })
    .inner
}

fn render_text(ui: &mut Ui, text: &str) -> Option<BlockAction> {
    let mut buffer = text.to_string();
    let response = ui.add(
        egui::TextEdit::multiline(&mut buffer)
            .hint_text("Enter text...")
            .desired_rows(4)
            .desired_width(f32::INFINITY),
    );

    response
        .changed()
        .then(|| BlockAction::Update(BlockContent::Text(buffer)))
}

fn render_prompt(ui: &mut Ui, prompt: &str) -> Option<BlockAction> {
    let mut buffer = prompt.to_string();
    let mut action = None;

    egui::Frame::new()
        .fill(PROMPT_FILL)
        .corner_radius(4.0)
        .inner_margin(egui::Margin::same(4))
        .show(ui, |ui| {
            let response = ui.add(
                egui::TextEdit::multiline(&mut buffer)
                    .hint_text("Describe what the AI should generate for this slide...")
                    .desired_rows(4)
                    .desired_width(f32::INFINITY),
            );
            if response.changed() {
                action = Some(BlockAction::Update(BlockContent::Prompt(buffer.clone())));
            }
        });

    ui.add_space(4.0);
    ui.add_enabled(false, egui::Button::new("\u{2728} Generate content"))
        .on_disabled_hover_text("Content generation is not available yet");
    ui.label(
        RichText::new("The AI will build the slide from this description and the attached documents")
            .small()
            .weak(),
    );

    action
}

fn render_image(ui: &mut Ui, image: &ImageContent) -> Option<BlockAction> {
    let mut action = None;

    if ui.button("\u{1F5BC} Choose image").clicked() {
        action = Some(BlockAction::PickImage);
    }

    if !image.is_empty() {
        ui.add_space(6.0);
        ui.add(
            egui::Image::from_uri(image.url.as_str())
                .max_height(192.0)
                .maintain_aspect_ratio(true),
        )
        .on_hover_text(&image.alt);
    }

    action
}

fn render_document(ui: &mut Ui, kind: BlockKind, doc: &DocumentContent) -> Option<BlockAction> {
    let mut action = None;
    let format = kind.tag().to_uppercase();

    let caption = if doc.name.is_empty() {
        format!("{} Upload {}", kind.icon(), format)
    } else {
        format!("{} Replace {}", kind.icon(), format)
    };
    if ui.button(caption).clicked() {
        action = Some(BlockAction::AttachFile(kind));
    }

    if !doc.name.is_empty() {
        ui.add_space(4.0);
        egui::Frame::group(ui.style()).show(ui, |ui| {
            ui.horizontal(|ui| {
                ui.label(format!("{} {}", kind.icon(), doc.name));
                if let Some(file) = &doc.file {
                    ui.label(RichText::new(file.size_label()).weak());
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.small_button("Open").clicked() {
                            action = Some(BlockAction::OpenFile(file.clone()));
                        }
                    });
                }
            });
        });
    }

    let hint = match kind {
        BlockKind::Pdf => "The PDF will be embedded or exported as an appendix",
        BlockKind::Pptx => "Slides from the PPTX will be imported into your presentation",
        BlockKind::Xlsx => "Data from the XLSX will be used to generate content",
        BlockKind::Text | BlockKind::Image | BlockKind::Prompt => "",
    };
    ui.label(RichText::new(hint).small().weak());

    action
}
