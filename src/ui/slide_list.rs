//! Slide list panel: the deck outline shown in the sidebar

use eframe::egui::{self, Color32, RichText};

use crate::app::DeckwrightApp;
use crate::core::presentation::{Slide, SlideId};

/// Block summaries shown per slide
const PREVIEW_BLOCKS: usize = 3;

const ACCENT: Color32 = Color32::from_rgb(0, 87, 184);

/// Slide list panel
pub struct SlideListPanel;

/// What the slide list drew this frame
pub struct SlideListResponse {
    pub add: egui::Response,
    pub cards: Vec<SlideCardResponse>,
}

/// One slide card and its delete button
pub struct SlideCardResponse {
    pub id: SlideId,
    pub card: egui::Response,
    pub delete: egui::Response,
}

enum SlideListAction {
    Select(SlideId),
    Delete(SlideId),
}

impl SlideListPanel {
    /// Show the slide list panel
    pub fn show(ui: &mut egui::Ui, app: &mut DeckwrightApp) -> SlideListResponse {
        let mut action = None;
        let mut cards = Vec::new();

        let add = ui
            .vertical(|ui| {
                ui.heading(format!(
                    "Structure ({})",
                    app.session.presentation().slide_count()
                ));
                ui.add_space(4.0);
                let add = ui
                    .add_sized([ui.available_width(), 28.0], egui::Button::new("+ Add slide"))
                    .on_hover_text("Ctrl+N");

                ui.separator();

                let can_delete = app.session.presentation().slide_count() > 1;
                let active = app.session.active_slide_id();

                egui::ScrollArea::vertical()
                    .id_salt("slide_list_scroll")
                    .show(ui, |ui| {
                        for (index, slide) in app.session.presentation().slides().iter().enumerate() {
                            let (card, a) =
                                Self::show_slide(ui, index, slide, slide.id() == active, can_delete);
                            if a.is_some() {
                                action = a;
                            }
                            cards.push(card);
                            ui.add_space(6.0);
                        }
                    });
                add
            })
            .inner;

        if add.clicked() {
            app.session.add_slide();
        }

        match action {
            Some(SlideListAction::Select(id)) => {
                app.session.select(id);
            }
            Some(SlideListAction::Delete(id)) => {
                app.session.delete_slide(id);
            }
            None => {}
        }

        SlideListResponse { add, cards }
    }

    /// Show one slide card.
    ///
    /// The card senses clicks before its children are laid out, so the delete
    /// button on top of it still gets its own clicks.
    fn show_slide(
        ui: &mut egui::Ui,
        index: usize,
        slide: &Slide,
        is_active: bool,
        can_delete: bool,
    ) -> (SlideCardResponse, Option<SlideListAction>) {
        let mut frame = egui::Frame::group(ui.style()).inner_margin(egui::Margin::same(8));
        if is_active {
            frame = frame.stroke(egui::Stroke::new(2.0, ACCENT));
        }

        let builder = egui::UiBuilder::new()
            .id_salt(slide.id())
            .sense(egui::Sense::click());
        let scope = ui.scope_builder(builder, |ui| {
            ui.style_mut().interaction.selectable_labels = false;
            frame
                .show(ui, |ui| {
                    ui.set_width(ui.available_width());
                    let delete = ui
                        .horizontal(|ui| {
                            ui.label(
                                RichText::new(format!(" {} ", index + 1))
                                    .background_color(ACCENT)
                                    .color(Color32::WHITE),
                            );
                            ui.label(RichText::new(slide.display_title()).strong());
                            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                                ui.add_enabled(can_delete, egui::Button::new("\u{1F5D1}").small())
                                    .on_hover_text("Delete slide")
                                    .on_disabled_hover_text("The last slide can't be deleted")
                            })
                            .inner
                        })
                        .inner;

                    let lines = slide.preview_lines(PREVIEW_BLOCKS);
                    if lines.is_empty() {
                        ui.label(RichText::new("No blocks").small().weak());
                    }
                    for line in lines {
                        ui.add(egui::Label::new(RichText::new(line).small()).truncate());
                    }
                    let hidden = slide.hidden_block_count(PREVIEW_BLOCKS);
                    if hidden > 0 {
                        ui.label(RichText::new(format!("+{} more", hidden)).small().weak());
                    }
                    delete
                })
                .inner
        });

        let card = scope.response;
        let delete = scope.inner;
        let action = if delete.clicked() {
            Some(SlideListAction::Delete(slide.id()))
        } else if card.clicked() {
            Some(SlideListAction::Select(slide.id()))
        } else {
            None
        };

        (
            SlideCardResponse {
                id: slide.id(),
                card,
                delete,
            },
            action,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::AppConfig;
    use crate::ui::harness::Harness;

    /// A point inside the card's margin, away from its labels and buttons
    fn card_margin(card: &SlideCardResponse) -> egui::Pos2 {
        card.card.rect.left_bottom() + egui::vec2(4.0, -4.0)
    }

    #[test]
    fn test_click_delete_removes_slide() {
        let mut app = DeckwrightApp::with_config(AppConfig::default());
        let first = app.session.active_slide_id();
        let second = app.session.add_slide();
        let harness = Harness::new();

        let drawn = harness.frame(vec![], |ui| SlideListPanel::show(ui, &mut app));
        let target = drawn.cards.iter().find(|c| c.id == second).unwrap();
        let pos = target.delete.rect.center();

        harness.click(pos, |ui| SlideListPanel::show(ui, &mut app));

        assert_eq!(app.session.presentation().slide_count(), 1);
        assert!(app.session.presentation().slide(second).is_none());
        assert_eq!(app.session.active_slide_id(), first);
    }

    #[test]
    fn test_click_card_selects_slide() {
        let mut app = DeckwrightApp::with_config(AppConfig::default());
        let first = app.session.active_slide_id();
        app.session.add_slide();
        let harness = Harness::new();

        let drawn = harness.frame(vec![], |ui| SlideListPanel::show(ui, &mut app));
        let pos = card_margin(drawn.cards.iter().find(|c| c.id == first).unwrap());

        harness.click(pos, |ui| SlideListPanel::show(ui, &mut app));

        assert_eq!(app.session.active_slide_id(), first);
        assert_eq!(app.session.presentation().slide_count(), 2);
    }

    #[test]
    fn test_last_slide_delete_disabled() {
        let mut app = DeckwrightApp::with_config(AppConfig::default());
        let harness = Harness::new();

        let drawn = harness.frame(vec![], |ui| SlideListPanel::show(ui, &mut app));
        assert!(!drawn.cards[0].delete.enabled());
        let pos = drawn.cards[0].delete.rect.center();

        harness.click(pos, |ui| SlideListPanel::show(ui, &mut app));
        assert_eq!(app.session.presentation().slide_count(), 1);
    }

    #[test]
    fn test_click_add_slide() {
        let mut app = DeckwrightApp::with_config(AppConfig::default());
        let harness = Harness::new();

        let drawn = harness.frame(vec![], |ui| SlideListPanel::show(ui, &mut app));
        let pos = drawn.add.rect.center();

        let drawn = harness.click(pos, |ui| SlideListPanel::show(ui, &mut app));
        assert_eq!(app.session.presentation().slide_count(), 2);
        assert_eq!(drawn.cards.len(), 1);

        let drawn = harness.frame(vec![], |ui| SlideListPanel::show(ui, &mut app));
        assert_eq!(drawn.cards.len(), 2);
        assert_eq!(app.session.active_slide_id(), drawn.cards[1].id);
    }
}
