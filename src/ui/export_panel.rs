//! Export screen: format, template and progress

use eframe::egui::{self, Color32, RichText};

use crate::app::DeckwrightApp;
use crate::core::attachment;
use crate::core::export::{ExportFormat, ExportState};

/// Export panel
pub struct ExportPanel;

impl ExportPanel {
    /// Show the export panel
    pub fn show(ui: &mut egui::Ui, app: &mut DeckwrightApp) {
        egui::ScrollArea::vertical()
            .id_salt("export_scroll")
            .show(ui, |ui| {
                ui.vertical_centered(|ui| {
                    ui.set_max_width(720.0);
                    ui.add_space(24.0);
                    ui.heading("Export presentation");
                    ui.label("Choose export options and download the finished file");
                    ui.add_space(16.0);
                });

                egui::Frame::group(ui.style())
                    .inner_margin(egui::Margin::same(16))
                    .show(ui, |ui| {
                        ui.set_width(ui.available_width());
                        Self::show_summary(ui, app);
                        ui.add_space(12.0);
                        Self::show_format(ui, app);
                        if app.export_settings.format.supports_template() {
                            ui.add_space(12.0);
                            Self::show_template(ui, app);
                        }
                        ui.add_space(12.0);
                        Self::show_status(ui, app);
                        ui.separator();
                        Self::show_actions(ui, app);
                    });

                ui.add_space(12.0);
                ui.vertical_centered(|ui| {
                    ui.label(
                        RichText::new(
                            "AI content generation and document processing will arrive in a future version",
                        )
                        .small()
                        .weak(),
                    );
                });
            });
    }

    fn show_summary(ui: &mut egui::Ui, app: &DeckwrightApp) {
        let presentation = app.session.presentation();
        ui.label(RichText::new("Presentation").strong());
        ui.label(format!("Slides: {}", presentation.slide_count()));
        ui.label(format!("Blocks: {}", presentation.block_count()));
    }

    fn show_format(ui: &mut egui::Ui, app: &mut DeckwrightApp) {
        ui.label(RichText::new("Export format").strong());
        let locked = app.export_job.is_running();
        for format in ExportFormat::ALL {
            ui.add_enabled_ui(!locked, |ui| {
                ui.radio_value(&mut app.export_settings.format, format, format.label());
            });
            ui.indent(format.extension(), |ui| {
                ui.label(RichText::new(format.description()).small().weak());
            });
        }
    }

    fn show_template(ui: &mut egui::Ui, app: &mut DeckwrightApp) {
        ui.label(RichText::new("Design template (optional)").strong());

        egui::Frame::group(ui.style()).show(ui, |ui| {
            ui.set_width(ui.available_width());
            let template_name = app.export_settings.template().map(|t| t.name.clone());
            if let Some(name) = template_name {
                ui.horizontal(|ui| {
                    ui.label(RichText::new("\u{2714}").color(Color32::from_rgb(152, 195, 121)));
                    ui.label(name);
                    if ui.small_button("Remove").clicked() {
                        app.export_settings.clear_template();
                    }
                });
            } else {
                ui.vertical_centered(|ui| {
                    if ui.button("Upload .pptx template").clicked() {
                        Self::pick_template(app);
                    }
                    ui.label(RichText::new("Upload your corporate template").small().weak());
                });
            }
        });
    }

    fn pick_template(app: &mut DeckwrightApp) {
        let Some(file) = attachment::pick_file("PowerPoint template", &["pptx"]) else {
            return;
        };
        let path = file.path.clone();
        if app.export_settings.set_template(file) {
            app.config.add_recent_template(path);
            if let Err(e) = app.config.save() {
                tracing::warn!("Failed to save config: {:#}", e);
            }
        }
    }

    fn show_status(ui: &mut egui::Ui, app: &DeckwrightApp) {
        match app.export_job.state() {
            ExportState::Running { progress, .. } => {
                ui.horizontal(|ui| {
                    ui.label("Generating presentation...");
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        ui.label(format!("{}%", progress));
                    });
                });
                ui.add(egui::ProgressBar::new(f32::from(*progress) / 100.0).animate(true));
            }
            ExportState::Complete(outcome) => {
                egui::Frame::group(ui.style())
                    .fill(Color32::from_rgb(30, 60, 40))
                    .show(ui, |ui| {
                        ui.set_width(ui.available_width());
                        ui.label(
                            RichText::new("\u{2714} Presentation is ready!")
                                .color(Color32::from_rgb(152, 195, 121))
                                .strong(),
                        );
                        ui.label(format!("{} will be downloaded automatically", outcome.file_name));
                        ui.label(
                            RichText::new(format!(
                                "{} slides, {}",
                                outcome.slide_count,
                                outcome.format.label()
                            ))
                            .small(),
                        );
                        if let Some(template) = &outcome.template {
                            ui.label(RichText::new(format!("Template: {}", template)).small());
                        }
                    });
            }
            ExportState::Idle | ExportState::Cancelled => {}
        }
    }

    fn show_actions(ui: &mut egui::Ui, app: &mut DeckwrightApp) {
        ui.horizontal(|ui| {
            let back = if app.export_job.is_running() {
                "\u{2190} Cancel and return to editor"
            } else {
                "\u{2190} Back to editor"
            };
            if ui.button(back).clicked() {
                app.back_to_editor();
            }

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                let caption = if app.export_job.is_running() {
                    "\u{23F3} Exporting..."
                } else if app.export_job.is_complete() {
                    "\u{2714} Done"
                } else {
                    "\u{2B07} Export"
                };
                let enabled = app.export_job.can_start();
                if ui.add_enabled(enabled, egui::Button::new(caption)).clicked() {
                    app.start_export();
                }
            });
        });
    }
}
