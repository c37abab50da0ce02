//! Main application state and UI coordination

use std::time::{Duration, Instant};

use eframe::egui;

use crate::core::config::AppConfig;
use crate::core::export::{ExportJob, ExportRequest, ExportSettings};
use crate::core::presentation::BlockContent;
use crate::core::session::EditorSession;
use crate::ui::{
    export_panel::ExportPanel, image_dialog::ImagePickerDialog, slide_editor::SlideEditorPanel,
    slide_list::SlideListPanel,
};

/// Screen currently shown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Step {
    #[default]
    Edit,
    Export,
}

/// Main application state
pub struct DeckwrightApp {
    /// The presentation and the selected slide
    pub session: EditorSession,
    /// Current screen
    pub step: Step,
    /// Export screen choices
    pub export_settings: ExportSettings,
    /// Running or finished export
    pub export_job: ExportJob,
    /// Image picker dialog
    pub image_dialog: ImagePickerDialog,
    /// Application configuration
    pub config: AppConfig,
    /// Whether sidebar is visible
    pub sidebar_visible: bool,
}

impl DeckwrightApp {
    /// Create a new application instance
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        egui_extras::install_image_loaders(&cc.egui_ctx);

        let config = AppConfig::load().unwrap_or_else(|e| {
            tracing::warn!("Using default config: {:#}", e);
            AppConfig::default()
        });
        Self::configure_style(&cc.egui_ctx, &config);

        Self::with_config(config)
    }

    /// Create the application state from a configuration
    pub fn with_config(config: AppConfig) -> Self {
        Self {
            session: EditorSession::new(&config.editor.default_slide_title),
            step: Step::Edit,
            export_settings: ExportSettings::new(config.export.default_format),
            export_job: Self::new_export_job(&config),
            image_dialog: ImagePickerDialog::default(),
            config,
            sidebar_visible: true,
        }
    }

    fn new_export_job(config: &AppConfig) -> ExportJob {
        ExportJob::new(
            Duration::from_millis(config.export.tick_interval_ms),
            config.export.progress_step,
        )
    }

    /// Apply theme and font size
    fn configure_style(ctx: &egui::Context, config: &AppConfig) {
        if config.is_light_theme() {
            ctx.set_visuals(egui::Visuals::light());
        } else {
            ctx.set_visuals(egui::Visuals::dark());
        }

        let size = config.editor.font_size;
        ctx.style_mut(|style| {
            for style_id in [egui::TextStyle::Body, egui::TextStyle::Button] {
                if let Some(font) = style.text_styles.get_mut(&style_id) {
                    font.size = size;
                }
            }
        });
    }

    /// Discard the presentation and start over
    pub fn new_presentation(&mut self) {
        self.export_job.cancel();
        self.session = EditorSession::new(&self.config.editor.default_slide_title);
        self.image_dialog.close();
        self.step = Step::Edit;
        tracing::info!("Started a new presentation");
    }

    /// Switch to the export screen; only allowed once the deck has a prompt
    pub fn go_to_export(&mut self) -> bool {
        if !self.session.is_export_ready() {
            return false;
        }
        self.image_dialog.close();
        self.export_settings = ExportSettings::new(self.config.export.default_format);
        self.export_job = Self::new_export_job(&self.config);
        self.step = Step::Export;
        true
    }

    /// Leave the export screen, cancelling a running export
    pub fn back_to_editor(&mut self) {
        self.export_job.cancel();
        self.step = Step::Edit;
    }

    /// Begin the export of the current presentation
    pub fn start_export(&mut self) -> bool {
        self.start_export_at(Instant::now())
    }

    fn start_export_at(&mut self, now: Instant) -> bool {
        if self.step != Step::Export || !self.session.is_export_ready() {
            return false;
        }
        let request = ExportRequest::new(
            &self.export_settings,
            self.session.presentation().slide_count(),
        );
        self.export_job.start(request, now)
    }

    /// Advance the export and schedule the next repaint
    fn tick_export(&mut self, ctx: &egui::Context) {
        let now = Instant::now();
        self.export_job.poll(now);
        if let Some(wait) = self.export_job.time_to_next_tick(now) {
            ctx.request_repaint_after(wait);
        }
    }

    fn toggle_theme(&mut self, ctx: &egui::Context) {
        self.config.ui.theme = if self.config.is_light_theme() {
            "dark".to_string()
        } else {
            "light".to_string()
        };
        Self::configure_style(ctx, &self.config);
        if let Err(e) = self.config.save() {
            tracing::warn!("Failed to save config: {:#}", e);
        }
    }

    /// Render the top menu bar
    fn render_menu_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("File", |ui| {
                    if ui.button("New Presentation").clicked() {
                        self.new_presentation();
                        ui.close();
                    }
                    let can_export = self.step == Step::Edit && self.session.is_export_ready();
                    if ui.add_enabled(can_export, egui::Button::new("Export...")).clicked() {
                        self.go_to_export();
                        ui.close();
                    }
                    ui.separator();
                    if ui.button("Exit").clicked() {
                        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                    }
                });

                ui.menu_button("View", |ui| {
                    if ui.button("Toggle Sidebar").clicked() {
                        self.sidebar_visible = !self.sidebar_visible;
                        ui.close();
                    }
                    let theme = if self.config.is_light_theme() {
                        "Dark Theme"
                    } else {
                        "Light Theme"
                    };
                    if ui.button(theme).clicked() {
                        self.toggle_theme(ctx);
                        ui.close();
                    }
                });
            });
        });
    }

    /// Render the editor footer with the export button
    fn render_footer(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("editor_footer").show(ctx, |ui| {
            ui.add_space(6.0);
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                let ready = self.session.is_export_ready();
                let export = ui
                    .add_enabled(ready, egui::Button::new("Export \u{2192}"))
                    .on_hover_text("Ctrl+E")
                    .on_disabled_hover_text("Add an AI prompt to at least one slide");
                if export.clicked() {
                    self.go_to_export();
                }

                let count = self.session.presentation().slide_count();
                let noun = if count == 1 { "slide" } else { "slides" };
                ui.label(egui::RichText::new(format!("{} {}", count, noun)).weak());
            });
            ui.add_space(6.0);
        });
    }

    fn render_editor(&mut self, ctx: &egui::Context) {
        self.render_footer(ctx);

        if self.sidebar_visible {
            egui::SidePanel::left("slide_list")
                .resizable(true)
                .default_width(self.config.ui.sidebar_width)
                .min_width(200.0)
                .show(ctx, |ui| {
                    SlideListPanel::show(ui, self);
                });
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            SlideEditorPanel::show(ui, self);
        });

        if let Some((slide, block, image)) = self.image_dialog.show(ctx) {
            self.session.edits().update_block_content(
                slide,
                block,
                BlockContent::Image(image),
            );
        }
    }
}

impl eframe::App for DeckwrightApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Handle keyboard shortcuts
        let (add_slide, toggle_sidebar, export) = ctx.input(|i| {
            (
                i.modifiers.ctrl && i.key_pressed(egui::Key::N),
                i.modifiers.ctrl && i.key_pressed(egui::Key::B),
                i.modifiers.ctrl && i.key_pressed(egui::Key::E),
            )
        });
        if toggle_sidebar {
            self.sidebar_visible = !self.sidebar_visible;
        }
        if self.step == Step::Edit {
            if add_slide {
                self.session.add_slide();
            }
            if export {
                self.go_to_export();
            }
        }

        self.tick_export(ctx);

        self.render_menu_bar(ctx);

        match self.step {
            Step::Edit => self.render_editor(ctx),
            Step::Export => {
                egui::CentralPanel::default().show(ctx, |ui| {
                    ExportPanel::show(ui, self);
                });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::export::{ExportFormat, ExportState};
    use crate::core::presentation::BlockKind;

    fn app() -> DeckwrightApp {
        DeckwrightApp::with_config(AppConfig::default())
    }

    /// Replace every prompt on every slide with blank text
    fn blank_prompts(app: &mut DeckwrightApp) {
        let targets: Vec<_> = app
            .session
            .presentation()
            .slides()
            .iter()
            .flat_map(|s| {
                s.blocks()
                    .iter()
                    .filter(|b| b.kind() == BlockKind::Prompt)
                    .map(move |b| (s.id(), b.id()))
            })
            .collect();
        for (slide, block) in targets {
            app.session.edits().update_block_content(
                slide,
                block,
                BlockContent::Prompt("   ".to_string()),
            );
        }
    }

    #[test]
    fn test_starts_in_editor_ready_to_export() {
        let app = app();
        assert_eq!(app.step, Step::Edit);
        assert!(app.session.is_export_ready());
        assert_eq!(app.export_settings.format, ExportFormat::Pptx);
    }

    #[test]
    fn test_export_gated_on_prompt() {
        let mut app = app();
        blank_prompts(&mut app);

        assert!(!app.go_to_export());
        assert_eq!(app.step, Step::Edit);
        assert!(!app.start_export());
    }

    #[test]
    fn test_export_flow() {
        let mut app = app();
        app.session.add_slide();
        assert!(app.go_to_export());
        assert_eq!(app.step, Step::Export);

        let t0 = Instant::now();
        assert!(app.start_export_at(t0));
        assert!(!app.start_export_at(t0));

        app.export_job.poll(t0 + Duration::from_secs(5));
        let outcome = app.export_job.outcome().unwrap();
        assert_eq!(outcome.slide_count, 2);
        assert_eq!(outcome.file_name, "presentation.pptx");
    }

    #[test]
    fn test_leaving_export_cancels_job() {
        let mut app = app();
        app.go_to_export();
        assert!(app.start_export());

        app.back_to_editor();
        assert_eq!(app.step, Step::Edit);
        assert!(!app.export_job.is_running());
        assert!(app.export_job.outcome().is_none());

        // Coming back starts from a fresh job.
        assert!(app.go_to_export());
        assert_eq!(app.export_job.state(), &ExportState::Idle);
        assert_eq!(app.export_job.progress(), 0);
    }

    #[test]
    fn test_new_presentation_resets_session() {
        let mut app = app();
        app.session.add_slide();
        app.session.add_slide();
        app.new_presentation();

        assert_eq!(app.session.presentation().slide_count(), 1);
        assert_eq!(app.step, Step::Edit);
    }
}
