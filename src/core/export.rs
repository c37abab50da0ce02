//! Export settings and the simulated export job
//!
//! Nothing is generated yet: the job only advances a progress counter on a
//! fixed schedule and reports the file name a real export would produce.

use std::fmt;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

use super::attachment::AttachedFile;

/// Output format of an export
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Pptx,
    Pdf,
}

impl ExportFormat {
    pub const ALL: [ExportFormat; 2] = [ExportFormat::Pptx, ExportFormat::Pdf];

    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Pptx => "pptx",
            ExportFormat::Pdf => "pdf",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ExportFormat::Pptx => "PowerPoint (.pptx)",
            ExportFormat::Pdf => "PDF document (.pdf)",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            ExportFormat::Pptx => "Editable format for further work",
            ExportFormat::Pdf => "Universal format for sharing",
        }
    }

    /// Whether a design template can be applied to this format
    pub fn supports_template(self) -> bool {
        matches!(self, ExportFormat::Pptx)
    }

    pub fn file_name(self) -> String {
        format!("presentation.{}", self.extension())
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// User choices on the export screen
#[derive(Debug, Clone, Default)]
pub struct ExportSettings {
    pub format: ExportFormat,
    template: Option<AttachedFile>,
}

impl ExportSettings {
    pub fn new(format: ExportFormat) -> Self {
        Self {
            format,
            template: None,
        }
    }

    /// Set a design template; only `.pptx` files are accepted
    pub fn set_template(&mut self, file: AttachedFile) -> bool {
        if !file.has_extension(&["pptx"]) {
            tracing::warn!("Ignoring template {}: not a .pptx file", file.name);
            return false;
        }
        tracing::info!("Using template {}", file.name);
        self.template = Some(file);
        true
    }

    pub fn clear_template(&mut self) {
        self.template = None;
    }

    /// The chosen template, whatever the format
    pub fn template(&self) -> Option<&AttachedFile> {
        self.template.as_ref()
    }

    /// The template that applies to the selected format
    pub fn effective_template(&self) -> Option<&AttachedFile> {
        self.template
            .as_ref()
            .filter(|_| self.format.supports_template())
    }
}

/// Result of a finished export
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportOutcome {
    pub file_name: String,
    pub format: ExportFormat,
    pub slide_count: usize,
    pub template: Option<String>,
}

/// What the export was asked to produce
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportRequest {
    pub format: ExportFormat,
    pub slide_count: usize,
    pub template: Option<String>,
}

impl ExportRequest {
    pub fn new(settings: &ExportSettings, slide_count: usize) -> Self {
        Self {
            format: settings.format,
            slide_count,
            template: settings.effective_template().map(|t| t.name.clone()),
        }
    }
}

/// Lifecycle of an export job
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ExportState {
    #[default]
    Idle,
    Running {
        request: ExportRequest,
        progress: u8,
        last_tick: Instant,
    },
    Complete(ExportOutcome),
    Cancelled,
}

/// A cancellable, time-driven export.
///
/// Progress moves by `step` percent for every elapsed `interval`. Reaching 100
/// moves the job to `Complete`; that is its only way to finish besides
/// `cancel`.
#[derive(Debug, Clone)]
pub struct ExportJob {
    state: ExportState,
    interval: Duration,
    step: u8,
}

impl Default for ExportJob {
    fn default() -> Self {
        Self::new(Duration::from_millis(200), 10)
    }
}

impl ExportJob {
    pub fn new(interval: Duration, step: u8) -> Self {
        Self {
            state: ExportState::Idle,
            interval: interval.max(Duration::from_millis(1)),
            step: step.clamp(1, 100),
        }
    }

    pub fn state(&self) -> &ExportState {
        &self.state
    }

    pub fn is_running(&self) -> bool {
        matches!(self.state, ExportState::Running { .. })
    }

    pub fn is_complete(&self) -> bool {
        matches!(self.state, ExportState::Complete(_))
    }

    /// Current progress in percent
    pub fn progress(&self) -> u8 {
        match &self.state {
            ExportState::Idle | ExportState::Cancelled => 0,
            ExportState::Running { progress, .. } => *progress,
            ExportState::Complete(_) => 100,
        }
    }

    pub fn outcome(&self) -> Option<&ExportOutcome> {
        match &self.state {
            ExportState::Complete(outcome) => Some(outcome),
            _ => None,
        }
    }

    /// Whether `start` would be accepted
    pub fn can_start(&self) -> bool {
        matches!(self.state, ExportState::Idle | ExportState::Cancelled)
    }

    /// Begin exporting. Ignored while running or after completion.
    pub fn start(&mut self, request: ExportRequest, now: Instant) -> bool {
        if !self.can_start() {
            return false;
        }
        tracing::info!(
            "Export started: {} slides as {}",
            request.slide_count,
            request.format
        );
        self.state = ExportState::Running {
            request,
            progress: 0,
            last_tick: now,
        };
        true
    }

    /// Advance progress by the number of intervals elapsed since the last tick.
    ///
    /// Returns true when this call finished the export.
    pub fn poll(&mut self, now: Instant) -> bool {
        let ExportState::Running {
            request,
            progress,
            last_tick,
        } = &mut self.state
        else {
            return false;
        };

        let elapsed = now.saturating_duration_since(*last_tick);
        let ticks = (elapsed.as_millis() / self.interval.as_millis()) as u64;
        if ticks == 0 {
            return false;
        }

        let advanced = u64::from(*progress) + ticks.saturating_mul(u64::from(self.step));
        *progress = advanced.min(100) as u8;
        *last_tick += self.interval * ticks.min(u64::from(u32::MAX)) as u32;

        if *progress < 100 {
            return false;
        }

        let outcome = ExportOutcome {
            file_name: request.format.file_name(),
            format: request.format,
            slide_count: request.slide_count,
            template: request.template.clone(),
        };
        tracing::info!("Export complete: {}", outcome.file_name);
        self.state = ExportState::Complete(outcome);
        true
    }

    /// Time until the next progress step, for scheduling a repaint
    pub fn time_to_next_tick(&self, now: Instant) -> Option<Duration> {
        match &self.state {
            ExportState::Running { last_tick, .. } => {
                let due = *last_tick + self.interval;
                Some(due.saturating_duration_since(now))
            }
            _ => None,
        }
    }

    /// Stop a running export. Returns whether anything was cancelled.
    pub fn cancel(&mut self) -> bool {
        if self.is_running() {
            tracing::info!("Export cancelled at {}%", self.progress());
            self.state = ExportState::Cancelled;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn request() -> ExportRequest {
        ExportRequest {
            format: ExportFormat::Pptx,
            slide_count: 3,
            template: None,
        }
    }

    fn template(name: &str) -> AttachedFile {
        AttachedFile {
            path: PathBuf::from(name),
            name: name.to_string(),
            size: 1,
        }
    }

    const STEP: Duration = Duration::from_millis(200);

    #[test]
    fn test_progress_advances_per_interval() {
        let t0 = Instant::now();
        let mut job = ExportJob::default();
        assert!(job.start(request(), t0));
        assert_eq!(job.progress(), 0);

        assert!(!job.poll(t0 + Duration::from_millis(150)));
        assert_eq!(job.progress(), 0);

        assert!(!job.poll(t0 + STEP));
        assert_eq!(job.progress(), 10);

        assert!(!job.poll(t0 + STEP * 3 + Duration::from_millis(50)));
        assert_eq!(job.progress(), 30);
        assert!(job.is_running());
    }

    #[test]
    fn test_completes_once_at_100() {
        let t0 = Instant::now();
        let mut job = ExportJob::default();
        job.start(request(), t0);

        assert!(!job.poll(t0 + STEP * 9));
        assert_eq!(job.progress(), 90);

        assert!(job.poll(t0 + STEP * 10));
        assert!(job.is_complete());
        assert_eq!(job.progress(), 100);

        let outcome = job.outcome().unwrap();
        assert_eq!(outcome.file_name, "presentation.pptx");
        assert_eq!(outcome.slide_count, 3);

        assert!(!job.poll(t0 + STEP * 20));
        assert!(!job.start(request(), t0 + STEP * 21));
        assert!(job.is_complete());
    }

    #[test]
    fn test_large_gap_clamps_progress() {
        let t0 = Instant::now();
        let mut job = ExportJob::new(STEP, 30);
        job.start(request(), t0);

        assert!(job.poll(t0 + Duration::from_secs(60)));
        assert_eq!(job.progress(), 100);
    }

    #[test]
    fn test_cancel_stops_progress() {
        let t0 = Instant::now();
        let mut job = ExportJob::default();
        assert!(!job.cancel());

        job.start(request(), t0);
        job.poll(t0 + STEP * 4);
        assert!(job.cancel());
        assert_eq!(job.state(), &ExportState::Cancelled);

        assert!(!job.poll(t0 + STEP * 20));
        assert!(job.outcome().is_none());
        assert!(job.time_to_next_tick(t0).is_none());

        // A cancelled export can be restarted from zero.
        assert!(job.start(request(), t0 + STEP * 21));
        assert_eq!(job.progress(), 0);
    }

    #[test]
    fn test_cancel_after_complete_is_noop() {
        let t0 = Instant::now();
        let mut job = ExportJob::new(STEP, 100);
        job.start(request(), t0);
        assert!(job.poll(t0 + STEP));

        assert!(!job.cancel());
        assert!(job.is_complete());
        assert!(!job.can_start());
        assert_eq!(job.outcome().unwrap().format, ExportFormat::Pptx);
    }

    #[test]
    fn test_time_to_next_tick() {
        let t0 = Instant::now();
        let mut job = ExportJob::default();
        assert!(job.time_to_next_tick(t0).is_none());

        job.start(request(), t0);
        assert_eq!(
            job.time_to_next_tick(t0 + Duration::from_millis(50)),
            Some(Duration::from_millis(150))
        );
    }

    #[test]
    fn test_template_only_for_pptx() {
        let mut settings = ExportSettings::new(ExportFormat::Pptx);
        assert!(!settings.set_template(template("brand.potx")));
        assert!(settings.template().is_none());

        assert!(settings.set_template(template("brand.pptx")));
        assert_eq!(settings.effective_template().unwrap().name, "brand.pptx");
        assert_eq!(
            ExportRequest::new(&settings, 2).template.as_deref(),
            Some("brand.pptx")
        );

        settings.format = ExportFormat::Pdf;
        assert!(settings.template().is_some());
        assert!(settings.effective_template().is_none());
        assert!(ExportRequest::new(&settings, 2).template.is_none());

        settings.clear_template();
        assert!(settings.template().is_none());
    }

    #[test]
    fn test_format_file_names() {
        assert_eq!(ExportFormat::Pdf.file_name(), "presentation.pdf");
        assert_eq!(ExportFormat::default(), ExportFormat::Pptx);
        assert_eq!(serde_json::to_string(&ExportFormat::Pdf).unwrap(), "\"pdf\"");
    }
}
