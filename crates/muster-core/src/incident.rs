//! Incident desk: panic alerts, media capture and urgent reports.
//!
//! Nothing here talks to hardware or the network. The desk tracks the state
//! a front-end renders (alarm on/off, recording timer, draft text) and
//! produces an [`IncidentReport`] value on submission; delivering it is the
//! caller's business.

use chrono::Utc;
use tracing::{info, warn};

use muster_types::{IncidentReport, RecordingMode, ReportId};

use crate::config::IncidentConfig;

/// Errors raised by the incident desk.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IncidentError {
    /// The draft description is too short to submit.
    #[error("description has {len} characters, more than {min} are required")]
    DescriptionTooShort {
        /// Trimmed description length in characters.
        len: usize,
        /// Length the description must exceed.
        min: usize,
    },
}

// ---------------------------------------------------------------------------
// Alerts
// ---------------------------------------------------------------------------

/// The two panic buttons.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AlertPanel {
    alarm: bool,
    visual_alert: bool,
}

impl AlertPanel {
    /// Whether the loud alarm is sounding.
    pub const fn alarm_active(&self) -> bool {
        self.alarm
    }

    /// Whether the screen flash is on.
    pub const fn visual_alert_active(&self) -> bool {
        self.visual_alert
    }

    /// Switch the loud alarm and return the new state.
    pub fn toggle_alarm(&mut self) -> bool {
        self.alarm = !self.alarm;
        info!(active = self.alarm, "loud alarm toggled");
        self.alarm
    }

    /// Switch the visual alert and return the new state.
    pub fn toggle_visual_alert(&mut self) -> bool {
        self.visual_alert = !self.visual_alert;
        info!(active = self.visual_alert, "visual alert toggled");
        self.visual_alert
    }
}

// ---------------------------------------------------------------------------
// Recorder
// ---------------------------------------------------------------------------

/// Audio/video capture state with an elapsed-seconds counter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Recorder {
    mode: RecordingMode,
    elapsed_seconds: u32,
}

impl Recorder {
    /// Current capture mode.
    pub const fn mode(&self) -> RecordingMode {
        self.mode
    }

    /// Whether anything is being captured.
    pub const fn is_recording(&self) -> bool {
        !matches!(self.mode, RecordingMode::None)
    }

    /// Seconds captured so far in the current recording.
    pub const fn elapsed_seconds(&self) -> u32 {
        self.elapsed_seconds
    }

    /// Start capturing in `mode` with the timer at zero. Starting with
    /// [`RecordingMode::None`] is the same as [`Recorder::stop`].
    pub fn start(&mut self, mode: RecordingMode) {
        self.mode = mode;
        self.elapsed_seconds = 0;
        info!(%mode, "recording started");
    }

    /// Advance the timer by one second while recording.
    pub const fn tick(&mut self) -> u32 {
        if self.is_recording() {
            self.elapsed_seconds = self.elapsed_seconds.saturating_add(1);
        }
        self.elapsed_seconds
    }

    /// Stop capturing. Returns the length of the finished recording in
    /// seconds, or `None` if nothing was being captured.
    pub fn stop(&mut self) -> Option<u32> {
        let was = self.is_recording().then_some(self.elapsed_seconds);
        if let Some(seconds) = was {
            info!(mode = %self.mode, seconds, "recording stopped");
        }
        *self = Self::default();
        was
    }
}

/// Format seconds as `m:ss`.
pub fn format_elapsed(seconds: u32) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

// ---------------------------------------------------------------------------
// Report draft
// ---------------------------------------------------------------------------

/// The incident report being written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportDraft {
    /// Free-text description.
    pub description: String,
    /// Where the reporter is.
    pub location: String,
    /// Whether to notify the emergency response team.
    pub notify_team: bool,
    min_len: usize,
}

impl ReportDraft {
    /// Start an empty draft with the configured defaults.
    pub fn new(config: &IncidentConfig) -> Self {
        Self {
            description: String::new(),
            location: config.location.clone(),
            notify_team: config.notify_team,
            min_len: config.min_description_len,
        }
    }

    /// Trimmed description length in characters.
    pub fn description_len(&self) -> usize {
        self.description.trim().chars().count()
    }

    /// Whether the draft is long enough to send.
    pub fn can_submit(&self) -> bool {
        self.description_len() > self.min_len
    }

    /// Turn the draft into a report and clear the description.
    ///
    /// # Errors
    ///
    /// Returns [`IncidentError::DescriptionTooShort`] if the trimmed
    /// description is not longer than the configured minimum. The draft is
    /// left untouched.
    pub fn submit(&mut self) -> Result<IncidentReport, IncidentError> {
        if !self.can_submit() {
            let len = self.description_len();
            warn!(len, min = self.min_len, "incident report rejected");
            return Err(IncidentError::DescriptionTooShort {
                len,
                min: self.min_len,
            });
        }
        let report = IncidentReport {
            id: ReportId::new(),
            description: self.description.trim().to_owned(),
            location: self.location.clone(),
            notify_team: self.notify_team,
            created_at: Utc::now(),
        };
        self.description.clear();
        info!(
            report_id = %report.id,
            notify_team = report.notify_team,
            "incident report submitted"
        );
        Ok(report)
    }
}

// ---------------------------------------------------------------------------
// Desk
// ---------------------------------------------------------------------------

/// Everything on the incident tab.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncidentDesk {
    /// Panic buttons.
    pub alerts: AlertPanel,
    /// Media capture.
    pub recorder: Recorder,
    /// Report being written.
    pub draft: ReportDraft,
    submitted: Vec<IncidentReport>,
}

impl IncidentDesk {
    /// Create a desk with alerts off, no recording and an empty draft.
    pub fn new(config: &IncidentConfig) -> Self {
        Self {
            alerts: AlertPanel::default(),
            recorder: Recorder::default(),
            draft: ReportDraft::new(config),
            submitted: Vec::new(),
        }
    }

    /// Submit the draft and keep the report in the session outbox.
    ///
    /// # Errors
    ///
    /// See [`ReportDraft::submit`].
    pub fn submit(&mut self) -> Result<IncidentReport, IncidentError> {
        let report = self.draft.submit()?;
        self.submitted.push(report.clone());
        Ok(report)
    }

    /// Reports submitted during this session, oldest first.
    pub fn submitted(&self) -> &[IncidentReport] {
        &self.submitted
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alerts_toggle_independently() {
        let mut panel = AlertPanel::default();
        assert!(panel.toggle_alarm());
        assert!(!panel.visual_alert_active());
        assert!(panel.toggle_visual_alert());
        assert!(!panel.toggle_alarm());
        assert!(panel.visual_alert_active());
    }

    #[test]
    fn recorder_counts_only_while_recording() {
        let mut recorder = Recorder::default();
        assert_eq!(recorder.tick(), 0);

        recorder.start(RecordingMode::Video);
        for _ in 0..75 {
            recorder.tick();
        }
        assert_eq!(recorder.elapsed_seconds(), 75);
        assert_eq!(recorder.stop(), Some(75));
        assert_eq!(recorder.mode(), RecordingMode::None);
        assert_eq!(recorder.elapsed_seconds(), 0);
        assert_eq!(recorder.stop(), None);
    }

    #[test]
    fn restarting_resets_the_timer() {
        let mut recorder = Recorder::default();
        recorder.start(RecordingMode::Audio);
        recorder.tick();
        recorder.start(RecordingMode::Video);
        assert_eq!(recorder.elapsed_seconds(), 0);
        assert!(recorder.is_recording());
    }

    #[test]
    fn elapsed_formatting() {
        assert_eq!(format_elapsed(0), "0:00");
        assert_eq!(format_elapsed(9), "0:09");
        assert_eq!(format_elapsed(75), "1:15");
        assert_eq!(format_elapsed(600), "10:00");
    }

    #[test]
    fn short_descriptions_are_rejected() {
        let mut draft = ReportDraft::new(&IncidentConfig::default());
        draft.description = "  fire  ".to_owned();
        assert!(!draft.can_submit());
        assert_eq!(
            draft.submit(),
            Err(IncidentError::DescriptionTooShort { len: 4, min: 5 })
        );
        assert_eq!(draft.description, "  fire  ");

        // Exactly the minimum is still too short.
        draft.description = "smoke".to_owned();
        assert!(!draft.can_submit());
    }

    #[test]
    fn submit_produces_report_and_clears_text() {
        let mut desk = IncidentDesk::new(&IncidentConfig::default());
        desk.draft.description = " Smoke on stairwell B ".to_owned();
        desk.draft.notify_team = false;

        let report = desk.submit();
        assert!(report.is_ok());
        let report = report.ok();
        assert_eq!(
            report.as_ref().map(|r| r.description.as_str()),
            Some("Smoke on stairwell B")
        );
        assert_eq!(report.as_ref().map(|r| r.notify_team), Some(false));
        assert!(desk.draft.description.is_empty());
        assert_eq!(desk.submitted().len(), 1);
    }
}
