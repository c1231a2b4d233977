use std::collections::HashMap;

use crate::api::GenerationRequest;
use crate::catalog::{Mode, INDUSTRIES};

pub const STATUS_IDLE: &str = "等待注入灵感...";
pub const STATUS_PENDING: &str = "AI 导演正在调度镜头...";
pub const STATUS_QUEUED: &str = "任务已排队，请在项目空间查看进度";
pub const STATUS_FAILED: &str = "触发失败，请稍后重试";

/// Fields the render loop can observe for changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Prompt,
    Industry,
    Mode,
    Status,
}

/// Lifecycle of the current submission, driving the status line.
///
/// A new submission re-enters `Pending` from any state. Overlapping
/// submissions are not guarded against; whichever outcome is applied last
/// wins the status line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Pending,
    Queued,
    Failed,
}

impl Phase {
    pub fn status_message(&self) -> &'static str {
        match self {
            Phase::Idle => STATUS_IDLE,
            Phase::Pending => STATUS_PENDING,
            Phase::Queued => STATUS_QUEUED,
            Phase::Failed => STATUS_FAILED,
        }
    }
}

/// Observable state for the home screen.
///
/// Fields are private; setters record which field changed so the render
/// loop only redraws when something it subscribes to actually moved.
/// Invariant: `industry_index` and `mode_index` always index into their
/// respective tables — navigation clamps, so no setter re-validates.
pub struct UiState {
    prompt: String,
    industry_index: usize,
    mode_index: usize,
    phase: Phase,
    status: String,
    changed: Vec<Field>,
}

impl UiState {
    pub fn new() -> Self {
        Self {
            prompt: String::new(),
            industry_index: 0,
            mode_index: 0,
            phase: Phase::Idle,
            status: STATUS_IDLE.to_string(),
            changed: Vec::new(),
        }
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn industry_index(&self) -> usize {
        self.industry_index
    }

    pub fn mode_index(&self) -> usize {
        self.mode_index
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn industry_label(&self) -> &'static str {
        INDUSTRIES[self.industry_index]
    }

    pub fn mode(&self) -> Mode {
        Mode::all()[self.mode_index]
    }

    /// Replaces the prompt unconditionally. No validation; an empty prompt
    /// is submitted as-is.
    pub fn set_prompt(&mut self, text: String) {
        self.prompt = text;
        self.mark(Field::Prompt);
    }

    pub fn set_industry_index(&mut self, index: usize) {
        if index != self.industry_index {
            self.industry_index = index;
            self.mark(Field::Industry);
        }
    }

    pub fn set_mode_index(&mut self, index: usize) {
        if index != self.mode_index {
            self.mode_index = index;
            self.mark(Field::Mode);
        }
    }

    pub fn set_phase(&mut self, phase: Phase) {
        self.phase = phase;
        self.status = phase.status_message().to_string();
        self.mark(Field::Status);
    }

    /// Drains the fields that changed since the last call.
    pub fn take_changes(&mut self) -> Vec<Field> {
        std::mem::take(&mut self.changed)
    }

    /// Builds the payload for the current selections. Created fresh per
    /// submission; the state itself is left untouched.
    pub fn compose_request(&self) -> GenerationRequest {
        let mut meta = HashMap::new();
        meta.insert("industry".to_string(), self.industry_label().to_string());
        GenerationRequest {
            prompt: self.prompt.clone(),
            mode: self.mode(),
            meta: Some(meta),
        }
    }

    fn mark(&mut self, field: Field) {
        if !self.changed.contains(&field) {
            self.changed.push(field);
        }
    }
}

impl Default for UiState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_page_mount() {
        let state = UiState::new();
        assert_eq!(state.prompt(), "");
        assert_eq!(state.industry_index(), 0);
        assert_eq!(state.mode_index(), 0);
        assert_eq!(state.status(), STATUS_IDLE);
        assert_eq!(state.phase(), Phase::Idle);
    }

    #[test]
    fn setters_record_field_changes() {
        let mut state = UiState::new();
        assert!(state.take_changes().is_empty());

        state.set_prompt("cinematic city".to_string());
        state.set_industry_index(2);
        state.set_mode_index(1);
        let changes = state.take_changes();
        assert_eq!(changes, vec![Field::Prompt, Field::Industry, Field::Mode]);

        // Drained; nothing pending until the next mutation.
        assert!(state.take_changes().is_empty());
    }

    #[test]
    fn prompt_replacement_is_unconditional() {
        let mut state = UiState::new();
        state.set_prompt(String::new());
        assert_eq!(state.take_changes(), vec![Field::Prompt]);
    }

    #[test]
    fn unchanged_index_does_not_mark() {
        let mut state = UiState::new();
        state.set_industry_index(0);
        state.set_mode_index(0);
        assert!(state.take_changes().is_empty());
    }

    #[test]
    fn phase_drives_status_message() {
        let mut state = UiState::new();
        state.set_phase(Phase::Pending);
        assert_eq!(state.status(), STATUS_PENDING);
        state.set_phase(Phase::Queued);
        assert_eq!(state.status(), STATUS_QUEUED);
        state.set_phase(Phase::Failed);
        assert_eq!(state.status(), STATUS_FAILED);
        // A new submission re-enters Pending from a terminal phase.
        state.set_phase(Phase::Pending);
        assert_eq!(state.status(), STATUS_PENDING);
        assert_eq!(state.take_changes(), vec![Field::Status]);
    }

    #[test]
    fn compose_request_maps_table_entries() {
        // Scenario A: first industry, video mode.
        let mut state = UiState::new();
        state.set_prompt("cinematic city".to_string());
        let request = state.compose_request();
        assert_eq!(request.prompt, "cinematic city");
        assert_eq!(request.mode.as_str(), "video");
        assert_eq!(
            request.meta.as_ref().unwrap().get("industry").map(String::as_str),
            Some("文旅")
        );

        // Scenario B: image mode at index 1.
        state.set_mode_index(1);
        let request = state.compose_request();
        assert_eq!(request.mode.as_str(), "image");
        assert_eq!(request.mode.display_name(), "沉浸海报");
    }

    #[test]
    fn compose_request_covers_every_selection() {
        let mut state = UiState::new();
        for (i, label) in crate::catalog::INDUSTRIES.iter().enumerate() {
            for (m, mode) in crate::catalog::Mode::all().into_iter().enumerate() {
                state.set_industry_index(i);
                state.set_mode_index(m);
                let request = state.compose_request();
                assert_eq!(request.mode, mode);
                assert_eq!(
                    request.meta.as_ref().unwrap().get("industry").map(String::as_str),
                    Some(*label)
                );
            }
        }
    }
}
