use futures_util::FutureExt;
use ratatui::widgets::ListState;

use crate::api::GenerationClient;
use crate::catalog::{Mode, INDUSTRIES};
use crate::state::{Phase, UiState};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Editing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusPane {
    Industry,
    Prompt,
    Mode,
    Submit,
}

impl FocusPane {
    pub fn next(self) -> Self {
        match self {
            FocusPane::Industry => FocusPane::Prompt,
            FocusPane::Prompt => FocusPane::Mode,
            FocusPane::Mode => FocusPane::Submit,
            FocusPane::Submit => FocusPane::Industry,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            FocusPane::Industry => FocusPane::Submit,
            FocusPane::Prompt => FocusPane::Industry,
            FocusPane::Mode => FocusPane::Prompt,
            FocusPane::Submit => FocusPane::Mode,
        }
    }
}

pub struct App {
    pub should_quit: bool,
    pub input_mode: InputMode,
    pub focus: FocusPane,

    // Home screen state
    pub state: UiState,
    pub prompt_cursor: usize, // cursor position in the prompt, in chars
    pub industry_list: ListState,
    pub mode_list: ListState,

    // In-flight submissions. Intentionally unguarded: a second submit while
    // one is pending spawns another task, and whichever outcome is applied
    // last wins the status line.
    pub submit_tasks: Vec<tokio::task::JoinHandle<anyhow::Result<()>>>,

    // Animation state
    pub animation_frame: u8, // 0-2 for ellipsis animation

    pub client: GenerationClient,
}

impl App {
    pub fn new(client: GenerationClient) -> Self {
        let mut industry_list = ListState::default();
        industry_list.select(Some(0));
        let mut mode_list = ListState::default();
        mode_list.select(Some(0));

        Self {
            should_quit: false,
            input_mode: InputMode::Normal,
            focus: FocusPane::Industry,

            state: UiState::new(),
            prompt_cursor: 0,
            industry_list,
            mode_list,

            submit_tasks: Vec::new(),
            animation_frame: 0,

            client,
        }
    }

    pub fn submitting(&self) -> bool {
        !self.submit_tasks.is_empty()
    }

    // Selector navigation. The clamping keeps the index invariant: the
    // selectors only ever emit values within their table bounds.
    pub fn industry_down(&mut self) {
        let i = self.state.industry_index();
        self.state.set_industry_index((i + 1).min(INDUSTRIES.len() - 1));
        self.industry_list.select(Some(self.state.industry_index()));
    }

    pub fn industry_up(&mut self) {
        let i = self.state.industry_index();
        self.state.set_industry_index(i.saturating_sub(1));
        self.industry_list.select(Some(self.state.industry_index()));
    }

    pub fn mode_down(&mut self) {
        let i = self.state.mode_index();
        self.state.set_mode_index((i + 1).min(Mode::all().len() - 1));
        self.mode_list.select(Some(self.state.mode_index()));
    }

    pub fn mode_up(&mut self) {
        let i = self.state.mode_index();
        self.state.set_mode_index(i.saturating_sub(1));
        self.mode_list.select(Some(self.state.mode_index()));
    }

    /// Fires a generation trigger for the current selections.
    ///
    /// The status line flips to the pending message before the network call
    /// starts; the outcome is applied later from `poll_submissions`.
    pub fn submit(&mut self) {
        let request = self.state.compose_request();
        self.state.set_phase(Phase::Pending);

        let client = self.client.clone();
        self.submit_tasks.push(tokio::spawn(async move {
            client.trigger_generation(&request).await.map(|_| ())
        }));
    }

    /// Drains finished submission tasks, applying outcomes in completion
    /// order. Called from the Tick event.
    pub fn poll_submissions(&mut self) {
        let mut i = 0;
        while i < self.submit_tasks.len() {
            if !self.submit_tasks[i].is_finished() {
                i += 1;
                continue;
            }
            let task = self.submit_tasks.remove(i);
            // is_finished() guarantees the handle resolves immediately.
            if let Some(joined) = task.now_or_never() {
                let outcome = match joined {
                    Ok(result) => result,
                    Err(err) => Err(anyhow::anyhow!(err)),
                };
                self.apply_submit_outcome(outcome);
            }
        }
    }

    /// Collapses any failure into the single generic status message; the
    /// prompt and selections are left untouched either way.
    pub fn apply_submit_outcome(&mut self, outcome: anyhow::Result<()>) {
        match outcome {
            Ok(()) => self.state.set_phase(Phase::Queued),
            Err(err) => {
                tracing::warn!(error = %err, "generation trigger failed");
                self.state.set_phase(Phase::Failed);
            }
        }
    }

    /// Tick animation frame while a submission is pending.
    pub fn tick_animation(&mut self) {
        if self.submitting() {
            self.animation_frame = (self.animation_frame + 1) % 3;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{STATUS_FAILED, STATUS_PENDING, STATUS_QUEUED};
    use anyhow::anyhow;

    fn test_app() -> App {
        // Bind then drop so the port is guaranteed to refuse connections.
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        App::new(GenerationClient::new(&format!("http://{}", addr)))
    }

    #[tokio::test]
    async fn submit_sets_pending_status_synchronously() {
        let mut app = test_app();
        app.state.set_prompt("cinematic city".to_string());

        app.submit();

        // Observable before the spawned task resolves.
        assert_eq!(app.state.status(), STATUS_PENDING);
        assert!(app.submitting());
    }

    #[tokio::test]
    async fn rejected_submission_sets_failure_and_keeps_inputs() {
        // Scenario C: port 9 (discard) refuses connections, so the trigger
        // rejects with a transport error.
        let mut app = test_app();
        app.state.set_prompt("cinematic city".to_string());
        app.industry_down();
        app.mode_down();

        app.submit();
        while app.submitting() {
            tokio::time::sleep(std::time::Duration::from_millis(10)).await;
            app.poll_submissions();
        }

        assert_eq!(app.state.status(), STATUS_FAILED);
        assert_eq!(app.state.prompt(), "cinematic city");
        assert_eq!(app.state.industry_index(), 1);
        assert_eq!(app.state.mode_index(), 1);
    }

    #[test]
    fn outcome_application_is_last_write_wins() {
        // Scenario D: two submissions overlap; the second resolves first,
        // then the first fails. The status reflects whichever outcome lands
        // last. Documented race, not a correctness guarantee.
        let rt = tokio::runtime::Runtime::new().unwrap();
        rt.block_on(async {
            let mut app = test_app();
            app.submit();
            app.submit();
            assert_eq!(app.submit_tasks.len(), 2);
            app.submit_tasks.clear();

            app.apply_submit_outcome(Ok(()));
            app.apply_submit_outcome(Err(anyhow!("connection refused")));
            assert_eq!(app.state.status(), STATUS_FAILED);
        });
    }

    #[test]
    fn successful_outcome_sets_queued_status() {
        let rt = tokio::runtime::Runtime::new().unwrap();
        rt.block_on(async {
            let mut app = test_app();
            app.submit();
            app.submit_tasks.clear();
            app.apply_submit_outcome(Ok(()));
            assert_eq!(app.state.status(), STATUS_QUEUED);
        });
    }

    #[test]
    fn selector_navigation_clamps_to_table_bounds() {
        let rt = tokio::runtime::Runtime::new().unwrap();
        rt.block_on(async {
            let mut app = test_app();

            for _ in 0..10 {
                app.industry_down();
            }
            assert_eq!(app.state.industry_index(), INDUSTRIES.len() - 1);
            for _ in 0..10 {
                app.industry_up();
            }
            assert_eq!(app.state.industry_index(), 0);

            for _ in 0..10 {
                app.mode_down();
            }
            assert_eq!(app.state.mode_index(), 1);
            app.mode_up();
            assert_eq!(app.state.mode_index(), 0);
        });
    }

    #[test]
    fn focus_cycle_visits_every_pane() {
        let mut focus = FocusPane::Industry;
        let mut seen = Vec::new();
        for _ in 0..4 {
            seen.push(focus);
            focus = focus.next();
        }
        assert_eq!(focus, FocusPane::Industry);
        assert!(seen.contains(&FocusPane::Prompt));
        assert!(seen.contains(&FocusPane::Mode));
        assert!(seen.contains(&FocusPane::Submit));
        assert_eq!(FocusPane::Industry.prev(), FocusPane::Submit);
    }
}
