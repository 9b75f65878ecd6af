//! Demo host application.
//!
//! The app plays the host role in the navigator contract: it owns the
//! wizard state (and therefore `active_step_index`), gates navigation
//! requests with its own validation policy, and simulates async work by
//! holding the loading flag until a deadline passes. The navigator only
//! ever proposes transitions.

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::{
    backend::CrosstermBackend,
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame, Terminal,
};
use std::io;
use std::time::{Duration, Instant};

use crate::analytics::{FunnelEvent, RecordingCollector};
use crate::config::Config;
use crate::navigator::{can_select, WizardNavigator};
use crate::state::{NavReason, NavigationRequest, Step, WizardState};
use crate::ui::TerminalGuard;

/// Index of the demo step whose validation blocks forward navigation
const ACK_STEP: usize = 1;

/// How the wizard session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardOutcome {
    Submitted,
    Cancelled,
}

/// A forward transition the host has accepted but not yet committed,
/// standing in for async validation against a backend.
#[derive(Debug, Clone, Copy)]
struct PendingCommit {
    target: usize,
    ready_at: Instant,
}

pub struct App {
    config: Config,
    navigator: WizardNavigator,
    wizard: WizardState<Vec<String>>,
    funnel: RecordingCollector,
    pending_commit: Option<PendingCommit>,
    acknowledged: bool,
    should_quit: bool,
    outcome: Option<WizardOutcome>,
}

impl App {
    pub fn new(config: Config) -> Result<Self> {
        let wizard =
            WizardState::new(demo_steps())?.with_allow_skip_to(config.wizard.allow_skip_to);

        let funnel = RecordingCollector::new();
        let navigator = WizardNavigator::new(config.strings.clone())
            .with_collector(Box::new(funnel.clone()));

        Ok(Self {
            config,
            navigator,
            wizard,
            funnel,
            pending_commit: None,
            acknowledged: false,
            should_quit: false,
            outcome: None,
        })
    }

    pub fn outcome(&self) -> Option<WizardOutcome> {
        self.outcome
    }

    pub fn funnel_events(&self) -> Vec<FunnelEvent> {
        self.funnel.events()
    }

    pub async fn run(&mut self) -> Result<()> {
        let _guard = TerminalGuard::new()?;
        let backend = CrosstermBackend::new(io::stdout());
        let mut terminal = Terminal::new(backend)?;

        self.navigator.begin(&self.wizard);

        let tick_rate = Duration::from_millis(self.config.ui.refresh_rate_ms);

        while !self.should_quit {
            terminal.draw(|f| self.render(f))?;

            if event::poll(tick_rate)? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key.code);
                    }
                }
            }

            self.flush_pending_commit();
        }

        Ok(())
    }

    fn render(&mut self, frame: &mut Frame) {
        let Self {
            navigator, wizard, ..
        } = self;
        navigator.render(frame, wizard, |f, area, step| {
            let lines: Vec<Line> = step
                .content
                .iter()
                .map(|text| Line::from(Span::styled(text.clone(), Style::default())))
                .collect();
            f.render_widget(Paragraph::new(lines).style(Style::default().fg(Color::Gray)), area);
        });
    }

    fn handle_key(&mut self, code: KeyCode) {
        // Demo-only control: toggle the acknowledgement on the terms step
        if code == KeyCode::Char(' ')
            && self.wizard.active_step_index() == ACK_STEP
            && !self.navigator.is_loading_next_step()
        {
            self.toggle_acknowledgement();
            return;
        }

        let Some(request) = self.navigator.handle_key(code, &self.wizard) else {
            return;
        };

        match request.reason {
            NavReason::Cancel => {
                tracing::info!("wizard cancelled");
                self.outcome = Some(WizardOutcome::Cancelled);
                self.should_quit = true;
            }
            NavReason::Submit => {
                if self.validate_departure(self.wizard.active_step_index()) {
                    tracing::info!("wizard submitted");
                    self.outcome = Some(WizardOutcome::Submitted);
                    self.should_quit = true;
                }
            }
            NavReason::Next | NavReason::Previous | NavReason::Step | NavReason::Skip => {
                self.handle_navigation(request);
            }
        }
    }

    /// The host side of the contract: re-check the skip gate, run
    /// validation when leaving the active step, then commit either
    /// immediately (backward) or after the simulated async delay (forward).
    /// Dropping the request here is what keeps the visible step unchanged.
    fn handle_navigation(&mut self, request: NavigationRequest) {
        let active = self.wizard.active_step_index();
        let target = request.requested_step_index;

        if !can_select(&self.wizard, target) {
            tracing::debug!(target, "host gate refused navigation request");
            return;
        }
        if target > active && !self.validate_departure(active) {
            return;
        }

        if target > active && self.config.demo.commit_delay_ms > 0 {
            self.navigator.set_loading(true);
            self.pending_commit = Some(PendingCommit {
                target,
                ready_at: Instant::now()
                    + Duration::from_millis(self.config.demo.commit_delay_ms),
            });
            tracing::debug!(target, delay_ms = self.config.demo.commit_delay_ms, "forward commit pending");
        } else {
            self.commit(target);
        }
    }

    fn commit(&mut self, target: usize) {
        let previous = self.wizard.active_step_index();
        match self.wizard.set_active_step_index(target) {
            Ok(()) => self.navigator.step_committed(previous, target),
            Err(err) => tracing::warn!(%err, "refused out-of-range commit"),
        }
    }

    /// Release the pending forward commit once its deadline passes. The
    /// navigator stays disabled until the host clears the loading flag.
    fn flush_pending_commit(&mut self) {
        let Some(pending) = self.pending_commit else {
            return;
        };
        if Instant::now() < pending.ready_at {
            return;
        }
        self.pending_commit = None;
        self.navigator.set_loading(false);
        self.commit(pending.target);
    }

    /// Demo validation policy: leaving the terms step requires the
    /// acknowledgement. On failure the host sets the step's error text and
    /// declines the request, so the visible step does not change.
    fn validate_departure(&mut self, index: usize) -> bool {
        if index == ACK_STEP && self.config.demo.require_acknowledgement && !self.acknowledged {
            self.wizard.steps_mut()[ACK_STEP].error_text =
                Some("Accept the terms before continuing (press Space)".to_string());
            self.navigator.record_step_error(ACK_STEP);
            return false;
        }
        true
    }

    fn toggle_acknowledgement(&mut self) {
        self.acknowledged = !self.acknowledged;
        let step = &mut self.wizard.steps_mut()[ACK_STEP];
        if self.acknowledged {
            step.error_text = None;
        }
        if let Some(status_line) = step.content.last_mut() {
            *status_line = format!(
                "Accepted: {}",
                if self.acknowledged { "yes" } else { "no" }
            );
        }
    }
}

/// Five-step sample flow exercising every navigation path.
fn demo_steps() -> Vec<Step<Vec<String>>> {
    vec![
        Step::new(
            "Welcome",
            vec![
                "Welcome to the stepnav demo.".to_string(),
                String::new(),
                "This wizard walks every navigation path the library".to_string(),
                "supports: gated skipping, validation blocking, and".to_string(),
                "simulated async commits.".to_string(),
            ],
        )
        .with_description("A quick tour of the step navigator"),
        Step::new(
            "Terms",
            vec![
                "The host blocks forward navigation until the terms are".to_string(),
                "acknowledged, by declining to commit the transition.".to_string(),
                String::new(),
                "Accepted: no".to_string(),
            ],
        )
        .with_description("Accept the demo terms")
        .with_info("Press Space to toggle acceptance"),
        Step::new(
            "Preferences",
            vec![
                "Nothing to configure in the demo.".to_string(),
                "Optional steps may be jumped over when skipping ahead.".to_string(),
            ],
        )
        .with_description("Tune the demo to taste")
        .optional(),
        Step::new(
            "Review",
            vec!["A summary would render here in a real host.".to_string()],
        )
        .with_description("Look over your choices")
        .optional(),
        Step::new(
            "Finish",
            vec!["Press Enter or n to submit the wizard.".to_string()],
        )
        .with_description("All done"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app(config: Config) -> App {
        App::new(config).unwrap()
    }

    fn instant_config() -> Config {
        let mut config = Config::default();
        config.demo.commit_delay_ms = 0;
        config
    }

    #[test]
    fn test_demo_steps_shape() {
        let steps = demo_steps();
        assert_eq!(steps.len(), 5);
        assert!(steps[2].is_optional);
        assert!(steps[3].is_optional);
        assert!(!steps[ACK_STEP].is_optional);
    }

    #[test]
    fn test_next_commits_immediately_without_delay() {
        let mut app = app(instant_config());
        app.handle_key(KeyCode::Right);
        assert_eq!(app.wizard.active_step_index(), 1);
    }

    #[test]
    fn test_validation_blocks_departure_from_terms_step() {
        let mut app = app(instant_config());
        app.handle_key(KeyCode::Right); // -> Terms
        app.handle_key(KeyCode::Right); // blocked: not acknowledged

        assert_eq!(app.wizard.active_step_index(), ACK_STEP);
        assert!(app.wizard.steps()[ACK_STEP].error_text.is_some());
    }

    #[test]
    fn test_acknowledgement_unblocks_and_clears_error() {
        let mut app = app(instant_config());
        app.handle_key(KeyCode::Right); // -> Terms
        app.handle_key(KeyCode::Right); // blocked
        app.handle_key(KeyCode::Char(' ')); // accept
        assert!(app.wizard.steps()[ACK_STEP].error_text.is_none());

        app.handle_key(KeyCode::Right);
        assert_eq!(app.wizard.active_step_index(), 2);
    }

    #[test]
    fn test_previous_commits_without_loading_delay() {
        let mut app = app(instant_config());
        app.handle_key(KeyCode::Right);
        app.handle_key(KeyCode::Left);
        assert_eq!(app.wizard.active_step_index(), 0);
        assert!(!app.navigator.is_loading_next_step());
    }

    #[test]
    fn test_forward_commit_waits_for_deadline() {
        let mut config = Config::default();
        config.demo.commit_delay_ms = 10_000;
        let mut app = app(config);

        app.handle_key(KeyCode::Right);
        // Request accepted but not yet committed
        assert_eq!(app.wizard.active_step_index(), 0);
        assert!(app.navigator.is_loading_next_step());

        // Deadline far in the future: flushing is a no-op
        app.flush_pending_commit();
        assert_eq!(app.wizard.active_step_index(), 0);

        // Force the deadline and flush again
        app.pending_commit = Some(PendingCommit {
            target: 1,
            ready_at: Instant::now(),
        });
        app.flush_pending_commit();
        assert_eq!(app.wizard.active_step_index(), 1);
        assert!(!app.navigator.is_loading_next_step());
    }

    #[test]
    fn test_keys_ignored_while_loading() {
        let mut config = Config::default();
        config.demo.commit_delay_ms = 10_000;
        let mut app = app(config);

        app.handle_key(KeyCode::Right);
        assert!(app.navigator.is_loading_next_step());

        app.handle_key(KeyCode::Esc);
        assert!(app.outcome.is_none());
        assert!(!app.should_quit);
    }

    #[test]
    fn test_cancel_sets_outcome() {
        let mut app = app(instant_config());
        app.handle_key(KeyCode::Esc);
        assert_eq!(app.outcome(), Some(WizardOutcome::Cancelled));
        assert!(app.should_quit);
    }

    #[test]
    fn test_submit_from_last_step() {
        let mut app = app(instant_config());
        app.handle_key(KeyCode::Char(' ')); // no-op on Welcome
        app.handle_key(KeyCode::Right); // -> Terms
        app.handle_key(KeyCode::Char(' ')); // accept
        app.handle_key(KeyCode::Right); // -> Preferences
        app.handle_key(KeyCode::Right); // -> Review
        app.handle_key(KeyCode::Right); // -> Finish
        app.handle_key(KeyCode::Right); // Submit

        assert_eq!(app.outcome(), Some(WizardOutcome::Submitted));
    }

    #[test]
    fn test_funnel_records_full_walk() {
        let mut app = app(instant_config());
        let snapshot = app.wizard.clone();
        app.navigator.begin(&snapshot);
        app.handle_key(KeyCode::Right);

        let events = app.funnel_events();
        assert_eq!(
            events,
            vec![
                FunnelEvent::Started,
                FunnelEvent::StepStarted { index: 0 },
                FunnelEvent::StepCompleted { index: 0 },
                FunnelEvent::StepStarted { index: 1 },
            ]
        );
    }
}
