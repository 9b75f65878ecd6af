//! The controlled step navigator.
//!
//! The navigator holds no "current step" of its own: the host owns
//! `active_step_index` inside [`WizardState`] and is the only code that
//! moves it. Key handling takes the current state by reference and returns
//! an optional [`NavigationRequest`]; the host commits the transition, runs
//! validation first, or drops the request entirely. If the host does
//! nothing, the visible step does not change.

use crossterm::event::KeyCode;
use ratatui::widgets::ListState;

use crate::analytics::{FunnelCollector, FunnelEvent};
use crate::state::{NavReason, NavigationRequest, WizardState};
use crate::strings::WizardStrings;


/// Skip-gate policy: may the user jump directly to `target`?
///
/// Allowed when skipping ahead is globally enabled, when the target is at
/// or behind the active step (already visited), or when every step strictly
/// between the active step and the target is optional. Public so hosts can
/// enforce the identical rule on their side of the contract.
pub fn can_select<C>(state: &WizardState<C>, target: usize) -> bool {
    if target >= state.len() {
        return false;
    }
    let active = state.active_step_index();
    if target <= active || state.allow_skip_to {
        return true;
    }
    state.steps()[active + 1..target]
        .iter()
        .all(|step| step.is_optional)
}

pub struct WizardNavigator {
    strings: WizardStrings,
    /// While set, every control is disabled and key events emit no request.
    /// There is no built-in timeout; the host owns recovery if its async
    /// work never resolves.
    is_loading_next_step: bool,
    /// Highlight position in the side navigation list
    nav_state: ListState,
    collector: Option<Box<dyn FunnelCollector>>,
    started: bool,
}

impl WizardNavigator {
    pub fn new(strings: WizardStrings) -> Self {
        let mut nav_state = ListState::default();
        nav_state.select(Some(0));

        Self {
            strings,
            is_loading_next_step: false,
            nav_state,
            collector: None,
            started: false,
        }
    }

    /// Attach a funnel collector receiving lifecycle events.
    pub fn with_collector(mut self, collector: Box<dyn FunnelCollector>) -> Self {
        self.collector = Some(collector);
        self
    }

    pub fn strings(&self) -> &WizardStrings {
        &self.strings
    }

    pub fn is_loading_next_step(&self) -> bool {
        self.is_loading_next_step
    }

    /// Put the controls into the disabled/loading state while the host
    /// performs async work. Never times out on its own.
    pub fn set_loading(&mut self, loading: bool) {
        self.is_loading_next_step = loading;
    }

    /// Highlight state for the side navigation list. Exposed so hosts can
    /// preset the highlighted entry.
    pub fn nav_state_mut(&mut self) -> &mut ListState {
        &mut self.nav_state
    }

    /// Mark the wizard visible. Fires `Started` plus `StepStarted` for the
    /// active step; subsequent calls are no-ops.
    pub fn begin<C>(&mut self, state: &WizardState<C>) {
        if self.started {
            return;
        }
        self.started = true;
        self.nav_state.select(Some(state.active_step_index()));
        self.emit_event(FunnelEvent::Started);
        self.emit_event(FunnelEvent::StepStarted {
            index: state.active_step_index(),
        });
    }

    /// Map a key press to a navigation request.
    ///
    /// Up/Down move the side-nav highlight, Enter proposes the highlighted
    /// step (gated by [`can_select`]), Right/`n` proposes the next step (or
    /// submit on the last step), Left/`p` proposes the previous step, and
    /// Esc/`q` proposes cancellation. Returns `None` for blocked or
    /// inapplicable input.
    pub fn handle_key<C>(
        &mut self,
        code: KeyCode,
        state: &WizardState<C>,
    ) -> Option<NavigationRequest> {
        if self.is_loading_next_step {
            tracing::debug!(?code, "key ignored while loading next step");
            return None;
        }

        match code {
            KeyCode::Down | KeyCode::Char('j') => {
                self.select_next(state.len());
                None
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.select_prev(state.len());
                None
            }
            KeyCode::Enter => self.request_selected(state),
            KeyCode::Right | KeyCode::Char('n') => self.request_next(state),
            KeyCode::Left | KeyCode::Char('p') => self.request_previous(state),
            KeyCode::Esc | KeyCode::Char('q') => self.request_cancel(state),
            _ => None,
        }
    }

    /// Host notification: a transition was committed. Updates the nav
    /// highlight and fires `StepCompleted` (forward moves only) followed by
    /// `StepStarted`.
    pub fn step_committed(&mut self, previous: usize, next: usize) {
        self.nav_state.select(Some(next));
        if next > previous {
            self.emit_event(FunnelEvent::StepCompleted { index: previous });
        }
        self.emit_event(FunnelEvent::StepStarted { index: next });
    }

    /// Host notification: validation failed on a step.
    pub fn record_step_error(&mut self, index: usize) {
        self.emit_event(FunnelEvent::StepError { index });
    }

    fn request_next<C>(&mut self, state: &WizardState<C>) -> Option<NavigationRequest> {
        let active = state.active_step_index();
        if state.is_last_step() {
            // The Next control doubles as Submit on the final step
            self.emit_event(FunnelEvent::Submitted);
            return self.emit(NavigationRequest {
                requested_step_index: active,
                reason: NavReason::Submit,
            });
        }
        self.emit(NavigationRequest {
            requested_step_index: active + 1,
            reason: NavReason::Next,
        })
    }

    fn request_previous<C>(&mut self, state: &WizardState<C>) -> Option<NavigationRequest> {
        if state.is_first_step() {
            return None;
        }
        self.emit(NavigationRequest {
            requested_step_index: state.active_step_index() - 1,
            reason: NavReason::Previous,
        })
    }

    fn request_cancel<C>(&mut self, state: &WizardState<C>) -> Option<NavigationRequest> {
        self.emit_event(FunnelEvent::Cancelled);
        self.emit(NavigationRequest {
            requested_step_index: state.active_step_index(),
            reason: NavReason::Cancel,
        })
    }

    fn request_selected<C>(&mut self, state: &WizardState<C>) -> Option<NavigationRequest> {
        let target = self.nav_state.selected()?;
        let active = state.active_step_index();
        if target == active {
            return None;
        }
        if !can_select(state, target) {
            tracing::debug!(target, active, "direct selection blocked by skip gate");
            return None;
        }
        let reason = if target > active + 1 {
            NavReason::Skip
        } else {
            NavReason::Step
        };
        self.emit(NavigationRequest {
            requested_step_index: target,
            reason,
        })
    }

    fn select_next(&mut self, len: usize) {
        let i = self.nav_state.selected().map_or(0, |i| (i + 1) % len);
        self.nav_state.select(Some(i));
    }

    fn select_prev(&mut self, len: usize) {
        let i = self
            .nav_state
            .selected()
            .map_or(0, |i| if i == 0 { len - 1 } else { i - 1 });
        self.nav_state.select(Some(i));
    }

    fn emit(&mut self, request: NavigationRequest) -> Option<NavigationRequest> {
        tracing::debug!(
            requested = request.requested_step_index,
            reason = ?request.reason,
            "navigation request"
        );
        Some(request)
    }

    fn emit_event(&mut self, event: FunnelEvent) {
        if let Some(collector) = self.collector.as_mut() {
            collector.record(event);
        }
    }
}
