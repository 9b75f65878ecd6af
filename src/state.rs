//! Wizard data model: steps, externally-owned active index, navigation requests.
//!
//! The navigator never moves `active_step_index` itself. The host owns the
//! index and commits (or declines) transitions through
//! [`WizardState::set_active_step_index`], the sole mutation point.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum WizardError {
    #[error("step index {index} is out of range (wizard has {len} steps)")]
    StepIndexOutOfRange { index: usize, len: usize },

    #[error("a wizard needs at least one step")]
    NoSteps,
}

/// One page/section of a multi-step flow.
///
/// The `content` payload is opaque to the navigator; only the metadata
/// fields drive navigation and rendering of the side list.
#[derive(Debug, Clone)]
pub struct Step<C> {
    /// Title shown in the side navigation list
    pub title: String,
    /// Short description shown under the step header
    pub description: Option<String>,
    /// Supplementary info line (e.g. hints, prerequisites)
    pub info: Option<String>,
    /// Host-supplied validation error, rendered as-is
    pub error_text: Option<String>,
    /// Optional steps may be skipped over when jumping ahead
    pub is_optional: bool,
    /// Opaque step content, rendered by the host
    pub content: C,
}

impl<C> Step<C> {
    pub fn new(title: impl Into<String>, content: C) -> Self {
        Self {
            title: title.into(),
            description: None,
            info: None,
            error_text: None,
            is_optional: false,
            content,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_info(mut self, info: impl Into<String>) -> Self {
        self.info = Some(info.into());
        self
    }

    /// Mark this step as skippable when jumping ahead
    pub fn optional(mut self) -> Self {
        self.is_optional = true;
        self
    }
}

/// Why a navigation request was issued.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NavReason {
    /// The Next control on a non-final step
    Next,
    /// The Previous control
    Previous,
    /// Direct selection of an adjacent or already-visited step
    Step,
    /// Direct selection jumping ahead past the immediate successor
    Skip,
    /// Terminal intent: abandon the flow
    Cancel,
    /// Terminal intent: the Next control on the final step
    Submit,
}

/// A proposed transition, emitted by the navigator and interpreted by the host.
///
/// For the terminal intents (`Cancel`, `Submit`) there is no transition
/// target, so `requested_step_index` carries the active index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationRequest {
    pub requested_step_index: usize,
    pub reason: NavReason,
}

/// Ordered steps plus the externally-owned active index.
#[derive(Debug, Clone)]
pub struct WizardState<C> {
    steps: Vec<Step<C>>,
    active_step_index: usize,
    /// Permit jumping ahead to unvisited steps regardless of optionality
    pub allow_skip_to: bool,
}

impl<C> WizardState<C> {
    /// Build a wizard state starting on the first step.
    pub fn new(steps: Vec<Step<C>>) -> Result<Self, WizardError> {
        if steps.is_empty() {
            return Err(WizardError::NoSteps);
        }
        Ok(Self {
            steps,
            active_step_index: 0,
            allow_skip_to: false,
        })
    }

    pub fn with_allow_skip_to(mut self, allow: bool) -> Self {
        self.allow_skip_to = allow;
        self
    }

    pub fn steps(&self) -> &[Step<C>] {
        &self.steps
    }

    /// Mutable access so the host can set or clear per-step `error_text`.
    pub fn steps_mut(&mut self) -> &mut [Step<C>] {
        &mut self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Always false; construction rejects empty step lists.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn active_step_index(&self) -> usize {
        self.active_step_index
    }

    pub fn active_step(&self) -> &Step<C> {
        &self.steps[self.active_step_index]
    }

    pub fn active_step_mut(&mut self) -> &mut Step<C> {
        &mut self.steps[self.active_step_index]
    }

    pub fn is_first_step(&self) -> bool {
        self.active_step_index == 0
    }

    pub fn is_last_step(&self) -> bool {
        self.active_step_index + 1 == self.steps.len()
    }

    /// Commit a transition. This is the host's side of the contract: the
    /// navigator proposes indices but never calls this.
    pub fn set_active_step_index(&mut self, index: usize) -> Result<(), WizardError> {
        if index >= self.steps.len() {
            return Err(WizardError::StepIndexOutOfRange {
                index,
                len: self.steps.len(),
            });
        }
        self.active_step_index = index;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn three_steps() -> Vec<Step<()>> {
        vec![
            Step::new("One", ()),
            Step::new("Two", ()).optional(),
            Step::new("Three", ()),
        ]
    }

    #[test]
    fn test_new_starts_on_first_step() {
        let state = WizardState::new(three_steps()).unwrap();
        assert_eq!(state.active_step_index(), 0);
        assert!(state.is_first_step());
        assert!(!state.is_last_step());
    }

    #[test]
    fn test_new_rejects_empty_steps() {
        let result = WizardState::<()>::new(vec![]);
        assert!(matches!(result, Err(WizardError::NoSteps)));
    }

    #[test]
    fn test_set_active_step_index_in_range() {
        let mut state = WizardState::new(three_steps()).unwrap();
        state.set_active_step_index(2).unwrap();
        assert_eq!(state.active_step_index(), 2);
        assert!(state.is_last_step());
    }

    #[test]
    fn test_set_active_step_index_out_of_range() {
        let mut state = WizardState::new(three_steps()).unwrap();
        let err = state.set_active_step_index(3).unwrap_err();
        assert!(matches!(
            err,
            WizardError::StepIndexOutOfRange { index: 3, len: 3 }
        ));
        // Index unchanged after the rejected commit
        assert_eq!(state.active_step_index(), 0);
    }

    #[test]
    fn test_step_builder_metadata() {
        let step = Step::new("Profile", ())
            .with_description("Tell us about yourself")
            .with_info("Takes about a minute")
            .optional();
        assert_eq!(step.title, "Profile");
        assert_eq!(step.description.as_deref(), Some("Tell us about yourself"));
        assert_eq!(step.info.as_deref(), Some("Takes about a minute"));
        assert!(step.is_optional);
        assert!(step.error_text.is_none());
    }

    #[test]
    fn test_nav_reason_serializes_snake_case() {
        let json = serde_json::to_string(&NavReason::Previous).unwrap();
        assert_eq!(json, "\"previous\"");
    }
}
