//! Localized label table for the wizard controls.
//!
//! Hosts supply this alongside the config; every field has an English
//! default so a partial table in TOML only overrides what it names.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WizardStrings {
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default = "default_nav_title")]
    pub nav_title: String,
    #[serde(default = "default_next")]
    pub next: String,
    #[serde(default = "default_previous")]
    pub previous: String,
    #[serde(default = "default_submit")]
    pub submit: String,
    #[serde(default = "default_cancel")]
    pub cancel: String,
    #[serde(default = "default_loading")]
    pub loading: String,
    #[serde(default = "default_optional_tag")]
    pub optional_tag: String,
    /// Template for the step counter; `{current}` and `{total}` are replaced
    #[serde(default = "default_step_counter")]
    pub step_counter: String,
}

fn default_title() -> String {
    "Wizard".to_string()
}

fn default_nav_title() -> String {
    "Steps".to_string()
}

fn default_next() -> String {
    "Next".to_string()
}

fn default_previous() -> String {
    "Previous".to_string()
}

fn default_submit() -> String {
    "Submit".to_string()
}

fn default_cancel() -> String {
    "Cancel".to_string()
}

fn default_loading() -> String {
    "Loading...".to_string()
}

fn default_optional_tag() -> String {
    "optional".to_string()
}

fn default_step_counter() -> String {
    "Step {current} of {total}".to_string()
}

impl Default for WizardStrings {
    fn default() -> Self {
        Self {
            title: default_title(),
            nav_title: default_nav_title(),
            next: default_next(),
            previous: default_previous(),
            submit: default_submit(),
            cancel: default_cancel(),
            loading: default_loading(),
            optional_tag: default_optional_tag(),
            step_counter: default_step_counter(),
        }
    }
}

impl WizardStrings {
    /// Render the step counter for a 1-based position.
    pub fn step_counter(&self, current: usize, total: usize) -> String {
        self.step_counter
            .replace("{current}", &current.to_string())
            .replace("{total}", &total.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_english() {
        let strings = WizardStrings::default();
        assert_eq!(strings.next, "Next");
        assert_eq!(strings.previous, "Previous");
        assert_eq!(strings.submit, "Submit");
        assert_eq!(strings.cancel, "Cancel");
    }

    #[test]
    fn test_step_counter_substitution() {
        let strings = WizardStrings::default();
        assert_eq!(strings.step_counter(2, 5), "Step 2 of 5");
    }

    #[test]
    fn test_partial_table_keeps_defaults() {
        let strings: WizardStrings = toml::from_str("next = \"Weiter\"").unwrap();
        assert_eq!(strings.next, "Weiter");
        assert_eq!(strings.previous, "Previous");
    }
}
