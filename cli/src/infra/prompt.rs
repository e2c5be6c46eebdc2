//! Terminal prompts backed by `dialoguer`.

use anyhow::{Context, Result};
use dialoguer::{Confirm, Input, Password};

use crate::application::ports::Prompter;

/// Interactive prompter on the controlling terminal.
#[derive(Debug, Default, Clone, Copy)]
pub struct DialoguerPrompter {
    /// Answer taken when the operator just presses Enter; `false` unless set.
    pub confirm_default: bool,
}

impl Prompter for DialoguerPrompter {
    fn confirm(&self, prompt: &str) -> Result<bool> {
        Confirm::new()
            .with_prompt(prompt)
            .default(self.confirm_default)
            .interact()
            .context("reading confirmation")
    }

    fn input(&self, prompt: &str, allow_empty: bool) -> Result<String> {
        let value: String = Input::new()
            .with_prompt(prompt)
            .allow_empty(allow_empty)
            .interact_text()
            .context("reading input")?;
        Ok(value.trim().to_string())
    }

    fn password(&self, prompt: &str, confirm: bool) -> Result<String> {
        let mut builder = Password::new().with_prompt(prompt);
        if confirm {
            builder = builder.with_confirmation("Repeat password", "Passwords do not match");
        }
        builder.interact().context("reading password")
    }
}
