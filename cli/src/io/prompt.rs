//! User prompts behind a trait so flows stay testable.

use anyhow::{Context, Result};
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Confirm, Input, Select};

/// Answers keyed by question; the interactive flows never touch stdin
/// directly.
pub trait Prompter {
    /// Free-form text answer.
    fn input(&self, prompt: &str) -> Result<String>;
    /// Index of the chosen option.
    fn select(&self, prompt: &str, options: &[&str]) -> Result<usize>;
    /// Yes/no answer with a default.
    fn confirm(&self, prompt: &str, default: bool) -> Result<bool>;
}

/// Terminal-backed prompter using dialoguer.
#[derive(Debug, Clone, Default)]
pub struct TerminalPrompter;

impl Prompter for TerminalPrompter {
    fn input(&self, prompt: &str) -> Result<String> {
        Input::<String>::with_theme(&ColorfulTheme::default())
            .with_prompt(prompt)
            .allow_empty(true)
            .interact_text()
            .with_context(|| format!("prompt '{prompt}'"))
    }

    fn select(&self, prompt: &str, options: &[&str]) -> Result<usize> {
        Select::with_theme(&ColorfulTheme::default())
            .with_prompt(prompt)
            .items(options)
            .default(0)
            .interact()
            .with_context(|| format!("prompt '{prompt}'"))
    }

    fn confirm(&self, prompt: &str, default: bool) -> Result<bool> {
        Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(prompt)
            .default(default)
            .interact()
            .with_context(|| format!("prompt '{prompt}'"))
    }
}
