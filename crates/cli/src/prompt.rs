//! Interactive confirmation prompts.
//!
//! Destructive commands only proceed when the operator types an exact token,
//! so a stray Enter or "y" can never delete anything.

use anyhow::Result;
use dialoguer::{Input, Select, theme::ColorfulTheme};

/// What to do with one candidate during triage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriageAction {
    Delete,
    Keep,
    Stop,
}

impl TriageAction {
    const ALL: [TriageAction; 3] = [TriageAction::Delete, TriageAction::Keep, TriageAction::Stop];

    fn label(self) -> &'static str {
        match self {
            TriageAction::Delete => "Delete",
            TriageAction::Keep => "Keep",
            TriageAction::Stop => "Stop reviewing",
        }
    }
}

pub trait Prompter {
    /// Ask the operator to type something; returns the raw input.
    fn type_token(&mut self, prompt: &str) -> Result<String>;
    fn triage_action(&mut self, prompt: &str) -> Result<TriageAction>;
}

/// True only when the input is exactly the token, ignoring surrounding whitespace.
pub fn matches_token(input: &str, token: &str) -> bool {
    input.trim() == token
}

pub struct TerminalPrompter {
    theme: ColorfulTheme,
}

impl TerminalPrompter {
    pub fn new() -> Self {
        Self {
            theme: ColorfulTheme::default(),
        }
    }
}

impl Prompter for TerminalPrompter {
    fn type_token(&mut self, prompt: &str) -> Result<String> {
        let input = Input::<String>::with_theme(&self.theme)
            .with_prompt(prompt)
            .allow_empty(true)
            .interact_text()?;

        Ok(input)
    }

    fn triage_action(&mut self, prompt: &str) -> Result<TriageAction> {
        let labels: Vec<&str> = TriageAction::ALL.iter().map(|a| a.label()).collect();
        let choice = Select::with_theme(&self.theme)
            .with_prompt(prompt)
            .items(&labels)
            .default(1)
            .interact()?;

        Ok(TriageAction::ALL[choice])
    }
}
