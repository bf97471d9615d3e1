//! Operator prompts: the accept/edit/regenerate menu, message editing and token entry.

use dialoguer::{Input, Password, Select};

use crate::error::PromptError;

/// The three ways an operator can respond to a proposed message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Choice {
    Accept,
    Edit,
    Regenerate,
}

impl Choice {
    pub const ALL: [Choice; 3] = [Choice::Accept, Choice::Edit, Choice::Regenerate];

    pub fn label(&self) -> &'static str {
        match self {
            Choice::Accept => "Commit with this message",
            Choice::Edit => "Edit the message",
            Choice::Regenerate => "Regenerate",
        }
    }
}

/// Why a token is being asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenRequest {
    /// No token is stored yet.
    Missing,
    /// The endpoint rejected the current token.
    Rejected,
}

/// Slow steps announced to the operator before they start.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Progress {
    Generating,
    Committing,
}

impl Progress {
    pub fn label(&self) -> &'static str {
        match self {
            Progress::Generating => "Generating commit message...",
            Progress::Committing => "Committing with the chosen message...",
        }
    }
}

/// Interactive operator input.
///
/// This abstraction allows scripting the operator in tests.
#[cfg_attr(test, mockall::automock)]
pub trait Prompter {
    /// Ask what to do with `message`. `None` means the operator dismissed the menu.
    fn choose(&self, message: &str) -> Result<Option<Choice>, PromptError>;

    /// Ask for a replacement message, pre-filled with `message`.
    fn edit(&self, message: &str) -> Result<String, PromptError>;

    /// Ask for an access token with masked input.
    fn read_token(&self, request: TokenRequest) -> Result<String, PromptError>;

    /// Tell the operator a slow step is starting.
    fn progress(&self, step: Progress);
}

/// [`Prompter`] backed by dialoguer on the controlling terminal.
#[derive(Debug, Default)]
pub struct TerminalPrompter;

impl TerminalPrompter {
    pub fn new() -> Self {
        Self
    }
}

// dialoguer validators receive `&String`.
#[allow(clippy::ptr_arg)]
fn require_non_empty(input: &String) -> Result<(), &'static str> {
    if input.trim().is_empty() {
        Err("Input cannot be empty")
    } else {
        Ok(())
    }
}

impl Prompter for TerminalPrompter {
    fn choose(&self, message: &str) -> Result<Option<Choice>, PromptError> {
        println!();
        println!("Generated message: {}", message);
        println!();

        let labels: Vec<&str> = Choice::ALL.iter().map(Choice::label).collect();
        let selection = Select::new()
            .with_prompt("What next? (Esc to cancel)")
            .items(&labels)
            .default(0)
            .interact_opt()?;

        Ok(selection.and_then(|idx| Choice::ALL.get(idx).copied()))
    }

    fn edit(&self, message: &str) -> Result<String, PromptError> {
        let edited: String = Input::new()
            .with_prompt("Commit message")
            .with_initial_text(message)
            .validate_with(require_non_empty)
            .interact_text()?;

        Ok(edited.trim().to_string())
    }

    fn read_token(&self, request: TokenRequest) -> Result<String, PromptError> {
        match request {
            TokenRequest::Missing => {
                println!("No access token found. Create one at https://platform.openai.com/api-keys")
            }
            TokenRequest::Rejected => {
                eprintln!("The endpoint rejected your access token. Enter a new one.")
            }
        }

        let token = Password::new()
            .with_prompt("Access token")
            .validate_with(require_non_empty)
            .interact()?;

        Ok(token.trim().to_string())
    }

    fn progress(&self, step: Progress) {
        eprintln!("{}", step.label());
    }
}
