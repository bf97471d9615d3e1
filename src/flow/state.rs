//! States and transitions of the interaction loop.
//!
//! ```text
//! Generating -> Presenting -> Accepted     -> Committing -> Done
//!                          -> Editing      -> Committing -> Done
//!                          -> Regenerating -> Generating
//!                          -> Done (menu dismissed)
//! Generating -> Aborted (too large, rejected token, endpoint failure)
//! ```

use crate::error::{GitError, RunError, exit_code};
use crate::terminal::Choice;

/// How a run that reached `Done` ended.
#[derive(Debug)]
pub enum Completion {
    /// `git commit` ran; `summary` is its output.
    Committed { message: String, summary: String },
    /// The message was final but committing was switched off.
    Skipped { message: String },
    /// The operator dismissed the menu.
    Declined,
    /// `git commit` was attempted and failed.
    CommitFailed { message: String, error: GitError },
}

impl Completion {
    pub fn exit_code(&self) -> u8 {
        match self {
            Completion::CommitFailed { .. } => exit_code::EXTERNAL_TOOL,
            _ => 0,
        }
    }

    /// The final message, if one was settled on.
    pub fn message(&self) -> Option<&str> {
        match self {
            Completion::Committed { message, .. }
            | Completion::Skipped { message }
            | Completion::CommitFailed { message, .. } => Some(message),
            Completion::Declined => None,
        }
    }
}

#[derive(Debug)]
pub enum State {
    Generating,
    Presenting(String),
    Accepted(String),
    Editing(String),
    Regenerating,
    Committing(String),
    Done(Completion),
    Aborted(RunError),
}

impl State {
    /// Leave `Presenting` according to the operator's choice.
    pub fn after_choice(message: String, choice: Option<Choice>) -> State {
        match choice {
            Some(Choice::Accept) => State::Accepted(message),
            Some(Choice::Edit) => State::Editing(message),
            Some(Choice::Regenerate) => State::Regenerating,
            None => State::Done(Completion::Declined),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accept_keeps_message() {
        match State::after_choice("feat: x".into(), Some(Choice::Accept)) {
            State::Accepted(m) => assert_eq!(m, "feat: x"),
            other => panic!("Expected Accepted, got: {:?}", other),
        }
    }

    #[test]
    fn test_edit_carries_message_for_prefill() {
        match State::after_choice("feat: x".into(), Some(Choice::Edit)) {
            State::Editing(m) => assert_eq!(m, "feat: x"),
            other => panic!("Expected Editing, got: {:?}", other),
        }
    }

    #[test]
    fn test_regenerate_drops_message() {
        assert!(matches!(
            State::after_choice("feat: x".into(), Some(Choice::Regenerate)),
            State::Regenerating
        ));
    }

    #[test]
    fn test_dismissed_menu_is_declined() {
        let state = State::after_choice("feat: x".into(), None);
        assert!(matches!(state, State::Done(Completion::Declined)));
    }

    #[test]
    fn test_completion_exit_codes() {
        assert_eq!(Completion::Declined.exit_code(), 0);
        assert_eq!(Completion::Skipped { message: "m".into() }.exit_code(), 0);
        assert_eq!(
            Completion::CommitFailed {
                message: "m".into(),
                error: GitError::NotInstalled,
            }
            .exit_code(),
            exit_code::EXTERNAL_TOOL
        );
    }

    #[test]
    fn test_completion_message() {
        assert_eq!(Completion::Declined.message(), None);
        assert_eq!(
            Completion::Skipped { message: "fix: y".into() }.message(),
            Some("fix: y")
        );
    }
}
