//! One run of the interaction loop, from credential to commit.

use tracing::{debug, info, warn};

use crate::auth::Authenticator;
use crate::commit::MessageGenerator;
use crate::config::RunConfig;
use crate::error::{GeneratorError, RunError};
use crate::flow::state::{Completion, State};
use crate::git::VersionControl;
use crate::llm::ChatClient;
use crate::terminal::{Progress, Prompter};

/// Per-run context: every collaborator the loop talks to, built once.
pub struct Session<V, C, P> {
    config: RunConfig,
    auth: Authenticator,
    vcs: V,
    generator: MessageGenerator<C>,
    prompter: P,
}

impl<V, C, P> Session<V, C, P>
where
    V: VersionControl,
    C: ChatClient,
    P: Prompter,
{
    pub fn new(config: RunConfig, vcs: V, client: C, prompter: P) -> Self {
        let auth = config.authenticator();
        let generator = MessageGenerator::new(client, config.token_limit);

        Self {
            config,
            auth,
            vcs,
            generator,
            prompter,
        }
    }

    /// Authenticate, fetch the diff, then drive the state machine to a terminal state.
    ///
    /// `Done` comes back as `Ok`, `Aborted` as `Err`.
    pub async fn run(&self) -> Result<Completion, RunError> {
        let mut token = self.auth.authenticate(&self.prompter, false)?;

        let diff = self
            .vcs
            .diff(self.config.scope)
            .map_err(RunError::ExternalTool)?;
        if diff.trim().is_empty() {
            debug!("Empty diff for {}", self.config.scope);
            return Err(RunError::NoChanges(self.config.scope));
        }

        let mut state = State::Generating;
        loop {
            debug!("Entering state {:?}", state);
            state = match state {
                State::Done(completion) => return Ok(completion),
                State::Aborted(err) => return Err(err),
                other => self.step(other, &diff, &mut token).await,
            };
        }
    }

    /// Perform one transition from a non-terminal state.
    async fn step(&self, state: State, diff: &str, token: &mut String) -> State {
        match state {
            State::Generating => self.generate(diff, token).await,
            State::Presenting(message) => match self.prompter.choose(&message) {
                Ok(choice) => State::after_choice(message, choice),
                Err(e) => State::Aborted(e.into()),
            },
            State::Accepted(message) => State::Committing(message),
            State::Editing(message) => match self.prompter.edit(&message) {
                Ok(edited) => State::Committing(edited.trim().to_string()),
                Err(e) => State::Aborted(e.into()),
            },
            State::Regenerating => {
                info!("Regenerating commit message");
                State::Generating
            }
            State::Committing(message) => self.commit(message),
            terminal => terminal,
        }
    }

    /// Ask for a message; on a rejected token, reauthenticate once and resend.
    async fn generate(&self, diff: &str, token: &mut String) -> State {
        self.prompter.progress(Progress::Generating);
        match self.generator.generate(diff, token).await {
            Ok(message) => return State::Presenting(message),
            Err(GeneratorError::Unauthorized(status)) => {
                warn!("Endpoint rejected the access token (HTTP {}), reauthenticating", status);
            }
            Err(e) => return abort_generation(e),
        }

        *token = match self.auth.authenticate(&self.prompter, true) {
            Ok(fresh) => fresh,
            Err(e) => return State::Aborted(e.into()),
        };

        self.prompter.progress(Progress::Generating);
        match self.generator.generate(diff, token).await {
            Ok(message) => State::Presenting(message),
            Err(e @ GeneratorError::Unauthorized(_)) => State::Aborted(RunError::Authorization(e)),
            Err(e) => abort_generation(e),
        }
    }

    fn commit(&self, message: String) -> State {
        if self.config.skip_commit {
            info!("Commit skipped");
            return State::Done(Completion::Skipped { message });
        }

        self.prompter.progress(Progress::Committing);
        match self.vcs.commit(&message) {
            Ok(summary) => State::Done(Completion::Committed { message, summary }),
            Err(error) => {
                warn!("git commit failed: {}", error);
                State::Done(Completion::CommitFailed { message, error })
            }
        }
    }
}

fn abort_generation(err: GeneratorError) -> State {
    if err.is_too_large() {
        State::Aborted(RunError::PayloadTooLarge(err))
    } else {
        State::Aborted(RunError::UnknownGenerator(err))
    }
}
