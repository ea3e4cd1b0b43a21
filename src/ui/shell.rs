// file: src/ui/shell.rs
// description: interactive chat loop that owns the session and drives the pipeline
// reference: one turn in flight at a time; input is blocked until the turn completes

use crate::config::UiConfig;
use crate::error::{AgentError, Result};
use crate::models::ChatTurn;
use crate::pipeline::{PipelineRunner, ProgressObserver, TurnOutcome};
use crate::session::ChatSession;
use crate::ui::input::LineSource;
use crate::ui::render::{COMMANDS_HELP, banner, render_transcript, render_turn};
use std::io::Write;
use tracing::{Instrument, debug, info, info_span};

#[derive(Debug, PartialEq, Eq)]
enum Command<'a> {
    Ask(&'a str),
    History,
    Help,
    Exit,
    Skip,
}

fn parse_command(line: &str) -> Command<'_> {
    match line.trim() {
        "" => Command::Skip,
        "/history" => Command::History,
        "/help" => Command::Help,
        "/exit" | "/quit" => Command::Exit,
        query => Command::Ask(query),
    }
}

pub struct ChatShell<W: Write> {
    runner: PipelineRunner,
    session: ChatSession,
    ui: UiConfig,
    progress: Box<dyn ProgressObserver>,
    out: W,
}

impl<W: Write> ChatShell<W> {
    pub fn new(
        runner: PipelineRunner,
        ui: UiConfig,
        progress: Box<dyn ProgressObserver>,
        out: W,
    ) -> Self {
        Self {
            runner,
            session: ChatSession::new(),
            ui,
            progress,
            out,
        }
    }

    pub fn session(&self) -> &ChatSession {
        &self.session
    }

    /// Reads lines until the source is exhausted or the user exits, then
    /// hands back the finished session.
    pub async fn run<I>(mut self, mut input: I) -> Result<ChatSession>
    where
        I: LineSource + 'static,
    {
        info!("Chat session {} started", self.session.id());

        if self.ui.show_banner {
            writeln!(self.out, "{}", banner(&self.ui))?;
        }

        loop {
            let prompt = self.ui.placeholder.clone();
            // dialoguer blocks, keep it off the runtime threads
            let (returned, line) = tokio::task::spawn_blocking(move || {
                let line = input.read_line(&prompt);
                (input, line)
            })
            .await
            .map_err(|e| AgentError::Io(std::io::Error::other(e)))?;
            input = returned;

            let Some(line) = line? else {
                break;
            };

            match parse_command(&line) {
                Command::Skip => continue,
                Command::Exit => break,
                Command::Help => writeln!(self.out, "{}", COMMANDS_HELP)?,
                Command::History => {
                    writeln!(self.out, "{}", render_transcript(self.session.history()))?
                }
                Command::Ask(query) => {
                    self.ask(query).await?;
                }
            }
        }

        info!(
            "Chat session {} ended after {} turns",
            self.session.id(),
            self.session.turn_count()
        );
        self.out.flush()?;
        Ok(self.session)
    }

    /// Runs one turn: records the question, waits for the pipeline, records
    /// and prints the answer.
    pub async fn ask(&mut self, query: &str) -> Result<TurnOutcome> {
        self.session.append(ChatTurn::user(query));

        let span = info_span!(
            "turn",
            session = %self.session.id(),
            turn = self.session.turn_count()
        );
        let outcome = self
            .runner
            .run_turn(query, self.progress.as_ref())
            .instrument(span)
            .await;

        debug!(
            "Turn took {:.2}s with {} search results",
            outcome.stats.total_secs(),
            outcome.stats.search_results
        );

        let reply = ChatTurn::assistant(outcome.answer.clone());
        writeln!(self.out, "{}", render_turn(&reply))?;
        self.out.flush()?;
        self.session.append(reply);

        Ok(outcome)
    }
}
