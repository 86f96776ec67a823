//! Read-eval loop tying user input, board changes, and notices together.
use std::io;

use anyhow::Result;
use async_trait::async_trait;
use console::{Term, style};
use tokio::io::{AsyncBufReadExt, BufReader};

use client_frontend_core::{
    BoardView, EventConsumer, Frontend, FrontendConfig, MessageEntry, MessageLog,
    SubmissionFlow, SubmitOutcome,
};
use leaderboard_core::Category;
use leaderboard_runtime::{BoardStatus, Leaderboard, LeaderboardHandle, Topic};

use crate::command::{Command, CommandError};
use crate::config::CliConfig;
use crate::presentation;

/// Terminal frontend reading one command per line from stdin.
pub struct CliFrontend {
    frontend_config: FrontendConfig,
    cli_config: CliConfig,
}

impl CliFrontend {
    pub fn new(frontend_config: FrontendConfig, cli_config: CliConfig) -> Self {
        Self {
            frontend_config,
            cli_config,
        }
    }
}

#[async_trait]
impl Frontend for CliFrontend {
    async fn run(&mut self, handle: LeaderboardHandle) -> Result<()> {
        tracing::info!("CLI frontend starting...");

        let mut session = Session::new(
            Term::stdout(),
            &self.frontend_config,
            self.cli_config.board_limit,
            handle,
        );

        let mut staff = session.handle.watch(Category::Staff);
        let mut clients = session.handle.watch(Category::Clients);
        let mut events = session.handle.subscribe(Topic::Leaderboard);
        let mut lines = BufReader::new(tokio::io::stdin()).lines();

        session.screen.write_line(&format!(
            "{} Type `help` for commands.",
            style("Lap time leaderboard.").bold()
        ))?;
        session.print_board(&staff.borrow_and_update())?;
        session.print_board(&clients.borrow_and_update())?;
        session.prompt()?;

        loop {
            tokio::select! {
                line = lines.next_line() => {
                    let Some(line) = line? else { break };
                    if session.handle_line(&line).await? == Control::Quit {
                        break;
                    }
                    session.prompt()?;
                }
                Ok(()) = staff.changed() => {
                    let board = staff.borrow_and_update().clone();
                    session.on_board_change(&board)?;
                }
                Ok(()) = clients.changed() => {
                    let board = clients.borrow_and_update().clone();
                    session.on_board_change(&board)?;
                }
                Ok(event) = events.recv() => {
                    let mark = session.consumer.messages.mark();
                    session.consumer.on_event(&event);
                    session.print_messages_since(mark)?;
                }
                _ = tokio::signal::ctrl_c() => {
                    tracing::info!("Interrupted");
                    break;
                }
            }
        }

        tracing::info!("CLI frontend exiting");
        Ok(())
    }
}

#[derive(Debug, PartialEq, Eq)]
enum Control {
    Continue,
    Quit,
}

struct CliEventConsumer {
    messages: MessageLog,
}

impl EventConsumer for CliEventConsumer {
    fn message_log(&self) -> &MessageLog {
        &self.messages
    }

    fn message_log_mut(&mut self) -> &mut MessageLog {
        &mut self.messages
    }
}

/// Where a session writes its output.
trait Screen {
    fn write_line(&self, line: &str) -> io::Result<()>;
    fn write_str(&self, text: &str) -> io::Result<()>;
    fn flush(&self) -> io::Result<()>;
}

impl Screen for Term {
    fn write_line(&self, line: &str) -> io::Result<()> {
        Term::write_line(self, line)
    }

    fn write_str(&self, text: &str) -> io::Result<()> {
        Term::write_str(self, text)
    }

    fn flush(&self) -> io::Result<()> {
        Term::flush(self)
    }
}

struct Session<S> {
    screen: S,
    flow: SubmissionFlow,
    consumer: CliEventConsumer,
    board_limit: usize,
    handle: LeaderboardHandle,
}

impl<S: Screen> Session<S> {
    fn new(
        screen: S,
        config: &FrontendConfig,
        board_limit: usize,
        handle: LeaderboardHandle,
    ) -> Self {
        Self {
            screen,
            flow: SubmissionFlow::new(config.input_mode),
            consumer: CliEventConsumer {
                messages: MessageLog::new(config.messages.capacity),
            },
            board_limit,
            handle,
        }
    }

    async fn handle_line(&mut self, line: &str) -> Result<Control> {
        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(CommandError::Empty) => return Ok(Control::Continue),
            Err(err) => {
                self.notice(MessageEntry::warning(err.to_string()))?;
                return Ok(Control::Continue);
            }
        };

        tracing::debug!("Command: {:?}", command);

        match command {
            Command::New(selection) => {
                self.flow.open(selection.as_deref());
                self.print_form()?;
            }
            Command::Mode(mode) => {
                self.flow.form_mut().mode = mode;
                self.print_form()?;
            }
            Command::Set { field, value } => {
                if !self.require_open_form()? {
                    return Ok(Control::Continue);
                }
                self.flow.form_mut().set(field, value);
            }
            Command::Submit => {
                if !self.require_open_form()? {
                    return Ok(Control::Continue);
                }
                self.submit().await?;
            }
            Command::Cancel => {
                self.flow.cancel();
            }
            Command::Form => self.print_form()?,
            Command::Show(Some(category)) => {
                self.print_board(&self.handle.board(category))?;
            }
            Command::Show(None) => {
                for category in Category::ALL {
                    self.print_board(&self.handle.board(category))?;
                }
            }
            Command::Help => self.screen.write_line(presentation::HELP)?,
            Command::Quit => return Ok(Control::Quit),
        }

        Ok(Control::Continue)
    }

    async fn submit(&mut self) -> Result<()> {
        let mark = self.consumer.messages.mark();
        let outcome = self
            .flow
            .submit(&self.handle, &mut self.consumer.messages)
            .await;
        self.print_messages_since(mark)?;

        if let SubmitOutcome::MissingFields(fields) = outcome {
            let names: Vec<_> = fields.iter().map(ToString::to_string).collect();
            self.screen.write_line(&format!(
                "  {}",
                style(format!("missing: {}", names.join(", "))).dim()
            ))?;
        }

        Ok(())
    }

    fn require_open_form(&mut self) -> Result<bool> {
        if self.flow.form().is_open() {
            return Ok(true);
        }
        self.notice(MessageEntry::warning("No form open. Use `new` first."))?;
        Ok(false)
    }

    fn on_board_change(&mut self, board: &Leaderboard) -> Result<()> {
        // Status-only changes are reported through events.
        if board.status == BoardStatus::Live {
            self.screen.write_line("")?;
            self.print_board(board)?;
            self.prompt()?;
        }
        Ok(())
    }

    fn notice(&mut self, entry: MessageEntry) -> Result<()> {
        let mark = self.consumer.messages.mark();
        self.consumer.messages.push(entry);
        self.print_messages_since(mark)
    }

    fn print_messages_since(&self, mark: u64) -> Result<()> {
        for entry in self.consumer.messages.since(mark) {
            self.screen.write_line(&presentation::message(entry))?;
        }
        Ok(())
    }

    fn print_board(&self, board: &Leaderboard) -> Result<()> {
        let view = BoardView::from_board(board, self.board_limit);
        self.screen.write_str(&presentation::board(&view))?;
        Ok(())
    }

    fn print_form(&self) -> Result<()> {
        self.screen.write_str(&presentation::form(self.flow.form()))?;
        Ok(())
    }

    fn prompt(&self) -> Result<()> {
        let prompt = if self.flow.form().is_open() {
            "form> "
        } else {
            "> "
        };
        self.screen.write_str(prompt)?;
        self.screen.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::sync::Arc;
    use std::time::Duration;

    use client_frontend_core::flow::{MISSING_FIELDS_NOTICE, SUCCESS_NOTICE};
    use console::strip_ansi_codes;
    use leaderboard_runtime::{InMemoryEntryRepository, Runtime};

    #[derive(Default)]
    struct Recorder {
        output: RefCell<String>,
    }

    impl Recorder {
        fn take(&self) -> String {
            strip_ansi_codes(&self.output.take()).into_owned()
        }
    }

    impl Screen for Recorder {
        fn write_line(&self, line: &str) -> io::Result<()> {
            let mut output = self.output.borrow_mut();
            output.push_str(line);
            output.push('\n');
            Ok(())
        }

        fn write_str(&self, text: &str) -> io::Result<()> {
            self.output.borrow_mut().push_str(text);
            Ok(())
        }

        fn flush(&self) -> io::Result<()> {
            Ok(())
        }
    }

    async fn session() -> (Session<Recorder>, Runtime, Arc<InMemoryEntryRepository>) {
        let repo = Arc::new(InMemoryEntryRepository::new());
        let runtime = Runtime::builder()
            .shared_repository(repo.clone())
            .build()
            .await
            .unwrap();
        let session = Session::new(
            Recorder::default(),
            &FrontendConfig::default(),
            10,
            runtime.handle(),
        );
        (session, runtime, repo)
    }

    async fn type_lines(session: &mut Session<Recorder>, lines: &[&str]) -> Control {
        let mut control = Control::Continue;
        for line in lines {
            control = session.handle_line(line).await.unwrap();
        }
        control
    }

    #[tokio::test]
    async fn editing_without_an_open_form_is_refused() {
        let (mut session, runtime, repo) = session().await;

        let control = type_lines(&mut session, &["set name Bob", "submit", "fly"]).await;

        let output = session.screen.take();
        assert_eq!(control, Control::Continue);
        assert_eq!(output.matches("No form open").count(), 2);
        assert!(output.contains("unknown command `fly`"));
        assert_eq!(session.flow.form().name, "");
        assert_eq!(repo.writes_attempted(), 0);

        runtime.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn submitted_form_lands_on_the_selected_board() {
        let (mut session, runtime, repo) = session().await;
        let mut clients = session.handle.watch(Category::Clients);

        type_lines(
            &mut session,
            &[
                "new clients",
                "set name A. Driver",
                "set company Acme",
                "set min 2",
                "set sec 10",
                "set ms 000",
                "set date 2024-05-01",
                "submit",
            ],
        )
        .await;

        assert!(session.screen.take().contains(SUCCESS_NOTICE));
        assert!(!session.flow.form().is_open());

        let board = tokio::time::timeout(
            Duration::from_secs(2),
            clients.wait_for(|board| !board.is_empty()),
        )
        .await
        .unwrap()
        .unwrap()
        .clone();
        assert_eq!(board.lap_times(), ["2:10.000"]);
        assert_eq!(board.entries[0].name, "A. Driver");
        assert!(repo.entries(Category::Staff).unwrap().is_empty());

        runtime.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn incomplete_form_stays_open_until_quit() {
        let (mut session, runtime, repo) = session().await;

        type_lines(&mut session, &["new", "set name A. Driver", "submit"]).await;

        let output = session.screen.take();
        assert!(output.contains(MISSING_FIELDS_NOTICE));
        assert!(output.contains("missing: company"));
        assert!(session.flow.form().is_open());
        assert_eq!(session.flow.form().name, "A. Driver");
        assert_eq!(repo.writes_attempted(), 0);

        assert_eq!(type_lines(&mut session, &["quit"]).await, Control::Quit);

        runtime.shutdown().await.unwrap();
    }
}
