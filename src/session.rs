use std::io::{BufRead, Write};

use thiserror::Error;

use crate::board::{Board, BoardError};
use crate::output;
use crate::state::{BoardEvent, ViewState};
use crate::utils::Clock;

const CLEAR_SCREEN: &str = "\x1B[H\x1B[0J";

const HELP: &str = "\
commands:
  filter <tab>        show one order type (or 'all')
  date <YYYY-MM-DD>   show another day
  today               jump back to today
  tabs                list filter tabs
  help                this text
  quit                leave
";

#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Board(#[from] BoardError),

    #[error("unknown command '{command}', try 'help'")]
    UnknownCommand { command: String },

    #[error("'{command}' needs an argument")]
    MissingArgument { command: &'static str },

    #[error("terminal i/o failed: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Event(BoardEvent),
    Tabs,
    Help,
    Quit,
}

/// Parse one input line. Blank lines yield `None`.
pub fn parse_command(board: &Board, line: &str) -> Result<Option<Command>, SessionError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };
    let command = match word.to_ascii_lowercase().as_str() {
        "filter" | "tab" | "f" => {
            if rest.is_empty() {
                return Err(SessionError::MissingArgument { command: "filter" });
            }
            Command::Event(BoardEvent::SelectFilter(board.resolve_filter(rest)?))
        }
        "date" | "d" => {
            if rest.is_empty() {
                return Err(SessionError::MissingArgument { command: "date" });
            }
            Command::Event(BoardEvent::SelectDate(board.parse_date(rest)?))
        }
        "today" | "t" => Command::Event(BoardEvent::Today),
        "tabs" => Command::Tabs,
        "help" | "?" => Command::Help,
        "quit" | "exit" | "q" => Command::Quit,
        _ => {
            return Err(SessionError::UnknownCommand {
                command: word.to_string(),
            })
        }
    };
    Ok(Some(command))
}

/// An interactive board: each command is an event, and every event redraws
/// the whole board.
pub struct Session<'a> {
    board: &'a Board,
    clock: &'a dyn Clock,
    state: ViewState,
    clear_screen: bool,
}

impl<'a> Session<'a> {
    pub fn new(board: &'a Board, clock: &'a dyn Clock, state: ViewState) -> Self {
        Self {
            board,
            clock,
            state,
            clear_screen: false,
        }
    }

    pub fn clear_screen(mut self, enabled: bool) -> Self {
        self.clear_screen = enabled;
        self
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    /// Apply one parsed command. Returns `false` once the session should end.
    pub fn handle(&mut self, command: &Command, out: &mut dyn Write) -> Result<bool, SessionError> {
        match command {
            Command::Event(event) => {
                self.state = self.board.apply(&self.state, event, self.clock);
                self.redraw(out)?;
            }
            Command::Tabs => {
                for tab in self.board.tabs() {
                    let marker = if self.state.is_active(tab) { "*" } else { " " };
                    writeln!(out, "{marker} {}", tab.label)?;
                }
            }
            Command::Help => out.write_all(HELP.as_bytes())?,
            Command::Quit => return Ok(false),
        }
        Ok(true)
    }

    pub fn redraw(&self, out: &mut dyn Write) -> Result<(), SessionError> {
        if self.clear_screen {
            out.write_all(CLEAR_SCREEN.as_bytes())?;
        }
        let view = self.board.view(&self.state);
        out.write_all(&output::render_text(&view))?;
        out.flush()?;
        Ok(())
    }

    /// Draw the board, then read commands from `input` until it ends or the
    /// user quits. Rejected commands are reported and leave the board as is.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, mut out: W) -> Result<(), SessionError> {
        self.redraw(&mut out)?;
        for line in input.lines() {
            let line = line?;
            match parse_command(self.board, &line) {
                Ok(Some(command)) => {
                    if !self.handle(&command, &mut out)? {
                        break;
                    }
                }
                Ok(None) => {}
                Err(e) => {
                    tracing::debug!(error = %e, input = %line, "command rejected");
                    writeln!(out, ":: error: {e}")?;
                }
            }
        }
        Ok(())
    }
}
