// Copyright (c)  by Gleb E. Zaslavkiy
//MIT License
#![allow(non_snake_case)]
use RustedExprCalc::Utils::logger::{LogLevel, init_logger, save_table_to_csv};
use RustedExprCalc::Utils::task_parser::load_session;
use RustedExprCalc::calculator::render::render_form;
use RustedExprCalc::calculator::session::{Event, RESULT_HEADERS, Session};
use RustedExprCalc::calculator::store::StoreError;
use RustedExprCalc::symbolic::latex::typeset;
use clap::{Parser, Subcommand};
use std::error::Error;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Parser)]
#[command(
    name = "rusted_expr_calc",
    version,
    about = "Expression calculator: typesets expressions and solves them two at a time"
)]
struct Cli {
    /// debug, info, warn, error or off
    #[arg(long, global = true)]
    loglevel: Option<LogLevel>,

    /// Copy every log record into this file
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load a session file and print the solved form
    Solve {
        /// Session file
        file: PathBuf,

        /// Export the results as csv
        #[arg(long)]
        csv: Option<PathBuf>,
    },

    /// Print the LaTeX markup of one expression
    Render {
        /// Expression or equation
        text: String,
    },

    /// Edit expressions interactively
    Repl {
        /// Start from a session file
        #[arg(long)]
        session: Option<PathBuf>,
    },
}

const HELP: &str = "\
commands:
  add                  append an empty expression
  edit <n> <text>      replace the text of expression n
  enter <n>            press Enter in expression n (appends an expression)
  del <n>              delete expression n
  var <name> <value>   set a listed missing variable
  reset                clear everything (only when there are results)
  show                 print the form
  help                 this list
  quit                 leave";

#[derive(Debug, Clone, PartialEq)]
enum ReplCommand {
    Add,
    Edit(usize, String),
    Enter(usize),
    Delete(usize),
    Var(String, String),
    Reset,
    Show,
    Help,
    Quit,
}

#[derive(Debug, PartialEq, Error)]
enum CommandError {
    #[error("unknown command '{0}', type 'help'")]
    Unknown(String),
    #[error("'{0}' needs {1}")]
    MissingArgument(&'static str, &'static str),
    #[error("'{0}' is not an expression number")]
    BadNumber(String),
    #[error("no expression needs a value for '{0}'")]
    UntrackedVariable(String),
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// 1-based number typed by the user → 0-based position
fn parse_number(text: &str) -> Result<usize, CommandError> {
    text.parse::<usize>()
        .ok()
        .and_then(|n| n.checked_sub(1))
        .ok_or_else(|| CommandError::BadNumber(text.to_string()))
}

fn parse_position(command: &'static str, rest: &str) -> Result<usize, CommandError> {
    if rest.is_empty() {
        return Err(CommandError::MissingArgument(command, "a number"));
    }
    parse_number(rest)
}

fn parse_command(line: &str) -> Result<ReplCommand, CommandError> {
    let line = line.trim();
    let (word, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
    let rest = rest.trim();
    let command = match word {
        "add" => ReplCommand::Add,
        "edit" => {
            let (number, text) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
            if number.is_empty() {
                return Err(CommandError::MissingArgument("edit", "a number and a text"));
            }
            ReplCommand::Edit(parse_number(number)?, text.trim().to_string())
        }
        "enter" => ReplCommand::Enter(parse_position("enter", rest)?),
        "del" => ReplCommand::Delete(parse_position("del", rest)?),
        "var" => match rest.split_once(char::is_whitespace) {
            Some((name, value)) => ReplCommand::Var(name.to_string(), value.trim().to_string()),
            None => return Err(CommandError::MissingArgument("var", "a name and a value")),
        },
        "reset" => ReplCommand::Reset,
        "show" => ReplCommand::Show,
        "help" => ReplCommand::Help,
        "quit" | "exit" => ReplCommand::Quit,
        other => return Err(CommandError::Unknown(other.to_string())),
    };
    Ok(command)
}

fn to_event(session: &Session, command: ReplCommand) -> Result<Option<Event>, CommandError> {
    let id_at = |position: usize| session.store().id_at(position).cloned();
    let event = match command {
        ReplCommand::Add => Event::Add,
        ReplCommand::Edit(position, text) => Event::Edit(id_at(position)?, text),
        ReplCommand::Enter(position) => Event::Enter(id_at(position)?),
        ReplCommand::Delete(position) => Event::Delete(id_at(position)?),
        ReplCommand::Var(name, _) if !session.is_missing_variable(&name) => {
            return Err(CommandError::UntrackedVariable(name));
        }
        ReplCommand::Var(name, value) => Event::SetValue(name, value),
        ReplCommand::Reset => Event::Reset,
        ReplCommand::Show | ReplCommand::Help | ReplCommand::Quit => return Ok(None),
    };
    Ok(Some(event))
}

fn prompt() -> io::Result<()> {
    print!("> ");
    io::stdout().flush()
}

fn run_repl(mut session: Session) -> Result<(), Box<dyn Error>> {
    println!("{}", render_form(&session));
    println!("type 'help' for commands");
    prompt()?;
    for line in io::stdin().lock().lines() {
        let line = line?;
        if line.trim().is_empty() {
            prompt()?;
            continue;
        }
        match parse_command(&line) {
            Ok(ReplCommand::Quit) => break,
            Ok(ReplCommand::Help) => println!("{}", HELP),
            Ok(ReplCommand::Show) => println!("{}", render_form(&session)),
            Ok(ReplCommand::Reset) if !session.can_reset() => {
                println!("nothing to reset yet");
            }
            Ok(command) => match to_event(&session, command) {
                Ok(Some(event)) => {
                    session = session.apply(event);
                    println!("{}", render_form(&session));
                }
                Ok(None) => {}
                Err(err) => println!("{}", err),
            },
            Err(err) => println!("{}", err),
        }
        prompt()?;
    }
    Ok(())
}

fn start_logging(
    level: Option<LogLevel>,
    log_file: Option<&Path>,
) -> Result<(), Box<dyn Error>> {
    init_logger(level.unwrap_or_default(), log_file)?;
    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    match cli.command {
        Commands::Solve { file, csv } => {
            let task = load_session(&file)?;
            let log_file = cli.log_file.or(task.log_file.clone());
            start_logging(cli.loglevel.or(task.loglevel), log_file.as_deref())?;
            let session = Session::from_task(&task);
            println!("{}", render_form(&session));
            if let Some(path) = csv {
                save_table_to_csv(&RESULT_HEADERS, &session.result_rows(), &path)?;
            }
        }
        Commands::Render { text } => {
            start_logging(cli.loglevel, cli.log_file.as_deref())?;
            println!("{}", typeset(&text));
        }
        Commands::Repl { session } => {
            let task = match &session {
                Some(path) => Some(load_session(path)?),
                None => None,
            };
            let loglevel = cli
                .loglevel
                .or(task.as_ref().and_then(|t| t.loglevel))
                .or(Some(LogLevel::Warn));
            let log_file = cli
                .log_file
                .or(task.as_ref().and_then(|t| t.log_file.clone()));
            start_logging(loglevel, log_file.as_deref())?;
            let session = match &task {
                Some(task) => Session::from_task(task),
                None => Session::new(),
            };
            run_repl(session)?;
        }
    }
    Ok(())
}
