//! Top-level CLI definition and dispatch.

use std::io::{self, IsTerminal, Read, Write};
use std::path::PathBuf;

use clap::{ArgGroup, Args, CommandFactory, Parser, Subcommand};
use clap_complete::{Shell as CompletionShell, generate};
use colored::{Colorize, control};
use thiserror::Error;

use shoji::backend::{
    Backend, InputMode, MessageIcon, MessageKind, available_backends, create_backend,
};
use shoji::core::config::Config;
use shoji::core::errors::ShojiError;
use shoji::event::SelectionPolicy;
use shoji::model::Window;
use shoji::parse::parse_filter;
use shoji::render::run_window;

/// shoji — declarative dialogs from JSON.
#[derive(Debug, Parser)]
#[command(
    name = "shoji",
    author,
    version,
    about = "shoji - declarative window renderer",
    long_about = None,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Override config file path.
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Select backend by name.
    #[arg(short, long, global = true, value_name = "NAME")]
    backend: Option<String>,
    /// Selection policy for list/tree widgets: terminal or live.
    #[arg(long, global = true, value_name = "POLICY")]
    selection: Option<String>,
    /// Disable colored output.
    #[arg(long, global = true)]
    no_color: bool,
    /// Print resolution details to stderr.
    #[arg(short, long, global = true)]
    verbose: bool,
    /// Subcommand to execute.
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Clone, Subcommand)]
enum Command {
    /// Render a window described by a JSON document on stdin.
    Stdin,
    /// Render a window described by a JSON document in a file.
    Load(LoadArgs),
    /// Show a one-shot message dialog.
    Message(MessageArgs),
    /// Show an ok/cancel confirmation dialog.
    Confirm(MessageArgs),
    /// Prompt for a line of text.
    Input(InputArgs),
    /// Prompt for a line of text without echo.
    Password(PasswordArgs),
    /// Pick a directory.
    SelectDir(PickDirArgs),
    /// Pick an existing file.
    LoadFile(PickFileArgs),
    /// Pick a file path to write to.
    SaveFile(PickFileArgs),
    /// List available backends.
    List,
    /// Generate shell completions.
    Completions(CompletionsArgs),
}

#[derive(Debug, Clone, Args)]
struct LoadArgs {
    /// Path of the JSON document.
    #[arg(value_name = "FILE")]
    filename: PathBuf,
}

#[derive(Debug, Clone, Args)]
#[command(group(ArgGroup::new("icon").args(["info", "question", "warning", "error"])))]
struct MessageArgs {
    /// Dialog title.
    title: String,
    /// Dialog text.
    text: String,
    /// Show an information icon.
    #[arg(long)]
    info: bool,
    /// Show a question icon.
    #[arg(long)]
    question: bool,
    /// Show a warning icon.
    #[arg(long)]
    warning: bool,
    /// Show an error icon.
    #[arg(long)]
    error: bool,
}

impl MessageArgs {
    const fn icon(&self) -> MessageIcon {
        if self.info {
            MessageIcon::Info
        } else if self.question {
            MessageIcon::Question
        } else if self.warning {
            MessageIcon::Warning
        } else if self.error {
            MessageIcon::Error
        } else {
            MessageIcon::None
        }
    }
}

#[derive(Debug, Clone, Args)]
struct InputArgs {
    /// Dialog title.
    title: String,
    /// Prompt text.
    #[arg(default_value = "")]
    text: String,
    /// Pre-filled value.
    #[arg(default_value = "")]
    value: String,
}

#[derive(Debug, Clone, Args)]
struct PasswordArgs {
    /// Dialog title.
    title: String,
    /// Prompt text.
    #[arg(default_value = "")]
    text: String,
}

#[derive(Debug, Clone, Args)]
struct PickDirArgs {
    /// Dialog title.
    #[arg(default_value = "")]
    title: String,
    /// Starting directory.
    #[arg(default_value = "")]
    dir: String,
}

#[derive(Debug, Clone, Args)]
struct PickFileArgs {
    /// Dialog title.
    #[arg(default_value = "")]
    title: String,
    /// Filter string, e.g. "Images|png;jpg|Documents|pdf".
    #[arg(default_value = "")]
    filter: String,
    /// Starting directory.
    #[arg(default_value = "")]
    dir: String,
}

#[derive(Debug, Clone, Args)]
struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum)]
    shell: CompletionShell,
}

/// CLI error type with explicit exit-code mapping.
#[derive(Debug, Error)]
pub enum CliError {
    /// Invalid user input: bad document, bad flag value.
    #[error("{0}")]
    User(String),
    /// Environment/runtime failure: missing backend, IO trouble.
    #[error("{0}")]
    Runtime(String),
    /// Internal bug or invariant violation.
    #[error("{0}")]
    Internal(String),
    /// Output write failed.
    #[error("failed to write output: {0}")]
    Io(#[from] io::Error),
}

impl CliError {
    /// Process exit code contract for the CLI.
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::User(_) => 1,
            Self::Runtime(_) | Self::Io(_) => 2,
            Self::Internal(_) => 3,
        }
    }
}

impl From<ShojiError> for CliError {
    fn from(err: ShojiError) -> Self {
        if err.is_document_error() {
            Self::User(err.to_string())
        } else if matches!(err, ShojiError::Serialization { .. }) {
            Self::Internal(err.to_string())
        } else {
            Self::Runtime(err.to_string())
        }
    }
}

/// Dispatch CLI commands.
pub fn run(cli: &Cli) -> Result<(), CliError> {
    if cli.no_color || !io::stdout().is_terminal() {
        control::set_override(false);
    }

    match &cli.command {
        Command::List => run_list(),
        Command::Completions(args) => {
            let mut command = Cli::command();
            let binary_name = command.get_name().to_string();
            generate(args.shell, &mut command, binary_name, &mut io::stdout());
            Ok(())
        }
        command => {
            let session = Session::resolve(cli)?;
            session.dispatch(command)
        }
    }
}

fn run_list() -> Result<(), CliError> {
    let version = env!("CARGO_PKG_VERSION");
    for name in available_backends() {
        println!("{}: {version}", name.bold());
    }
    Ok(())
}

/// Resolved runtime state shared by every rendering command.
struct Session {
    backend: Box<dyn Backend>,
    selection: SelectionPolicy,
}

impl Session {
    fn resolve(cli: &Cli) -> Result<Self, CliError> {
        let config = Config::load(cli.config.as_deref())?;

        let backend_name = cli
            .backend
            .clone()
            .unwrap_or_else(|| config.ui.backend.clone());

        let selection = match &cli.selection {
            Some(raw) => raw
                .parse()
                .map_err(|()| CliError::User(format!("unknown selection policy '{raw}'")))?,
            None => config.ui.selection,
        };

        let backend = create_backend(&backend_name)?;
        if cli.verbose {
            eprintln!("shoji: backend={} selection={selection}", backend.name());
        }

        Ok(Self { backend, selection })
    }

    fn dispatch(mut self, command: &Command) -> Result<(), CliError> {
        match command {
            Command::Stdin => {
                let mut raw = String::new();
                io::stdin()
                    .read_to_string(&mut raw)
                    .map_err(|source| ShojiError::io("stdin", source))?;
                self.render_document(&raw)
            }
            Command::Load(args) => {
                let raw = std::fs::read_to_string(&args.filename)
                    .map_err(|source| ShojiError::io("document file", source))?;
                self.render_document(&raw)
            }
            Command::Message(args) => self.reply(|backend| {
                backend.show_message(&args.title, &args.text, MessageKind::Plain, args.icon())
            }),
            Command::Confirm(args) => self.reply(|backend| {
                backend.show_message(&args.title, &args.text, MessageKind::Confirm, args.icon())
            }),
            Command::Input(args) => self.reply(|backend| {
                backend.prompt_input(&args.title, &args.text, &args.value, InputMode::Plain)
            }),
            Command::Password(args) => self.reply(|backend| {
                backend.prompt_input(&args.title, &args.text, "", InputMode::Password)
            }),
            Command::SelectDir(args) => {
                self.reply(|backend| backend.pick_directory(&args.title, &args.dir))
            }
            Command::LoadFile(args) => self.reply(|backend| {
                let filters = parse_filter(&args.filter);
                backend.pick_file(&args.title, &args.dir, &filters, false)
            }),
            Command::SaveFile(args) => self.reply(|backend| {
                let filters = parse_filter(&args.filter);
                backend.pick_file(&args.title, &args.dir, &filters, true)
            }),
            Command::List | Command::Completions(_) => {
                Err(CliError::Internal("command needs no session".to_string()))
            }
        }
    }

    fn render_document(&mut self, raw: &str) -> Result<(), CliError> {
        let window = Window::decode(raw)?;
        let stdout = io::stdout();
        run_window(&window, &mut *self.backend, stdout.lock(), self.selection)?;
        Ok(())
    }

    /// Run a one-shot modal and print its reply, if any, as a raw line.
    fn reply<F>(&mut self, show: F) -> Result<(), CliError>
    where
        F: FnOnce(&mut dyn Backend) -> shoji::core::errors::Result<Option<String>>,
    {
        if let Some(answer) = show(&mut *self.backend)? {
            let mut stdout = io::stdout().lock();
            writeln!(stdout, "{answer}")?;
        }
        Ok(())
    }
}
