use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "skydo", about = concat!("skydo v", env!("CARGO_PKG_VERSION"), " - todo lists you can share by skylink"), version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Read configuration from this file
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// Use a different save file
    #[arg(long = "save-file", global = true)]
    pub save_file: Option<String>,

    /// Use a different content store directory
    #[arg(long = "store-dir", global = true)]
    pub store_dir: Option<String>,

    /// More log output (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List every known list
    Lists,
    /// Print a list
    Show(ShowArgs),
    /// Print the skylink of a list
    Share(ShareArgs),
}

#[derive(Args)]
pub struct ShowArgs {
    /// List name
    pub name: String,
}

#[derive(Args)]
pub struct ShareArgs {
    /// List name
    pub name: String,
}

// ---------------------------------------------------------------------------
// Shell verbs
// ---------------------------------------------------------------------------

/// One line of input to the interactive shell
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    Help,
    Quit,
    Save,
    Load(String),
    Share,
    Add(String),
    Delete(usize),
    Insert { index: usize, text: String },
    Move { src: usize, dest: usize },
    All,
    List,
    New(String),
    Open(String),
    Rename(String),
}

/// Error type for shell input
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ShellError {
    #[error("unrecognized command '{0}' (try 'help')")]
    Unrecognized(String),
    #[error("not enough arguments to {0}")]
    NotEnoughArgs(&'static str),
    #[error("too many arguments to {0}")]
    TooManyArgs(&'static str),
    #[error("{expected} argument(s) expected for {command}")]
    WrongArgCount {
        command: &'static str,
        expected: usize,
    },
    #[error("'{0}' is not a position")]
    BadPosition(String),
}

/// Parse one line of shell input. Blank lines give `Ok(None)`.
///
/// The first word is the verb; the rest of the line is its argument text,
/// kept verbatim for entry text and list names.
pub fn parse_command(line: &str) -> Result<Option<ShellCommand>, ShellError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    let (verb, args) = line.split_once(' ').unwrap_or((line, ""));

    let cmd = match verb {
        "help" => no_args("help", args, ShellCommand::Help)?,
        "quit" => ShellCommand::Quit,
        "save" => no_args("save", args, ShellCommand::Save)?,
        "load" => match words(args).as_slice() {
            [skylink] => ShellCommand::Load(skylink.to_string()),
            _ => {
                return Err(ShellError::WrongArgCount {
                    command: "load",
                    expected: 1,
                });
            }
        },
        "share" => ShellCommand::Share,
        "add" => ShellCommand::Add(rest("add", args)?),
        "delete" => match words(args).as_slice() {
            [] => return Err(ShellError::NotEnoughArgs("delete")),
            [pos] => ShellCommand::Delete(position(pos)?),
            _ => return Err(ShellError::TooManyArgs("delete")),
        },
        "insert" => {
            let (pos, text) = args
                .split_once(' ')
                .ok_or(ShellError::NotEnoughArgs("insert"))?;
            if text.is_empty() {
                return Err(ShellError::NotEnoughArgs("insert"));
            }
            ShellCommand::Insert {
                index: position(pos)?,
                text: text.to_string(),
            }
        }
        "move" => match words(args).as_slice() {
            [src, dest] => ShellCommand::Move {
                src: position(src)?,
                dest: position(dest)?,
            },
            _ => {
                return Err(ShellError::WrongArgCount {
                    command: "move",
                    expected: 2,
                });
            }
        },
        "all" => no_args("all", args, ShellCommand::All)?,
        "list" | "ls" => no_args("list", args, ShellCommand::List)?,
        "new" => ShellCommand::New(rest("new", args)?),
        "open" => ShellCommand::Open(rest("open", args)?),
        "rename" => ShellCommand::Rename(rest("rename", args)?),
        other => return Err(ShellError::Unrecognized(other.to_string())),
    };
    Ok(Some(cmd))
}

fn no_args(
    verb: &'static str,
    args: &str,
    cmd: ShellCommand,
) -> Result<ShellCommand, ShellError> {
    if args.trim().is_empty() {
        Ok(cmd)
    } else {
        Err(ShellError::TooManyArgs(verb))
    }
}

fn rest(verb: &'static str, args: &str) -> Result<String, ShellError> {
    if args.trim().is_empty() {
        return Err(ShellError::NotEnoughArgs(verb));
    }
    Ok(args.to_string())
}

fn words(args: &str) -> Vec<&str> {
    args.split_whitespace().collect()
}

fn position(s: &str) -> Result<usize, ShellError> {
    s.trim()
        .parse()
        .map_err(|_| ShellError::BadPosition(s.trim().to_string()))
}
