use std::io::{self, BufRead, Write};
use std::ops::Range;

use crate::cli::commands::{ShellCommand, ShellError, parse_command};
use crate::cli::output::{HELP, format_all_lists, format_list_view, format_share};
use crate::io::local::LocalStore;
use crate::io::remote::RemoteStore;
use crate::io::sync::{SyncError, Workspace};
use crate::model::collection::ListCollection;
use crate::ops::collection_ops::{self, CollectionError, window_around};
use crate::ops::entry_ops;

const WELCOME: &str = "
Welcome to skydo, todo lists you can share by skylink.
Type 'help' to see available commands.";

const GOODBYE: &str = "Bye.";

/// Error type for one shell command
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error(transparent)]
    Input(#[from] ShellError),
    #[error(transparent)]
    Collection(#[from] CollectionError),
    #[error(transparent)]
    Sync(#[from] SyncError),
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Whether the loop keeps reading after a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// The interactive loop over one collection.
///
/// Reads commands from `input` and writes everything, prompts included,
/// to `out`.
pub struct Session<'a, L, R, I, O> {
    workspace: &'a Workspace<L, R>,
    coll: ListCollection,
    window: usize,
    input: I,
    out: O,
}

impl<'a, L, R, I, O> Session<'a, L, R, I, O>
where
    L: LocalStore,
    R: RemoteStore,
    I: BufRead,
    O: Write,
{
    pub fn new(
        workspace: &'a Workspace<L, R>,
        coll: ListCollection,
        window: usize,
        input: I,
        out: O,
    ) -> Self {
        Session {
            workspace,
            coll,
            window: window.max(1),
            input,
            out,
        }
    }

    pub fn into_collection(self) -> ListCollection {
        self.coll
    }

    /// Run until `quit` or end of input.
    pub fn run(&mut self) -> Result<(), SessionError> {
        writeln!(self.out, "{}", WELCOME)?;
        if self.coll.is_empty() && !self.name_first_list()? {
            return Ok(());
        }
        let window = self.window;
        self.show(0..window * 2)?;

        loop {
            let unsaved = self.coll.current().is_some_and(|l| !l.saved);
            write!(self.out, "{}> ", if unsaved { "*" } else { "" })?;
            self.out.flush()?;

            let Some(line) = self.read_line()? else {
                self.finish()?;
                return Ok(());
            };
            let result = match parse_command(&line) {
                Ok(Some(cmd)) => self.execute(cmd),
                Ok(None) => Ok(Flow::Continue),
                Err(e) => Err(e.into()),
            };
            match result {
                Ok(Flow::Continue) => {}
                Ok(Flow::Quit) => return Ok(()),
                Err(SessionError::Io(e)) => return Err(e.into()),
                Err(e) => writeln!(self.out, "\nerror: {}\n", e)?,
            }
        }
    }

    /// Ask for a name until a usable one is given. False at end of input.
    fn name_first_list(&mut self) -> Result<bool, SessionError> {
        loop {
            write!(self.out, "\nNo lists exist yet. Name your first list: ")?;
            self.out.flush()?;
            let Some(line) = self.read_line()? else {
                return Ok(false);
            };
            let name = line.trim();
            if name.is_empty() {
                continue;
            }
            match collection_ops::create_list(&mut self.coll, name) {
                Ok(_) => return Ok(true),
                Err(e) => writeln!(self.out, "error: {}", e)?,
            }
        }
    }

    pub fn execute(&mut self, cmd: ShellCommand) -> Result<Flow, SessionError> {
        let window = self.window;
        match cmd {
            ShellCommand::Help => writeln!(self.out, "\n{}", HELP)?,
            ShellCommand::Quit => return self.quit(),
            ShellCommand::Save => {
                let report = self.workspace.save_all(&mut self.coll)?;
                let mut lines: Vec<String> = report
                    .published
                    .iter()
                    .map(|(name, skylink)| format!("uploaded '{}': {}", name, skylink))
                    .collect();
                lines.push(format!("saved {} lists", self.coll.len()));
                self.print_block(&lines)?;
            }
            ShellCommand::Load(skylink) => {
                self.workspace.load_by_skylink(&mut self.coll, &skylink)?;
                self.show(0..window)?;
            }
            ShellCommand::Share => {
                let status = collection_ops::share_current(&self.coll)?;
                self.print_block(&format_share(&status))?;
            }
            ShellCommand::Add(text) => {
                let index = collection_ops::add_entry(&mut self.coll, &text)?;
                self.show_around(index)?;
            }
            ShellCommand::Delete(index) => {
                let list = self.coll.current().ok_or(CollectionError::NoCurrentList)?;
                entry_ops::check_index(list, "delete from", index).map_err(CollectionError::from)?;
                let question = format!("Are you sure you want to delete entry {} (y/N)? ", index);
                if self.confirm(&question, false)? {
                    collection_ops::delete_entry(&mut self.coll, index)?;
                    self.show_around(index)?;
                } else {
                    writeln!(self.out)?;
                }
            }
            ShellCommand::Insert { index, text } => {
                collection_ops::insert_entry(&mut self.coll, index, &text)?;
                self.show_around(index)?;
            }
            ShellCommand::Move { src, dest } => {
                collection_ops::move_entry(&mut self.coll, src, dest)?;
                self.show_around(dest)?;
            }
            ShellCommand::All => {
                let lines = format_all_lists(&collection_ops::list_names(&self.coll));
                self.print_block(&lines)?;
            }
            ShellCommand::List => self.show(0..usize::MAX)?,
            ShellCommand::New(name) => {
                collection_ops::create_list(&mut self.coll, &name)?;
                self.show(0..window)?;
            }
            ShellCommand::Open(name) => {
                collection_ops::open_list(&mut self.coll, &name)?;
                self.show(0..window)?;
            }
            ShellCommand::Rename(name) => {
                collection_ops::rename_current(&mut self.coll, &name)?;
                self.show(0..window)?;
            }
        }
        Ok(Flow::Continue)
    }

    fn quit(&mut self) -> Result<Flow, SessionError> {
        if !self.coll.saved && !self.confirm("Quit with unsaved changes (y/N)? ", true)? {
            writeln!(self.out)?;
            return Ok(Flow::Continue);
        }
        self.finish()?;
        Ok(Flow::Quit)
    }

    /// Write the save file best effort and say goodbye.
    fn finish(&mut self) -> io::Result<()> {
        if let Err(e) = self.workspace.save_index(&self.coll) {
            log::warn!("save file not written on quit: {}", e);
        }
        writeln!(self.out, "\n{}", GOODBYE)
    }

    /// Ask a yes/no question; only `y` (any case) is yes. End of input
    /// answers `on_eof`.
    fn confirm(&mut self, question: &str, on_eof: bool) -> io::Result<bool> {
        write!(self.out, "\n{}", question)?;
        self.out.flush()?;
        Ok(match self.read_line()? {
            Some(answer) => answer.trim().eq_ignore_ascii_case("y"),
            None => on_eof,
        })
    }

    fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\n', '\r']).to_string()))
    }

    fn show(&mut self, range: Range<usize>) -> Result<(), SessionError> {
        let view = collection_ops::view_current(&self.coll, range)?;
        let lines = format_list_view(&view);
        self.print_block(&lines)?;
        Ok(())
    }

    fn show_around(&mut self, index: usize) -> Result<(), SessionError> {
        let len = self.coll.current().map_or(0, |l| l.len());
        self.show(window_around(len, index, self.window))
    }

    fn print_block(&mut self, lines: &[String]) -> io::Result<()> {
        writeln!(self.out)?;
        for line in lines {
            writeln!(self.out, "{}", line)?;
        }
        writeln!(self.out)
    }
}
