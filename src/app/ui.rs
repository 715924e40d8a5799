use std::fmt::Display;
use std::io::{BufRead, Write};
use std::str::FromStr;

use crate::app::error::{Result, TaskError};
use crate::app::models::today;
use crate::app::storage::Storage;
use crate::app::task_edit::TaskEditDialog;
use crate::app::task_list::TaskList;

const ACTION_PROMPT: &str = "Input an action (add, print, edit, delete, end):";
const FAREWELL: &str = "Tasklist exiting!";

// Line oriented console. Every line read is trimmed.
pub struct Console<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Console<R, W> {
        Console { input, output }
    }

    pub fn say(&mut self, message: impl Display) -> Result<()> {
        writeln!(self.output, "{message}")?;
        self.output.flush()?;
        Ok(())
    }

    pub fn write_raw(&mut self, text: &str) -> Result<()> {
        self.output.write_all(text.as_bytes())?;
        self.output.flush()?;
        Ok(())
    }

    // Read the next line, or InputClosed once the input is exhausted
    pub fn read_line(&mut self) -> Result<String> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(TaskError::InputClosed);
        }
        Ok(line.trim().to_string())
    }

    pub fn prompt(&mut self, message: &str) -> Result<String> {
        self.say(message)?;
        self.read_line()
    }

    #[cfg(test)]
    pub fn output(&self) -> &W {
        &self.output
    }
}

// Top level commands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Add,
    Print,
    Edit,
    Delete,
    End,
}

impl FromStr for Command {
    type Err = TaskError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "add" => Ok(Command::Add),
            "print" => Ok(Command::Print),
            "edit" => Ok(Command::Edit),
            "delete" => Ok(Command::Delete),
            "end" => Ok(Command::End),
            _ => Err(TaskError::InvalidAction),
        }
    }
}

pub struct App<R, W> {
    pub tasks: TaskList,
    pub console: Console<R, W>,
    storage: Storage,
}

impl<R: BufRead, W: Write> App<R, W> {
    pub fn new(tasks: TaskList, storage: Storage, console: Console<R, W>) -> App<R, W> {
        App {
            tasks,
            console,
            storage,
        }
    }

    // Run a single command. Returns false once the user asked to end.
    fn step(&mut self) -> Result<bool> {
        let action = self.console.prompt(ACTION_PROMPT)?;
        let command = match action.parse::<Command>() {
            Ok(command) => command,
            Err(err) => {
                tracing::debug!(%action, "unknown action");
                self.console.say(err)?;
                return Ok(true);
            }
        };

        let mut dialog = TaskEditDialog::new(&mut self.console, &mut self.tasks, today());
        match command {
            Command::Add => dialog.add_task()?,
            Command::Print => {
                dialog.print_tasks()?;
            }
            Command::Edit => dialog.edit_task()?,
            Command::Delete => dialog.delete_task()?,
            Command::End => return Ok(false),
        }
        Ok(true)
    }
}

// Command loop. Ends on the end command or when the input runs dry,
// and persists the list exactly once on the way out.
pub fn run_app<R: BufRead, W: Write>(app: &mut App<R, W>) -> Result<()> {
    loop {
        match app.step() {
            Ok(true) => {}
            Ok(false) => break,
            Err(TaskError::InputClosed) => {
                tracing::warn!("input closed, ending the session");
                break;
            }
            Err(err) => return Err(err),
        }
    }

    app.console.say(FAREWELL)?;
    app.storage.save_tasks(&app.tasks.items)
}
