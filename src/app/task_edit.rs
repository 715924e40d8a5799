use chrono::{NaiveDate, NaiveTime};
use std::io::{BufRead, Write};
use std::str::FromStr;

use crate::app::error::{Result, TaskError};
use crate::app::models::{parse_date, parse_time, Priority};
use crate::app::task_list::{TaskChange, TaskList};
use crate::app::ui::Console;

// Fields of a task the user may change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditField {
    Priority,
    Date,
    Time,
    Task,
}

impl FromStr for EditField {
    type Err = TaskError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "priority" => Ok(EditField::Priority),
            "date" => Ok(EditField::Date),
            "time" => Ok(EditField::Time),
            "task" => Ok(EditField::Task),
            _ => Err(TaskError::InvalidField),
        }
    }
}

// Prompts that keep asking until they get a valid answer.
// The only way out besides a valid answer is the input closing.
impl<R: BufRead, W: Write> Console<R, W> {
    pub fn read_priority(&mut self) -> Result<Priority> {
        loop {
            let input = self.prompt("Input the task priority (C, H, N, L):")?;
            match input.parse::<Priority>() {
                Ok(priority) => return Ok(priority),
                Err(_) => tracing::debug!(%input, "invalid priority"),
            }
        }
    }

    pub fn read_date(&mut self) -> Result<NaiveDate> {
        loop {
            let input = self.prompt("Input the date (yyyy-mm-dd):")?;
            match parse_date(&input) {
                Ok(date) => return Ok(date),
                Err(err) => {
                    tracing::debug!(%input, "invalid date");
                    self.say(err)?;
                }
            }
        }
    }

    pub fn read_time(&mut self) -> Result<NaiveTime> {
        loop {
            let input = self.prompt("Input the time (hh:mm):")?;
            match parse_time(&input) {
                Ok(time) => return Ok(time),
                Err(err) => {
                    tracing::debug!(%input, "invalid time");
                    self.say(err)?;
                }
            }
        }
    }

    // Collect description lines up to the first blank one
    pub fn read_description(&mut self) -> Result<Vec<String>> {
        self.say("Input a new task (enter a blank line to end):")?;
        let mut lines = Vec::new();
        loop {
            let line = self.read_line()?;
            if line.is_empty() {
                return Ok(lines);
            }
            lines.push(line);
        }
    }

    pub fn read_task_number(&mut self, tasks: &TaskList) -> Result<usize> {
        loop {
            let input = self.prompt(&format!("Input the task number (1-{}):", tasks.len()))?;
            let number = input.parse::<usize>().map_err(|_| TaskError::InvalidIndex);
            match number.and_then(|number| tasks.position(number).map(|_| number)) {
                Ok(number) => return Ok(number),
                Err(err) => {
                    tracing::debug!(%input, "invalid task number");
                    self.say(err)?;
                }
            }
        }
    }

    pub fn read_edit_field(&mut self) -> Result<EditField> {
        loop {
            let input = self.prompt("Input a field to edit (priority, date, time, task):")?;
            match input.parse::<EditField>() {
                Ok(field) => return Ok(field),
                Err(err) => {
                    tracing::debug!(%input, "invalid field");
                    self.say(err)?;
                }
            }
        }
    }
}

// The add, print, edit and delete sub dialogs.
// State changes only once all input has been collected and validated.
pub struct TaskEditDialog<'a, R, W> {
    console: &'a mut Console<R, W>,
    tasks: &'a mut TaskList,
    today: NaiveDate,
}

impl<'a, R: BufRead, W: Write> TaskEditDialog<'a, R, W> {
    pub fn new(
        console: &'a mut Console<R, W>,
        tasks: &'a mut TaskList,
        today: NaiveDate,
    ) -> TaskEditDialog<'a, R, W> {
        TaskEditDialog {
            console,
            tasks,
            today,
        }
    }

    // A blank description drops the whole task
    pub fn add_task(&mut self) -> Result<()> {
        let priority = self.console.read_priority()?;
        let date = self.console.read_date()?;
        let time = self.console.read_time()?;
        let lines = self.console.read_description()?;

        match self.tasks.add(priority, date, time, lines.as_slice(), self.today) {
            Ok(_) => Ok(()),
            Err(TaskError::EmptyContent) => self.console.say(TaskError::EmptyContent),
            Err(err) => Err(err),
        }
    }

    // Print the table. Returns false when there was nothing to print.
    pub fn print_tasks(&mut self) -> Result<bool> {
        match self.tasks.render() {
            Ok(table) => {
                self.console.write_raw(&table)?;
                Ok(true)
            }
            Err(TaskError::EmptyList) => {
                self.console.say(TaskError::EmptyList)?;
                Ok(false)
            }
            Err(err) => Err(err),
        }
    }

    pub fn edit_task(&mut self) -> Result<()> {
        if !self.print_tasks()? {
            return Ok(());
        }

        let number = self.console.read_task_number(&*self.tasks)?;
        let change = match self.console.read_edit_field()? {
            EditField::Priority => TaskChange::Priority(self.console.read_priority()?),
            EditField::Date => TaskChange::Date(self.console.read_date()?),
            EditField::Time => TaskChange::Time(self.console.read_time()?),
            EditField::Task => TaskChange::Lines(self.read_new_lines()?),
        };

        self.tasks.edit(number, change, self.today)?;
        self.console.say("The task is changed")
    }

    // Unlike add, a blank description while editing asks again
    fn read_new_lines(&mut self) -> Result<Vec<String>> {
        loop {
            let lines = self.console.read_description()?;
            match self.tasks.prepare_lines(lines.as_slice()) {
                Ok(wrapped) => return Ok(wrapped),
                Err(TaskError::EmptyContent) => self.console.say(TaskError::EmptyContent)?,
                Err(err) => return Err(err),
            }
        }
    }

    pub fn delete_task(&mut self) -> Result<()> {
        if !self.print_tasks()? {
            return Ok(());
        }

        let number = self.console.read_task_number(&*self.tasks)?;
        self.tasks.delete(number)?;
        self.console.say("The task is deleted")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::models::DueTag;
    use std::io::Cursor;

    type TestConsole = Console<Cursor<Vec<u8>>, Vec<u8>>;

    fn console(script: &str) -> TestConsole {
        Console::new(Cursor::new(script.as_bytes().to_vec()), Vec::new())
    }

    fn output(console: &TestConsole) -> String {
        String::from_utf8(console.output().clone()).unwrap()
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
    }

    fn seeded(count: usize) -> TaskList {
        let mut tasks = TaskList::new(44);
        let time = NaiveTime::from_hms_opt(8, 0, 0).unwrap();
        for i in 1..=count {
            tasks
                .add(Priority::Normal, today(), time, &[format!("task {i}")], today())
                .unwrap();
        }
        tasks
    }

    #[test]
    fn priority_is_asked_again_without_a_notice() {
        let mut console = console("x\nhigh\n\nC\n");
        assert_eq!(console.read_priority().unwrap(), Priority::Critical);

        let out = output(&console);
        assert_eq!(out.matches("Input the task priority (C, H, N, L):").count(), 4);
        assert_eq!(out.lines().count(), 4);
    }

    #[test]
    fn invalid_date_and_time_are_reported_until_valid() {
        let mut console = console("2024-02-30\n2024-2-3\n25:00\n7:05\n");
        assert_eq!(console.read_date().unwrap(), NaiveDate::from_ymd_opt(2024, 2, 3).unwrap());
        assert_eq!(console.read_time().unwrap(), NaiveTime::from_hms_opt(7, 5, 0).unwrap());

        let out = output(&console);
        assert_eq!(out.matches("The input date is invalid").count(), 1);
        assert_eq!(out.matches("The input time is invalid").count(), 1);
    }

    #[test]
    fn description_stops_at_the_first_blank_line() {
        let mut console = console("  one  \ntwo\n\nthree\n");
        assert_eq!(console.read_description().unwrap(), vec!["one", "two"]);
    }

    #[test]
    fn closed_input_interrupts_a_prompt() {
        let mut console = console("nonsense\n");
        assert!(matches!(console.read_date(), Err(TaskError::InputClosed)));
    }

    #[test]
    fn add_creates_a_task() {
        let mut console = console("h\n2024-01-01\n09:30\nBuy milk\n\n");
        let mut tasks = TaskList::new(44);
        TaskEditDialog::new(&mut console, &mut tasks, today())
            .add_task()
            .unwrap();

        assert_eq!(tasks.len(), 1);
        let task = &tasks.items[0];
        assert_eq!(task.index, 1);
        assert_eq!(task.priority, Priority::High);
        assert_eq!(task.due_tag, DueTag::Overdue);
        assert_eq!(task.lines, vec!["Buy milk"]);
    }

    #[test]
    fn add_with_blank_description_is_dropped() {
        let mut console = console("n\n2024-07-01\n12:00\n\n");
        let mut tasks = TaskList::new(44);
        TaskEditDialog::new(&mut console, &mut tasks, today())
            .add_task()
            .unwrap();

        assert!(tasks.is_empty());
        assert!(output(&console).ends_with("The task is blank\n"));
    }

    #[test]
    fn edit_and_delete_on_empty_list_do_not_ask_for_a_number() {
        let mut tasks = TaskList::new(44);
        for run in [0, 1] {
            let mut console = console("1\n");
            let mut dialog = TaskEditDialog::new(&mut console, &mut tasks, today());
            if run == 0 {
                dialog.edit_task().unwrap();
            } else {
                dialog.delete_task().unwrap();
            }
            let out = output(&console);
            assert_eq!(out, "No tasks have been input\n");
        }
    }

    #[test]
    fn edit_reasks_number_then_field() {
        let mut console = console("0\nabc\n2\ncolour\ntime\n18:45\n");
        let mut tasks = seeded(2);
        TaskEditDialog::new(&mut console, &mut tasks, today())
            .edit_task()
            .unwrap();

        assert_eq!(tasks.items[1].time, NaiveTime::from_hms_opt(18, 45, 0).unwrap());
        let out = output(&console);
        assert_eq!(out.matches("Invalid task number").count(), 2);
        assert_eq!(out.matches("Invalid field").count(), 1);
        assert!(out.contains("Input the task number (1-2):"));
        assert!(out.ends_with("The task is changed\n"));
    }

    #[test]
    fn editing_the_date_updates_the_due_tag() {
        let mut console = console("1\nDATE\n2030-01-01\n");
        let mut tasks = seeded(1);
        TaskEditDialog::new(&mut console, &mut tasks, today())
            .edit_task()
            .unwrap();

        assert_eq!(tasks.items[0].due_tag, DueTag::Intime);
    }

    #[test]
    fn editing_the_task_insists_on_content() {
        let mut console = console("1\ntask\n\n\nnew text\nsecond\n\n");
        let mut tasks = seeded(1);
        TaskEditDialog::new(&mut console, &mut tasks, today())
            .edit_task()
            .unwrap();

        assert_eq!(tasks.items[0].lines, vec!["new text", "second"]);
        let out = output(&console);
        assert_eq!(out.matches("The task is blank").count(), 2);
    }

    #[test]
    fn delete_removes_and_renumbers() {
        let mut console = console("4\n1\n");
        let mut tasks = seeded(3);
        TaskEditDialog::new(&mut console, &mut tasks, today())
            .delete_task()
            .unwrap();

        let indices: Vec<usize> = tasks.items.iter().map(|task| task.index).collect();
        assert_eq!(indices, vec![1, 2]);
        assert_eq!(tasks.items[0].lines, vec!["task 2"]);
        let out = output(&console);
        assert_eq!(out.matches("Invalid task number").count(), 1);
        assert!(out.ends_with("The task is deleted\n"));
    }

    #[test]
    fn abandoned_edit_changes_nothing() {
        let mut console = console("1\npriority\nz\n");
        let mut tasks = seeded(1);
        let result = TaskEditDialog::new(&mut console, &mut tasks, today()).edit_task();

        assert!(matches!(result, Err(TaskError::InputClosed)));
        assert_eq!(tasks.items[0].priority, Priority::Normal);
    }
}
