use chrono::{NaiveDate, NaiveTime};

use crate::app::error::{Result, TaskError};
use crate::app::models::{is_blank, wrap_lines, DueTag, Priority, Task, DATE_FORMAT, TIME_FORMAT};

// A single change applied to an existing task
#[derive(Debug, Clone, PartialEq)]
pub enum TaskChange {
    Priority(Priority),
    Date(NaiveDate),
    Time(NaiveTime),
    Lines(Vec<String>),
}

// The ordered list of tasks plus the counter handing out new indices.
// The counter only grows: deleting tasks renumbers the list but never rewinds it.
pub struct TaskList {
    pub items: Vec<Task>,
    next_index: usize,
    max_chars: usize,
}

impl TaskList {
    pub fn new(max_chars: usize) -> TaskList {
        TaskList::with_items(Vec::new(), max_chars)
    }

    // Initialize a task list with items loaded from storage
    pub fn with_items(items: Vec<Task>, max_chars: usize) -> TaskList {
        let next_index = items.iter().map(|task| task.index).max().unwrap_or(0);
        TaskList {
            items,
            next_index,
            max_chars,
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    // Wrap a raw description for this list, refusing one with nothing in it
    pub fn prepare_lines<S: AsRef<str>>(&self, lines: &[S]) -> Result<Vec<String>> {
        let wrapped = wrap_lines(lines, self.max_chars);
        if is_blank(&wrapped) {
            return Err(TaskError::EmptyContent);
        }
        Ok(wrapped)
    }

    // CREATE
    pub fn add<S: AsRef<str>>(
        &mut self,
        priority: Priority,
        date: NaiveDate,
        time: NaiveTime,
        lines: &[S],
        today: NaiveDate,
    ) -> Result<&Task> {
        let lines = self.prepare_lines(lines)?;
        self.next_index += 1;
        let task = Task {
            index: self.next_index,
            date,
            time,
            priority,
            lines,
            due_tag: DueTag::from_dates(date, today),
        };
        tracing::debug!(index = task.index, "task added");
        self.items.push(task);
        self.items.last().ok_or(TaskError::EmptyList)
    }

    // Map a 1-based task number onto a position in the list
    pub fn position(&self, number: usize) -> Result<usize> {
        if number < 1 || number > self.items.len() {
            return Err(TaskError::InvalidIndex);
        }
        Ok(number - 1)
    }

    // UPDATE
    pub fn edit(&mut self, number: usize, change: TaskChange, today: NaiveDate) -> Result<()> {
        let position = self.position(number)?;
        let change = match change {
            TaskChange::Lines(lines) => TaskChange::Lines(self.prepare_lines(lines.as_slice())?),
            other => other,
        };

        let task = &mut self.items[position];
        match change {
            TaskChange::Priority(priority) => task.priority = priority,
            TaskChange::Date(date) => task.set_date(date, today),
            TaskChange::Time(time) => task.time = time,
            TaskChange::Lines(lines) => task.lines = lines,
        }
        tracing::debug!(number, "task changed");
        Ok(())
    }

    // DELETE
    pub fn delete(&mut self, number: usize) -> Result<Task> {
        let position = self.position(number)?;
        let removed = self.items.remove(position);
        self.renumber();
        tracing::debug!(number, index = removed.index, "task deleted");
        Ok(removed)
    }

    fn renumber(&mut self) {
        for (position, task) in self.items.iter_mut().enumerate() {
            task.index = position + 1;
        }
    }

    // Render the whole list as a table, or EmptyList when there is nothing to show
    pub fn render(&self) -> Result<String> {
        if self.is_empty() {
            return Err(TaskError::EmptyList);
        }

        let separator = self.separator();
        let mut table = String::new();
        table.push_str(&separator);
        table.push_str(&self.header());
        table.push_str(&separator);

        for task in &self.items {
            let mut lines = task.lines.iter();
            let first = lines.next().map(String::as_str).unwrap_or_default();
            table.push_str(&format!(
                "| {:<3}| {} | {} | {} | {} |{}|\n",
                task.index,
                task.date.format(DATE_FORMAT),
                task.time.format(TIME_FORMAT),
                task.priority.marker(),
                task.due_tag.marker(),
                self.pad(first),
            ));
            for line in lines {
                table.push_str(&format!("|    |            |       |   |   |{}|\n", self.pad(line)));
            }
            table.push_str(&separator);
        }

        Ok(table)
    }

    fn separator(&self) -> String {
        format!("+----+------------+-------+---+---+{}+\n", "-".repeat(self.max_chars))
    }

    fn header(&self) -> String {
        // The title sits left of centre, the right side gets the extra spaces
        let title = "Task";
        let left = self.max_chars.saturating_sub(title.len() + 1) / 2;
        let right = self.max_chars.saturating_sub(title.len() + left);
        format!(
            "| N  |    Date    | Time  | P | D |{}{}{}|\n",
            " ".repeat(left),
            title,
            " ".repeat(right)
        )
    }

    fn pad(&self, line: &str) -> String {
        format!("{:<width$}", line, width = self.max_chars)
    }
}
