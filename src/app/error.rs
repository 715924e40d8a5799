// Every failure the task list can run into.
// The Display text of the user facing variants is exactly what the console prints.
use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TaskError {
    #[error("The input date is invalid")]
    InvalidDate,

    #[error("The input time is invalid")]
    InvalidTime,

    #[error("Invalid priority")]
    InvalidPriority,

    #[error("Invalid task number")]
    InvalidIndex,

    #[error("Invalid field")]
    InvalidField,

    #[error("The input action is invalid")]
    InvalidAction,

    #[error("The task is blank")]
    EmptyContent,

    #[error("No tasks have been input")]
    EmptyList,

    // Stdin was closed while a prompt was waiting for a line
    #[error("Input stream closed")]
    InputClosed,

    #[error("Invalid config: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, TaskError>;
