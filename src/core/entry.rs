//! Log entry handed to the dispatcher

use super::level::Level;

/// Source location of the logging call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Caller<'a> {
    pub file: &'a str,
    pub line: u32,
    /// Fully-qualified function (or module) name
    pub function: &'a str,
}

impl<'a> Caller<'a> {
    pub fn new(file: &'a str, line: u32, function: &'a str) -> Self {
        Self {
            file,
            line,
            function,
        }
    }
}

/// One log call, minus its fields
///
/// Everything is borrowed from the caller; the dispatcher never keeps an
/// entry past the backend call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Entry<'a> {
    pub level: Level,
    /// Dot-separated logger name, empty for the root logger
    pub logger_name: &'a str,
    pub message: &'a str,
    pub caller: Option<Caller<'a>>,
}

impl<'a> Entry<'a> {
    pub fn new(level: Level, message: &'a str) -> Self {
        Self {
            level,
            logger_name: "",
            message,
            caller: None,
        }
    }

    pub fn with_logger_name(mut self, logger_name: &'a str) -> Self {
        self.logger_name = logger_name;
        self
    }

    pub fn with_caller(mut self, caller: Caller<'a>) -> Self {
        self.caller = Some(caller);
        self
    }
}
