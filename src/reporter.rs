//! The logging capability used by the health check.
//!
//! The health check never logs through a global logger directly. It receives
//! a [`Reporter`] so the output can be captured in tests.
use std::cell::RefCell;

#[cfg(test)]
use mockall::automock;

#[cfg_attr(test, automock)]
pub trait Reporter {
    fn info(&self, message: &str);
    fn error(&self, message: &str);
}

/// It forwards the messages to the [`tracing`] subscriber installed by
/// [`crate::logging::setup`].
#[derive(Debug, Default, Clone, Copy)]
pub struct Tracing {}

impl Reporter for Tracing {
    fn info(&self, message: &str) {
        tracing::info!("{message}");
    }

    fn error(&self, message: &str) {
        tracing::error!("{message}");
    }
}

/// A reported line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Line {
    Info(String),
    Error(String),
}

/// It keeps the reported lines in memory.
#[derive(Debug, Default)]
pub struct Capture {
    lines: RefCell<Vec<Line>>,
}

impl Capture {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn lines(&self) -> Vec<Line> {
        self.lines.borrow().clone()
    }

    #[must_use]
    pub fn errors(&self) -> Vec<String> {
        self.lines
            .borrow()
            .iter()
            .filter_map(|line| match line {
                Line::Error(message) => Some(message.clone()),
                Line::Info(_) => None,
            })
            .collect()
    }

    #[must_use]
    pub fn infos(&self) -> Vec<String> {
        self.lines
            .borrow()
            .iter()
            .filter_map(|line| match line {
                Line::Info(message) => Some(message.clone()),
                Line::Error(_) => None,
            })
            .collect()
    }
}

impl Reporter for Capture {
    fn info(&self, message: &str) {
        self.lines.borrow_mut().push(Line::Info(message.to_owned()));
    }

    fn error(&self, message: &str) {
        self.lines.borrow_mut().push(Line::Error(message.to_owned()));
    }
}
