//! Scripted form runtime for testing
//!
//! Answers are consumed in order, one per focused field. Running out of
//! answers behaves like the user cancelling the form.

use crate::error::ConfigError;
use crate::form::FieldInfo;
use crate::form::runtime::FormRuntime;
use std::collections::VecDeque;
use tracing::error;

/// One answer to one focused field
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Answer {
    /// Keep what the field starts with: current text, default option,
    /// pre-selected options, or current confirm value
    Accept,
    Text(String),
    Confirm(bool),
    Choose(usize),
    ChooseMany(Vec<usize>),
}

impl Answer {
    #[inline]
    pub fn text<S: Into<String>>(value: S) -> Self {
        Self::Text(value.into())
    }
}

/// A field answer that was rejected by its validator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rejection {
    pub field: String,
    pub message: String,
}

/// Replays a fixed list of answers
///
/// # Example
/// ```
/// use orch_config::form::{Answer, ScriptedRuntime};
///
/// let runtime = ScriptedRuntime::new([Answer::text("demo"), Answer::Confirm(false)]);
/// assert_eq!(runtime.remaining(), 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ScriptedRuntime {
    answers: VecDeque<Answer>,
    groups: Vec<String>,
    rejections: Vec<Rejection>,
}

impl ScriptedRuntime {
    #[must_use]
    #[inline]
    pub fn new<I: IntoIterator<Item = Answer>>(answers: I) -> Self {
        Self {
            answers: answers.into_iter().collect(),
            groups: Vec::new(),
            rejections: Vec::new(),
        }
    }

    /// Titles of the groups shown so far, trimmed
    #[must_use]
    #[inline]
    pub fn groups(&self) -> &[String] {
        &self.groups
    }

    /// Answers rejected by validators so far
    #[must_use]
    #[inline]
    pub fn rejections(&self) -> &[Rejection] {
        &self.rejections
    }

    #[must_use]
    #[inline]
    pub fn remaining(&self) -> usize {
        self.answers.len()
    }

    fn next(&mut self, field: &FieldInfo) -> Result<Answer, ConfigError> {
        self.answers.pop_front().ok_or(ConfigError::UserAborted).inspect_err(|_| {
            error!("No scripted answer left for field: {}", field.title);
        })
    }

    fn mismatch(field: &FieldInfo, answer: &Answer) -> ConfigError {
        ConfigError::terminal(format!(
            "scripted answer {answer:?} does not fit field '{}'",
            field.title
        ))
    }
}

impl FormRuntime for ScriptedRuntime {
    fn begin_group(&mut self, title: &str) {
        self.groups.push(title.trim().to_owned());
    }

    fn input(
        &mut self,
        field: &FieldInfo,
        current: &str,
        _masked: bool,
    ) -> Result<String, ConfigError> {
        self.text(field, current)
    }

    fn text(&mut self, field: &FieldInfo, current: &str) -> Result<String, ConfigError> {
        match self.next(field)? {
            Answer::Accept => Ok(current.to_owned()),
            Answer::Text(value) => Ok(value),
            other => Err(Self::mismatch(field, &other)),
        }
    }

    fn confirm(
        &mut self,
        field: &FieldInfo,
        _affirmative: &str,
        _negative: &str,
        current: bool,
    ) -> Result<bool, ConfigError> {
        match self.next(field)? {
            Answer::Accept => Ok(current),
            Answer::Confirm(value) => Ok(value),
            other => Err(Self::mismatch(field, &other)),
        }
    }

    fn select(
        &mut self,
        field: &FieldInfo,
        _options: &[String],
        default: usize,
    ) -> Result<usize, ConfigError> {
        match self.next(field)? {
            Answer::Accept => Ok(default),
            Answer::Choose(index) => Ok(index),
            other => Err(Self::mismatch(field, &other)),
        }
    }

    fn multi_select(
        &mut self,
        field: &FieldInfo,
        _options: &[String],
        selected: &[bool],
    ) -> Result<Vec<usize>, ConfigError> {
        match self.next(field)? {
            Answer::Accept => Ok(selected
                .iter()
                .enumerate()
                .filter_map(|(index, &on)| on.then_some(index))
                .collect()),
            Answer::ChooseMany(mut indices) => {
                indices.sort_unstable();
                indices.dedup();
                Ok(indices)
            }
            other => Err(Self::mismatch(field, &other)),
        }
    }

    fn invalid(&mut self, field: &FieldInfo, error: &ConfigError) {
        let message = match error {
            ConfigError::InvalidField { message, .. } => message.clone(),
            other => other.to_string(),
        };
        self.rejections.push(Rejection {
            field: field.title.to_owned(),
            message,
        });
    }
}
