//! Interactive form runtime abstraction
//!
//! The adapter talks to the user only through this trait. One field is
//! focused at a time: each method blocks until the user answers the field or
//! cancels, in which case it returns `ConfigError::UserAborted`.
//!
//! # Implementations
//! - `TerminalRuntime`: prompts on the controlling terminal
//! - `ScriptedRuntime`: replays a fixed list of answers, for tests

use crate::error::ConfigError;
use crate::form::FieldInfo;

pub trait FormRuntime {
    /// A new visible group becomes active
    fn begin_group(&mut self, title: &str);

    /// Single-line text; `current` is the value to start editing from
    fn input(
        &mut self,
        field: &FieldInfo,
        current: &str,
        masked: bool,
    ) -> Result<String, ConfigError>;

    /// Multi-line text; `current` is the value to start editing from
    fn text(&mut self, field: &FieldInfo, current: &str) -> Result<String, ConfigError>;

    fn confirm(
        &mut self,
        field: &FieldInfo,
        affirmative: &str,
        negative: &str,
        current: bool,
    ) -> Result<bool, ConfigError>;

    /// Returns the index of the picked option
    fn select(
        &mut self,
        field: &FieldInfo,
        options: &[String],
        default: usize,
    ) -> Result<usize, ConfigError>;

    /// Returns the indices of the picked options, in option order
    fn multi_select(
        &mut self,
        field: &FieldInfo,
        options: &[String],
        selected: &[bool],
    ) -> Result<Vec<usize>, ConfigError>;

    /// The last answer to `field` was rejected; it stays focused
    fn invalid(&mut self, field: &FieldInfo, error: &ConfigError);
}
