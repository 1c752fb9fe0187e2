//! Terminal form runtime built on dialoguer

use crate::error::ConfigError;
use crate::form::FieldInfo;
use crate::form::runtime::FormRuntime;
use console::{Term, style};
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Input, MultiSelect, Password, Select};
use std::io;

/// Answer that clears a masked or long-text field holding a value
const CLEAR: &str = "-";

/// Prompts on the controlling terminal
///
/// Prompts render on stderr so stdout stays free for the `--debug` dump.
/// Escape or `q` on a list prompt, and Ctrl-C anywhere, cancel the form.
pub struct TerminalRuntime {
    theme: ColorfulTheme,
    term: Term,
}

impl Default for TerminalRuntime {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalRuntime {
    #[must_use]
    #[inline]
    pub fn new() -> Self {
        Self {
            theme: ColorfulTheme::default(),
            term: Term::stderr(),
        }
    }

    fn prompt(field: &FieldInfo) -> String {
        if field.placeholder.is_empty() {
            field.title.to_owned()
        } else {
            format!("{} (e.g. {})", field.title, field.placeholder)
        }
    }

    /// Print the field description; fails when there is no terminal to prompt on
    fn describe(&self, field: &FieldInfo) -> Result<(), ConfigError> {
        if !self.term.is_term() {
            return Err(ConfigError::terminal("not a terminal"));
        }
        if field.description.is_empty() {
            return Ok(());
        }
        self.term
            .write_line(&style(field.description).dim().to_string())
            .map_err(io_error)
    }
}

fn io_error(err: io::Error) -> ConfigError {
    if err.kind() == io::ErrorKind::Interrupted {
        ConfigError::UserAborted
    } else {
        ConfigError::terminal(err.to_string())
    }
}

fn masked_answer(answer: String, current: &str) -> String {
    match answer.as_str() {
        "" => current.to_owned(),
        CLEAR => String::new(),
        _ => answer,
    }
}

/// Join entered lines into a block ending in a newline
fn text_answer(lines: &[String], current: &str) -> String {
    match lines {
        [] => current.to_owned(),
        [only] if only.trim() == CLEAR => String::new(),
        _ => {
            let mut value = lines.join("\n");
            value.push('\n');
            value
        }
    }
}

fn dialog_error(err: dialoguer::Error) -> ConfigError {
    match err {
        dialoguer::Error::IO(err) => io_error(err),
    }
}

impl FormRuntime for TerminalRuntime {
    fn begin_group(&mut self, title: &str) {
        let heading = style(title.trim()).bold().cyan().to_string();
        // Rendering failures surface on the next prompt
        let _ = self.term.write_line("");
        let _ = self.term.write_line(&heading);
    }

    fn input(
        &mut self,
        field: &FieldInfo,
        current: &str,
        masked: bool,
    ) -> Result<String, ConfigError> {
        self.describe(field)?;

        if masked {
            let mut prompt = Self::prompt(field);
            if !current.is_empty() {
                prompt.push_str(" [empty keeps current, - clears]");
            }
            let answer = Password::with_theme(&self.theme)
                .with_prompt(prompt)
                .allow_empty_password(true)
                .interact_on(&self.term)
                .map_err(dialog_error)?;
            return Ok(masked_answer(answer, current));
        }

        Input::<String>::with_theme(&self.theme)
            .with_prompt(Self::prompt(field))
            .allow_empty(true)
            .with_initial_text(current)
            .interact_text_on(&self.term)
            .map_err(dialog_error)
    }

    fn text(&mut self, field: &FieldInfo, current: &str) -> Result<String, ConfigError> {
        self.describe(field)?;

        let mut header = format!("{} ", style("?").yellow());
        header.push_str(&Self::prompt(field));
        header.push_str(" (end with an empty line; empty keeps current, - clears)");
        self.term.write_line(&header).map_err(io_error)?;
        if !current.is_empty() {
            self.term
                .write_line(&style(current.trim_end()).dim().to_string())
                .map_err(io_error)?;
        }

        let mut lines = Vec::new();
        loop {
            let line = self.term.read_line().map_err(io_error)?;
            if line.is_empty() {
                break;
            }
            lines.push(line);
        }

        Ok(text_answer(&lines, current))
    }

    fn confirm(
        &mut self,
        field: &FieldInfo,
        affirmative: &str,
        negative: &str,
        current: bool,
    ) -> Result<bool, ConfigError> {
        self.describe(field)?;

        let picked = Select::with_theme(&self.theme)
            .with_prompt(Self::prompt(field))
            .items(&[affirmative, negative])
            .default(usize::from(!current))
            .interact_on_opt(&self.term)
            .map_err(dialog_error)?
            .ok_or(ConfigError::UserAborted)?;
        Ok(picked == 0)
    }

    fn select(
        &mut self,
        field: &FieldInfo,
        options: &[String],
        default: usize,
    ) -> Result<usize, ConfigError> {
        self.describe(field)?;

        Select::with_theme(&self.theme)
            .with_prompt(Self::prompt(field))
            .items(options)
            .default(default)
            .interact_on_opt(&self.term)
            .map_err(dialog_error)?
            .ok_or(ConfigError::UserAborted)
    }

    fn multi_select(
        &mut self,
        field: &FieldInfo,
        options: &[String],
        selected: &[bool],
    ) -> Result<Vec<usize>, ConfigError> {
        self.describe(field)?;

        let mut picked = MultiSelect::with_theme(&self.theme)
            .with_prompt(Self::prompt(field))
            .items(options)
            .defaults(selected)
            .interact_on_opt(&self.term)
            .map_err(dialog_error)?
            .ok_or(ConfigError::UserAborted)?;
        picked.sort_unstable();
        Ok(picked)
    }

    fn invalid(&mut self, field: &FieldInfo, error: &ConfigError) {
        let message = match error {
            ConfigError::InvalidField { message, .. } => message.clone(),
            other => other.to_string(),
        };
        let line = format!("{} {}: {message}", style("✗").red(), field.title);
        let _ = self.term.write_line(&style(line).red().to_string());
    }
}
