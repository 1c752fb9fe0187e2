//! Drives a `Form` through a `FormRuntime`
//!
//! Groups are visited in order. A group's visibility is decided when it is
//! reached, so answers given earlier in the run (provider, gates, mode) take
//! effect immediately. Each field is asked until its validator accepts the
//! answer; only accepted answers are stored in the state.

use crate::catalog::Catalog;
use crate::error::ConfigError;
use crate::form::runtime::FormRuntime;
use crate::form::{Field, FieldKind, Form, FormState};
use tracing::debug;

/// Run every visible group of `form` against `state`
///
/// # Errors
///
/// Returns an error if:
/// - The user cancels the form (`UserAborted`)
/// - The runtime fails or answers outside the offered options (`Terminal`)
#[inline]
pub fn run_form(
    form: &Form,
    state: &mut FormState,
    catalog: &Catalog,
    runtime: &mut dyn FormRuntime,
) -> Result<(), ConfigError> {
    for group in &form.groups {
        if !group.is_visible(state) {
            debug!("Skipping hidden group: {}", group.title.trim_end());
            continue;
        }

        runtime.begin_group(group.title);
        for field in &group.fields {
            ask_field(field, state, catalog, runtime)?;
        }
    }

    Ok(())
}

fn ask_field(
    field: &Field,
    state: &mut FormState,
    catalog: &Catalog,
    runtime: &mut dyn FormRuntime,
) -> Result<(), ConfigError> {
    let info = &field.info;

    match field.kind {
        FieldKind::Input {
            slot,
            validator,
            masked,
        } => {
            let mut current = slot(state).clone();
            loop {
                let answer = runtime.input(info, &current, masked)?;
                match validator(&answer) {
                    Ok(()) => {
                        *slot(state) = answer;
                        return Ok(());
                    }
                    Err(err) => {
                        runtime.invalid(info, &ConfigError::invalid_field(info.title, err.message()));
                        current = answer;
                    }
                }
            }
        }
        FieldKind::Text { slot, validator } => {
            let mut current = slot(state).clone();
            loop {
                let answer = runtime.text(info, &current)?;
                match validator(&answer) {
                    Ok(()) => {
                        *slot(state) = answer;
                        return Ok(());
                    }
                    Err(err) => {
                        runtime.invalid(info, &ConfigError::invalid_field(info.title, err.message()));
                        current = answer;
                    }
                }
            }
        }
        FieldKind::Confirm {
            slot,
            affirmative,
            negative,
        } => {
            let current = *slot(state);
            *slot(state) = runtime.confirm(info, affirmative, negative, current)?;
            Ok(())
        }
        FieldKind::Select { choices } => {
            let choices = choices(state, catalog);
            let labels: Vec<String> = choices.iter().map(|c| c.label.clone()).collect();
            let default = choices.iter().position(|c| c.current).unwrap_or(0);

            let index = runtime.select(info, &labels, default)?;
            let choice = choices.get(index).ok_or_else(|| {
                ConfigError::terminal(format!("{}: no option at index {index}", info.title))
            })?;
            choice.apply(state);
            Ok(())
        }
        FieldKind::MultiSelect {
            items,
            slot,
            validator,
        } => {
            let items = items(state, catalog);
            let labels: Vec<String> = items.iter().map(|i| i.label.clone()).collect();
            let mut selected: Vec<bool> = items.iter().map(|i| i.selected).collect();

            loop {
                let indices = runtime.multi_select(info, &labels, &selected)?;
                let picked = indices
                    .iter()
                    .map(|&index| {
                        items.get(index).map(|item| item.id.clone()).ok_or_else(|| {
                            ConfigError::terminal(format!(
                                "{}: no option at index {index}",
                                info.title
                            ))
                        })
                    })
                    .collect::<Result<Vec<String>, ConfigError>>()?;

                match validator(&picked) {
                    Ok(()) => {
                        *slot(state) = picked;
                        return Ok(());
                    }
                    Err(err) => {
                        runtime.invalid(info, &ConfigError::invalid_field(info.title, err.message()));
                        selected = (0..items.len()).map(|i| indices.contains(&i)).collect();
                    }
                }
            }
        }
    }
}
