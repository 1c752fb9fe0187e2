//! Declarative form model
//!
//! A `Form` is an ordered list of groups. Each group has a visibility
//! predicate evaluated against the live `FormState` when the group is
//! reached, and an ordered list of fields. A field knows its prompt texts,
//! its validator, and the slot in `FormState` it is bound to; it knows
//! nothing about how it is rendered.

pub mod adapter;
pub mod definition;
pub mod runtime;
pub mod scripted;
pub mod state;
pub mod terminal;

use crate::catalog::Catalog;
use crate::config::validation::{self, ValidationResult};
use std::fmt;

pub use adapter::run_form;
pub use definition::installer_form;
pub use runtime::FormRuntime;
pub use scripted::{Answer, ScriptedRuntime};
pub use state::{ConfigMode, Flags, FormState, Scratch};
pub use terminal::TerminalRuntime;

pub type Validator = fn(&str) -> ValidationResult;
pub type SetValidator = fn(&[String]) -> ValidationResult;
pub type TextSlot = fn(&mut FormState) -> &mut String;
pub type FlagSlot = fn(&mut FormState) -> &mut bool;
pub type ListSlot = fn(&mut FormState) -> &mut Vec<String>;
pub type Visibility = fn(&FormState) -> bool;
pub type ChoiceBuilder = fn(&FormState, &Catalog) -> Vec<Choice>;
pub type ItemBuilder = fn(&FormState, &Catalog) -> Vec<Item>;

/// Texts shown with a field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldInfo {
    pub title: &'static str,
    pub description: &'static str,
    pub placeholder: &'static str,
}

/// One option of a single-select field
pub struct Choice {
    pub label: String,
    /// Whether the option reflects the value already in the state
    pub current: bool,
    apply: Box<dyn Fn(&mut FormState)>,
}

impl Choice {
    #[inline]
    pub fn new<L, F>(label: L, current: bool, apply: F) -> Self
    where
        L: Into<String>,
        F: Fn(&mut FormState) + 'static,
    {
        Self {
            label: label.into(),
            current,
            apply: Box::new(apply),
        }
    }

    /// Store the option in the state
    #[inline]
    pub fn apply(&self, state: &mut FormState) {
        (self.apply)(state);
    }
}

impl fmt::Debug for Choice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Choice")
            .field("label", &self.label)
            .field("current", &self.current)
            .finish_non_exhaustive()
    }
}

/// One option of a multi-select field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    pub label: String,
    pub id: String,
    pub selected: bool,
}

pub enum FieldKind {
    /// Single-line text, optionally masked
    Input {
        slot: TextSlot,
        validator: Validator,
        masked: bool,
    },
    /// Multi-line text
    Text { slot: TextSlot, validator: Validator },
    Confirm {
        slot: FlagSlot,
        affirmative: &'static str,
        negative: &'static str,
    },
    Select { choices: ChoiceBuilder },
    MultiSelect {
        items: ItemBuilder,
        slot: ListSlot,
        validator: SetValidator,
    },
}

pub struct Field {
    pub info: FieldInfo,
    pub kind: FieldKind,
}

impl Field {
    fn with_kind(title: &'static str, kind: FieldKind) -> Self {
        Self {
            info: FieldInfo {
                title,
                description: "",
                placeholder: "",
            },
            kind,
        }
    }

    #[must_use]
    #[inline]
    pub fn input(title: &'static str, slot: TextSlot) -> Self {
        Self::with_kind(
            title,
            FieldKind::Input {
                slot,
                validator: validation::accept_any,
                masked: false,
            },
        )
    }

    #[must_use]
    #[inline]
    pub fn password(title: &'static str, slot: TextSlot) -> Self {
        Self::with_kind(
            title,
            FieldKind::Input {
                slot,
                validator: validation::accept_any,
                masked: true,
            },
        )
    }

    #[must_use]
    #[inline]
    pub fn text(title: &'static str, slot: TextSlot) -> Self {
        Self::with_kind(
            title,
            FieldKind::Text {
                slot,
                validator: validation::accept_any,
            },
        )
    }

    #[must_use]
    #[inline]
    pub fn confirm(
        title: &'static str,
        affirmative: &'static str,
        negative: &'static str,
        slot: FlagSlot,
    ) -> Self {
        Self::with_kind(
            title,
            FieldKind::Confirm {
                slot,
                affirmative,
                negative,
            },
        )
    }

    #[must_use]
    #[inline]
    pub fn select(title: &'static str, choices: ChoiceBuilder) -> Self {
        Self::with_kind(title, FieldKind::Select { choices })
    }

    #[must_use]
    #[inline]
    pub fn multi_select(title: &'static str, items: ItemBuilder, slot: ListSlot) -> Self {
        Self::with_kind(
            title,
            FieldKind::MultiSelect {
                items,
                slot,
                validator: validation::accept_any_set,
            },
        )
    }

    #[must_use]
    #[inline]
    pub const fn describe(mut self, description: &'static str) -> Self {
        self.info.description = description;
        self
    }

    #[must_use]
    #[inline]
    pub const fn placeholder(mut self, placeholder: &'static str) -> Self {
        self.info.placeholder = placeholder;
        self
    }

    /// Bind a validator to a text field; other kinds are left unchanged
    #[must_use]
    #[inline]
    pub fn validate(mut self, rule: Validator) -> Self {
        if let FieldKind::Input { validator, .. } | FieldKind::Text { validator, .. } =
            &mut self.kind
        {
            *validator = rule;
        }
        self
    }

    /// Bind a validator to a multi-select field; other kinds are left unchanged
    #[must_use]
    #[inline]
    pub fn validate_set(mut self, rule: SetValidator) -> Self {
        if let FieldKind::MultiSelect { validator, .. } = &mut self.kind {
            *validator = rule;
        }
        self
    }
}

pub struct Group {
    pub title: &'static str,
    pub fields: Vec<Field>,
    visible: Visibility,
}

impl Group {
    /// A group that is always shown
    #[must_use]
    #[inline]
    pub fn new(title: &'static str, fields: Vec<Field>) -> Self {
        Self {
            title,
            fields,
            visible: |_| true,
        }
    }

    #[must_use]
    #[inline]
    pub fn visible_when(mut self, predicate: Visibility) -> Self {
        self.visible = predicate;
        self
    }

    #[must_use]
    #[inline]
    pub fn is_visible(&self, state: &FormState) -> bool {
        (self.visible)(state)
    }
}

pub struct Form {
    pub groups: Vec<Group>,
}

impl Form {
    #[must_use]
    #[inline]
    pub fn new(groups: Vec<Group>) -> Self {
        Self { groups }
    }
}
