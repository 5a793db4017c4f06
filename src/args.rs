//! Call-time argument containers and designated-slot binding.
//!
//! [`CallArgs`] carries one invocation's positional and keyword arguments.
//! [`CallArgs::locate`] runs the explicit binding step for the designated
//! parameter: a positional slot wins when filled, a keyword slot is
//! consulted next, and absence is reported so the wrapper can fall back to
//! the declared default.

use std::collections::BTreeMap;

use thiserror::Error;

use crate::signature::{Designated, Signature};
use crate::value::Value;

/// The positional or keyword slot a designated argument occupied.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Slot {
    /// Index into the positional arguments.
    Positional(usize),
    /// Keyword argument name.
    Keyword(String),
}

/// Errors emitted while binding call-time arguments.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum BindingError {
    /// The designated argument arrived both positionally and by keyword.
    #[error("argument `{name}` was supplied both positionally and by keyword")]
    DuplicateArgument {
        /// The doubly supplied name.
        name: String,
    },
}

/// One invocation's arguments.
#[derive(Clone, Debug, Default)]
pub struct CallArgs {
    positional: Vec<Value>,
    keyword: BTreeMap<String, Value>,
}

impl CallArgs {
    /// Creates an empty argument set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a positional argument.
    ///
    /// # Examples
    ///
    /// ```
    /// use filearg::{CallArgs, Value};
    ///
    /// let args = CallArgs::new().arg("notes.txt").kwarg("limit", Value::other(10_u32));
    /// assert_eq!(args.positional().len(), 1);
    /// assert!(args.keyword("limit").is_some());
    /// ```
    #[must_use]
    pub fn arg(mut self, value: impl Into<Value>) -> Self {
        self.positional.push(value.into());
        self
    }

    /// Adds a keyword argument, replacing any previous value for the name.
    #[must_use]
    pub fn kwarg(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.keyword.insert(name.into(), value.into());
        self
    }

    /// Returns the positional arguments in order.
    #[must_use]
    pub fn positional(&self) -> &[Value] {
        &self.positional
    }

    /// Returns the keyword argument for `name`, when supplied.
    #[must_use]
    pub fn keyword(&self, name: &str) -> Option<&Value> {
        self.keyword.get(name)
    }

    /// Inserts a keyword argument on an existing set.
    pub fn insert_keyword(&mut self, name: impl Into<String>, value: Value) {
        self.keyword.insert(name.into(), value);
    }

    /// Resolves the value a declared parameter received, by position first
    /// and keyword second.
    ///
    /// Intended for target bodies reading their own arguments.
    #[must_use]
    pub fn lookup<'a>(&'a self, signature: &Signature, name: &str) -> Option<&'a Value> {
        signature
            .position_of(name)
            .and_then(|position| self.positional.get(position))
            .or_else(|| self.keyword.get(name))
    }

    /// Runs the binding step for the designated parameter.
    ///
    /// Returns the occupied [`Slot`], or `None` when the argument is absent
    /// and the declared default (if any) applies.
    ///
    /// # Errors
    ///
    /// Returns [`BindingError::DuplicateArgument`] when the argument arrived
    /// both positionally and by keyword.
    pub fn locate(&self, designated: &Designated) -> Result<Option<Slot>, BindingError> {
        let name = designated.name();
        let positional_hit = designated
            .position()
            .is_some_and(|position| position < self.positional.len());
        let keyword_hit = self.keyword.contains_key(name);
        match (positional_hit, keyword_hit) {
            (true, true) => Err(BindingError::DuplicateArgument {
                name: name.to_owned(),
            }),
            (true, false) => Ok(designated.position().map(Slot::Positional)),
            (false, true) => Ok(Some(Slot::Keyword(name.to_owned()))),
            (false, false) => Ok(None),
        }
    }

    /// Returns the value occupying a slot.
    #[must_use]
    pub fn value_at(&self, slot: &Slot) -> Option<&Value> {
        match slot {
            Slot::Positional(index) => self.positional.get(*index),
            Slot::Keyword(name) => self.keyword.get(name),
        }
    }

    /// Replaces the value in a slot, returning the previous occupant.
    pub fn replace(&mut self, slot: &Slot, value: Value) -> Option<Value> {
        match slot {
            Slot::Positional(index) => self
                .positional
                .get_mut(*index)
                .map(|cell| std::mem::replace(cell, value)),
            Slot::Keyword(name) => self.keyword.insert(name.clone(), value),
        }
    }
}
