//! Explicit parameter descriptors and designated-parameter resolution.
//!
//! A [`Signature`] is the declared parameter list of a target callable:
//! positional parameters in order, then keyword-only parameters, each
//! optionally carrying a default value. A [`Locator`] names the designated
//! parameter either by position (negative indices count from the end of the
//! positional list) or by name, and resolves eagerly when a wrapper is
//! applied.

use std::collections::BTreeSet;

use thiserror::Error;

use crate::value::Value;

/// How a parameter may be supplied at call time.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParamKind {
    /// Supplied positionally or by keyword.
    Positional,
    /// Supplied by keyword only.
    KeywordOnly,
}

/// One declared parameter of a target callable.
#[derive(Clone, Debug)]
pub struct Param {
    name: String,
    kind: ParamKind,
    default: Option<Value>,
}

impl Param {
    /// Declares a positional parameter.
    #[must_use]
    pub fn positional(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: ParamKind::Positional,
            default: None,
        }
    }

    /// Declares a keyword-only parameter.
    #[must_use]
    pub fn keyword_only(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: ParamKind::KeywordOnly,
            default: None,
        }
    }

    /// Attaches a default value, bound unmodified when the argument is
    /// absent.
    #[must_use]
    pub fn with_default(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self
    }

    /// Returns the declared name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns how the parameter may be supplied.
    #[must_use]
    pub const fn kind(&self) -> ParamKind {
        self.kind
    }

    /// Returns the declared default value, when present.
    #[must_use]
    pub const fn default_value(&self) -> Option<&Value> {
        self.default.as_ref()
    }
}

/// Errors emitted when declaring a signature or resolving a locator.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ConfigurationError {
    /// The positional index does not land on a declared parameter.
    #[error("positional index {index} is out of range for {arity} positional parameters")]
    IndexOutOfRange {
        /// The locator index as given, before negative resolution.
        index: isize,
        /// Number of positional parameters declared.
        arity: usize,
    },

    /// The locator names a parameter the signature does not declare.
    #[error("`{name}` is not a parameter of the wrapped callable")]
    UnknownParameter {
        /// The unmatched name.
        name: String,
    },

    /// The same parameter name is declared more than once.
    #[error("parameter `{name}` is declared more than once")]
    DuplicateParameter {
        /// The repeated name.
        name: String,
    },

    /// A positional parameter is declared after a keyword-only one.
    #[error("positional parameter `{name}` declared after a keyword-only parameter")]
    PositionalAfterKeywordOnly {
        /// The out-of-order name.
        name: String,
    },
}

/// The declared parameter list of a target callable.
#[derive(Clone, Debug)]
pub struct Signature {
    params: Vec<Param>,
}

impl Signature {
    /// Builds a signature from parameter declarations.
    ///
    /// # Errors
    ///
    /// Rejects duplicate names and positional parameters declared after a
    /// keyword-only parameter.
    ///
    /// # Examples
    ///
    /// ```
    /// use filearg::{Param, Signature};
    ///
    /// let signature = Signature::new([
    ///     Param::positional("input"),
    ///     Param::keyword_only("limit").with_default("10"),
    /// ])?;
    /// assert_eq!(signature.arity(), 1);
    /// # Ok::<(), filearg::ConfigurationError>(())
    /// ```
    pub fn new(params: impl IntoIterator<Item = Param>) -> Result<Self, ConfigurationError> {
        let params: Vec<Param> = params.into_iter().collect();
        let mut seen = BTreeSet::new();
        let mut keyword_only_started = false;
        for param in &params {
            if !seen.insert(param.name().to_owned()) {
                return Err(ConfigurationError::DuplicateParameter {
                    name: param.name().to_owned(),
                });
            }
            match param.kind() {
                ParamKind::KeywordOnly => keyword_only_started = true,
                ParamKind::Positional if keyword_only_started => {
                    return Err(ConfigurationError::PositionalAfterKeywordOnly {
                        name: param.name().to_owned(),
                    });
                }
                ParamKind::Positional => {}
            }
        }
        Ok(Self { params })
    }

    /// Returns the declared parameters in order.
    #[must_use]
    pub fn params(&self) -> &[Param] {
        &self.params
    }

    /// Returns the number of positional parameters.
    #[must_use]
    pub fn arity(&self) -> usize {
        self.params
            .iter()
            .filter(|param| param.kind() == ParamKind::Positional)
            .count()
    }

    /// Looks up a parameter by name.
    #[must_use]
    pub fn param(&self, name: &str) -> Option<&Param> {
        self.params.iter().find(|param| param.name() == name)
    }

    /// Returns the positional index of `name`, or `None` for keyword-only or
    /// undeclared parameters.
    #[must_use]
    pub fn position_of(&self, name: &str) -> Option<usize> {
        self.params
            .iter()
            .filter(|param| param.kind() == ParamKind::Positional)
            .position(|param| param.name() == name)
    }

    fn positional_name(&self, position: usize) -> Option<&str> {
        self.params
            .iter()
            .filter(|param| param.kind() == ParamKind::Positional)
            .nth(position)
            .map(Param::name)
    }

    /// Resolves a locator to the designated parameter.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::IndexOutOfRange`] when a positional
    /// index (after negative resolution) lands outside the positional list,
    /// and [`ConfigurationError::UnknownParameter`] when a name is not
    /// declared.
    ///
    /// # Examples
    ///
    /// ```
    /// use filearg::{Locator, Param, Signature};
    ///
    /// let signature = Signature::new([
    ///     Param::positional("a"),
    ///     Param::positional("b"),
    ///     Param::positional("f"),
    /// ])?;
    /// let designated = signature.designate(&Locator::from(-1))?;
    /// assert_eq!(designated.name(), "f");
    /// assert_eq!(designated.position(), Some(2));
    /// # Ok::<(), filearg::ConfigurationError>(())
    /// ```
    pub fn designate(&self, locator: &Locator) -> Result<Designated, ConfigurationError> {
        match locator {
            Locator::Index(index) => {
                let arity = self.arity();
                let resolved = if *index >= 0 {
                    usize::try_from(*index).ok()
                } else {
                    isize::try_from(arity)
                        .ok()
                        .and_then(|declared| declared.checked_add(*index))
                        .and_then(|position| usize::try_from(position).ok())
                };
                let position = resolved
                    .filter(|position| *position < arity)
                    .ok_or(ConfigurationError::IndexOutOfRange {
                        index: *index,
                        arity,
                    })?;
                let name = self.positional_name(position).ok_or(
                    ConfigurationError::IndexOutOfRange {
                        index: *index,
                        arity,
                    },
                )?;
                Ok(Designated {
                    name: name.to_owned(),
                    position: Some(position),
                })
            }
            Locator::Name(name) => {
                let param =
                    self.param(name)
                        .ok_or_else(|| ConfigurationError::UnknownParameter {
                            name: name.clone(),
                        })?;
                Ok(Designated {
                    name: param.name().to_owned(),
                    position: self.position_of(name),
                })
            }
        }
    }
}

/// Identifies the designated parameter before resolution.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Locator {
    /// Zero-based position in the positional list; negative counts from the
    /// end.
    Index(isize),
    /// The declared parameter name.
    Name(String),
}

impl Default for Locator {
    fn default() -> Self {
        Self::Index(0)
    }
}

impl From<isize> for Locator {
    fn from(index: isize) -> Self {
        Self::Index(index)
    }
}

impl From<i32> for Locator {
    fn from(index: i32) -> Self {
        Self::Index(index as isize)
    }
}

impl From<&str> for Locator {
    fn from(name: &str) -> Self {
        Self::Name(name.to_owned())
    }
}

impl From<String> for Locator {
    fn from(name: String) -> Self {
        Self::Name(name)
    }
}

/// The resolved designated parameter: its name, and its positional index when
/// it can be supplied positionally.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Designated {
    name: String,
    position: Option<usize>,
}

impl Designated {
    /// Returns the designated parameter's declared name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the positional index, or `None` for keyword-only parameters.
    #[must_use]
    pub const fn position(&self) -> Option<usize> {
        self.position
    }
}
