//! The dynamic argument value and its name-like / handle-like classification.
//!
//! The original duck-typed check ("does it quack like a file?") is recast as
//! an explicit enum: [`Value::File`] is handle-like, [`Value::Path`] and
//! [`Value::Text`] are name-like, and [`Value::Other`] carries any opaque
//! argument the wrapper has no business inspecting.

use std::any::Any;
use std::fmt;
use std::rc::Rc;

use camino::{Utf8Path, Utf8PathBuf};

use crate::handle::FileHandle;

/// A single argument value flowing through a wrapped call.
#[derive(Clone)]
pub enum Value {
    /// An already open handle; passed through unchanged, never auto-closed.
    File(FileHandle),
    /// A path naming a resource to be opened.
    Path(Utf8PathBuf),
    /// Text naming a resource to be opened.
    Text(String),
    /// An opaque value forwarded untouched to the target.
    Other(Rc<dyn Any>),
}

impl Value {
    /// Wraps an arbitrary value for opaque passthrough.
    #[must_use]
    pub fn other<T: 'static>(value: T) -> Self {
        Self::Other(Rc::new(value))
    }

    /// Returns `true` when the value already satisfies the handle capability
    /// set.
    #[must_use]
    pub const fn is_handle_like(&self) -> bool {
        matches!(self, Self::File(_))
    }

    /// Returns `true` when the value names a resource rather than being one.
    ///
    /// # Examples
    ///
    /// ```
    /// use filearg::Value;
    ///
    /// assert!(Value::from("notes.txt").is_name_like());
    /// assert!(!Value::other(42_u32).is_name_like());
    /// ```
    #[must_use]
    pub const fn is_name_like(&self) -> bool {
        matches!(self, Self::Path(_) | Self::Text(_))
    }

    /// Returns the named path when the value is name-like.
    #[must_use]
    pub fn as_name(&self) -> Option<&Utf8Path> {
        match self {
            Self::Path(path) => Some(path.as_path()),
            Self::Text(text) => Some(Utf8Path::new(text)),
            Self::File(_) | Self::Other(_) => None,
        }
    }

    /// Returns the handle when the value is handle-like.
    #[must_use]
    pub const fn as_file(&self) -> Option<&FileHandle> {
        match self {
            Self::File(handle) => Some(handle),
            _ => None,
        }
    }

    /// Downcasts an opaque value to a concrete type.
    #[must_use]
    pub fn downcast_ref<T: 'static>(&self) -> Option<&T> {
        match self {
            Self::Other(value) => value.downcast_ref::<T>(),
            _ => None,
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File(handle) => f.debug_tuple("File").field(handle).finish(),
            Self::Path(path) => f.debug_tuple("Path").field(path).finish(),
            Self::Text(text) => f.debug_tuple("Text").field(text).finish(),
            Self::Other(_) => f.write_str("Other(..)"),
        }
    }
}

impl From<FileHandle> for Value {
    fn from(handle: FileHandle) -> Self {
        Self::File(handle)
    }
}

impl From<Utf8PathBuf> for Value {
    fn from(path: Utf8PathBuf) -> Self {
        Self::Path(path)
    }
}

impl From<&Utf8Path> for Value {
    fn from(path: &Utf8Path) -> Self {
        Self::Path(path.to_owned())
    }
}

impl From<String> for Value {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<&str> for Value {
    fn from(text: &str) -> Self {
        Self::Text(text.to_owned())
    }
}
