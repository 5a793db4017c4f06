//! Call-time coercion of file names into open handles for dynamic callables.
//!
//! A wrapped callable accepts either an open [`FileHandle`] or a name (text
//! or path) in its designated parameter. When a name arrives, the wrapper
//! opens it with a fixed [`OpenOptions`] configuration, substitutes the
//! handle into the same positional or keyword slot, invokes the target, and
//! by default closes the handle on every exit path. Handles supplied by the
//! caller pass through untouched and are never closed by the wrapper.
//!
//! ```
//! use filearg::{wrap, CallArgs, CallError, Callable, FnTarget, Param, Signature, Value,
//!     test_support};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let (_dir, path) = test_support::temp_text_file("to be, or not to be")?;
//! let signature = Signature::new([Param::positional("input")])?;
//! let first_word = FnTarget::new(signature, |args| {
//!     let handle = args
//!         .positional()
//!         .first()
//!         .and_then(Value::as_file)
//!         .ok_or_else(|| CallError::target("expected an open handle"))?;
//!     let text = handle.read_to_string().map_err(CallError::target)?;
//!     Ok(Value::from(
//!         text.split_whitespace().next().unwrap_or_default().to_owned(),
//!     ))
//! });
//! let wrapped = wrap(first_word)?;
//! let word = wrapped.call(CallArgs::new().arg(path.as_path()))?;
//! assert!(matches!(word, Value::Text(text) if text == "to"));
//! # Ok(())
//! # }
//! ```

pub mod args;
pub mod handle;
pub mod open;
pub mod signature;
pub mod test_support;
pub mod value;
pub mod wrapper;

pub use args::{BindingError, CallArgs, Slot};
pub use handle::{FileHandle, FileLike, FsFile};
pub use open::{FsOpener, OpenOptions, Opener};
pub use signature::{ConfigurationError, Designated, Locator, Param, ParamKind, Signature};
pub use value::Value;
pub use wrapper::{CallError, Callable, FnTarget, Wrapped, WrapperConfig, configure, wrap};
