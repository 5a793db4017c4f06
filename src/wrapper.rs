//! Two-stage wrapper construction and the argument-coercing call path.
//!
//! [`configure`] yields a [`WrapperConfig`] holding the locator, the
//! auto-close flag, and the open options; [`WrapperConfig::apply`] binds it
//! to a target and resolves the designated parameter eagerly. The one-step
//! [`wrap`] uses the defaults: first positional parameter, auto-close
//! enabled, read-only open options.
//!
//! A [`Wrapped`] callable reports its target's signature unchanged, so
//! wrappers compose: nesting two wrappers with different locators coerces
//! two distinct file parameters.
//!
//! # Defaults bind by keyword
//!
//! When the designated argument is absent and the parameter declares a
//! default, the wrapper binds the default as a keyword argument; the
//! positional vector is left as the caller supplied it. Targets should
//! therefore resolve their designated parameter with [`CallArgs::lookup`],
//! which checks the positional slot first and falls back to keywords,
//! rather than indexing the positional arguments directly.
//!
//! # Deferred consumption
//!
//! With auto-close disabled and a name supplied, the wrapper opens the file
//! and never closes it. A target that defers its reads (for example by
//! returning a lazily consumed value) should keep a [`FileHandle`] clone,
//! and the caller is responsible for closing the handle once consumption
//! finishes. This is a documented contract, not enforced by the wrapper.

use std::error::Error;
use std::fmt;
use std::io;

use camino::Utf8PathBuf;
use thiserror::Error as ThisError;

use crate::args::{BindingError, CallArgs, Slot};
use crate::handle::FileHandle;
use crate::open::{FsOpener, OpenOptions, Opener};
use crate::signature::{ConfigurationError, Designated, Locator, Param, Signature};
use crate::value::Value;

/// A target callable: a declared signature plus a call entry point.
pub trait Callable {
    /// Returns the declared parameter list.
    fn signature(&self) -> &Signature;

    /// Invokes the callable with one set of arguments.
    ///
    /// # Errors
    ///
    /// Returns whatever [`CallError`] the callable produces; the wrapper
    /// propagates it unchanged.
    fn call(&self, args: CallArgs) -> Result<Value, CallError>;
}

/// Adapts a plain closure and a declared [`Signature`] into a [`Callable`].
pub struct FnTarget {
    signature: Signature,
    run: Box<dyn Fn(CallArgs) -> Result<Value, CallError>>,
}

impl FnTarget {
    /// Pairs a declared signature with the closure implementing it.
    #[must_use]
    pub fn new(
        signature: Signature,
        run: impl Fn(CallArgs) -> Result<Value, CallError> + 'static,
    ) -> Self {
        Self {
            signature,
            run: Box::new(run),
        }
    }
}

impl Callable for FnTarget {
    fn signature(&self) -> &Signature {
        &self.signature
    }

    fn call(&self, args: CallArgs) -> Result<Value, CallError> {
        (self.run)(args)
    }
}

impl fmt::Debug for FnTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnTarget")
            .field("signature", &self.signature)
            .finish_non_exhaustive()
    }
}

/// Errors surfaced by a wrapped call.
#[derive(Debug, ThisError)]
pub enum CallError {
    /// The designated argument was absent and the parameter declares no
    /// default.
    #[error("missing required argument `{name}`")]
    MissingArgument {
        /// The designated parameter's name.
        name: String,
    },

    /// The designated argument arrived both positionally and by keyword.
    #[error("argument `{name}` was supplied both positionally and by keyword")]
    DuplicateArgument {
        /// The doubly supplied name.
        name: String,
    },

    /// The designated argument is neither an open handle nor a name.
    #[error("argument `{name}` accepts an open handle or a file name")]
    UnsupportedValue {
        /// The designated parameter's name.
        name: String,
    },

    /// Opening the named file failed; the opener's error, verbatim.
    #[error(transparent)]
    Open(io::Error),

    /// Closing the opened handle failed after the target returned.
    #[error("failed to close `{path}` after the call returned")]
    Close {
        /// The file that failed to close.
        path: Utf8PathBuf,
        /// The underlying close error.
        #[source]
        source: io::Error,
    },

    /// The target callable itself failed; propagated unchanged after
    /// cleanup.
    #[error(transparent)]
    Target(Box<dyn Error + Send + Sync>),
}

impl CallError {
    /// Wraps a target-side failure.
    #[must_use]
    pub fn target(error: impl Into<Box<dyn Error + Send + Sync>>) -> Self {
        Self::Target(error.into())
    }
}

/// Partially configured wrapper awaiting its target.
///
/// # Examples
///
/// ```
/// use filearg::{configure, CallArgs, CallError, Callable, FnTarget, OpenOptions, Param,
///     Signature, Value};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let signature = Signature::new([Param::positional("count"), Param::positional("sink")])?;
/// let target = FnTarget::new(signature, |args| {
///     let sink = args
///         .positional()
///         .get(1)
///         .and_then(Value::as_file)
///         .ok_or_else(|| CallError::target("expected an open handle"))?;
///     sink.write_all(b"ok").map_err(CallError::target)?;
///     Ok(Value::other(()))
/// });
/// let wrapped = configure()
///     .locator("sink")
///     .open_options(OpenOptions::default().read(false).write(true).create(true))
///     .apply(target)?;
/// # let dir = tempfile::tempdir()?;
/// # let path = dir.path().join("out.txt").display().to_string();
/// wrapped.call(CallArgs::new().arg(Value::other(1_u8)).arg(path.as_str()))?;
/// # Ok(())
/// # }
/// ```
pub struct WrapperConfig {
    locator: Locator,
    auto_close: bool,
    options: OpenOptions,
    opener: Box<dyn Opener>,
}

impl Default for WrapperConfig {
    fn default() -> Self {
        Self {
            locator: Locator::default(),
            auto_close: true,
            options: OpenOptions::default(),
            opener: Box::new(FsOpener),
        }
    }
}

impl WrapperConfig {
    /// Selects the designated parameter.
    #[must_use]
    pub fn locator(mut self, locator: impl Into<Locator>) -> Self {
        self.locator = locator.into();
        self
    }

    /// Controls whether handles opened from names are closed after the call.
    #[must_use]
    pub fn auto_close(mut self, auto_close: bool) -> Self {
        self.auto_close = auto_close;
        self
    }

    /// Replaces the open options forwarded to the opener.
    #[must_use]
    pub fn open_options(mut self, options: OpenOptions) -> Self {
        self.options = options;
        self
    }

    /// Replaces the file-opening collaborator.
    #[must_use]
    pub fn opener(mut self, opener: impl Opener + 'static) -> Self {
        self.opener = Box::new(opener);
        self
    }

    /// Binds the configuration to a target, resolving the locator eagerly.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError`] when the locator does not resolve
    /// against the target's signature.
    pub fn apply(self, target: impl Callable + 'static) -> Result<Wrapped, ConfigurationError> {
        let designated = target.signature().designate(&self.locator)?;
        Ok(Wrapped {
            target: Box::new(target),
            designated,
            auto_close: self.auto_close,
            options: self.options,
            opener: self.opener,
        })
    }
}

impl fmt::Debug for WrapperConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WrapperConfig")
            .field("locator", &self.locator)
            .field("auto_close", &self.auto_close)
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

/// Starts two-stage construction with the default configuration.
#[must_use]
pub fn configure() -> WrapperConfig {
    WrapperConfig::default()
}

/// Wraps a target with the default configuration in one step.
///
/// # Errors
///
/// Returns [`ConfigurationError`] when the target declares no positional
/// parameters.
///
/// # Examples
///
/// ```
/// use filearg::{wrap, CallArgs, CallError, Callable, FnTarget, Param, Signature, Value,
///     test_support};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let (_dir, path) = test_support::temp_text_file("to be, or not to be")?;
/// let signature = Signature::new([Param::positional("input")])?;
/// let first_word = FnTarget::new(signature, |args| {
///     let handle = args
///         .positional()
///         .first()
///         .and_then(Value::as_file)
///         .ok_or_else(|| CallError::target("expected an open handle"))?;
///     let text = handle.read_to_string().map_err(CallError::target)?;
///     Ok(Value::from(
///         text.split_whitespace().next().unwrap_or_default().to_owned(),
///     ))
/// });
/// let wrapped = wrap(first_word)?;
/// let word = wrapped.call(CallArgs::new().arg(path.as_path()))?;
/// assert!(matches!(word, Value::Text(text) if text == "to"));
/// # Ok(())
/// # }
/// ```
pub fn wrap(target: impl Callable + 'static) -> Result<Wrapped, ConfigurationError> {
    configure().apply(target)
}

/// A target callable with name-to-handle coercion on its designated
/// parameter.
pub struct Wrapped {
    target: Box<dyn Callable>,
    designated: Designated,
    auto_close: bool,
    options: OpenOptions,
    opener: Box<dyn Opener>,
}

impl Wrapped {
    fn call_with_default(&self, mut args: CallArgs) -> Result<Value, CallError> {
        let name = self.designated.name();
        let default = self
            .target
            .signature()
            .param(name)
            .and_then(Param::default_value)
            .cloned();
        match default {
            // The declared default is bound unmodified, never treated as a
            // name to open.
            Some(value) => {
                args.insert_keyword(name, value);
                self.target.call(args)
            }
            None => Err(CallError::MissingArgument {
                name: name.to_owned(),
            }),
        }
    }

    fn call_with_opened(
        &self,
        mut args: CallArgs,
        slot: &Slot,
        path: Utf8PathBuf,
    ) -> Result<Value, CallError> {
        let handle = self
            .opener
            .open(&path, &self.options)
            .map_err(CallError::Open)?;
        log::debug!(
            "opened `{path}` for file argument `{name}`",
            name = self.designated.name()
        );
        args.replace(slot, Value::File(handle.clone()));

        if !self.auto_close {
            return self.target.call(args);
        }

        let mut guard = CloseGuard::armed(handle.clone(), path.clone());
        let outcome = self.target.call(args);
        match outcome {
            Ok(value) => {
                guard.disarm();
                handle
                    .close()
                    .map_err(|source| CallError::Close { path: path.clone(), source })?;
                log::debug!("closed `{path}` after the call returned");
                Ok(value)
            }
            // The guard closes the handle as it drops; the target error
            // wins.
            Err(error) => Err(error),
        }
    }
}

impl Callable for Wrapped {
    fn signature(&self) -> &Signature {
        self.target.signature()
    }

    fn call(&self, args: CallArgs) -> Result<Value, CallError> {
        let slot = args.locate(&self.designated).map_err(|error| match error {
            BindingError::DuplicateArgument { name } => CallError::DuplicateArgument { name },
        })?;
        let Some(slot) = slot else {
            return self.call_with_default(args);
        };
        let coercion = match args.value_at(&slot) {
            Some(value) if value.is_handle_like() => Coercion::Passthrough,
            Some(value) => value
                .as_name()
                .map_or(Coercion::Unsupported, |path| Coercion::Open(path.to_owned())),
            None => Coercion::Unsupported,
        };
        match coercion {
            // Caller-owned handle: passed through, lifecycle untouched.
            Coercion::Passthrough => self.target.call(args),
            Coercion::Open(path) => self.call_with_opened(args, &slot, path),
            Coercion::Unsupported => Err(CallError::UnsupportedValue {
                name: self.designated.name().to_owned(),
            }),
        }
    }
}

impl fmt::Debug for Wrapped {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Wrapped")
            .field("designated", &self.designated)
            .field("auto_close", &self.auto_close)
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

enum Coercion {
    Passthrough,
    Open(Utf8PathBuf),
    Unsupported,
}

/// Closes the handle on every exit path the success branch does not handle
/// itself, including panics unwinding through the target.
struct CloseGuard {
    handle: Option<FileHandle>,
    path: Utf8PathBuf,
}

impl CloseGuard {
    fn armed(handle: FileHandle, path: Utf8PathBuf) -> Self {
        Self {
            handle: Some(handle),
            path,
        }
    }

    fn disarm(&mut self) {
        self.handle = None;
    }
}

impl Drop for CloseGuard {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            if let Err(error) = handle.close() {
                log::warn!(
                    "failed to close `{path}` while a call failure propagates: {error}",
                    path = self.path
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handle::FileHandle;
    use crate::test_support::{MemoryFile, RecordingOpener, temp_text_file};
    use rstest::rstest;
    use std::panic::{AssertUnwindSafe, catch_unwind};
    use std::rc::Rc;

    /// Target with a single positional `input` parameter returning the
    /// handle's text.
    fn read_text_target() -> FnTarget {
        let signature =
            Signature::new([Param::positional("input")]).expect("signature should be valid");
        let lookup = signature.clone();
        FnTarget::new(signature, move |args| {
            let handle = args
                .lookup(&lookup, "input")
                .and_then(Value::as_file)
                .ok_or_else(|| CallError::target("expected a handle for `input`"))?;
            let text = handle.read_to_string().map_err(CallError::target)?;
            Ok(Value::from(text))
        })
    }

    fn text_of(value: Value) -> String {
        match value {
            Value::Text(text) => text,
            other => panic!("expected a text value, got {other:?}"),
        }
    }

    #[rstest]
    fn name_call_matches_direct_handle_call() {
        let (_dir, path) = temp_text_file("to be, or not to be").expect("fixture");

        let wrapped = wrap(read_text_target()).expect("wrap should succeed");
        let via_name = wrapped
            .call(CallArgs::new().arg(path.as_path()))
            .expect("wrapped call should succeed");

        let handle = FsOpener
            .open(&path, &OpenOptions::default())
            .expect("open should succeed");
        let direct = read_text_target()
            .call(CallArgs::new().arg(Value::File(handle)))
            .expect("direct call should succeed");

        assert_eq!(text_of(via_name), text_of(direct));
    }

    #[rstest]
    #[case(true)]
    #[case(false)]
    fn caller_owned_handles_are_never_closed(#[case] auto_close: bool) {
        let handle = FileHandle::new(MemoryFile::with_contents("caller-owned"));
        let wrapped = configure()
            .auto_close(auto_close)
            .apply(read_text_target())
            .expect("wrap should succeed");

        let text = wrapped
            .call(CallArgs::new().arg(Value::File(handle.clone())))
            .map(text_of)
            .expect("call should succeed");

        assert_eq!(text, "caller-owned");
        assert!(!handle.is_closed());
    }

    #[rstest]
    #[case(true)]
    #[case(false)]
    fn opened_handles_follow_the_auto_close_flag(#[case] auto_close: bool) {
        let opener = Rc::new(RecordingOpener::new());
        opener.seed("in.txt", "seeded");
        let wrapped = configure()
            .auto_close(auto_close)
            .opener(Rc::clone(&opener))
            .apply(read_text_target())
            .expect("wrap should succeed");

        wrapped
            .call(CallArgs::new().arg("in.txt"))
            .expect("call should succeed");

        let handle = opener.last_handle().expect("one open should be recorded");
        assert_eq!(handle.is_closed(), auto_close);
    }

    #[rstest]
    fn keyword_supply_behaves_like_positional_supply() {
        let opener = Rc::new(RecordingOpener::new());
        opener.seed("in.txt", "seeded");
        let wrapped = configure()
            .opener(Rc::clone(&opener))
            .apply(read_text_target())
            .expect("wrap should succeed");

        let text = wrapped
            .call(CallArgs::new().kwarg("input", "in.txt"))
            .map(text_of)
            .expect("call should succeed");

        assert_eq!(text, "seeded");
        let handle = opener.last_handle().expect("one open should be recorded");
        assert!(handle.is_closed());
    }

    #[rstest]
    fn keyword_only_designated_parameter_is_coerced_and_closed() {
        let opener = Rc::new(RecordingOpener::new());
        opener.seed("audit.log", "logged");
        let signature = Signature::new([
            Param::positional("count"),
            Param::keyword_only("log"),
        ])
        .expect("signature should be valid");
        let lookup = signature.clone();
        let target = FnTarget::new(signature, move |args| {
            let handle = args
                .lookup(&lookup, "log")
                .and_then(Value::as_file)
                .ok_or_else(|| CallError::target("expected a handle for `log`"))?;
            let text = handle.read_to_string().map_err(CallError::target)?;
            Ok(Value::from(text))
        });
        let wrapped = configure()
            .locator("log")
            .opener(Rc::clone(&opener))
            .apply(target)
            .expect("wrap should succeed");

        let text = wrapped
            .call(CallArgs::new().arg(Value::other(3_u8)).kwarg("log", "audit.log"))
            .map(text_of)
            .expect("call should succeed");

        assert_eq!(text, "logged");
        let handle = opener.last_handle().expect("one open should be recorded");
        assert!(handle.is_closed());
    }

    #[rstest]
    fn declared_default_is_used_without_opening_anything() {
        let opener = Rc::new(RecordingOpener::new());
        let signature = Signature::new([
            Param::positional("input").with_default("fallback.txt"),
        ])
        .expect("signature should be valid");
        let lookup = signature.clone();
        let target = FnTarget::new(signature, move |args| {
            let value = args
                .lookup(&lookup, "input")
                .ok_or_else(|| CallError::target("`input` should be bound"))?;
            // The textual default arrives as-is, not as an opened handle.
            assert!(value.is_name_like());
            Ok(Value::other(()))
        });
        let wrapped = configure()
            .opener(Rc::clone(&opener))
            .apply(target)
            .expect("wrap should succeed");

        wrapped
            .call(CallArgs::new())
            .expect("call should succeed");
        assert_eq!(opener.open_count(), 0);
    }

    #[rstest]
    fn declared_default_binds_by_keyword_and_resolves_through_lookup() {
        let signature = Signature::new([
            Param::positional("input").with_default("fallback.txt"),
        ])
        .expect("signature should be valid");
        let lookup = signature.clone();
        let target = FnTarget::new(signature, move |args| {
            // The positional vector stays as the caller supplied it; the
            // default arrives as a keyword argument.
            assert!(args.positional().is_empty());
            assert!(args.keyword("input").is_some());
            let value = args
                .lookup(&lookup, "input")
                .ok_or_else(|| CallError::target("`input` should be bound"))?;
            assert!(matches!(value, Value::Text(text) if text == "fallback.txt"));
            Ok(Value::other(()))
        });
        let wrapped = wrap(target).expect("wrap should succeed");
        wrapped.call(CallArgs::new()).expect("call should succeed");
    }

    #[rstest]
    fn absent_argument_without_default_is_rejected() {
        let wrapped = wrap(read_text_target()).expect("wrap should succeed");
        let err = wrapped
            .call(CallArgs::new())
            .expect_err("call should fail");
        assert!(matches!(err, CallError::MissingArgument { name } if name == "input"));
    }

    #[rstest]
    fn double_supply_is_rejected() {
        let wrapped = wrap(read_text_target()).expect("wrap should succeed");
        let err = wrapped
            .call(
                CallArgs::new()
                    .arg("by-position.txt")
                    .kwarg("input", "by-keyword.txt"),
            )
            .expect_err("call should fail");
        assert!(matches!(err, CallError::DuplicateArgument { name } if name == "input"));
    }

    #[rstest]
    fn opaque_designated_values_are_rejected() {
        let wrapped = wrap(read_text_target()).expect("wrap should succeed");
        let err = wrapped
            .call(CallArgs::new().arg(Value::other(42_u32)))
            .expect_err("call should fail");
        assert!(matches!(err, CallError::UnsupportedValue { name } if name == "input"));
    }

    #[rstest]
    fn open_failures_surface_the_native_error() {
        let wrapped = wrap(read_text_target()).expect("wrap should succeed");
        let err = wrapped
            .call(CallArgs::new().arg("no/such/file.txt"))
            .expect_err("call should fail");
        match err {
            CallError::Open(source) => {
                assert_eq!(source.kind(), std::io::ErrorKind::NotFound);
            }
            other => panic!("expected an open error, got {other:?}"),
        }
    }

    #[rstest]
    fn target_failure_still_closes_the_opened_handle() {
        let opener = Rc::new(RecordingOpener::new());
        let signature =
            Signature::new([Param::positional("input")]).expect("signature should be valid");
        let target =
            FnTarget::new(signature, |_args| Err(CallError::target("target refused")));
        let wrapped = configure()
            .opener(Rc::clone(&opener))
            .apply(target)
            .expect("wrap should succeed");

        let err = wrapped
            .call(CallArgs::new().arg("in.txt"))
            .expect_err("call should fail");

        assert!(matches!(err, CallError::Target(source) if source.to_string() == "target refused"));
        let handle = opener.last_handle().expect("one open should be recorded");
        assert!(handle.is_closed());
    }

    #[rstest]
    fn panicking_target_still_closes_the_opened_handle() {
        let opener = Rc::new(RecordingOpener::new());
        let signature =
            Signature::new([Param::positional("input")]).expect("signature should be valid");
        let target = FnTarget::new(signature, |_args| panic!("target exploded"));
        let wrapped = configure()
            .opener(Rc::clone(&opener))
            .apply(target)
            .expect("wrap should succeed");

        let outcome = catch_unwind(AssertUnwindSafe(|| {
            let _ = wrapped.call(CallArgs::new().arg("in.txt"));
        }));

        assert!(outcome.is_err(), "expected the target panic to propagate");
        let handle = opener.last_handle().expect("one open should be recorded");
        assert!(handle.is_closed());
    }

    #[rstest]
    fn close_failure_after_success_is_reported() {
        let opener = Rc::new(RecordingOpener::new());
        opener.set_failing_close(true);
        let wrapped = configure()
            .opener(Rc::clone(&opener))
            .apply(read_text_target())
            .expect("wrap should succeed");

        let err = wrapped
            .call(CallArgs::new().arg("in.txt"))
            .expect_err("close failure should surface");
        assert!(matches!(err, CallError::Close { path, .. } if path == "in.txt"));
    }

    #[rstest]
    fn open_options_reach_the_opener_verbatim_on_every_call() {
        let opener = Rc::new(RecordingOpener::new());
        let options = OpenOptions::default()
            .read(false)
            .write(true)
            .create(true)
            .truncate(true);
        let signature =
            Signature::new([Param::positional("input")]).expect("signature should be valid");
        let target = FnTarget::new(signature, |_args| Ok(Value::other(())));
        let wrapped = configure()
            .open_options(options.clone())
            .opener(Rc::clone(&opener))
            .apply(target)
            .expect("wrap should succeed");

        wrapped
            .call(CallArgs::new().arg("first.txt"))
            .expect("first call should succeed");
        wrapped
            .call(CallArgs::new().arg("second.txt"))
            .expect("second call should succeed");

        let opens = opener.opens();
        assert_eq!(opens.len(), 2);
        for open in opens {
            assert_eq!(open.options, options);
        }
    }

    #[rstest]
    fn configuration_errors_are_detected_at_apply_time() {
        let err = configure()
            .locator("missing")
            .apply(read_text_target())
            .expect_err("apply should fail");
        assert_eq!(
            err,
            ConfigurationError::UnknownParameter {
                name: "missing".to_owned(),
            }
        );

        let err = configure()
            .locator(5)
            .apply(read_text_target())
            .expect_err("apply should fail");
        assert!(matches!(err, ConfigurationError::IndexOutOfRange { index: 5, arity: 1 }));
    }

    #[rstest]
    fn wrapped_callables_report_the_target_signature() {
        let wrapped = wrap(read_text_target()).expect("wrap should succeed");
        assert_eq!(wrapped.signature().arity(), 1);
        assert!(wrapped.signature().param("input").is_some());
    }

    #[rstest]
    fn nested_wrappers_coerce_two_file_parameters() {
        let opener = Rc::new(RecordingOpener::new());
        opener.seed("src.txt", "payload");

        let signature = Signature::new([
            Param::positional("src"),
            Param::positional("dst"),
        ])
        .expect("signature should be valid");
        let lookup = signature.clone();
        let copy = FnTarget::new(signature, move |args| {
            let src = args
                .lookup(&lookup, "src")
                .and_then(Value::as_file)
                .ok_or_else(|| CallError::target("expected a handle for `src`"))?;
            let dst = args
                .lookup(&lookup, "dst")
                .and_then(Value::as_file)
                .ok_or_else(|| CallError::target("expected a handle for `dst`"))?;
            let text = src.read_to_string().map_err(CallError::target)?;
            dst.write_all(text.as_bytes()).map_err(CallError::target)?;
            Ok(Value::other(()))
        });

        let inner = configure()
            .locator("src")
            .opener(Rc::clone(&opener))
            .apply(copy)
            .expect("inner wrap should succeed");
        let outer = configure()
            .locator("dst")
            .opener(Rc::clone(&opener))
            .apply(inner)
            .expect("outer wrap should succeed");

        outer
            .call(CallArgs::new().arg("src.txt").arg("dst.txt"))
            .expect("call should succeed");

        let opens = opener.opens();
        let paths: Vec<&str> = opens.iter().map(|open| open.path.as_str()).collect();
        assert_eq!(paths, ["dst.txt", "src.txt"]);
        for open in &opens {
            assert!(open.handle.is_closed(), "{} should be closed", open.path);
        }
    }
}
