//! Fixtures for exercising wrappers without touching real files.
//!
//! [`MemoryFile`] is an in-memory [`FileLike`]; [`RecordingOpener`] serves
//! memory files while recording every open call and retaining handle clones
//! so tests can observe lifecycles; [`temp_text_file`] seeds a real file in
//! a temporary directory for end-to-end coverage.

use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::io::{self, Read, Write};

use camino::{Utf8Path, Utf8PathBuf};
use tempfile::TempDir;

use crate::handle::{FileHandle, FileLike, closed_error};
use crate::open::{OpenOptions, Opener};

/// An in-memory [`FileLike`] with an explicit closed flag.
#[derive(Debug, Default)]
pub struct MemoryFile {
    inner: io::Cursor<Vec<u8>>,
    closed: bool,
    fail_close: bool,
}

impl MemoryFile {
    /// Creates an empty file.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a file whose reads yield `contents` from the start.
    #[must_use]
    pub fn with_contents(contents: &str) -> Self {
        Self {
            inner: io::Cursor::new(contents.as_bytes().to_vec()),
            closed: false,
            fail_close: false,
        }
    }

    /// Makes every close attempt fail.
    #[must_use]
    pub const fn failing_close(mut self) -> Self {
        self.fail_close = true;
        self
    }

    /// Returns everything written so far.
    #[must_use]
    pub fn contents(&self) -> &[u8] {
        self.inner.get_ref()
    }
}

impl FileLike for MemoryFile {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if self.closed {
            return Err(closed_error());
        }
        self.inner.read(buf)
    }

    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if self.closed {
            return Err(closed_error());
        }
        self.inner.write(buf)
    }

    fn close(&mut self) -> io::Result<()> {
        if self.fail_close {
            return Err(io::Error::other("close failure requested by fixture"));
        }
        self.closed = true;
        Ok(())
    }

    fn is_closed(&self) -> bool {
        self.closed
    }
}

/// One recorded open call.
#[derive(Clone, Debug)]
pub struct RecordedOpen {
    /// The path the wrapper asked for.
    pub path: Utf8PathBuf,
    /// The options forwarded to the opener.
    pub options: OpenOptions,
    /// A clone of the handle the opener served.
    pub handle: FileHandle,
}

/// An [`Opener`] serving [`MemoryFile`] handles while recording every call.
///
/// Wrap it in an `Rc` and hand a clone to the wrapper so the test keeps
/// access to the recording:
///
/// ```
/// use std::rc::Rc;
/// use filearg::test_support::RecordingOpener;
/// use filearg::{configure, CallArgs, Callable, FnTarget, Param, Signature, Value};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let opener = Rc::new(RecordingOpener::new());
/// opener.seed("in.txt", "seeded");
/// let signature = Signature::new([Param::positional("input")])?;
/// let target = FnTarget::new(signature, |_args| Ok(Value::other(())));
/// let wrapped = configure().opener(Rc::clone(&opener)).apply(target)?;
/// wrapped.call(CallArgs::new().arg("in.txt"))?;
/// assert_eq!(opener.open_count(), 1);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Default)]
pub struct RecordingOpener {
    contents: RefCell<BTreeMap<Utf8PathBuf, String>>,
    fail_close: Cell<bool>,
    opens: RefCell<Vec<RecordedOpen>>,
}

impl RecordingOpener {
    /// Creates an opener with no seeded contents.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the contents served for `path`. Unseeded paths open empty.
    pub fn seed(&self, path: impl Into<Utf8PathBuf>, contents: impl Into<String>) {
        self.contents.borrow_mut().insert(path.into(), contents.into());
    }

    /// Makes every handle served from now on fail to close.
    pub fn set_failing_close(&self, fail: bool) {
        self.fail_close.set(fail);
    }

    /// Returns the recorded open calls in order.
    #[must_use]
    pub fn opens(&self) -> Vec<RecordedOpen> {
        self.opens.borrow().clone()
    }

    /// Returns how many opens were recorded.
    #[must_use]
    pub fn open_count(&self) -> usize {
        self.opens.borrow().len()
    }

    /// Returns the handle served by the most recent open.
    #[must_use]
    pub fn last_handle(&self) -> Option<FileHandle> {
        self.opens.borrow().last().map(|open| open.handle.clone())
    }
}

impl Opener for RecordingOpener {
    fn open(&self, path: &Utf8Path, options: &OpenOptions) -> io::Result<FileHandle> {
        let contents = self
            .contents
            .borrow()
            .get(path)
            .cloned()
            .unwrap_or_default();
        let mut file = MemoryFile::with_contents(&contents);
        if self.fail_close.get() {
            file = file.failing_close();
        }
        let handle = FileHandle::new(file);
        self.opens.borrow_mut().push(RecordedOpen {
            path: path.to_owned(),
            options: options.clone(),
            handle: handle.clone(),
        });
        Ok(handle)
    }
}

/// Writes `contents` to a fresh file inside a new temporary directory.
///
/// The directory guard must stay alive for as long as the path is used.
///
/// # Errors
///
/// Propagates directory or file creation failures; a non-UTF-8 temporary
/// path is reported as an I/O error.
pub fn temp_text_file(contents: &str) -> io::Result<(TempDir, Utf8PathBuf)> {
    let dir = TempDir::new()?;
    let path = dir.path().join("fixture.txt");
    std::fs::write(&path, contents)?;
    let path = Utf8PathBuf::from_path_buf(path)
        .map_err(|_| io::Error::other("temporary path is not valid UTF-8"))?;
    Ok((dir, path))
}
