//! File-like capabilities and the shared handle passed to wrapped callables.
//!
//! A value qualifies as a handle when it satisfies [`FileLike`]: it can be
//! read from, written to, and closed, and it reports whether it has been
//! closed. [`FileHandle`] wraps any such value behind a cheaply cloneable
//! shared reference so the wrapper can retain close responsibility while the
//! target works with the same handle.

use std::cell::{RefCell, RefMut};
use std::fmt;
use std::fs;
use std::io::{self, Read, Write};
use std::rc::Rc;

/// Capability set distinguishing open resources from plain values.
///
/// Closing must be idempotent: a second `close` on an already closed value
/// succeeds without effect. Reads and writes on a closed value fail with an
/// I/O error.
pub trait FileLike {
    /// Reads up to `buf.len()` bytes, returning the number of bytes read.
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize>;

    /// Writes from `buf`, returning the number of bytes written.
    fn write(&mut self, buf: &[u8]) -> io::Result<usize>;

    /// Releases the underlying resource.
    fn close(&mut self) -> io::Result<()>;

    /// Returns `true` once [`FileLike::close`] has run.
    fn is_closed(&self) -> bool;
}

pub(crate) fn closed_error() -> io::Error {
    io::Error::other("file handle is closed")
}

/// A filesystem-backed [`FileLike`] with an explicit closed flag.
///
/// `std::fs::File` closes implicitly on drop; the wrapper needs an observable
/// closed state instead, so the file is held in an `Option` that `close`
/// empties.
#[derive(Debug)]
pub struct FsFile {
    inner: Option<fs::File>,
}

impl FsFile {
    /// Wraps an already open file.
    #[must_use]
    pub const fn new(file: fs::File) -> Self {
        Self { inner: Some(file) }
    }
}

impl FileLike for FsFile {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match &mut self.inner {
            Some(file) => file.read(buf),
            None => Err(closed_error()),
        }
    }

    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match &mut self.inner {
            Some(file) => file.write(buf),
            None => Err(closed_error()),
        }
    }

    fn close(&mut self) -> io::Result<()> {
        if let Some(file) = self.inner.take() {
            drop(file);
        }
        Ok(())
    }

    fn is_closed(&self) -> bool {
        self.inner.is_none()
    }
}

/// Shared ownership of a [`FileLike`] value.
///
/// Cloning is cheap and clones observe the same underlying state: closing via
/// one clone is visible through every other. This is what lets the wrapper
/// close a handle after the target returns, and what lets a deferred consumer
/// keep a handle alive past the call when auto-close is disabled.
#[derive(Clone)]
pub struct FileHandle {
    inner: Rc<RefCell<dyn FileLike>>,
}

impl FileHandle {
    /// Wraps a [`FileLike`] value in a shared handle.
    ///
    /// # Examples
    ///
    /// ```
    /// use filearg::test_support::MemoryFile;
    /// use filearg::FileHandle;
    ///
    /// let handle = FileHandle::new(MemoryFile::with_contents("abc"));
    /// assert!(!handle.is_closed());
    /// ```
    #[must_use]
    pub fn new(file: impl FileLike + 'static) -> Self {
        Self {
            inner: Rc::new(RefCell::new(file)),
        }
    }

    fn borrow_file(&self) -> io::Result<RefMut<'_, dyn FileLike + 'static>> {
        self.inner
            .try_borrow_mut()
            .map_err(|_| io::Error::other("file handle is already borrowed"))
    }

    /// Reads up to `buf.len()` bytes from the underlying value.
    ///
    /// # Errors
    ///
    /// Propagates the underlying read error, or fails when the handle is
    /// closed or currently borrowed elsewhere.
    pub fn read(&self, buf: &mut [u8]) -> io::Result<usize> {
        self.borrow_file()?.read(buf)
    }

    /// Writes from `buf` to the underlying value.
    ///
    /// # Errors
    ///
    /// Propagates the underlying write error, or fails when the handle is
    /// closed or currently borrowed elsewhere.
    pub fn write(&self, buf: &[u8]) -> io::Result<usize> {
        self.borrow_file()?.write(buf)
    }

    /// Writes the whole of `data`.
    ///
    /// # Errors
    ///
    /// Fails with `WriteZero` when the underlying value stops accepting
    /// bytes, otherwise propagates the underlying write error.
    pub fn write_all(&self, data: &[u8]) -> io::Result<()> {
        let mut written = 0;
        while written < data.len() {
            let count = self.write(&data[written..])?;
            if count == 0 {
                return Err(io::Error::new(
                    io::ErrorKind::WriteZero,
                    "failed to write whole buffer",
                ));
            }
            written += count;
        }
        Ok(())
    }

    /// Reads the remaining content as UTF-8 text.
    ///
    /// # Errors
    ///
    /// Propagates the underlying read error; non-UTF-8 content fails with
    /// `InvalidData`.
    pub fn read_to_string(&self) -> io::Result<String> {
        let mut collected = Vec::new();
        let mut buf = [0_u8; 8192];
        loop {
            let count = self.read(&mut buf)?;
            if count == 0 {
                break;
            }
            collected.extend_from_slice(&buf[..count]);
        }
        String::from_utf8(collected)
            .map_err(|error| io::Error::new(io::ErrorKind::InvalidData, error))
    }

    /// Closes the underlying value. Idempotent.
    ///
    /// # Errors
    ///
    /// Propagates the underlying close error, or fails when the handle is
    /// currently borrowed elsewhere.
    pub fn close(&self) -> io::Result<()> {
        self.borrow_file()?.close()
    }

    /// Returns `true` once the underlying value has been closed.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.inner
            .try_borrow()
            .map(|file| file.is_closed())
            .unwrap_or(false)
    }
}

impl fmt::Debug for FileHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FileHandle")
            .field("closed", &self.is_closed())
            .finish_non_exhaustive()
    }
}
