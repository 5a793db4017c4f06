//! Open configuration and the file-opening collaborator seam.
//!
//! [`OpenOptions`] is fixed when a wrapper is configured and forwarded
//! verbatim to the [`Opener`] on every call that supplies a name. The seam
//! exists so tests and embedders can observe open calls and handle
//! lifecycles without touching the filesystem; [`FsOpener`] is the
//! production implementation.

use std::fs;
use std::io;
use std::rc::Rc;

use camino::Utf8Path;

use crate::handle::{FileHandle, FsFile};

/// Access flags forwarded verbatim to the opening primitive.
///
/// The default opens for reading only. Flags are not reconciled against one
/// another; the opening primitive's own validation applies.
///
/// # Examples
///
/// ```
/// use filearg::OpenOptions;
///
/// let options = OpenOptions::default()
///     .read(false)
///     .write(true)
///     .create(true)
///     .truncate(true);
/// assert_ne!(options, OpenOptions::default());
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OpenOptions {
    read: bool,
    write: bool,
    append: bool,
    truncate: bool,
    create: bool,
    create_new: bool,
}

impl Default for OpenOptions {
    fn default() -> Self {
        Self {
            read: true,
            write: false,
            append: false,
            truncate: false,
            create: false,
            create_new: false,
        }
    }
}

impl OpenOptions {
    /// Sets read access.
    #[must_use]
    pub const fn read(mut self, read: bool) -> Self {
        self.read = read;
        self
    }

    /// Sets write access.
    #[must_use]
    pub const fn write(mut self, write: bool) -> Self {
        self.write = write;
        self
    }

    /// Appends to the end of the file instead of overwriting.
    #[must_use]
    pub const fn append(mut self, append: bool) -> Self {
        self.append = append;
        self
    }

    /// Truncates the file to zero length on open.
    #[must_use]
    pub const fn truncate(mut self, truncate: bool) -> Self {
        self.truncate = truncate;
        self
    }

    /// Creates the file when it does not exist.
    #[must_use]
    pub const fn create(mut self, create: bool) -> Self {
        self.create = create;
        self
    }

    /// Creates the file, failing when it already exists.
    #[must_use]
    pub const fn create_new(mut self, create_new: bool) -> Self {
        self.create_new = create_new;
        self
    }
}

/// Opens a named resource into a [`FileHandle`].
///
/// Implementations must forward `options` verbatim and surface their native
/// error on failure; the wrapper never translates it.
pub trait Opener {
    /// Opens `path` with `options`.
    ///
    /// # Errors
    ///
    /// Returns the opening primitive's native error unmodified.
    fn open(&self, path: &Utf8Path, options: &OpenOptions) -> io::Result<FileHandle>;
}

impl<T: Opener + ?Sized> Opener for Rc<T> {
    fn open(&self, path: &Utf8Path, options: &OpenOptions) -> io::Result<FileHandle> {
        self.as_ref().open(path, options)
    }
}

/// The filesystem-backed [`Opener`] used by default.
#[derive(Clone, Copy, Debug, Default)]
pub struct FsOpener;

impl Opener for FsOpener {
    fn open(&self, path: &Utf8Path, options: &OpenOptions) -> io::Result<FileHandle> {
        let file = fs::OpenOptions::new()
            .read(options.read)
            .write(options.write)
            .append(options.append)
            .truncate(options.truncate)
            .create(options.create)
            .create_new(options.create_new)
            .open(path.as_std_path())?;
        Ok(FileHandle::new(FsFile::new(file)))
    }
}
