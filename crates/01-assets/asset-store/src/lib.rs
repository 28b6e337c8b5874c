#![deny(missing_docs)]
//! Random-access byte sources for model resources.
//!
//! The inspect pipeline never holds a model open between calls. Every read
//! goes through [`AssetStore::open`], seeks to a fixed offset and reads a
//! fixed number of bytes, so any `Read + Seek` source is enough to back it.

use log::trace;
use std::collections::HashMap;
use std::fmt;
use std::fs::File;
use std::io::{self, Cursor, Read, Seek};
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

/// Opaque key identifying a model resource (e.g. `models/v_ak47.mdl`).
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AssetPath(Arc<str>);

impl AssetPath {
    /// Wraps a resource path.
    pub fn new(path: impl AsRef<str>) -> Self {
        Self(Arc::from(path.as_ref()))
    }

    /// Borrows the path as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AssetPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for AssetPath {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for AssetPath {
    fn from(value: String) -> Self {
        Self(Arc::from(value))
    }
}

impl AsRef<str> for AssetPath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Byte-addressable resource source keyed by [`AssetPath`].
pub trait AssetStore {
    /// Reader handed out by [`AssetStore::open`].
    type Reader: Read + Seek;

    /// Returns the resource size in bytes, or `None` when it does not exist.
    fn size(&self, path: &AssetPath) -> io::Result<Option<u64>>;

    /// Opens the resource for reading from offset zero.
    fn open(&self, path: &AssetPath) -> io::Result<Self::Reader>;

    /// Returns whether the resource exists.
    fn exists(&self, path: &AssetPath) -> bool {
        matches!(self.size(path), Ok(Some(_)))
    }
}

impl<S: AssetStore + ?Sized> AssetStore for &S {
    type Reader = S::Reader;

    fn size(&self, path: &AssetPath) -> io::Result<Option<u64>> {
        (**self).size(path)
    }

    fn open(&self, path: &AssetPath) -> io::Result<Self::Reader> {
        (**self).open(path)
    }
}

/// Store that resolves asset paths relative to a game directory.
#[derive(Clone, Debug)]
pub struct DirAssetStore {
    root: PathBuf,
}

impl DirAssetStore {
    /// Creates a store rooted at `root` (typically the mod directory).
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Returns the directory that asset paths resolve against.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Maps an asset path onto the filesystem, refusing paths that escape the root.
    pub fn resolve(&self, path: &AssetPath) -> Option<PathBuf> {
        let rel = Path::new(path.as_str());
        if rel.is_absolute()
            || rel
                .components()
                .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir))
        {
            return None;
        }
        Some(self.root.join(rel))
    }
}

impl AssetStore for DirAssetStore {
    type Reader = File;

    fn size(&self, path: &AssetPath) -> io::Result<Option<u64>> {
        let Some(full) = self.resolve(path) else {
            trace!("asset path {path} escapes store root");
            return Ok(None);
        };
        match std::fs::metadata(&full) {
            Ok(meta) if meta.is_file() => Ok(Some(meta.len())),
            Ok(_) => Ok(None),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err),
        }
    }

    fn open(&self, path: &AssetPath) -> io::Result<File> {
        let full = self.resolve(path).ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                format!("asset path {path} escapes store root"),
            )
        })?;
        File::open(full)
    }
}

/// In-memory store used by tests and tools that already hold model bytes.
#[derive(Clone, Debug, Default)]
pub struct MemAssetStore {
    entries: HashMap<AssetPath, Arc<[u8]>>,
}

impl MemAssetStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces a resource, returning the previous bytes if any.
    pub fn insert(
        &mut self,
        path: impl Into<AssetPath>,
        bytes: impl Into<Arc<[u8]>>,
    ) -> Option<Arc<[u8]>> {
        self.entries.insert(path.into(), bytes.into())
    }

    /// Removes a resource.
    pub fn remove(&mut self, path: &AssetPath) -> Option<Arc<[u8]>> {
        self.entries.remove(path)
    }

    /// Number of stored resources.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true when no resources are stored.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl AssetStore for MemAssetStore {
    type Reader = Cursor<Arc<[u8]>>;

    fn size(&self, path: &AssetPath) -> io::Result<Option<u64>> {
        Ok(self.entries.get(path).map(|bytes| bytes.len() as u64))
    }

    fn open(&self, path: &AssetPath) -> io::Result<Self::Reader> {
        self.entries
            .get(path)
            .map(|bytes| Cursor::new(Arc::clone(bytes)))
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, format!("no asset {path}")))
    }
}
