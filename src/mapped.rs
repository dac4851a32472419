// Mon Oct 12 2026 - Alex

use crate::address::Address;
use memmap2::Mmap;
use std::fs::File;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MapError {
    #[error("Failed to open {path:?}: {source}")]
    Open {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to map {path:?}: {source}")]
    Map {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// A read-only memory-mapped file used as a haystack.
///
/// Mappings are page aligned, so alignment of a file offset is the same as
/// alignment of the mapped address.
pub struct MappedFile {
    path: PathBuf,
    mmap: Option<Mmap>,
    base_address: Address,
}

impl MappedFile {
    pub fn open<P: AsRef<Path>>(path: P, base_address: Address) -> Result<Self, MapError> {
        let path = path.as_ref().to_path_buf();
        let file = File::open(&path).map_err(|source| MapError::Open {
            path: path.clone(),
            source,
        })?;
        let len = file
            .metadata()
            .map_err(|source| MapError::Open {
                path: path.clone(),
                source,
            })?
            .len();

        // zero-length mappings are rejected by the OS
        let mmap = if len == 0 {
            None
        } else {
            let mmap = unsafe { Mmap::map(&file) }.map_err(|source| MapError::Map {
                path: path.clone(),
                source,
            })?;
            Some(mmap)
        };

        Ok(Self {
            path,
            mmap,
            base_address,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Address the first byte is reported at; zero unless the caller rebased it.
    pub fn base_address(&self) -> Address {
        self.base_address
    }

    pub fn size(&self) -> usize {
        self.as_slice().len()
    }

    pub fn as_slice(&self) -> &[u8] {
        self.mmap.as_deref().unwrap_or(&[])
    }

    pub fn address_of(&self, offset: u64) -> Address {
        self.base_address + offset
    }
}
