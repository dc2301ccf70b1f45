use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};

use crate::{Error, Result};

/// A media file read fully into memory.
#[derive(Debug, Clone)]
pub struct MediaFile {
    path: PathBuf,
    data: Vec<u8>,
}

impl MediaFile {
    /// Reads `path` synchronously.
    ///
    /// # Errors
    /// Returns [`Error::FileUnreadable`] when the path does not exist, is not
    /// a regular file, or cannot be read. Nothing is sent in that case.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let unreadable = |source| Error::FileUnreadable {
            path: path.to_path_buf(),
            source,
        };

        let metadata = fs::metadata(path).map_err(unreadable)?;
        if !metadata.is_file() {
            return Err(unreadable(io::Error::new(
                io::ErrorKind::Other,
                "not a regular file",
            )));
        }
        let data = fs::read(path).map_err(unreadable)?;
        Ok(MediaFile {
            path: path.to_path_buf(),
            data,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Standard base64 of the file contents, as `media_data` expects.
    pub fn to_base64(&self) -> String {
        BASE64.encode(&self.data)
    }
}
