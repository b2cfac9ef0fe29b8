//! Outgoing file attachments.

use std::path::PathBuf;

/// A file to upload with a `POST`-with-attach method.
///
/// The file itself never appears in the JSON `meta` part of the request;
/// the transport sends it as a separate multipart field.
#[derive(Debug, Clone)]
pub enum InputFile {
    /// Bytes already in memory.
    Buffered {
        /// Name the server stores the file under.
        file_name: String,
        /// File contents.
        data: Vec<u8>,
    },
    /// A file on the local filesystem, read at send time.
    FsPath(PathBuf),
}

impl InputFile {
    /// Wraps in-memory bytes.
    pub fn buffered(file_name: impl Into<String>, data: impl Into<Vec<u8>>) -> Self {
        InputFile::Buffered { file_name: file_name.into(), data: data.into() }
    }

    /// References a file on disk.
    pub fn path(path: impl Into<PathBuf>) -> Self {
        InputFile::FsPath(path.into())
    }

    /// The file name sent alongside the part, when one is known.
    pub fn file_name(&self) -> Option<String> {
        match self {
            InputFile::Buffered { file_name, .. } => Some(file_name.clone()),
            InputFile::FsPath(path) => {
                path.file_name().map(|name| name.to_string_lossy().into_owned())
            }
        }
    }
}
