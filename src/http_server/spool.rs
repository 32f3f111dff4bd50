//! Multipart spooling
//!
//! Validation needs every part key before it can verify anything (duplicate
//! ids and presence checks), but multipart fields arrive one after another
//! and must be drained in order. Each field is therefore streamed to an
//! anonymous temp file chunk by chunk; the file is unlinked on creation and
//! disappears when the part is dropped.

use std::io::{self, SeekFrom};
use std::path::{Path, PathBuf};

use axum::extract::multipart::{Multipart, MultipartError};
use tokio::fs::File;
use tokio::io::{AsyncSeekExt, AsyncWriteExt};

use crate::deposit::{UploadSet, UploadedPart};

use super::errors::SpoolError;

impl From<MultipartError> for SpoolError {
    fn from(e: MultipartError) -> Self {
        SpoolError::Multipart {
            status: e.status(),
            message: e.body_text(),
        }
    }
}

/// Create an anonymous spool file off the async executor
async fn spool_file(spool_dir: Option<PathBuf>) -> io::Result<File> {
    let file = tokio::task::spawn_blocking(move || match spool_dir {
        Some(dir) => tempfile::tempfile_in(dir),
        None => tempfile::tempfile(),
    })
    .await
    .map_err(|e| io::Error::new(io::ErrorKind::Other, e))??;

    Ok(File::from_std(file))
}

/// Drain every multipart field into spool files, grouped by field name
pub async fn spool_multipart(
    multipart: &mut Multipart,
    spool_dir: Option<&Path>,
) -> Result<UploadSet, SpoolError> {
    let mut uploads = UploadSet::new();

    while let Some(mut field) = multipart.next_field().await? {
        let name = field.name().ok_or(SpoolError::UnnamedField)?.to_string();

        let mut file = spool_file(spool_dir.map(Path::to_path_buf)).await?;
        while let Some(chunk) = field.chunk().await? {
            file.write_all(&chunk).await?;
        }
        file.flush().await?;
        file.seek(SeekFrom::Start(0)).await?;

        uploads.push(UploadedPart::new(name, file.into_std().await));
    }

    Ok(uploads)
}
