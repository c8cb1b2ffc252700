//! Writing fetched results to disk

use std::path::{Path, PathBuf};

use bytes::Bytes;
use domain::RunId;
use futures::{Stream, StreamExt};
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tracing::debug;

use crate::error::CambError;

/// File name the audio of a TTS run is stored under
#[must_use]
pub fn tts_file_path(directory: &Path, run_id: RunId) -> PathBuf {
    directory.join(format!("tts_stream_{run_id}.wav"))
}

/// Create `directory` and its parents if missing
pub async fn ensure_directory(directory: &Path) -> Result<(), CambError> {
    if tokio::fs::try_exists(directory).await? {
        return Ok(());
    }
    debug!(directory = %directory.display(), "Creating output directory");
    tokio::fs::create_dir_all(directory).await?;
    Ok(())
}

/// Write a raw JSON listing to `directory/file_name`, returning the path
pub async fn write_listing(
    directory: &Path,
    file_name: &str,
    body: &str,
) -> Result<PathBuf, CambError> {
    ensure_directory(directory).await?;
    let path = directory.join(file_name);
    tokio::fs::write(&path, body).await?;
    Ok(path)
}

/// Write a byte stream to `path`, returning the number of bytes written
///
/// Any stream or I/O error aborts the write; the partial file is removed.
pub async fn write_stream<S>(path: &Path, stream: S) -> Result<u64, CambError>
where
    S: Stream<Item = Result<Bytes, CambError>>,
{
    let file = tokio::fs::File::create(path).await?;

    match copy_stream(file, stream).await {
        Ok(written) => Ok(written),
        Err(e) => {
            let _ = tokio::fs::remove_file(path).await;
            Err(e)
        },
    }
}

async fn copy_stream<W, S>(mut writer: W, stream: S) -> Result<u64, CambError>
where
    W: AsyncWrite + Unpin,
    S: Stream<Item = Result<Bytes, CambError>>,
{
    let mut stream = std::pin::pin!(stream);
    let mut written: u64 = 0;

    while let Some(chunk) = stream.next().await {
        let chunk = chunk?;
        writer.write_all(&chunk).await?;
        written += chunk.len() as u64;
    }

    writer.flush().await?;
    Ok(written)
}
