use std::io::Write;
use std::path::Path;

use futures::StreamExt;

/// Makes sure the model directory exists before the service starts serving.
///
/// If the directory is already present nothing is downloaded. Otherwise the
/// configured archive URL is streamed to a uniquely named temp file and
/// unpacked as a gzipped tar into the directory's parent, so an archive whose
/// top-level entry matches the directory name lands in the right place. The
/// temp archive is removed on every path, including failures.
pub async fn ensure_model(model_dir: &Path, archive_url: &str) -> Result<(), BootstrapError> {
    if model_dir.exists() {
        tracing::debug!(model_dir = %model_dir.display(), "Model directory present, skipping download");
        return Ok(());
    }

    tracing::info!(
        model_dir = %model_dir.display(),
        url = archive_url,
        "Model directory not found, downloading archive"
    );

    let parent = model_dir.parent().unwrap_or(Path::new("."));
    std::fs::create_dir_all(parent)?;

    let archive = download_archive(archive_url, parent).await?;
    let archive_path = archive.path().to_path_buf();
    let dest = parent.to_path_buf();

    tokio::task::spawn_blocking(move || unpack_archive(&archive_path, &dest))
        .await
        .map_err(|e| BootstrapError::Extract(format!("task join error: {e}")))??;

    // `archive` is a NamedTempFile; dropping it deletes the downloaded file.
    drop(archive);

    if !model_dir.exists() {
        return Err(BootstrapError::Extract(format!(
            "archive did not contain '{}'",
            model_dir.display()
        )));
    }

    tracing::info!(model_dir = %model_dir.display(), "Model archive extracted");

    Ok(())
}

async fn download_archive(
    url: &str,
    dir: &Path,
) -> Result<tempfile::NamedTempFile, BootstrapError> {
    let response = reqwest::get(url)
        .await
        .map_err(|e| BootstrapError::Download(format!("GET {url}: {e}")))?;

    let status = response.status();
    if !status.is_success() {
        return Err(BootstrapError::Download(format!("HTTP {status} for {url}")));
    }

    let mut file = tempfile::NamedTempFile::new_in(dir)?;
    let mut stream = response.bytes_stream();
    let mut downloaded: u64 = 0;

    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(|e| BootstrapError::Download(format!("read error: {e}")))?;
        file.write_all(&chunk)?;
        downloaded += chunk.len() as u64;
    }

    file.flush()?;

    tracing::info!(bytes = downloaded, "Model archive download complete");

    Ok(file)
}

pub fn unpack_archive(archive_path: &Path, dest: &Path) -> Result<(), BootstrapError> {
    use flate2::read::GzDecoder;
    use tar::Archive;

    let file = std::fs::File::open(archive_path)?;
    let gz = GzDecoder::new(file);
    let mut archive = Archive::new(gz);

    archive
        .unpack(dest)
        .map_err(|e| BootstrapError::Extract(e.to_string()))
}

#[derive(Debug, thiserror::Error)]
pub enum BootstrapError {
    #[error("model download failed: {0}")]
    Download(String),
    #[error("archive extraction failed: {0}")]
    Extract(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
