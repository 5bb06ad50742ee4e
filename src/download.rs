use anyhow::{anyhow, Context, Result};
use futures_util::StreamExt;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;
use tokio::fs;
use tokio::io::AsyncWriteExt;

/// Stream a response body into `local_path`, returning the number of bytes written.
pub async fn save_response(response: reqwest::Response, local_path: &Path) -> Result<u64> {
    let status = response.status();
    if !status.is_success() {
        return Err(anyhow!("Download failed with status {}", status));
    }

    let filename = local_path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| local_path.display().to_string());
    tracing::info!("Downloading {}...", filename);

    let total_size = response.content_length().unwrap_or(0);
    let pb = ProgressBar::new(total_size);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{msg} {spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {bytes}/{total_bytes} ({eta})")?
            .progress_chars("#>-"),
    );
    pb.set_message(format!("Downloading {}", filename));

    let mut file = fs::File::create(local_path)
        .await
        .with_context(|| format!("Could not create {}", local_path.display()))?;
    let mut downloaded = 0u64;
    let mut stream = response.bytes_stream();

    while let Some(chunk) = stream.next().await {
        let chunk = chunk?;
        file.write_all(&chunk).await?;
        downloaded += chunk.len() as u64;
        pb.set_position(downloaded);
    }
    file.flush().await?;

    pb.finish_with_message("Download complete");
    Ok(downloaded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Server;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_save_response_writes_body() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/app.bin")
            .with_status(200)
            .with_body(b"\x7fELF payload")
            .create_async()
            .await;

        let dir = TempDir::new().unwrap();
        let path = dir.path().join("app.bin");
        let response = reqwest::get(format!("{}/app.bin", server.url())).await.unwrap();

        let written = save_response(response, &path).await.unwrap();

        assert_eq!(written, 12);
        assert_eq!(std::fs::read(&path).unwrap(), b"\x7fELF payload");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_save_response_rejects_error_status() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/gone.bin")
            .with_status(410)
            .create_async()
            .await;

        let dir = TempDir::new().unwrap();
        let path = dir.path().join("gone.bin");
        let response = reqwest::get(format!("{}/gone.bin", server.url())).await.unwrap();

        assert!(save_response(response, &path).await.is_err());
        assert!(!path.exists());
        mock.assert_async().await;
    }
}
