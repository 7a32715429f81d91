use std::path::Path;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use tracing::debug;

const FETCH_TIMEOUT: Duration = Duration::from_secs(60);
const USER_AGENT: &str = concat!("bucket/", env!("CARGO_PKG_VERSION"));

/// A document as fetched, before text extraction.
#[derive(Debug, Clone)]
pub struct RawDocument {
    /// The URL or path the document came from
    pub source: String,
    /// Content type hint from the HTTP response or file extension
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

pub fn is_url(source: &str) -> bool {
    source.starts_with("http://") || source.starts_with("https://")
}

/// Resolve a document source: URLs are downloaded, anything else is read
/// from the filesystem.
pub async fn fetch(source: &str) -> Result<RawDocument> {
    if is_url(source) {
        fetch_url(source).await
    } else {
        read_file(source).await
    }
}

async fn fetch_url(url: &str) -> Result<RawDocument> {
    let client = Client::builder()
        .timeout(FETCH_TIMEOUT)
        .user_agent(USER_AGENT)
        .build()?;

    let response = client
        .get(url)
        .send()
        .await
        .with_context(|| format!("failed to fetch {}", url))?;

    let status = response.status();
    if !status.is_success() {
        bail!("fetching {} returned {}", url, status);
    }

    let content_type = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.to_string());
    let bytes = response.bytes().await?.to_vec();

    debug!(bytes = bytes.len(), ?content_type, "downloaded document");

    Ok(RawDocument {
        source: url.to_string(),
        content_type,
        bytes,
    })
}

async fn read_file(path: &str) -> Result<RawDocument> {
    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("failed to read {}", path))?;

    let content_type = match Path::new(path)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase())
        .as_deref()
    {
        Some("pdf") => Some("application/pdf".to_string()),
        Some("html") | Some("htm") => Some("text/html".to_string()),
        _ => None,
    };

    debug!(bytes = bytes.len(), path, "read local document");

    Ok(RawDocument {
        source: path.to_string(),
        content_type,
        bytes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_is_url() {
        assert!(is_url("https://example.com/doc.pdf"));
        assert!(is_url("http://example.com"));
        assert!(!is_url("notes/doc.pdf"));
        assert!(!is_url("/tmp/doc.txt"));
    }

    #[tokio::test]
    async fn test_fetch_local_file() -> Result<()> {
        let temp_dir = tempfile::tempdir()?;
        let file_path = temp_dir.path().join("notes.html");
        fs::write(&file_path, "<html><body>hi</body></html>")?;

        let doc = fetch(file_path.to_str().unwrap()).await?;
        assert_eq!(doc.content_type.as_deref(), Some("text/html"));
        assert!(doc.bytes.starts_with(b"<html>"));
        Ok(())
    }

    #[tokio::test]
    async fn test_fetch_local_file_missing() {
        let result = fetch("/definitely/not/a/file.txt").await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_fetch_url() -> Result<()> {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/poem"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_raw("the ocean is salty", "text/plain; charset=utf-8"),
            )
            .mount(&mock_server)
            .await;

        let doc = fetch(&format!("{}/poem", mock_server.uri())).await?;
        assert_eq!(
            doc.content_type.as_deref(),
            Some("text/plain; charset=utf-8")
        );
        assert_eq!(doc.bytes, b"the ocean is salty");
        Ok(())
    }

    #[tokio::test]
    async fn test_fetch_url_error_status() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/gone"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&mock_server)
            .await;

        let result = fetch(&format!("{}/gone", mock_server.uri())).await;
        assert!(result.unwrap_err().to_string().contains("404"));
    }
}
