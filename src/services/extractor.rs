use anyhow::{Result, anyhow, bail};
use serde_json::{Value, json};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Trait for report extraction implementations.
///
/// The dispatcher hands over a scratch-file path and treats the returned
/// value as opaque structured data.
#[async_trait::async_trait]
pub trait ReportExtractor: Send + Sync {
    /// Extract structured data from the report file at `path`
    async fn process_report(&self, path: &Path) -> Result<Value>;
}

/// PDF extractor backed by lopdf
pub struct PdfReportExtractor;

#[async_trait::async_trait]
impl ReportExtractor for PdfReportExtractor {
    async fn process_report(&self, path: &Path) -> Result<Value> {
        let path: PathBuf = path.to_path_buf();
        // lopdf parsing is CPU-bound, keep it off the reactor
        tokio::task::spawn_blocking(move || extract_pdf(&path))
            .await
            .map_err(|e| anyhow!("extraction task panicked: {}", e))?
    }
}

fn extract_pdf(path: &Path) -> Result<Value> {
    let doc = lopdf::Document::load(path)?;

    if doc.is_encrypted() {
        bail!("document is encrypted");
    }

    let pages = doc.get_pages();
    let mut page_texts = Vec::with_capacity(pages.len());
    for &page_num in pages.keys() {
        // Pages with no extractable text yield an empty string
        let text = doc.extract_text(&[page_num]).unwrap_or_default();
        page_texts.push(json!({
            "page": page_num,
            "text": text.trim(),
        }));
    }

    let mut report = json!({
        "page_count": pages.len(),
        "pages": page_texts,
    });

    // Info dictionary (Title, Author, Subject, Creator) when present
    if let Ok(info_val) = doc.trailer.get(b"Info") {
        if let Ok(info_dict) = info_val
            .as_reference()
            .and_then(|id| doc.get_object(id))
            .and_then(|obj| obj.as_dict())
        {
            for (key, val) in info_dict.iter() {
                let key_str = String::from_utf8_lossy(key).to_string();
                if let Ok(s) = val.as_str() {
                    let val_str = String::from_utf8_lossy(s).to_string();
                    if !val_str.is_empty()
                        && ["Title", "Author", "Subject", "Creator"].contains(&key_str.as_str())
                    {
                        report[key_str.to_lowercase()] = json!(val_str);
                    }
                }
            }
        }
    }

    Ok(report)
}

/// No-op extractor for development/testing
pub struct NoOpExtractor;

#[async_trait::async_trait]
impl ReportExtractor for NoOpExtractor {
    async fn process_report(&self, path: &Path) -> Result<Value> {
        tracing::warn!(
            "NoOpExtractor: skipping extraction for {} (development mode)",
            path.display()
        );
        Ok(json!({
            "status": "skipped",
            "detail": "extraction disabled (noop extractor)",
        }))
    }
}

/// Factory function to create the appropriate extractor based on config
pub fn create_extractor(extractor_type: &str) -> Arc<dyn ReportExtractor> {
    match extractor_type.to_lowercase().as_str() {
        "pdf" => Arc::new(PdfReportExtractor),
        "noop" | "none" | "disabled" => Arc::new(NoOpExtractor),
        _ => {
            tracing::warn!(
                "Unknown extractor type '{}', using NoOpExtractor",
                extractor_type
            );
            Arc::new(NoOpExtractor)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[tokio::test]
    async fn test_noop_extractor() {
        let extractor = NoOpExtractor;
        let result = extractor
            .process_report(Path::new("does-not-matter.pdf"))
            .await
            .unwrap();
        assert_eq!(result["status"], "skipped");
    }

    #[tokio::test]
    async fn test_pdf_extractor_rejects_missing_file() {
        let extractor = PdfReportExtractor;
        let result = extractor
            .process_report(Path::new("no/such/file.pdf"))
            .await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_pdf_extractor_rejects_garbage() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("garbage.pdf");
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(b"this is not a pdf at all").unwrap();
        drop(file);

        let extractor = PdfReportExtractor;
        let result = extractor.process_report(&path).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_create_extractor_fallback() {
        let extractor = create_extractor("something-else");
        let result = extractor
            .process_report(Path::new("ignored.pdf"))
            .await
            .unwrap();
        assert_eq!(result["status"], "skipped");
    }
}
