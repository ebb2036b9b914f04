use crate::error::FolioError;
use crate::extraction::PdfExtractor;
use crate::model::Page;
use std::fs::File;
use std::process::{Child, Command, ExitStatus, Stdio};
use std::time::{Duration, Instant};

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
const POLL_INTERVAL: Duration = Duration::from_millis(20);

/// PDF extraction backend using pdftotext (from poppler-utils).
///
/// Runs in reading-order mode (no `-layout`) since downstream consumers want
/// prose, not column alignment. The document and the output are staged in a
/// private temp directory that is removed when extraction returns, whatever
/// the outcome.
pub struct PdftotextExtractor {
    timeout: Duration,
}

impl PdftotextExtractor {
    pub fn new() -> Self {
        Self::with_timeout(DEFAULT_TIMEOUT)
    }

    /// Kill the subprocess if it runs longer than `timeout`.
    pub fn with_timeout(timeout: Duration) -> Self {
        PdftotextExtractor { timeout }
    }

    /// Check if pdftotext is installed.
    pub fn binary_available() -> bool {
        Command::new("pdftotext")
            .arg("-v")
            .output()
            .map(|o| o.status.success() || !o.stderr.is_empty())
            .unwrap_or(false)
    }
}

impl Default for PdftotextExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfExtractor for PdftotextExtractor {
    fn extract_pages(&self, pdf_bytes: &[u8]) -> Result<Vec<Page>, FolioError> {
        let workdir = tempfile::Builder::new().prefix("folio-").tempdir()?;
        let input_path = workdir.path().join("input.pdf");
        let output_path = workdir.path().join("output.txt");
        let stderr_path = workdir.path().join("stderr.txt");

        std::fs::write(&input_path, pdf_bytes)?;
        let stderr_file = File::create(&stderr_path)?;

        let mut child = Command::new("pdftotext")
            .arg("-enc")
            .arg("UTF-8")
            .arg(&input_path)
            .arg(&output_path)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(stderr_file)
            .spawn()
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    FolioError::PdftotextNotFound
                } else {
                    FolioError::Backend {
                        backend: self.backend_name().to_string(),
                        reason: format!("could not start pdftotext: {e}"),
                    }
                }
            })?;

        let status = wait_with_deadline(&mut child, self.timeout)?.ok_or_else(|| {
            FolioError::Timeout {
                backend: self.backend_name().to_string(),
                seconds: self.timeout.as_secs(),
            }
        })?;

        if !status.success() {
            let code = status.code().unwrap_or(-1);
            let stderr = std::fs::read_to_string(&stderr_path).unwrap_or_default();
            return Err(FolioError::PdftotextFailed {
                code,
                stderr: stderr.trim().to_string(),
            });
        }

        let bytes = std::fs::read(&output_path)?;
        Ok(split_pages(&String::from_utf8_lossy(&bytes)))
    }

    fn backend_name(&self) -> &str {
        "pdftotext"
    }

    fn is_available(&self) -> bool {
        Self::binary_available()
    }
}

/// Wait for the child to exit; on expiry kill it and return `None`.
fn wait_with_deadline(child: &mut Child, timeout: Duration) -> Result<Option<ExitStatus>, FolioError> {
    let deadline = Instant::now() + timeout;
    loop {
        if let Some(status) = child.try_wait()? {
            return Ok(Some(status));
        }
        if Instant::now() >= deadline {
            let _ = child.kill();
            let _ = child.wait();
            return Ok(None);
        }
        std::thread::sleep(POLL_INTERVAL);
    }
}

/// pdftotext ends every page with a form feed, so the final split piece is
/// the empty remainder after the last page.
fn split_pages(text: &str) -> Vec<Page> {
    let mut pieces: Vec<&str> = text.split('\x0c').collect();
    if pieces.len() > 1 && pieces.last().is_some_and(|p| p.trim().is_empty()) {
        pieces.pop();
    }
    pieces
        .into_iter()
        .enumerate()
        .map(|(i, page_text)| Page::new(i + 1, page_text))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_pages_on_form_feed() {
        let pages = split_pages("First page\n\x0cSecond page\n\x0c");
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0].page_number, 1);
        assert_eq!(pages[0].raw_text, "First page\n");
        assert_eq!(pages[1].page_number, 2);
        assert_eq!(pages[1].raw_text, "Second page\n");
    }

    #[test]
    fn test_split_pages_keeps_blank_middle_page() {
        let pages = split_pages("One\x0c\x0cThree\x0c");
        let numbers: Vec<usize> = pages.iter().map(|p| p.page_number).collect();
        assert_eq!(numbers, vec![1, 2, 3]);
        assert!(pages[1].raw_text.is_empty());
    }

    #[test]
    fn test_split_pages_without_form_feed() {
        let pages = split_pages("only page");
        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0].raw_text, "only page");
    }
}
