//! PDF conversion through an external `wkhtmltopdf` binary.

use std::path::Path;
use std::process::Stdio;

use tokio::io::AsyncWriteExt;
use tokio::process::Command;

use crate::error::DigestError;

/// Pipe `html` into the converter on stdin and write the PDF to `pdf_path`.
///
/// # Errors
///
/// Returns [`DigestError::Pdf`] if the converter cannot be started, the HTML
/// cannot be handed over, or the converter exits non-zero.
pub async fn render_pdf(converter: &Path, html: &str, pdf_path: &Path) -> Result<(), DigestError> {
    let mut child = Command::new(converter)
        .args(["--quiet", "--encoding", "utf-8", "-"])
        .arg(pdf_path)
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|e| DigestError::Pdf(format!("failed to start {}: {e}", converter.display())))?;

    if let Some(mut stdin) = child.stdin.take() {
        stdin
            .write_all(html.as_bytes())
            .await
            .map_err(|e| DigestError::Pdf(format!("failed to send HTML to converter: {e}")))?;
        // Dropping stdin closes the pipe so the converter sees EOF.
    }

    let output = child
        .wait_with_output()
        .await
        .map_err(|e| DigestError::Pdf(format!("converter subprocess error: {e}")))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(DigestError::Pdf(format!(
            "{} exited with {}: {}",
            converter.display(),
            output.status,
            stderr.trim()
        )));
    }

    tracing::debug!(path = %pdf_path.display(), "PDF written");
    Ok(())
}
