//! Legacy `.doc` extraction via external converter fallbacks.
//!
//! Strategies are an ordered list, each returning `Option<String>`; the
//! first one producing non-empty text wins. External process failures are
//! per-strategy outcomes, never propagated — only exhausting every strategy
//! becomes an extraction error. Converter output lands in a scoped temp
//! directory, removed on every exit path.

use std::io::Read;
use std::path::Path;
use std::process::{Command, Stdio};
use std::time::{Duration, Instant};

use tracing::{debug, warn};

use tenderkit_core::{Error, Result};

use crate::file;

/// Timeout for the command-line text dumpers.
const CONVERTER_TIMEOUT: Duration = Duration::from_secs(30);
/// Timeout for headless office-suite conversion.
const OFFICE_TIMEOUT: Duration = Duration::from_secs(60);

/// One conversion strategy: display name plus the attempt itself.
struct Strategy {
    name: &'static str,
    run: fn(&Path) -> Option<String>,
}

const STRATEGIES: &[Strategy] = &[
    Strategy { name: "antiword", run: run_antiword },
    Strategy { name: "catdoc", run: run_catdoc },
    Strategy { name: "libreoffice-txt", run: run_libreoffice_txt },
    Strategy { name: "libreoffice-docx", run: run_libreoffice_docx },
];

/// Extract text from a legacy `.doc` file, trying each converter in order.
pub fn extract_doc(path: &Path) -> Result<String> {
    for strategy in STRATEGIES {
        debug!("trying .doc converter: {}", strategy.name);
        match (strategy.run)(path) {
            Some(text) => {
                debug!("{} produced {} bytes of text", strategy.name, text.len());
                return Ok(text);
            }
            None => warn!("{} failed or produced no text", strategy.name),
        }
    }
    Err(Error::ExtractionFailed(
        "无法解析 .doc 文件。请尝试：1) 将文件另存为 .docx 格式；\
         2) 安装 antiword 或 catdoc；3) 安装 LibreOffice"
            .to_string(),
    ))
}

fn run_antiword(path: &Path) -> Option<String> {
    capture_with_timeout(
        Command::new("antiword").arg("-t").arg(path),
        CONVERTER_TIMEOUT,
    )
}

fn run_catdoc(path: &Path) -> Option<String> {
    capture_with_timeout(Command::new("catdoc").arg(path), CONVERTER_TIMEOUT)
}

/// Headless office-suite conversion to plain text in a temp dir.
fn run_libreoffice_txt(path: &Path) -> Option<String> {
    let tmp = tempfile::tempdir().ok()?;
    let ok = wait_with_timeout(
        Command::new("libreoffice")
            .arg("--headless")
            .arg("--convert-to")
            .arg("txt")
            .arg("--outdir")
            .arg(tmp.path())
            .arg(path),
        OFFICE_TIMEOUT,
    );
    if !ok {
        return None;
    }
    let converted = tmp.path().join(path.file_stem()?).with_extension("txt");
    let text = std::fs::read_to_string(&converted).ok()?;
    non_empty(text)
}

/// Convert to `.docx` in a temp dir, then reuse the DOCX extractor.
fn run_libreoffice_docx(path: &Path) -> Option<String> {
    let tmp = tempfile::tempdir().ok()?;
    let ok = wait_with_timeout(
        Command::new("libreoffice")
            .arg("--headless")
            .arg("--convert-to")
            .arg("docx")
            .arg("--outdir")
            .arg(tmp.path())
            .arg(path),
        OFFICE_TIMEOUT,
    );
    if !ok {
        return None;
    }
    let converted = tmp.path().join(path.file_stem()?).with_extension("docx");
    let text = file::extract_docx(&converted).ok()?;
    non_empty(text)
}

/// Run a command capturing stdout, killing the child if it outlives `timeout`.
/// Returns `None` on spawn failure, non-zero exit, timeout, or empty output.
fn capture_with_timeout(cmd: &mut Command, timeout: Duration) -> Option<String> {
    let mut child = cmd
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()
        .ok()?;

    // Drain stdout on a separate thread so a chatty child can't fill the
    // pipe and deadlock against the wait loop.
    let mut stdout = child.stdout.take()?;
    let reader = std::thread::spawn(move || {
        let mut buf = String::new();
        stdout.read_to_string(&mut buf).ok().map(|_| buf)
    });

    if !poll_until_exit(&mut child, timeout) {
        return None;
    }
    let out = reader.join().ok().flatten()?;
    non_empty(out)
}

/// Run a command for its exit status only, with the same timeout handling.
fn wait_with_timeout(cmd: &mut Command, timeout: Duration) -> bool {
    let child = cmd
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn();
    match child {
        Ok(mut child) => poll_until_exit(&mut child, timeout),
        Err(_) => false,
    }
}

/// Poll `try_wait` until the child exits successfully or the deadline
/// passes, killing it on timeout. A timeout is a failure, never retried.
fn poll_until_exit(child: &mut std::process::Child, timeout: Duration) -> bool {
    let deadline = Instant::now() + timeout;
    loop {
        match child.try_wait() {
            Ok(Some(status)) => return status.success(),
            Ok(None) => {
                if Instant::now() >= deadline {
                    warn!("converter timed out after {:?}", timeout);
                    let _ = child.kill();
                    let _ = child.wait();
                    return false;
                }
                std::thread::sleep(Duration::from_millis(50));
            }
            Err(_) => return false,
        }
    }
}

fn non_empty(text: String) -> Option<String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
