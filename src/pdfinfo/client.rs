// src/pdfinfo/client.rs
use crate::extractors::{output, record, MetadataRecord};
use crate::pdfinfo::models::{ExtractionObserver, InputSource, ToolConfig};
use crate::utils::error::ExtractError;
use std::io;
use std::process::Stdio;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWriteExt};
use tokio::process::{Child, ChildStderr, ChildStdin, ChildStdout, Command};

// pdfinfo output is small; one read usually returns all of it.
const READ_CHUNK_SIZE: usize = 8 * 1024;

/// Runs pdfinfo once against `input` and turns its stdout into a record.
///
/// `Ok(None)` means the tool ran but printed nothing, which the caller decides
/// how to treat. The child process is always killed and reaped before this
/// returns, whichever way it returns.
pub async fn run<O>(
    config: &ToolConfig,
    options: &[String],
    input: Option<InputSource>,
    observer: &O,
) -> Result<Option<MetadataRecord>, ExtractError>
where
    O: ExtractionObserver + ?Sized,
{
    let input = match input {
        Some(InputSource::Path(path)) if path.as_os_str().is_empty() => None,
        other => other,
    }
    .ok_or(ExtractError::NoInput)?;

    let mut command = Command::new(&config.program);
    command
        .args(options)
        .arg(input.as_argument())
        .stdin(if input.is_stream() { Stdio::piped() } else { Stdio::null() })
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);

    tracing::debug!("Launching {:?}", command.as_std());

    let mut child = command.spawn().map_err(|source| {
        tracing::error!("Could not launch {}: {}", config.program.display(), source);
        ExtractError::Launch {
            program: config.program.display().to_string(),
            source,
        }
    })?;

    let stream = match input {
        InputSource::Stream(reader) => Some(reader),
        InputSource::Path(_) => None,
    };
    let stdin = child.stdin.take();
    let (stdout, stderr) = match (child.stdout.take(), child.stderr.take()) {
        (Some(stdout), Some(stderr)) => (stdout, stderr),
        _ => {
            terminate(&mut child).await;
            return Err(io::Error::new(io::ErrorKind::BrokenPipe, "pdfinfo output pipes not captured").into());
        }
    };

    // Forwarding runs beside collection so a child that writes before it has
    // read all of stdin cannot deadlock us. Completion is driven by the child's
    // output alone: once stdout and stderr end, an unfinished forward is dropped.
    let collected = {
        let forward = forward_stdin(stream, stdin);
        let collect = async {
            tokio::try_join!(collect_stdout(stdout, observer), collect_stderr(stderr))
        };
        tokio::pin!(forward, collect);

        let mut forwarding = true;
        let mut collected = loop {
            tokio::select! {
                biased;
                res = &mut forward, if forwarding => {
                    forwarding = false;
                    if let Err(e) = res {
                        break Err(e);
                    }
                }
                res = &mut collect => break res,
            }
        };

        // A write error can become ready in the same wakeup as end of output.
        if forwarding && collected.is_ok() {
            tokio::select! {
                biased;
                res = &mut forward => {
                    if let Err(e) = res {
                        collected = Err(e);
                    }
                }
                _ = std::future::ready(()) => {
                    tracing::debug!("pdfinfo finished before its input stream ended, closing stdin");
                }
            }
        }
        collected
    };

    let (chunks, stderr_text) = match collected {
        Ok(output) => output,
        Err(e) => {
            tracing::error!("pdfinfo stream error, discarding output: {}", e);
            terminate(&mut child).await;
            return Err(ExtractError::ProcessIo(e));
        }
    };

    let status = match child.wait().await {
        Ok(status) => status,
        Err(e) => {
            terminate(&mut child).await;
            return Err(ExtractError::ProcessIo(e));
        }
    };
    observer.on_exit(Some(status));
    // Already reaped, so this only matters if the exit raced ahead of us.
    if let Err(e) = child.start_kill() {
        tracing::trace!("Kill after exit ignored: {}", e);
    }

    if !status.success() {
        tracing::warn!("pdfinfo exited with {}", status);
    }
    if !stderr_text.trim().is_empty() {
        tracing::debug!("pdfinfo stderr: {}", stderr_text.trim());
    }

    let total_bytes: usize = chunks.iter().map(Vec::len).sum();
    let buffer = chunks.concat();
    let text = String::from_utf8_lossy(&buffer);
    tracing::debug!("Collected {} bytes of pdfinfo output", total_bytes);

    let record = output::parse(&text).map(record::build);
    observer.on_close();

    Ok(record)
}

/// Copies the caller's stream into the child's stdin, then closes it.
async fn forward_stdin(
    stream: Option<Box<dyn AsyncRead + Send + Unpin>>,
    stdin: Option<ChildStdin>,
) -> io::Result<()> {
    let (Some(mut reader), Some(mut stdin)) = (stream, stdin) else {
        return Ok(());
    };

    let copied = tokio::io::copy(&mut reader, &mut stdin).await?;
    stdin.shutdown().await?;
    tracing::debug!("Forwarded {} bytes to pdfinfo stdin", copied);
    Ok(())
}

/// Reads stdout to the end, keeping each chunk and announcing it as it arrives.
async fn collect_stdout<O>(mut stdout: ChildStdout, observer: &O) -> io::Result<Vec<Vec<u8>>>
where
    O: ExtractionObserver + ?Sized,
{
    let mut chunks = Vec::new();
    let mut buf = vec![0u8; READ_CHUNK_SIZE];
    let mut pending = Vec::new();

    loop {
        let n = stdout.read(&mut buf).await?;
        if n == 0 {
            break;
        }
        let chunk = buf[..n].to_vec();
        pending.extend_from_slice(&chunk);
        let text = take_decodable(&mut pending);
        if !text.is_empty() {
            observer.on_data(&text);
        }
        chunks.push(chunk);
    }
    if !pending.is_empty() {
        observer.on_data(&String::from_utf8_lossy(&pending));
    }

    Ok(chunks)
}

/// Decodes `pending`, leaving behind a UTF-8 sequence cut off by the read boundary.
fn take_decodable(pending: &mut Vec<u8>) -> String {
    let split = match std::str::from_utf8(pending) {
        Ok(_) => pending.len(),
        Err(e) if e.error_len().is_none() => e.valid_up_to(),
        Err(_) => pending.len(),
    };
    let rest = pending.split_off(split);
    let text = String::from_utf8_lossy(pending).into_owned();
    *pending = rest;
    text
}

async fn collect_stderr(mut stderr: ChildStderr) -> io::Result<String> {
    let mut bytes = Vec::new();
    stderr.read_to_end(&mut bytes).await?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Kills and reaps the child. Safe to call after it has already exited.
async fn terminate(child: &mut Child) {
    if let Err(e) = child.start_kill() {
        tracing::trace!("Kill ignored: {}", e);
    }
    if let Err(e) = child.wait().await {
        tracing::warn!("Failed to reap pdfinfo process: {}", e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pdfinfo::models::ExtractionEvent;

    #[tokio::test]
    async fn missing_input_never_launches() {
        // A launch attempt would surface as ExtractError::Launch instead.
        let config = ToolConfig::new("/nonexistent/pdfinfo");
        let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel::<ExtractionEvent>();

        let result = run(&config, &[], None, &tx).await;
        assert!(matches!(result, Err(ExtractError::NoInput)));

        let result = run(&config, &[], Some(InputSource::path("")), &tx).await;
        assert!(matches!(result, Err(ExtractError::NoInput)));

        assert!(rx.try_recv().is_err(), "no events expected without a run");
    }

    #[tokio::test]
    async fn missing_tool_is_a_process_io_error() {
        let config = ToolConfig::new("/nonexistent/pdfinfo");
        let (tx, _rx) = tokio::sync::mpsc::unbounded_channel::<ExtractionEvent>();

        let err = run(&config, &[], Some(InputSource::path("doc.pdf")), &tx)
            .await
            .unwrap_err();
        assert!(err.is_process_io(), "unexpected error: {:?}", err);
    }

    #[test]
    fn split_characters_wait_for_their_tail() {
        let bytes = "Title: Café".as_bytes();
        let (head, tail) = bytes.split_at(bytes.len() - 1);

        let mut pending = head.to_vec();
        assert_eq!(take_decodable(&mut pending), "Title: Caf");
        assert_eq!(pending.len(), 1);

        pending.extend_from_slice(tail);
        assert_eq!(take_decodable(&mut pending), "é");
        assert!(pending.is_empty());
    }

    #[test]
    fn invalid_bytes_are_not_held_back() {
        let mut pending = b"Title: \xff ok".to_vec();
        assert_eq!(take_decodable(&mut pending), "Title: \u{fffd} ok");
        assert!(pending.is_empty());
    }
}
