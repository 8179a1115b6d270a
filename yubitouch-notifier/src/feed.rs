//! Textual touch event input.
//!
//! Producers write one tag per line (`GPG_ON`, `U2F_OFF`, ...). Lines are
//! read on a plain thread and forwarded to every registered notifier.

use std::future::Future;
use std::io::{self, BufRead, BufReader, Read};

use tokio::sync::mpsc;
use tracing::{debug, warn};
use yubitouch_core::TouchEvent;

use crate::registry::NotifierRegistry;

const LINE_BUFFER: usize = 16;

/// Why [`forward_events`] returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedEnd {
    EndOfInput,
    Interrupted,
}

/// Reads `reader` line by line on a detached thread.
///
/// A blocked read never holds up the runtime: the thread is simply left
/// behind when the receiver is dropped.
pub fn spawn_line_reader<R>(reader: R) -> mpsc::Receiver<io::Result<String>>
where
    R: Read + Send + 'static,
{
    let (tx, rx) = mpsc::channel(LINE_BUFFER);
    std::thread::spawn(move || {
        for line in BufReader::new(reader).lines() {
            if tx.blocking_send(line).is_err() {
                break;
            }
        }
    });
    rx
}

/// Publishes every parsed line to `registry` until the input ends or
/// `shutdown` completes.
///
/// `shutdown` is raced against both reading and publishing, so a full queue
/// cannot keep the caller from stopping. Blank lines are ignored and unknown
/// tags logged and skipped.
///
/// # Errors
///
/// The first read error from `lines`.
pub async fn forward_events<F>(
    lines: &mut mpsc::Receiver<io::Result<String>>,
    registry: &NotifierRegistry,
    shutdown: F,
) -> io::Result<FeedEnd>
where
    F: Future<Output = ()>,
{
    tokio::pin!(shutdown);
    loop {
        let line = tokio::select! {
            line = lines.recv() => line,
            () = &mut shutdown => return Ok(FeedEnd::Interrupted),
        };
        let Some(line) = line else {
            return Ok(FeedEnd::EndOfInput);
        };
        let line = line?;
        let tag = line.trim();
        if tag.is_empty() {
            continue;
        }

        let event = match tag.parse::<TouchEvent>() {
            Ok(event) => event,
            Err(e) => {
                warn!("Skipping input: {}", e);
                continue;
            }
        };

        debug!("Publishing {}.", event);
        tokio::select! {
            delivered = registry.publish(event) => {
                if delivered == 0 {
                    warn!("No notifier is running; {} dropped.", event);
                }
            }
            () = &mut shutdown => return Ok(FeedEnd::Interrupted),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use std::time::Duration;
    use tokio::time::timeout;

    fn lines_from(items: Vec<io::Result<String>>) -> mpsc::Receiver<io::Result<String>> {
        let (tx, rx) = mpsc::channel(items.len().max(1));
        for item in items {
            tx.try_send(item).unwrap();
        }
        rx
    }

    #[tokio::test]
    async fn forwards_known_tags_until_end_of_input() {
        let registry = NotifierRegistry::new();
        let mut events = registry.register("notifier/libnotify", 10);
        let mut lines = lines_from(vec![
            Ok("GPG_ON".to_string()),
            Ok("bogus".to_string()),
            Ok("".to_string()),
            Ok("  U2F_OFF ".to_string()),
        ]);

        let end = forward_events(&mut lines, &registry, std::future::pending()).await.unwrap();

        assert_eq!(end, FeedEnd::EndOfInput);
        assert_eq!(events.recv().await, Some(TouchEvent::GpgOn));
        assert_eq!(events.recv().await, Some(TouchEvent::U2fOff));
        assert!(events.try_recv().is_err());
    }

    #[tokio::test]
    async fn shutdown_wins_over_a_full_queue() {
        let registry = NotifierRegistry::new();
        // Nobody drains this queue; the second publish waits for space.
        let _events = registry.register("notifier/libnotify", 1);
        let (line_tx, mut lines) = mpsc::channel(4);
        line_tx.send(Ok("HMAC_ON".to_string())).await.unwrap();
        line_tx.send(Ok("HMAC_OFF".to_string())).await.unwrap();

        let end = timeout(
            Duration::from_secs(5),
            forward_events(&mut lines, &registry, tokio::time::sleep(Duration::from_millis(50))),
        )
        .await
        .expect("forwarding ignored shutdown")
        .unwrap();

        assert_eq!(end, FeedEnd::Interrupted);
    }

    #[tokio::test]
    async fn shutdown_while_waiting_for_input() {
        let registry = NotifierRegistry::new();
        let (_line_tx, mut lines) = mpsc::channel::<io::Result<String>>(1);

        let end = forward_events(&mut lines, &registry, async {}).await.unwrap();
        assert_eq!(end, FeedEnd::Interrupted);
    }

    #[tokio::test]
    async fn read_error_is_returned() {
        let registry = NotifierRegistry::new();
        let mut lines = lines_from(vec![Err(io::Error::new(io::ErrorKind::InvalidData, "not utf-8"))]);

        let err = forward_events(&mut lines, &registry, std::future::pending()).await.unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
    }

    #[tokio::test]
    async fn line_reader_yields_lines_then_closes() {
        let mut lines = spawn_line_reader(Cursor::new(b"GPG_ON\nGPG_OFF\n".to_vec()));

        assert_eq!(lines.recv().await.unwrap().unwrap(), "GPG_ON");
        assert_eq!(lines.recv().await.unwrap().unwrap(), "GPG_OFF");
        assert!(lines.recv().await.is_none());
    }
}
