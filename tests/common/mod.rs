//! Shared utilities for integration testing.

use async_trait::async_trait;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::sync::mpsc;

use poolwatch::alerts::{Clock, Notifier, NotifyError};
use poolwatch::source::{LineSource, SourceError, SourceEvent};

/// A `LineSource` that replays a fixed sequence of events, then
/// terminates.
#[allow(dead_code)]
pub struct ScriptedSource {
    events: std::collections::VecDeque<SourceEvent>,
}

impl ScriptedSource {
    #[allow(dead_code)]
    pub fn from_lines(lines: &[&str]) -> Self {
        Self {
            events: lines
                .iter()
                .map(|l| SourceEvent::Line(l.to_string()))
                .collect(),
        }
    }

    #[allow(dead_code)]
    pub fn from_events(events: Vec<SourceEvent>) -> Self {
        Self {
            events: events.into(),
        }
    }
}

#[async_trait]
impl LineSource for ScriptedSource {
    async fn next_line(&mut self) -> Result<SourceEvent, SourceError> {
        Ok(self.events.pop_front().unwrap_or(SourceEvent::Terminated))
    }
}

/// A `Notifier` that records every delivered message, optionally
/// simulating an unreachable sink.
#[derive(Default)]
#[allow(dead_code)]
pub struct RecordingNotifier {
    pub sent: Arc<Mutex<Vec<String>>>,
    pub failing: Arc<AtomicBool>,
}

impl RecordingNotifier {
    #[allow(dead_code)]
    pub fn new() -> Self {
        Self::default()
    }

    #[allow(dead_code)]
    pub fn sent_count(&self) -> usize {
        self.sent.lock().unwrap().len()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    fn name(&self) -> &'static str {
        "recording"
    }

    async fn send(&self, text: &str) -> Result<(), NotifyError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(NotifyError::Rejected {
                status: 503,
                body: "sink down".to_string(),
            });
        }
        self.sent.lock().unwrap().push(text.to_string());
        Ok(())
    }
}

/// A `Clock` whose elapsed time is advanced manually by the test.
#[allow(dead_code)]
pub struct ManualClock {
    base: Instant,
    offset: Mutex<Duration>,
}

impl ManualClock {
    #[allow(dead_code)]
    pub fn new() -> Self {
        Self {
            base: Instant::now(),
            offset: Mutex::new(Duration::ZERO),
        }
    }

    #[allow(dead_code)]
    pub fn advance(&self, by: Duration) {
        *self.offset.lock().unwrap() += by;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.base + *self.offset.lock().unwrap()
    }
}

/// Start a single-shot mock webhook sink that captures request bodies
/// and answers every POST with `status`.
#[allow(dead_code)]
pub async fn start_webhook_sink(status: u16) -> (SocketAddr, mpsc::UnboundedReceiver<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let (tx, rx) = mpsc::unbounded_channel();

    tokio::spawn(async move {
        loop {
            let Ok((mut socket, _)) = listener.accept().await else {
                break;
            };
            let tx = tx.clone();
            tokio::spawn(async move {
                let mut buf = Vec::new();
                let mut chunk = [0u8; 1024];
                let body = loop {
                    match socket.read(&mut chunk).await {
                        Ok(0) => return,
                        Ok(n) => {
                            buf.extend_from_slice(&chunk[..n]);
                            if let Some(end) = header_end(&buf) {
                                let headers = String::from_utf8_lossy(&buf[..end]).to_string();
                                let content_length = content_length(&headers);
                                while buf.len() < end + 4 + content_length {
                                    match socket.read(&mut chunk).await {
                                        Ok(0) => return,
                                        Ok(n) => buf.extend_from_slice(&chunk[..n]),
                                        Err(_) => return,
                                    }
                                }
                                break String::from_utf8_lossy(
                                    &buf[end + 4..end + 4 + content_length],
                                )
                                .to_string();
                            }
                        }
                        Err(_) => return,
                    }
                };

                let _ = tx.send(body);

                let status_text = match status {
                    200 => "200 OK",
                    404 => "404 Not Found",
                    500 => "500 Internal Server Error",
                    503 => "503 Service Unavailable",
                    _ => "200 OK",
                };
                let response = format!(
                    "HTTP/1.1 {}\r\nContent-Length: 2\r\nConnection: close\r\n\r\nok",
                    status_text
                );
                let _ = socket.write_all(response.as_bytes()).await;
                let _ = socket.shutdown().await;
            });
        }
    });

    (addr, rx)
}

fn header_end(buf: &[u8]) -> Option<usize> {
    buf.windows(4).position(|w| w == b"\r\n\r\n")
}

fn content_length(headers: &str) -> usize {
    headers
        .lines()
        .find_map(|line| {
            let (name, value) = line.split_once(':')?;
            if name.eq_ignore_ascii_case("content-length") {
                value.trim().parse().ok()
            } else {
                None
            }
        })
        .unwrap_or(0)
}
