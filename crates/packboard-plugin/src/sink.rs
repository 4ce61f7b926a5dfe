//! Message sinks: where emitted batches go
//!
//! `NoopSink` swallows traffic while no consumer is connected.
//! `SocketSink` carries batches to the dashboard as newline-delimited
//! JSON frames and counts outstanding acknowledgments.

use packboard_core::{Frame, Handshake, Message, PackboardError, Reply, Result};
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::TcpStream;
use tokio::sync::mpsc::{self, UnboundedSender};
use tracing::{debug, warn};

/// Destination for emitted message batches
pub trait MessageSink: Send + Sync {
    /// Enqueue one batch; never blocks the build
    fn send(&self, messages: Vec<Message>);

    /// Batches sent but not yet acknowledged by the consumer
    fn outstanding(&self) -> usize {
        0
    }
}

/// Sink used while no consumer is connected
pub struct NoopSink;

impl MessageSink for NoopSink {
    fn send(&self, _messages: Vec<Message>) {}
}

/// TCP connection to the dashboard
pub struct SocketSink {
    tx: UnboundedSender<Vec<Message>>,
    outstanding: Arc<AtomicUsize>,
}

impl SocketSink {
    /// Connect to the dashboard and wait for its handshake
    ///
    /// The handshake arrives exactly once per connection, before any frame
    /// is relayed; its mode flags feed back into the reporter.
    pub async fn connect(host: &str, port: u16) -> Result<(Self, Handshake)> {
        let stream = TcpStream::connect((host, port)).await?;
        let (read_half, mut write_half) = stream.into_split();
        let mut lines = BufReader::new(read_half).lines();

        let first = lines
            .next_line()
            .await?
            .ok_or_else(|| PackboardError::Transport("connection closed before handshake".into()))?;
        let handshake = match serde_json::from_str::<Reply>(&first)? {
            Reply::Mode { value } => value,
            other => {
                return Err(PackboardError::Protocol(format!(
                    "expected handshake, got {:?}",
                    other
                )))
            }
        };
        debug!("connected; handshake: {:?}", handshake);

        let outstanding = Arc::new(AtomicUsize::new(0));

        // Ack reader: every ack releases one outstanding batch.
        {
            let outstanding = Arc::clone(&outstanding);
            tokio::spawn(async move {
                while let Ok(Some(line)) = lines.next_line().await {
                    match serde_json::from_str::<Reply>(&line) {
                        Ok(Reply::Ack { .. }) => {
                            outstanding.fetch_sub(1, Ordering::AcqRel);
                        }
                        Ok(other) => warn!("unexpected reply: {:?}", other),
                        Err(e) => warn!("undecodable reply: {}", e),
                    }
                }
            });
        }

        // Writer: frames each batch with a sequence number.
        let (tx, mut rx) = mpsc::unbounded_channel::<Vec<Message>>();
        {
            let outstanding = Arc::clone(&outstanding);
            tokio::spawn(async move {
                let seq = AtomicU64::new(1);
                while let Some(messages) = rx.recv().await {
                    let frame = Frame::new(seq.fetch_add(1, Ordering::Relaxed), messages);
                    let line = match serde_json::to_string(&frame) {
                        Ok(line) => line,
                        Err(e) => {
                            warn!("frame serialization failed: {}", e);
                            outstanding.fetch_sub(1, Ordering::AcqRel);
                            continue;
                        }
                    };
                    if write_half.write_all(line.as_bytes()).await.is_err()
                        || write_half.write_all(b"\n").await.is_err()
                    {
                        // Dropped connection: non-fatal, the build goes on.
                        warn!("dashboard connection dropped");
                        outstanding.fetch_sub(1, Ordering::AcqRel);
                        break;
                    }
                }
            });
        }

        Ok((
            Self { tx, outstanding },
            handshake,
        ))
    }
}

impl MessageSink for SocketSink {
    fn send(&self, messages: Vec<Message>) {
        self.outstanding.fetch_add(1, Ordering::AcqRel);
        if self.tx.send(messages).is_err() {
            self.outstanding.fetch_sub(1, Ordering::AcqRel);
        }
    }

    fn outstanding(&self) -> usize {
        self.outstanding.load(Ordering::Acquire)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::AsyncReadExt;
    use tokio::net::TcpListener;

    #[tokio::test]
    async fn test_handshake_then_frames_and_acks() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let server = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let handshake = serde_json::to_string(&Reply::Mode {
                value: Handshake {
                    minimal: true,
                    include_assets: vec![],
                },
            })
            .unwrap();
            socket
                .write_all(format!("{}\n", handshake).as_bytes())
                .await
                .unwrap();

            let mut buf = vec![0u8; 4096];
            let mut line = String::new();
            loop {
                let n = socket.read(&mut buf).await.unwrap();
                line.push_str(std::str::from_utf8(&buf[..n]).unwrap());
                if line.ends_with('\n') {
                    break;
                }
            }
            let frame: Frame = serde_json::from_str(line.trim()).unwrap();
            assert_eq!(frame.seq, 1);
            assert_eq!(frame.messages, vec![Message::status("Compiling")]);

            let ack = serde_json::to_string(&Reply::Ack { seq: frame.seq }).unwrap();
            socket.write_all(format!("{}\n", ack).as_bytes()).await.unwrap();
            // Hold the socket open until the client has seen the ack.
            tokio::time::sleep(std::time::Duration::from_millis(200)).await;
        });

        let (sink, handshake) = SocketSink::connect("127.0.0.1", addr.port()).await.unwrap();
        assert!(handshake.minimal);

        sink.send(vec![Message::status("Compiling")]);
        assert_eq!(sink.outstanding(), 1);

        // Wait for the ack to drain the counter.
        for _ in 0..50 {
            if sink.outstanding() == 0 {
                break;
            }
            tokio::time::sleep(std::time::Duration::from_millis(10)).await;
        }
        assert_eq!(sink.outstanding(), 0);

        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_noop_sink_reports_nothing_outstanding() {
        let sink = NoopSink;
        sink.send(vec![Message::Clear]);
        assert_eq!(sink.outstanding(), 0);
    }
}
