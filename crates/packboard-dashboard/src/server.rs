//! TCP listener for producer connections
//!
//! Each connecting producer receives the handshake line first, then
//! streams newline-delimited JSON frames. Parsed frames flow to the run
//! loop over a channel; the loop acks each one after applying it, and the
//! ack travels back on the connection it arrived on. Transport failures
//! are logged and never take the dashboard down.

use packboard_core::{Frame, Handshake, Reply, Result};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::mpsc::{self, UnboundedSender};
use tracing::{debug, info, warn};

/// One parsed frame plus the path back to its producer
pub struct IncomingBatch {
    pub frame: Frame,
    acks: UnboundedSender<u64>,
}

impl IncomingBatch {
    /// Acknowledge the frame; call after the whole batch is applied
    pub fn ack(&self) {
        // A closed connection just means nobody is waiting for the ack.
        let _ = self.acks.send(self.frame.seq);
    }
}

/// Bind the listening socket
pub async fn bind(host: &str, port: u16) -> Result<TcpListener> {
    let listener = TcpListener::bind((host, port)).await?;
    info!("listening on {}", listener.local_addr()?);
    Ok(listener)
}

/// Accept producers until the channel's receiver is dropped
pub async fn serve(
    listener: TcpListener,
    handshake: Handshake,
    batches: UnboundedSender<IncomingBatch>,
) {
    loop {
        match listener.accept().await {
            Ok((stream, peer)) => {
                debug!("producer connected from {}", peer);
                let handshake = handshake.clone();
                let batches = batches.clone();
                tokio::spawn(async move {
                    if let Err(e) = handle_connection(stream, handshake, batches).await {
                        warn!("producer connection ended: {}", e);
                    }
                });
            }
            Err(e) => warn!("accept failed: {}", e),
        }
    }
}

async fn handle_connection(
    stream: TcpStream,
    handshake: Handshake,
    batches: UnboundedSender<IncomingBatch>,
) -> Result<()> {
    let (read_half, mut write_half) = stream.into_split();

    let mode = serde_json::to_string(&Reply::Mode { value: handshake })?;
    write_half.write_all(mode.as_bytes()).await?;
    write_half.write_all(b"\n").await?;

    // Acks for this connection funnel through one writer task.
    let (ack_tx, mut ack_rx) = mpsc::unbounded_channel::<u64>();
    tokio::spawn(async move {
        while let Some(seq) = ack_rx.recv().await {
            let reply = match serde_json::to_string(&Reply::Ack { seq }) {
                Ok(reply) => reply,
                Err(e) => {
                    warn!("ack serialization failed: {}", e);
                    continue;
                }
            };
            if write_half.write_all(reply.as_bytes()).await.is_err()
                || write_half.write_all(b"\n").await.is_err()
            {
                break;
            }
        }
    });

    let mut lines = BufReader::new(read_half).lines();
    while let Some(line) = lines.next_line().await? {
        match serde_json::from_str::<Frame>(&line) {
            Ok(frame) => {
                if batches
                    .send(IncomingBatch {
                        frame,
                        acks: ack_tx.clone(),
                    })
                    .is_err()
                {
                    // The dashboard is shutting down.
                    break;
                }
            }
            Err(e) => warn!("undecodable frame: {}", e),
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use packboard_core::Message;
    use tokio::io::{AsyncBufReadExt, BufReader};

    #[tokio::test]
    async fn test_handshake_frame_ack_round_trip() {
        let listener = bind("127.0.0.1", 0).await.unwrap();
        let addr = listener.local_addr().unwrap();

        let (tx, mut rx) = mpsc::unbounded_channel();
        tokio::spawn(serve(
            listener,
            Handshake {
                minimal: false,
                include_assets: vec!["main".to_string()],
            },
            tx,
        ));

        let stream = TcpStream::connect(addr).await.unwrap();
        let (read_half, mut write_half) = stream.into_split();
        let mut lines = BufReader::new(read_half).lines();

        let first = lines.next_line().await.unwrap().unwrap();
        match serde_json::from_str::<Reply>(&first).unwrap() {
            Reply::Mode { value } => {
                assert_eq!(value.include_assets, vec!["main"]);
            }
            other => panic!("expected handshake, got {:?}", other),
        }

        let frame = Frame::new(7, vec![Message::status("Compiling")]);
        let line = serde_json::to_string(&frame).unwrap();
        write_half
            .write_all(format!("{}\n", line).as_bytes())
            .await
            .unwrap();

        let batch = rx.recv().await.expect("frame delivered");
        assert_eq!(batch.frame, frame);
        batch.ack();

        let reply = lines.next_line().await.unwrap().unwrap();
        match serde_json::from_str::<Reply>(&reply).unwrap() {
            Reply::Ack { seq } => assert_eq!(seq, 7),
            other => panic!("expected ack, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_garbage_line_is_skipped_not_fatal() {
        let listener = bind("127.0.0.1", 0).await.unwrap();
        let addr = listener.local_addr().unwrap();

        let (tx, mut rx) = mpsc::unbounded_channel();
        tokio::spawn(serve(listener, Handshake::default(), tx));

        let stream = TcpStream::connect(addr).await.unwrap();
        let (read_half, mut write_half) = stream.into_split();
        let mut lines = BufReader::new(read_half).lines();
        lines.next_line().await.unwrap();

        let frame = Frame::new(1, vec![Message::Clear]);
        let good = serde_json::to_string(&frame).unwrap();
        write_half
            .write_all(format!("not json\n{}\n", good).as_bytes())
            .await
            .unwrap();

        let batch = rx.recv().await.expect("good frame still delivered");
        assert_eq!(batch.frame.seq, 1);
    }
}
