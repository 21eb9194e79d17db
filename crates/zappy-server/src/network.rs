use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info};
use zappy_protocol::LineCodec;

/// One line of input from an identified or not-yet-identified client,
/// or a lifecycle event, routed to the tick-loop task (§4.2).
#[derive(Debug)]
pub enum ServerMessage {
    Connected { conn_id: u32, outbound: mpsc::UnboundedSender<String>, close: oneshot::Sender<()> },
    Line { conn_id: u32, text: String },
    Disconnected { conn_id: u32 },
}

/// Read and frame one accepted connection, forwarding complete lines to the
/// tick loop and writing back whatever the tick loop pushes onto the
/// per-connection outbound channel. Performs no simulation logic itself
/// (§4.1 ambient detail). The tick loop can force this task to stop (e.g.
/// a starved player's socket) by firing `close`.
pub async fn handle_connection(stream: TcpStream, conn_id: u32, inbound_tx: mpsc::UnboundedSender<ServerMessage>) {
    let peer = stream.peer_addr().ok();
    let (mut read_half, mut write_half) = stream.into_split();

    if write_half.write_all(b"WELCOME\n").await.is_err() {
        return;
    }

    let (outbound_tx, mut outbound_rx) = mpsc::unbounded_channel::<String>();
    let (close_tx, mut close_rx) = oneshot::channel();
    if inbound_tx
        .send(ServerMessage::Connected { conn_id, outbound: outbound_tx, close: close_tx })
        .is_err()
    {
        return;
    }

    let writer = tokio::spawn(async move {
        while let Some(line) = outbound_rx.recv().await {
            if write_half.write_all(line.as_bytes()).await.is_err() {
                break;
            }
        }
    });

    let mut codec = LineCodec::default();
    let mut buf = [0u8; 4096];
    loop {
        let n = tokio::select! {
            result = read_half.read(&mut buf) => match result {
                Ok(0) | Err(_) => break,
                Ok(n) => n,
            },
            _ = &mut close_rx => break,
        };
        codec.feed(&buf[..n]);
        while let Some(line) = codec.next_line() {
            if inbound_tx.send(ServerMessage::Line { conn_id, text: line }).is_err() {
                break;
            }
        }
    }

    debug!(?peer, conn_id, "connection closed");
    let _ = inbound_tx.send(ServerMessage::Disconnected { conn_id });
    writer.abort();
}

pub async fn accept_loop(
    listener: tokio::net::TcpListener,
    inbound_tx: mpsc::UnboundedSender<ServerMessage>,
    next_conn_id: std::sync::Arc<std::sync::atomic::AtomicU32>,
) {
    loop {
        match listener.accept().await {
            Ok((socket, peer)) => {
                let conn_id = next_conn_id.fetch_add(1, std::sync::atomic::Ordering::Relaxed);
                info!(%peer, conn_id, "accepted connection");
                let tx = inbound_tx.clone();
                tokio::spawn(async move {
                    handle_connection(socket, conn_id, tx).await;
                });
            }
            Err(e) => {
                tracing::error!("failed to accept connection: {e}");
            }
        }
    }
}
