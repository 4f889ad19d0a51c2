// Server module entry point
// Provides listener creation, the accept loop, and shutdown signaling

pub mod connection;
pub mod listener;
pub mod signal;

use std::sync::atomic::AtomicUsize;
use std::sync::Arc;
use tokio::net::TcpListener;

use crate::config::Config;
use crate::logger;

pub use listener::create_listener;
pub use signal::{start_signal_handler, SignalHandler};

/// Accept loop: serve connections until a shutdown signal arrives
///
/// Each connection runs in its own task; the loop itself holds no request
/// state. In-flight connections finish naturally after the loop exits.
pub async fn run(
    listener: TcpListener,
    config: Arc<Config>,
    signals: Arc<SignalHandler>,
) -> Result<(), Box<dyn std::error::Error>> {
    let active_connections = Arc::new(AtomicUsize::new(0));

    loop {
        tokio::select! {
            accept_result = listener.accept() => {
                match accept_result {
                    Ok((stream, peer_addr)) => {
                        connection::accept_connection(
                            stream,
                            peer_addr,
                            &config,
                            &active_connections,
                        );
                    }
                    Err(e) => {
                        logger::log_error(&format!("Failed to accept connection: {e}"));
                    }
                }
            }

            () = signals.shutdown.notified() => {
                logger::log_shutdown();
                return Ok(());
            }
        }
    }
}
