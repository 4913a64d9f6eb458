//! TCP listener with port fallback

use anyhow::{anyhow, Context, Result};
use log::{info, warn};
use std::io::ErrorKind;
use tokio::net::TcpListener;

/// Bind `host:port`, moving to the next port while the current one is taken.
///
/// At most `retries` extra ports are tried. Any error other than
/// "address in use" is returned immediately.
pub async fn bind_with_retry(host: &str, port: u16, retries: u16) -> Result<TcpListener> {
    let mut attempt = 0;
    loop {
        let current = port
            .checked_add(attempt)
            .ok_or_else(|| anyhow!("No free port found starting at {port}"))?;

        match TcpListener::bind((host, current)).await {
            Ok(listener) => {
                info!("🚀 Server is running on {host}:{current}");
                return Ok(listener);
            }
            Err(e) if e.kind() == ErrorKind::AddrInUse && attempt < retries => {
                warn!("Port {current} is in use, trying port {}...", u32::from(current) + 1);
                attempt += 1;
            }
            Err(e) => {
                return Err(e).with_context(|| format!("Failed to bind {host}:{current}"));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_binds_requested_port_when_free() {
        let probe = TcpListener::bind(("127.0.0.1", 0)).await.unwrap();
        let port = probe.local_addr().unwrap().port();
        drop(probe);

        let listener = bind_with_retry("127.0.0.1", port, 0).await.unwrap();
        assert_eq!(listener.local_addr().unwrap().port(), port);
    }

    #[tokio::test]
    async fn test_moves_past_busy_port() {
        let busy = TcpListener::bind(("127.0.0.1", 0)).await.unwrap();
        let port = busy.local_addr().unwrap().port();

        let listener = bind_with_retry("127.0.0.1", port, 3).await.unwrap();
        let bound = listener.local_addr().unwrap().port();
        assert!(bound > port && bound <= port + 3);
    }

    #[tokio::test]
    async fn test_gives_up_without_retries() {
        let busy = TcpListener::bind(("127.0.0.1", 0)).await.unwrap();
        let port = busy.local_addr().unwrap().port();

        let err = bind_with_retry("127.0.0.1", port, 0).await.unwrap_err();
        assert!(err.to_string().contains(&port.to_string()));
    }
}
