// src/server/listener.rs
// Low-level TCP bind kept behind a helper so TLS could be swapped in later.
use anyhow::Result;
use std::net::SocketAddr;
use tokio::net::TcpListener;

pub async fn bind_tcp(addr: SocketAddr) -> Result<TcpListener> {
    let listener = TcpListener::bind(addr).await?;
    Ok(listener)
}
