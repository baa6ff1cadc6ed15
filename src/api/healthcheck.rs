//! Container health check for the `--health-check` flag.
//!
//! Speaks just enough HTTP/1.1 over a raw socket to hit `/health`, so the
//! binary needs no HTTP client at runtime.

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;

/// Request `/health` from the server listening on `port` on loopback.
/// Succeeds on a 200 whose body reports `"status":"ok"`.
pub async fn check(port: u16) -> Result<(), Box<dyn std::error::Error>> {
    let mut stream = TcpStream::connect(("127.0.0.1", port)).await?;
    let request =
        format!("GET /health HTTP/1.1\r\nHost: 127.0.0.1:{port}\r\nConnection: close\r\n\r\n");
    stream.write_all(request.as_bytes()).await?;

    let mut buf = Vec::new();
    stream.read_to_end(&mut buf).await?;
    let response = String::from_utf8_lossy(&buf);

    let status_line = response.lines().next().unwrap_or("");
    if !status_line.starts_with("HTTP/1.1 200") {
        return Err(format!("unexpected response: {status_line}").into());
    }
    if !response.contains(r#""status":"ok""#) {
        return Err("health body does not report ok".into());
    }
    Ok(())
}
