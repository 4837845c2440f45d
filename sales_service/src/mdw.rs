use anyhow::{Context, Result, anyhow};
use request_http_parser::parser::Request;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;

use crate::constant::BAD_REQUEST;

pub struct Middleware {}

impl Middleware {
    pub async fn new(stream: &mut TcpStream) -> Result<Request> {
        let mut buffer = [0; 1024];
        let size = stream
            .read(&mut buffer)
            .await
            .context("Failed to read stream")?;
        if size >= 1024 {
            let _ = stream
                .write_all(format!("{}{}", BAD_REQUEST, "Request too large").as_bytes())
                .await
                .context("Failed to write");

            let _ = stream.flush().await.context("Failed to flush");

            return Err(anyhow!("request too large"));
        }
        let req_str = String::from_utf8_lossy(&buffer[..size]);
        match Request::new(&req_str) {
            Ok(request) => Ok(request),
            Err(e) => {
                let _ = stream
                    .write_all(format!("{}{}", BAD_REQUEST, e).as_bytes())
                    .await
                    .context("Failed to write");

                let _ = stream.flush().await.context("Failed to flush");
                Err(anyhow!("request format invalid"))
            }
        }
    }
}
