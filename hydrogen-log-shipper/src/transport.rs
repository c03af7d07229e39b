//! Raw HTTP/1.1 POST over a blocking `TcpStream`, with TLS via
//! `native-tls` for `https://` endpoints.
//!
//! No HTTP client crate: the shipper only ever sends a single POST with a
//! fixed set of headers and no connection reuse, redirect handling, or
//! chunked transfer, so a hand-rolled request is simpler and has no surface
//! for the parts of an HTTP client this shipper doesn't use.

use std::io::{Read, Write};
use std::net::{TcpStream, ToSocketAddrs};
use std::time::Duration;

use url::Url;

use crate::error::{Result, ShipError};

pub struct Destination {
    pub host: String,
    pub port: u16,
    pub path: String,
    pub tls: bool,
}

impl Destination {
    pub fn parse(raw_url: &str) -> Result<Destination> {
        let url = Url::parse(raw_url).map_err(|err| ShipError::InvalidUrl {
            url: raw_url.to_string(),
            reason: err.to_string(),
        })?;
        let tls = match url.scheme() {
            "https" => true,
            "http" => false,
            other => return Err(ShipError::UnsupportedScheme(other.to_string())),
        };
        let host = url
            .host_str()
            .ok_or_else(|| ShipError::InvalidUrl { url: raw_url.to_string(), reason: "missing host".into() })?
            .to_string();
        let port = url.port().unwrap_or(if tls { 443 } else { 80 });
        let path = if url.path().is_empty() { "/".to_string() } else { url.path().to_string() };
        Ok(Destination { host, port, path, tls })
    }
}

/// Sends `body` as a single POST request to `destination` and returns
/// whether the response status line indicated success (`200` or `204`).
pub fn send(destination: &Destination, body: &[u8], timeout: Duration) -> Result<bool> {
    let addr = (destination.host.as_str(), destination.port)
        .to_socket_addrs()
        .map_err(|source| ShipError::Connect { host: destination.host.clone(), port: destination.port, source })?
        .next()
        .ok_or_else(|| ShipError::Connect {
            host: destination.host.clone(),
            port: destination.port,
            source: std::io::Error::new(std::io::ErrorKind::AddrNotAvailable, "no address resolved"),
        })?;

    let stream = TcpStream::connect_timeout(&addr, timeout)
        .map_err(|source| ShipError::Connect { host: destination.host.clone(), port: destination.port, source })?;
    stream.set_read_timeout(Some(timeout)).map_err(ShipError::Write)?;
    stream.set_write_timeout(Some(timeout)).map_err(ShipError::Write)?;

    if destination.tls {
        let connector = native_tls::TlsConnector::new()
            .map_err(|err| ShipError::Tls { host: destination.host.clone(), reason: err.to_string() })?;
        let mut tls_stream = connector
            .connect(&destination.host, stream)
            .map_err(|err| ShipError::Tls { host: destination.host.clone(), reason: err.to_string() })?;
        write_request(&mut tls_stream, destination, body)?;
        read_status(&mut tls_stream)
    } else {
        let mut stream = stream;
        write_request(&mut stream, destination, body)?;
        read_status(&mut stream)
    }
}

fn write_request<S: Write>(stream: &mut S, destination: &Destination, body: &[u8]) -> Result<()> {
    let header = format!(
        "POST {path} HTTP/1.1\r\nHost: {host}\r\nContent-Type: application/stream+json\r\nContent-Length: {len}\r\nConnection: close\r\n\r\n",
        path = destination.path,
        host = destination.host,
        len = body.len(),
    );
    stream.write_all(header.as_bytes()).map_err(ShipError::Write)?;
    stream.write_all(body).map_err(ShipError::Write)?;
    stream.flush().map_err(ShipError::Write)
}

fn read_status<S: Read>(stream: &mut S) -> Result<bool> {
    let mut buf = Vec::with_capacity(256);
    let mut chunk = [0u8; 256];
    loop {
        let n = stream.read(&mut chunk).map_err(ShipError::Read)?;
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);
        if buf.windows(4).any(|w| w == b"\r\n\r\n") || buf.len() >= 4096 {
            break;
        }
    }
    let status_line = String::from_utf8_lossy(&buf);
    let first_line = status_line.lines().next().unwrap_or_default();
    if first_line.contains(" 200 ") || first_line.contains(" 204 ") || first_line.ends_with(" 204") {
        Ok(true)
    } else if first_line.is_empty() {
        Err(ShipError::RejectedStatus("no response".to_string()))
    } else {
        Err(ShipError::RejectedStatus(first_line.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_https_url_with_default_port() {
        let destination = Destination::parse("https://logs.example.internal/insert").unwrap();
        assert_eq!(destination.host, "logs.example.internal");
        assert_eq!(destination.port, 443);
        assert_eq!(destination.path, "/insert");
        assert!(destination.tls);
    }

    #[test]
    fn parses_http_url_with_explicit_port() {
        let destination = Destination::parse("http://127.0.0.1:9428/insert/jsonline").unwrap();
        assert_eq!(destination.port, 9428);
        assert!(!destination.tls);
    }

    #[test]
    fn rejects_unsupported_scheme() {
        let err = Destination::parse("ftp://example.com/").unwrap_err();
        assert!(matches!(err, ShipError::UnsupportedScheme(_)));
    }
}
