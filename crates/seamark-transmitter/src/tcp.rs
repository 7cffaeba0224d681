//! Blocking TCP transport: one connection per frame.
//!
//! The modem chain expects each frame as printable bit characters followed
//! by a NUL, on its own connection, with nothing read back. Dropping the
//! stream releases the connection on every exit path, including failures.

use std::io::Write;
use std::net::TcpStream;

use seamark_core::{RenderedFrame, Transport, TransportError};

/// Transport writing each frame over a fresh TCP connection.
pub struct TcpTransport {
    endpoint: String,
}

impl TcpTransport {
    /// Transport targeting `endpoint` (host:port).
    pub fn new(endpoint: String) -> Self {
        Self { endpoint }
    }
}

impl Transport for TcpTransport {
    fn send(&mut self, frame: &RenderedFrame) -> Result<(), TransportError> {
        let mut stream = TcpStream::connect(&self.endpoint).map_err(|source| {
            TransportError::Open { endpoint: self.endpoint.clone(), source }
        })?;

        stream
            .write_all(frame.as_bytes())
            .and_then(|()| stream.write_all(&[0]))
            .map_err(|source| TransportError::Send { bits: frame.bit_len(), source })
    }
}
