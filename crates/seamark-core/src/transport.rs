//! Transport collaborator seam.
//!
//! One frame, one send. Implementations open whatever underlying resource
//! they need per call and release it on every exit path; the session never
//! sees the connection, only the result. No acknowledgment is read back.

use std::io;

use seamark_proto::BitString;
use thiserror::Error;

/// A frame rendered to its on-air printable form.
///
/// The wire image is one `'0'` or `'1'` character per bit; the transport
/// writes these bytes followed by a terminating NUL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedFrame(String);

impl RenderedFrame {
    /// Wrap an already rendered frame.
    #[must_use]
    pub fn new(rendered: String) -> Self {
        Self(rendered)
    }

    /// Printable frame characters.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Frame bytes as written to the wire (without the trailing NUL).
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }

    /// Frame length in bits.
    #[must_use]
    pub fn bit_len(&self) -> usize {
        self.0.len()
    }
}

impl From<&BitString> for RenderedFrame {
    fn from(bits: &BitString) -> Self {
        Self(bits.render())
    }
}

/// Errors from the transport collaborator.
///
/// Every transport failure is terminal for the session; there are no
/// retries anywhere in the protocol.
#[derive(Error, Debug)]
pub enum TransportError {
    /// Opening the underlying connection failed
    #[error("failed to open transport to {endpoint}: {source}")]
    Open {
        /// Endpoint the transport tried to reach
        endpoint: String,
        /// Underlying I/O error
        source: io::Error,
    },

    /// Writing the frame failed
    #[error("failed to send frame of {bits} bits: {source}")]
    Send {
        /// Length of the frame that failed to send
        bits: usize,
        /// Underlying I/O error
        source: io::Error,
    },
}

/// Outgoing frame sink.
///
/// Implementations must acquire and release their underlying resource per
/// call, including on failure.
pub trait Transport {
    /// Send one rendered frame.
    ///
    /// # Errors
    ///
    /// - [`TransportError`] on open or write failure; the caller treats
    ///   either as fatal for the session
    fn send(&mut self, frame: &RenderedFrame) -> Result<(), TransportError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rendered_frame_preserves_bits() {
        let mut bits = BitString::new();
        bits.push_uint(5, 3).unwrap();
        let frame = RenderedFrame::from(&bits);
        assert_eq!(frame.as_str(), "101");
        assert_eq!(frame.bit_len(), 3);
        assert_eq!(frame.as_bytes(), b"101");
    }
}
