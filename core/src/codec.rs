//! Payload transcoding between form text and wire bytes.
//!
//! Text mode passes the message through as its UTF-8 bytes. Hex mode
//! strips every non-hex-digit character (spaces, colons, dashes and the
//! like), enforces the 1-32 byte budget and even digit count,
//! then decodes digit pairs. The response direction mirrors the request
//! mode: lowercase hex, or text trimmed of surrounding whitespace.

use thiserror::Error;

/// Upper bound on filtered hex digits (32 bytes).
const MAX_HEX_DIGITS: usize = 64;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PayloadError {
    /// Filtered hex input is empty or longer than 32 bytes.
    #[error("Hex data must be between 1-32 bytes")]
    Size,
    /// Filtered hex input has an odd number of digits.
    #[error("Hex data is invalid (length is odd number of characters)")]
    Parity,
    /// A digit pair failed to decode. Unreachable after the character
    /// filter, but checked rather than assumed.
    #[error("Invalid hex data")]
    Decode,
}

/// A send-request payload, carrying its encoding mode.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Payload {
    /// Raw text, written verbatim as UTF-8 bytes.
    Text(String),
    /// Hex digit pairs, possibly interspersed with separators.
    Hex(String),
}

impl Payload {
    pub fn from_form(message: String, hex_mode: bool) -> Self {
        if hex_mode {
            Self::Hex(message)
        } else {
            Self::Text(message)
        }
    }

    /// The exact bytes this payload puts on the wire.
    pub fn wire_bytes(&self) -> Result<Vec<u8>, PayloadError> {
        match self {
            Self::Text(text) => Ok(text.as_bytes().to_vec()),
            Self::Hex(text) => decode_hex_payload(text),
        }
    }

    /// Renders received bytes in the mode the request used.
    pub fn render_response(&self, received: &[u8]) -> String {
        match self {
            Self::Text(_) => String::from_utf8_lossy(received).trim().to_string(),
            Self::Hex(_) => encode_hex(received),
        }
    }
}

/// Size is checked before parity: a 65-digit input is over budget, not
/// merely odd.
fn decode_hex_payload(input: &str) -> Result<Vec<u8>, PayloadError> {
    let digits: String = input.chars().filter(|c| c.is_ascii_hexdigit()).collect();

    if digits.is_empty() || digits.len() > MAX_HEX_DIGITS {
        return Err(PayloadError::Size);
    }
    if digits.len() % 2 != 0 {
        return Err(PayloadError::Parity);
    }

    (0..digits.len())
        .step_by(2)
        .map(|i| u8::from_str_radix(&digits[i..i + 2], 16).map_err(|_| PayloadError::Decode))
        .collect()
}

fn encode_hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
