//! Boundary to the external public-key codec.
//!
//! Decoding a text-form key (`"STM..."`) and compressing it are
//! cryptographic concerns supplied by the caller; the serializer only needs
//! the resulting 33 wire bytes.

use hiverpc_core::error::FormatError;

/// A public key held in its 33-byte compressed wire form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PublicKey {
    bytes: [u8; 33],
}

impl PublicKey {
    pub fn from_compressed(bytes: [u8; 33]) -> Self {
        Self { bytes }
    }

    /// The compressed form as it is written to the wire.
    pub fn as_compressed(&self) -> &[u8; 33] {
        &self.bytes
    }
}

/// Decodes text-form public keys. Implemented outside this crate; the
/// serializer calls it for `account_update` memo keys.
pub trait KeyCodec {
    fn decode_public_key(&self, text: &str) -> Result<PublicKey, FormatError>;
}

impl<K: KeyCodec + ?Sized> KeyCodec for &K {
    fn decode_public_key(&self, text: &str) -> Result<PublicKey, FormatError> {
        (**self).decode_public_key(text)
    }
}
