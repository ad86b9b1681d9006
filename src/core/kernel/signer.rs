use crate::core::errors::ExchangeError;
use crate::core::types::Params;
use base64::engine::general_purpose;
use base64::Engine;
use std::collections::HashMap;
use zeroize::Zeroizing;

/// Headers and body produced by signing a private request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedPayload {
    pub headers: HashMap<String, String>,
    pub body: String,
    pub content_type: &'static str,
}

/// Result type for signing operations
pub type SignatureResult = Result<SignedPayload, ExchangeError>;

/// Signer trait for request authentication
///
/// Implementations are pure: the same url, path, params and nonce always
/// yield the same payload. Nonce generation is separate so callers can pin it.
pub trait Signer: Send + Sync {
    /// Sign a POST request
    ///
    /// # Arguments
    /// * `url` - Full request URL including scheme and host
    /// * `path` - URL path component, e.g. `/api/GetBalance`
    /// * `params` - Parameters to send as the request body
    /// * `nonce` - Value unique per request for this key
    fn sign_request(&self, url: &str, path: &str, params: &Params, nonce: u64)
        -> SignatureResult;

    /// Produce a fresh nonce in the unit this signer expects
    fn next_nonce(&self) -> Result<u64, ExchangeError>;
}

/// Decode a base64 API secret into key bytes that are wiped on drop
pub fn decode_secret(secret: &str) -> Result<Zeroizing<Vec<u8>>, ExchangeError> {
    general_purpose::STANDARD
        .decode(secret.trim())
        .map(Zeroizing::new)
        .map_err(|e| ExchangeError::AuthError(format!("Secret key is not valid base64: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_secret() {
        let bytes = decode_secret("c2VjcmV0").unwrap();
        assert_eq!(bytes.as_slice(), b"secret");
    }

    #[test]
    fn test_decode_secret_rejects_garbage() {
        let err = decode_secret("not base64!!").unwrap_err();
        assert!(matches!(err, ExchangeError::AuthError(_)));
    }
}
