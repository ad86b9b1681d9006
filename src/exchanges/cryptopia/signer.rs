use crate::core::config::ExchangeConfig;
use crate::core::errors::ExchangeError;
use crate::core::kernel::{decode_secret, SignatureResult, SignedPayload, Signer};
use crate::core::types::{params_to_pairs, Params, SigningScheme};
use base64::engine::general_purpose;
use base64::Engine;
use hmac::{Hmac, Mac};
use md5::Md5;
use secrecy::{ExposeSecret, Secret};
use serde_json::Value;
use sha2::{Digest, Sha256, Sha512};
use std::collections::HashMap;
use std::sync::Arc;

type HmacSha256 = Hmac<Sha256>;
type HmacSha512 = Hmac<Sha512>;

pub const JSON_CONTENT_TYPE: &str = "application/json; charset=utf-8";
pub const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Signer for the `amx` Authorization header scheme
///
/// The nonce has one-second resolution. Private calls made within the same
/// second share a nonce, so space them at least a second apart.
pub struct AmxSigner {
    api_key: String,
    secret_key: Secret<String>,
}

impl AmxSigner {
    pub fn new(api_key: String, secret_key: String) -> Self {
        Self {
            api_key,
            secret_key: Secret::new(secret_key),
        }
    }

    /// Base64 MD5 of the request body
    pub fn content_digest(body: &str) -> String {
        general_purpose::STANDARD.encode(Md5::digest(body.as_bytes()))
    }

    /// key + "POST" + lowercase(urlencode(url)) + nonce + digest
    pub fn signing_string(&self, url: &str, nonce: u64, content_digest: &str) -> String {
        let encoded_url = urlencoding::encode(url).to_lowercase();
        format!(
            "{}POST{}{}{}",
            self.api_key, encoded_url, nonce, content_digest
        )
    }

    fn generate_signature(&self, signing_string: &str) -> Result<String, ExchangeError> {
        let key = decode_secret(self.secret_key.expose_secret())?;
        let mut mac = HmacSha256::new_from_slice(&key)
            .map_err(|e| ExchangeError::AuthError(format!("Failed to create HMAC: {}", e)))?;
        mac.update(signing_string.as_bytes());
        Ok(general_purpose::STANDARD.encode(mac.finalize().into_bytes()))
    }
}

impl Signer for AmxSigner {
    fn sign_request(
        &self,
        url: &str,
        _path: &str,
        params: &Params,
        nonce: u64,
    ) -> SignatureResult {
        let body = serde_json::to_string(params).map_err(|e| {
            ExchangeError::SerializationError(format!("Failed to serialize request body: {}", e))
        })?;

        let digest = Self::content_digest(&body);
        let signature = self.generate_signature(&self.signing_string(url, nonce, &digest))?;

        let mut headers = HashMap::new();
        headers.insert(
            "Authorization".to_string(),
            format!("amx {}:{}:{}", self.api_key, signature, nonce),
        );

        Ok(SignedPayload {
            headers,
            body,
            content_type: JSON_CONTENT_TYPE,
        })
    }

    /// Unix time in seconds
    fn next_nonce(&self) -> Result<u64, ExchangeError> {
        u64::try_from(chrono::Utc::now().timestamp())
            .map_err(|e| ExchangeError::Other(format!("System time error: {}", e)))
    }
}

/// Signer for the `API-Key`/`API-Sign` header pair scheme
pub struct MessageSigner {
    api_key: String,
    secret_key: Secret<String>,
    otp: Option<Secret<String>>,
}

impl MessageSigner {
    pub fn new(api_key: String, secret_key: String) -> Self {
        Self {
            api_key,
            secret_key: Secret::new(secret_key),
            otp: None,
        }
    }

    #[must_use]
    pub fn with_otp(mut self, otp: Option<String>) -> Self {
        self.otp = otp.map(Secret::new);
        self
    }

    /// Form-encode the parameters together with nonce (and otp, if any)
    pub fn message(&self, params: &Params, nonce: u64) -> Result<String, ExchangeError> {
        let mut signed = params.clone();
        signed.insert("nonce".to_string(), Value::from(nonce));
        if let Some(otp) = &self.otp {
            signed.insert("otp".to_string(), Value::from(otp.expose_secret().as_str()));
        }

        serde_urlencoded::to_string(params_to_pairs(&signed)).map_err(|e| {
            ExchangeError::SerializationError(format!("Failed to form-encode parameters: {}", e))
        })
    }

    fn generate_signature(
        &self,
        path: &str,
        nonce: u64,
        message: &str,
    ) -> Result<String, ExchangeError> {
        let digest = Sha256::digest(format!("{}{}", nonce, message).as_bytes());

        let key = decode_secret(self.secret_key.expose_secret())?;
        let mut mac = HmacSha512::new_from_slice(&key)
            .map_err(|e| ExchangeError::AuthError(format!("Failed to create HMAC: {}", e)))?;
        mac.update(path.as_bytes());
        mac.update(&digest);
        Ok(general_purpose::STANDARD.encode(mac.finalize().into_bytes()))
    }
}

impl Signer for MessageSigner {
    fn sign_request(&self, _url: &str, path: &str, params: &Params, nonce: u64) -> SignatureResult {
        let message = self.message(params, nonce)?;
        let signature = self.generate_signature(path, nonce, &message)?;

        let mut headers = HashMap::new();
        headers.insert("API-Key".to_string(), self.api_key.clone());
        headers.insert("API-Sign".to_string(), signature);

        Ok(SignedPayload {
            headers,
            body: message,
            content_type: FORM_CONTENT_TYPE,
        })
    }

    /// Unix time in microseconds
    fn next_nonce(&self) -> Result<u64, ExchangeError> {
        u64::try_from(chrono::Utc::now().timestamp_micros())
            .map_err(|e| ExchangeError::Other(format!("System time error: {}", e)))
    }
}

/// Build the signer matching the configured scheme
pub fn create_signer(config: &ExchangeConfig) -> Arc<dyn Signer> {
    let api_key = config.api_key().to_string();
    let secret_key = config.secret_key().to_string();

    match config.signing_scheme {
        SigningScheme::Amx => Arc::new(AmxSigner::new(api_key, secret_key)),
        SigningScheme::MessageSignature => Arc::new(
            MessageSigner::new(api_key, secret_key)
                .with_otp(config.otp_value().map(str::to_string)),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const URL: &str = "https://www.cryptopia.co.nz/api/GetBalance";
    const PATH: &str = "/api/GetBalance";
    // base64 of "secret"
    const SECRET: &str = "c2VjcmV0";

    fn params(entries: &[(&str, Value)]) -> Params {
        entries
            .iter()
            .map(|(k, v)| ((*k).to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn test_amx_known_vector() {
        let signer = AmxSigner::new("key".into(), SECRET.into());
        let payload = signer
            .sign_request(URL, PATH, &params(&[("Currency", json!("BTC"))]), 1_500_000_000)
            .unwrap();

        assert_eq!(payload.body, r#"{"Currency":"BTC"}"#);
        assert_eq!(payload.content_type, JSON_CONTENT_TYPE);
        assert_eq!(
            payload.headers.get("Authorization").unwrap(),
            "amx key:rCknQh/XGRZKrkRAfoGXo8Xk7yA1Ch34se10QTatwWk=:1500000000"
        );
    }

    #[test]
    fn test_amx_signing_string_lowercases_encoded_url() {
        let signer = AmxSigner::new("key".into(), SECRET.into());
        let digest = AmxSigner::content_digest("{}");
        assert_eq!(digest, "mZFLkyvTelC5g8XnyQrpOw==");
        assert_eq!(
            signer.signing_string(URL, 42, &digest),
            "keyPOSThttps%3a%2f%2fwww.cryptopia.co.nz%2fapi%2fgetbalance42mZFLkyvTelC5g8XnyQrpOw=="
        );
    }

    #[test]
    fn test_amx_is_deterministic_and_order_independent() {
        let signer = AmxSigner::new("key".into(), SECRET.into());
        let forward = params(&[("Market", json!("DOT/BTC")), ("Count", json!(10))]);
        let mut reversed = Params::new();
        reversed.insert("Count".into(), json!(10));
        reversed.insert("Market".into(), json!("DOT/BTC"));

        let a = signer.sign_request(URL, PATH, &forward, 7).unwrap();
        let b = signer.sign_request(URL, PATH, &reversed, 7).unwrap();
        assert_eq!(a, b);

        let c = signer.sign_request(URL, PATH, &forward, 8).unwrap();
        assert_ne!(a.headers, c.headers);
    }

    #[test]
    fn test_message_signature_known_vector() {
        let signer = MessageSigner::new("key".into(), SECRET.into());
        let payload = signer
            .sign_request(URL, PATH, &params(&[("Currency", json!("BTC"))]), 1_500_000_000_000_000)
            .unwrap();

        assert_eq!(payload.body, "Currency=BTC&nonce=1500000000000000");
        assert_eq!(payload.content_type, FORM_CONTENT_TYPE);
        assert_eq!(payload.headers.get("API-Key").unwrap(), "key");
        assert_eq!(
            payload.headers.get("API-Sign").unwrap(),
            "Bc578HGosO5Cn9ICdLSO/6GsXUS4+/MrJNRreFEGf7CE10D5WpcrvfqmwIjYjo+INqX+qaJJ4mByGe6KA5skTA=="
        );
    }

    #[test]
    fn test_message_signature_includes_otp() {
        let signer =
            MessageSigner::new("key".into(), SECRET.into()).with_otp(Some("123456".into()));
        let message = signer.message(&Params::new(), 5).unwrap();
        assert_eq!(message, "nonce=5&otp=123456");
    }

    #[test]
    fn test_message_signature_is_order_independent() {
        let signer = MessageSigner::new("key".into(), SECRET.into());
        let forward = params(&[("b", json!("2")), ("a", json!("1 2"))]);
        let reversed = params(&[("a", json!("1 2")), ("b", json!("2"))]);

        let a = signer.sign_request(URL, PATH, &forward, 99).unwrap();
        let b = signer.sign_request(URL, PATH, &reversed, 99).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.body, "a=1+2&b=2&nonce=99");
    }

    #[test]
    fn test_invalid_secret_is_auth_error() {
        let signer = AmxSigner::new("key".into(), "%%%".into());
        let err = signer
            .sign_request(URL, PATH, &Params::new(), 1)
            .unwrap_err();
        assert!(matches!(err, ExchangeError::AuthError(_)));
    }

    #[test]
    fn test_nonce_units() {
        let amx = AmxSigner::new("key".into(), SECRET.into());
        let message = MessageSigner::new("key".into(), SECRET.into());
        let seconds = amx.next_nonce().unwrap();
        let micros = message.next_nonce().unwrap();
        // both derived from the same clock, micros should be ~1e6 times larger
        assert!(micros / 1_000_000 >= seconds - 1);
        assert!(micros / 1_000_000 <= seconds + 1);
    }

    #[test]
    fn test_amx_nonce_repeats_within_a_second() {
        let amx = AmxSigner::new("key".into(), SECRET.into());
        let first = amx.next_nonce().unwrap();
        let second = amx.next_nonce().unwrap();
        // back-to-back calls land in the same second or the next one
        assert!(second >= first);
        assert!(second - first <= 1);
    }

    #[test]
    fn test_create_signer_follows_config() {
        let config = ExchangeConfig::new("key".into(), SECRET.into())
            .signing_scheme(SigningScheme::MessageSignature);
        let payload = create_signer(&config)
            .sign_request(URL, PATH, &Params::new(), 1)
            .unwrap();
        assert!(payload.headers.contains_key("API-Sign"));

        let config = ExchangeConfig::new("key".into(), SECRET.into());
        let payload = create_signer(&config)
            .sign_request(URL, PATH, &Params::new(), 1)
            .unwrap();
        assert!(payload.headers.contains_key("Authorization"));
    }
}
