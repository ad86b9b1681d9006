use crate::core::config::ExchangeConfig;
use crate::core::errors::ExchangeError;
use crate::core::kernel::{RestClient, RestRequest, Signer};
use crate::core::types::{params_to_pairs, Params};
use crate::exchanges::cryptopia::codec::decode_response;
use crate::exchanges::cryptopia::methods::ApiMethod;
use crate::exchanges::cryptopia::signer::{create_signer, JSON_CONTENT_TYPE};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{debug, instrument};

/// Cryptopia API client.
///
/// Holds only immutable configuration, the transport and an optional signer,
/// so clones are cheap and may be used from many tasks at once.
pub struct CryptopiaClient<R: RestClient> {
    rest: Arc<R>,
    config: Arc<ExchangeConfig>,
    signer: Option<Arc<dyn Signer>>,
}

impl<R: RestClient> Clone for CryptopiaClient<R> {
    fn clone(&self) -> Self {
        Self {
            rest: Arc::clone(&self.rest),
            config: Arc::clone(&self.config),
            signer: self.signer.clone(),
        }
    }
}

impl<R: RestClient> std::fmt::Debug for CryptopiaClient<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CryptopiaClient")
            .field("config", &self.config)
            .field("has_signer", &self.signer.is_some())
            .finish_non_exhaustive()
    }
}

impl<R: RestClient> CryptopiaClient<R> {
    /// Signer is derived from the config; without credentials only public
    /// methods will dispatch.
    pub fn new(rest: R, config: ExchangeConfig) -> Self {
        let signer = config.has_credentials().then(|| create_signer(&config));
        Self {
            rest: Arc::new(rest),
            config: Arc::new(config),
            signer,
        }
    }

    /// Use a caller-supplied signer for private methods, regardless of the
    /// credentials held in `config`
    pub fn with_signer(rest: R, config: ExchangeConfig, signer: Arc<dyn Signer>) -> Self {
        Self {
            rest: Arc::new(rest),
            config: Arc::new(config),
            signer: Some(signer),
        }
    }

    pub fn config(&self) -> &ExchangeConfig {
        &self.config
    }

    /// Full URL and path of a method, e.g. `(https://host/api/GetMarkets, /api/GetMarkets)`
    pub fn endpoint(&self, method: ApiMethod) -> (String, String) {
        let url = format!("{}/{}", self.config.api_root(), method.name());
        let path = format!(
            "/{}/{}",
            self.config.api_version.trim_matches('/'),
            method.name()
        );
        (url, path)
    }

    /// Validate, classify and (for private methods) sign a call without sending it
    pub fn prepare(&self, method: &str, params: &Params) -> Result<RestRequest, ExchangeError> {
        let method: ApiMethod = method.parse()?;
        if method.is_private() {
            let signer = self.require_signer(method)?;
            let nonce = signer.next_nonce()?;
            self.build_private(method, params, signer, nonce)
        } else {
            Ok(self.build_public(method, params))
        }
    }

    /// Like `prepare`, with a caller-chosen nonce for private methods
    pub fn prepare_with_nonce(
        &self,
        method: &str,
        params: &Params,
        nonce: u64,
    ) -> Result<RestRequest, ExchangeError> {
        let method: ApiMethod = method.parse()?;
        if method.is_private() {
            let signer = self.require_signer(method)?;
            self.build_private(method, params, signer, nonce)
        } else {
            Ok(self.build_public(method, params))
        }
    }

    /// Call a method by name and return the decoded payload
    #[instrument(skip(self, params), fields(exchange = "cryptopia", method = %method, param_count = params.len()))]
    pub async fn dispatch(&self, method: &str, params: Params) -> Result<Value, ExchangeError> {
        let request = self.prepare(method, &params)?;
        self.execute(request).await
    }

    /// Call a method by name and deserialize the payload
    pub async fn dispatch_json<T: DeserializeOwned>(
        &self,
        method: ApiMethod,
        params: Params,
    ) -> Result<T, ExchangeError> {
        let value = self.dispatch(method.name(), params).await?;
        serde_json::from_value(value).map_err(|e| {
            ExchangeError::DeserializationError(format!(
                "Failed to deserialize {} response: {}",
                method, e
            ))
        })
    }

    /// Send a prepared request and decode the response
    pub async fn execute(&self, request: RestRequest) -> Result<Value, ExchangeError> {
        let response = self.rest.execute(request).await?;
        decode_response(response)
    }

    fn require_signer(&self, method: ApiMethod) -> Result<&Arc<dyn Signer>, ExchangeError> {
        self.signer
            .as_ref()
            .ok_or_else(|| ExchangeError::MissingCredentials(method.name().to_string()))
    }

    fn build_public(&self, method: ApiMethod, params: &Params) -> RestRequest {
        let (url, _) = self.endpoint(method);
        debug!(method = %method, "building public request");
        RestRequest::get(url)
            .with_query(params_to_pairs(params))
            .with_header("Content-Type", JSON_CONTENT_TYPE)
    }

    fn build_private(
        &self,
        method: ApiMethod,
        params: &Params,
        signer: &Arc<dyn Signer>,
        nonce: u64,
    ) -> Result<RestRequest, ExchangeError> {
        let (url, path) = self.endpoint(method);
        let payload = signer.sign_request(&url, &path, params, nonce)?;
        debug!(method = %method, nonce, "building private request");

        let mut headers: Vec<(String, String)> = payload.headers.into_iter().collect();
        headers.sort();

        let mut request =
            RestRequest::post(url, payload.body).with_header("Content-Type", payload.content_type);
        request.headers.extend(headers);
        Ok(request)
    }
}

impl<R: RestClient + 'static> CryptopiaClient<R> {
    /// Callback flavor of `dispatch`.
    ///
    /// Unsupported methods and missing credentials are returned immediately
    /// and the callback is never called. Otherwise the request runs on the
    /// current tokio runtime and `callback` is invoked exactly once with the
    /// outcome.
    pub fn dispatch_with<F>(
        &self,
        method: &str,
        params: Params,
        callback: F,
    ) -> Result<JoinHandle<()>, ExchangeError>
    where
        F: FnOnce(Result<Value, ExchangeError>) + Send + 'static,
    {
        let request = self.prepare(method, &params)?;
        let handle = tokio::runtime::Handle::try_current()
            .map_err(|e| ExchangeError::Other(format!("No tokio runtime available: {}", e)))?;

        let client = self.clone();
        Ok(handle.spawn(async move {
            callback(client.execute(request).await);
        }))
    }
}
