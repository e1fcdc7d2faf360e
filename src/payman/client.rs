//! Payman HTTP API client.

use crate::config::ToolKitConfig;
use crate::error::{BackendError, PaykitError};
use crate::payman::PaymentsApi;
use crate::types::{
    Currency, CustomerDepositRequest, PaymentDestinationSpec, SearchDestinationsQuery,
    SendPaymentRequest,
};
use async_trait::async_trait;
use reqwest::Url;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

const SECRET_HEADER: &str = "x-payman-api-secret";

/// Payman API client.
#[derive(Clone)]
pub struct PaymanClient {
    base_url: Url,
    api_secret: String,
    http: reqwest::Client,
}

impl std::fmt::Debug for PaymanClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PaymanClient")
            .field("base_url", &self.base_url.as_str())
            .finish_non_exhaustive()
    }
}

impl PaymanClient {
    /// Validate config and create a client. Makes no network calls.
    pub fn new(config: &ToolKitConfig) -> Result<Self, PaykitError> {
        config.validate()?;

        let raw = config.resolved_base_url();
        let base_url = Url::parse(raw).map_err(|e| {
            PaykitError::Configuration(format!("invalid base URL '{}': {}", raw, e))
        })?;
        if base_url.cannot_be_a_base() {
            return Err(PaykitError::Configuration(format!(
                "base URL '{}' cannot carry a path",
                raw
            )));
        }

        let http = reqwest::Client::builder()
            .user_agent(concat!("paykit/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| PaykitError::Configuration(format!("HTTP client setup failed: {}", e)))?;

        Ok(Self {
            base_url,
            api_secret: config.api_secret.clone(),
            http,
        })
    }

    /// API root this client sends requests to.
    pub fn base_url(&self) -> &str {
        self.base_url.as_str()
    }

    /// Build an endpoint URL from path segments (each one percent-encoded).
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    async fn get<T: DeserializeOwned>(
        &self,
        url: Url,
        query: &[(&str, &str)],
    ) -> Result<T, BackendError> {
        debug!("Payman GET {}", url.path());
        let resp = self
            .http
            .get(url)
            .header(SECRET_HEADER, &self.api_secret)
            .query(query)
            .send()
            .await?;
        Self::decode(resp).await
    }

    async fn post<B: serde::Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        url: Url,
        body: &B,
    ) -> Result<T, BackendError> {
        debug!("Payman POST {}", url.path());
        let resp = self
            .http
            .post(url)
            .header(SECRET_HEADER, &self.api_secret)
            .json(body)
            .send()
            .await?;
        Self::decode(resp).await
    }

    async fn decode<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, BackendError> {
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(BackendError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = resp.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|e| BackendError::Decode(e.to_string()))
    }
}

#[async_trait]
impl PaymentsApi for PaymanClient {
    async fn send_payment(&self, request: &SendPaymentRequest) -> Result<Value, BackendError> {
        self.post(self.endpoint(&["payments", "send-payment"]), request)
            .await
    }

    async fn search_destinations(
        &self,
        query: &SearchDestinationsQuery,
    ) -> Result<Value, BackendError> {
        self.get(
            self.endpoint(&["payments", "search-destinations"]),
            &query.query_pairs(),
        )
        .await
    }

    async fn create_payee(&self, payee: &PaymentDestinationSpec) -> Result<Value, BackendError> {
        self.post(self.endpoint(&["payments", "destinations"]), payee)
            .await
    }

    async fn initiate_customer_deposit(
        &self,
        request: &CustomerDepositRequest,
    ) -> Result<Value, BackendError> {
        self.post(
            self.endpoint(&["payments", "initiate-customer-deposit"]),
            request,
        )
        .await
    }

    async fn get_customer_balance(
        &self,
        customer_id: &str,
        currency: Currency,
    ) -> Result<f64, BackendError> {
        let url = self.endpoint(&[
            "balances",
            "customers",
            customer_id,
            "currencies",
            currency.code(),
        ]);
        self.get(url, &[]).await
    }

    async fn get_spendable_balance(&self, currency: Currency) -> Result<f64, BackendError> {
        self.get(self.endpoint(&["balances", "currencies", currency.code()]), &[])
            .await
    }
}
