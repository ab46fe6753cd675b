//! HTTP client for the order backend.
//!
//! Every request carries basic-auth credentials. A client built without credentials
//! refuses to send anything and reports `Unauthorized`, which keeps a missing `.env`
//! distinguishable from a network outage.

use crate::{
    api::OrderBackend,
    config::{Credentials, settings::ApiConfig},
    entities::{Customer, CustomerSummary, ProductOrder},
    errors::{Error, Result},
    export::pdf::PdfConverter,
};
use async_trait::async_trait;
use reqwest::{RequestBuilder, Response, StatusCode, header};
use serde::de::DeserializeOwned;
use tracing::instrument;

/// Backend client.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
    credentials: Option<Credentials>,
}

impl ApiClient {
    /// Builds a client for `config.base_url` with the configured request timeout.
    ///
    /// # Errors
    /// Returns `Config` if the underlying HTTP client cannot be constructed.
    pub fn new(config: &ApiConfig, credentials: Option<Credentials>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| Error::Config {
                message: format!("Failed to create HTTP client: {e}"),
            })?;

        if credentials.is_none() {
            tracing::warn!("No backend credentials configured; requests will be refused");
        }

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            credentials,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn authorize(&self, request: RequestBuilder) -> Result<RequestBuilder> {
        let credentials = self.credentials.as_ref().ok_or_else(|| Error::Unauthorized {
            message: "no backend credentials configured".to_string(),
        })?;
        Ok(request.basic_auth(&credentials.username, Some(&credentials.password)))
    }

    async fn send(&self, request: RequestBuilder, what: &str) -> Result<Response> {
        let response = self.authorize(request)?.send().await.map_err(|e| {
            let message = if e.is_timeout() {
                format!("{what}: request timed out")
            } else {
                format!("{what}: {e}")
            };
            tracing::error!("{}", message);
            Error::NetworkFailure { message }
        })?;

        let status = response.status();
        tracing::debug!("{} -> {}", what, status);
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let err = classify_failure(status, what, &body);
        tracing::error!("{}", err);
        Err(err)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str, what: &str) -> Result<T> {
        let response = self
            .send(
                self.client
                    .get(self.url(path))
                    .header(header::ACCEPT, "application/json"),
                what,
            )
            .await?;

        response.json().await.map_err(|e| Error::ServiceFailure {
            status: StatusCode::OK.as_u16(),
            message: format!("{what}: malformed response body: {e}"),
        })
    }
}

/// Maps a non-success status to the error taxonomy.
fn classify_failure(status: StatusCode, what: &str, body: &str) -> Error {
    let detail = if body.trim().is_empty() {
        status.to_string()
    } else {
        format!("{status}: {}", body.trim())
    };

    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Error::Unauthorized {
            message: format!("{what}: {detail}"),
        },
        _ => Error::ServiceFailure {
            status: status.as_u16(),
            message: format!("{what}: {detail}"),
        },
    }
}

#[async_trait]
impl OrderBackend for ApiClient {
    #[instrument(skip(self))]
    async fn customer_names(&self) -> Result<Vec<CustomerSummary>> {
        let customers: Vec<CustomerSummary> = self
            .get_json("customer/names", "Fetching customers")
            .await?;
        tracing::info!("Fetched {} customers", customers.len());
        Ok(customers)
    }

    #[instrument(skip(self))]
    async fn customer(&self, id: &str) -> Result<Customer> {
        self.get_json(&format!("customer/{id}"), "Fetching customer details")
            .await
    }

    #[instrument(skip(self))]
    async fn products(&self, customer_id: &str) -> Result<Vec<ProductOrder>> {
        let products: Vec<ProductOrder> = self
            .get_json(&format!("products/{customer_id}"), "Fetching products")
            .await?;
        tracing::info!(
            "Fetched {} products for customer {}",
            products.len(),
            customer_id
        );
        Ok(products)
    }

    #[instrument(skip(self, order), fields(category = %order.category))]
    async fn submit_order(&self, order: &ProductOrder) -> Result<()> {
        self.send(
            self.client.post(self.url("products")).json(order),
            "Submitting order",
        )
        .await?;
        Ok(())
    }
}

#[async_trait]
impl PdfConverter for ApiClient {
    #[instrument(skip(self, html), fields(bytes = html.len()))]
    async fn convert(&self, html: &str) -> Result<Vec<u8>> {
        let response = self
            .send(
                self.client
                    .post(self.url("pdf/convert"))
                    .header(header::CONTENT_TYPE, "text/html")
                    .body(html.to_string()),
                "Converting invoice to PDF",
            )
            .await?;

        let bytes = response.bytes().await.map_err(|e| Error::NetworkFailure {
            message: format!("Reading PDF response: {e}"),
        })?;
        Ok(bytes.to_vec())
    }
}
