use serde::Deserialize;

use crate::{configs::ClientConfig, error::PredictorError, schema::Record};

/// Something that turns a record into a predicted price.
///
/// [`HttpClient`] talks to the real endpoint; tests plug in their own.
#[allow(async_fn_in_trait)]
#[trait_variant::make(PredictionClient: Send)]
pub trait PredictionClientTemplate {
    /// Sends a single record and waits for its prediction.
    ///
    /// # Arguments
    /// * `record` - The validated record to price.
    ///
    /// # Returns
    /// The first element of the predicted price sequence.
    ///
    /// # Errors
    /// Any transport failure, non-success status or unexpected body.
    async fn predict(&self, record: &Record) -> Result<f64, PredictorError>;
}

/// Body returned by the prediction endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct PredictionResponse {
    pub predicted_price: Vec<f64>,
}

impl PredictionResponse {
    /// Parses a raw response body and extracts its first prediction.
    ///
    /// # Errors
    /// `MalformedResponse` if the body is not a `{"predicted_price": [..]}` object with at
    /// least one number.
    pub fn parse(body: &[u8]) -> Result<f64, PredictorError> {
        let response: Self = serde_json::from_slice(body)
            .map_err(|e| PredictorError::MalformedResponse(e.to_string()))?;
        response.first()
    }

    pub fn first(&self) -> Result<f64, PredictorError> {
        self.predicted_price
            .first()
            .copied()
            .ok_or_else(|| PredictorError::MalformedResponse("predicted_price is empty".into()))
    }
}

/// Posts records as JSON to the configured prediction endpoint.
///
/// No retries and no timeout: a request runs until the transport gives up.
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpClient {
    /// Creates a new `HttpClient`.
    ///
    /// # Errors
    /// Returns `Transport` if the underlying client cannot be built.
    pub fn new(config: ClientConfig) -> Result<Self, PredictorError> {
        let client = reqwest::Client::builder().build()?;
        Ok(Self {
            client,
            endpoint: config.endpoint,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl PredictionClient for HttpClient {
    async fn predict(&self, record: &Record) -> Result<f64, PredictorError> {
        let response = self.client.post(&self.endpoint).json(record).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(PredictorError::Status(status.as_u16()));
        }

        let body = response.bytes().await?;
        PredictionResponse::parse(&body)
    }
}
