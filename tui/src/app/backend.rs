use predictor::HttpClient;
use tokio::runtime::Handle;

/// What screens need to reach the prediction endpoint without blocking the UI thread.
#[derive(Debug, Clone)]
pub struct Backend {
    pub client: HttpClient,
    pub runtime: Handle,
}

impl Backend {
    pub fn new(client: HttpClient, runtime: Handle) -> Self {
        Self { client, runtime }
    }
}
