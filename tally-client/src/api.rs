use {
    thiserror::Error,
    serde::de::DeserializeOwned,
    tally_core::{Counter, CounterOperation, UpdateCounterRequest},
};

/// Seam between the display state machine and the transport. Lets tests
/// drive the state machine without a server.
#[allow(async_fn_in_trait)]
pub trait CounterRpc {
    async fn get_counter(&self) -> Result<Option<Counter>, ApiError>;
    async fn update_counter(&self, operation: CounterOperation) -> Result<Counter, ApiError>;
}

pub struct CounterApi {
    endpoint: String,
    client: reqwest::Client,
}

impl CounterApi {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            client: reqwest::Client::new(),
        }
    }

    fn url(&self, method: &str) -> String {
        format!("{}/rpc/{method}", self.endpoint)
    }

    async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ApiError> {
        if !response.status().is_success() {
            return Err(ApiError::UnexpectedStatus { status: response.status().as_u16() });
        }

        response.json().await
            .map_err(|err| ApiError::ResponseDecode { reason: err.to_string() })
    }
}

impl CounterRpc for CounterApi {
    async fn get_counter(&self) -> Result<Option<Counter>, ApiError> {
        let response = self.client.post(self.url("get_counter"))
            .send().await
            .map_err(|err| ApiError::RequestSend { reason: err.to_string() })?;
        Self::decode(response).await
    }

    async fn update_counter(&self, operation: CounterOperation) -> Result<Counter, ApiError> {
        let response = self.client.post(self.url("update_counter"))
            .json(&UpdateCounterRequest { operation })
            .send().await
            .map_err(|err| ApiError::RequestSend { reason: err.to_string() })?;
        Self::decode(response).await
    }
}

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("failed to send request: {reason}")]
    RequestSend { reason: String },

    #[error("unexpected response status: {status}")]
    UnexpectedStatus { status: u16 },

    #[error("failed to decode response: {reason}")]
    ResponseDecode { reason: String },
}
