//! HTTP access to the booking API: bus listing/search and booking creation.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use shared::{
    error::ErrorBody,
    protocol::{BookingConfirmation, BookingRequest, Bus, BusListResponse},
};
use thiserror::Error;
use tracing::debug;
use url::Url;

const BUSES_PATH: &str = "api/buses";
const BOOK_PATH: &str = "api/book";

#[derive(Debug, Error)]
pub enum ApiCallError {
    #[error("invalid booking API url: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error("booking API request failed: {0}")]
    Transport(#[source] reqwest::Error),
    #[error("booking API returned an unreadable body: {0}")]
    Decode(#[source] serde_json::Error),
    #[error("booking API rejected the request with status {status}")]
    Rejected {
        status: StatusCode,
        message: Option<String>,
    },
}

impl ApiCallError {
    /// Message the API attached to a rejection, when it sent one.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::Rejected { message, .. } => message.as_deref(),
            _ => None,
        }
    }
}

/// Optional origin/destination filter for the bus listing.
///
/// Only non-empty fields make it into the query string, so an empty filter
/// requests the same resource as an unfiltered load.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BusFilter {
    pub from: Option<String>,
    pub to: Option<String>,
}

impl BusFilter {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn from_inputs(from: &str, to: &str) -> Self {
        fn non_empty(raw: &str) -> Option<String> {
            let trimmed = raw.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        }

        Self {
            from: non_empty(from),
            to: non_empty(to),
        }
    }

    pub fn is_unfiltered(&self) -> bool {
        self.from.is_none() && self.to.is_none()
    }

    pub fn query_pairs(&self) -> Vec<(&'static str, &str)> {
        let mut pairs = Vec::with_capacity(2);
        if let Some(from) = &self.from {
            pairs.push(("from", from.as_str()));
        }
        if let Some(to) = &self.to {
            pairs.push(("to", to.as_str()));
        }
        pairs
    }
}

#[async_trait]
pub trait BookingApi: Send + Sync {
    async fn list_buses(&self, filter: &BusFilter) -> Result<Vec<Bus>, ApiCallError>;
    async fn book(&self, request: &BookingRequest) -> Result<BookingConfirmation, ApiCallError>;
}

#[async_trait]
impl<T> BookingApi for Arc<T>
where
    T: BookingApi + ?Sized,
{
    async fn list_buses(&self, filter: &BusFilter) -> Result<Vec<Bus>, ApiCallError> {
        (**self).list_buses(filter).await
    }

    async fn book(&self, request: &BookingRequest) -> Result<BookingConfirmation, ApiCallError> {
        (**self).book(request).await
    }
}

pub struct HttpBookingApi {
    http: Client,
    base_url: Url,
}

impl HttpBookingApi {
    pub fn new(base_url: Url) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(http: Client, base_url: Url) -> Self {
        Self {
            http,
            base_url: with_trailing_slash(base_url),
        }
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn buses_url(&self, filter: &BusFilter) -> Result<Url, ApiCallError> {
        let mut url = self.base_url.join(BUSES_PATH)?;
        let pairs = filter.query_pairs();
        if !pairs.is_empty() {
            url.query_pairs_mut().extend_pairs(pairs);
        }
        Ok(url)
    }

    pub fn book_url(&self) -> Result<Url, ApiCallError> {
        Ok(self.base_url.join(BOOK_PATH)?)
    }
}

#[async_trait]
impl BookingApi for HttpBookingApi {
    async fn list_buses(&self, filter: &BusFilter) -> Result<Vec<Bus>, ApiCallError> {
        let url = self.buses_url(filter)?;
        debug!(%url, "requesting bus list");
        let res = self
            .http
            .get(url)
            .send()
            .await
            .map_err(ApiCallError::Transport)?;
        let body: BusListResponse = decode_response(res).await?;
        Ok(body.buses)
    }

    async fn book(&self, request: &BookingRequest) -> Result<BookingConfirmation, ApiCallError> {
        let url = self.book_url()?;
        debug!(%url, bus_id = %request.bus_id, seats = request.seats, "submitting booking");
        let res = self
            .http
            .post(url)
            .json(request)
            .send()
            .await
            .map_err(ApiCallError::Transport)?;
        decode_response(res).await
    }
}

async fn decode_response<T: DeserializeOwned>(res: reqwest::Response) -> Result<T, ApiCallError> {
    let status = res.status();
    let body = res.bytes().await.map_err(ApiCallError::Transport)?;
    if !status.is_success() {
        return Err(ApiCallError::Rejected {
            status,
            message: ErrorBody::message_from_bytes(&body),
        });
    }
    serde_json::from_slice(&body).map_err(ApiCallError::Decode)
}

fn with_trailing_slash(mut url: Url) -> Url {
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url
}

#[cfg(test)]
#[path = "tests/api_tests.rs"]
mod tests;
