use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;
use tracing::{info, warn};
use uuid::Uuid;

use plansim_core::domain::report::ValidationReport;

use crate::wire::{RemoteValidationRequest, RemoteValidationResponse};

pub const CORRELATION_HEADER: &str = "x-plansim-correlation-id";

#[derive(Debug, Error)]
pub enum RemoteValidationError {
    #[error("failed to initialize http client: {0}")]
    ClientInit(#[source] reqwest::Error),
    #[error("remote validation transport failure: {0}")]
    Transport(#[source] reqwest::Error),
    #[error("remote validation endpoint returned status {status}")]
    Status { status: u16 },
    #[error("could not decode remote validation response: {0}")]
    Decode(#[source] reqwest::Error),
    #[error("remote validation result was superseded by a newer request")]
    Superseded,
}

/// Seam for the external validation service; swapped for a test double in
/// unit tests.
#[async_trait]
pub trait RemoteValidator: Send + Sync {
    async fn validate(
        &self,
        request: &RemoteValidationRequest,
    ) -> Result<RemoteValidationResponse, RemoteValidationError>;
}

pub struct HttpRemoteValidator {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpRemoteValidator {
    pub fn new(
        endpoint: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, RemoteValidationError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(RemoteValidationError::ClientInit)?;
        Ok(Self { client, endpoint: endpoint.into() })
    }
}

#[async_trait]
impl RemoteValidator for HttpRemoteValidator {
    async fn validate(
        &self,
        request: &RemoteValidationRequest,
    ) -> Result<RemoteValidationResponse, RemoteValidationError> {
        let correlation_id = Uuid::new_v4().simple().to_string();
        info!(
            endpoint = %self.endpoint,
            correlation_id = %correlation_id,
            concurrent_users = request.test_concurrent_users,
            "remote validation request started"
        );

        let response = self
            .client
            .post(&self.endpoint)
            .header(CORRELATION_HEADER, &correlation_id)
            .json(request)
            .send()
            .await
            .map_err(|error| {
                warn!(
                    endpoint = %self.endpoint,
                    correlation_id = %correlation_id,
                    error = %error,
                    "remote validation transport failure"
                );
                RemoteValidationError::Transport(error)
            })?;

        let status = response.status();
        if !status.is_success() {
            warn!(
                endpoint = %self.endpoint,
                correlation_id = %correlation_id,
                status = status.as_u16(),
                "remote validation endpoint rejected the request"
            );
            return Err(RemoteValidationError::Status { status: status.as_u16() });
        }

        let decoded = response
            .json::<RemoteValidationResponse>()
            .await
            .map_err(RemoteValidationError::Decode)?;

        info!(
            endpoint = %self.endpoint,
            correlation_id = %correlation_id,
            result_count = decoded.results.len(),
            "remote validation request completed"
        );
        Ok(decoded)
    }
}

/// Last-request-wins wrapper around a [`RemoteValidator`].
///
/// Each submission takes a generation ticket; a newer submission or an
/// explicit [`cancel_pending`](Self::cancel_pending) invalidates every
/// in-flight ticket. Stale completions are discarded wholesale, whether
/// they carried data or an error, and surface as
/// [`RemoteValidationError::Superseded`].
pub struct RemoteValidationSession<V> {
    validator: V,
    generation: AtomicU64,
}

impl<V: RemoteValidator> RemoteValidationSession<V> {
    pub fn new(validator: V) -> Self {
        Self { validator, generation: AtomicU64::new(0) }
    }

    pub async fn submit(
        &self,
        request: &RemoteValidationRequest,
    ) -> Result<ValidationReport, RemoteValidationError> {
        let ticket = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let outcome = self.validator.validate(request).await;

        if self.generation.load(Ordering::SeqCst) != ticket {
            info!(ticket, "discarding superseded remote validation result");
            return Err(RemoteValidationError::Superseded);
        }

        outcome.map(RemoteValidationResponse::into_report)
    }

    /// Invalidates any in-flight submission without issuing a new one.
    pub fn cancel_pending(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
    }
}
