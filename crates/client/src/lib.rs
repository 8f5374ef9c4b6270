//! Remote plan-validation client.
//!
//! Wire DTOs, an async [`RemoteValidator`] seam with a `reqwest`-backed
//! implementation, and a last-request-wins [`RemoteValidationSession`].

pub mod remote;
pub mod wire;

pub use remote::{
    HttpRemoteValidator, RemoteValidationError, RemoteValidationSession, RemoteValidator,
    CORRELATION_HEADER,
};
pub use wire::{RemoteValidationRequest, RemoteValidationResponse};
