//! An API for managing the status of issued Verifiable Credentials using
//! [Bitstring Status List](https://www.w3.org/TR/vc-bitstring-status-list/)
//! bitmaps.
//!
//! Issuers that publish a status list must track, for every credential they
//! ever issue, which slot in which list records that credential's status.
//! This library owns that bookkeeping: it hands out unique, monotonically
//! increasing slot numbers from a pool of fixed-capacity registries
//! (opening a new registry when the current one fills), flips status bits
//! for previously issued credentials, and encodes each list in the
//! compressed, base64url wire format third-party verifiers expect.
//!
//! # Design
//!
//! **Endpoints**
//!
//! The library is architected around endpoints, each with its own
//! `XxxRequest` and `XxxResponse` types that serialize to and from JSON:
//!
//! * [`allocate`] reserves the next free slot for a credential about to be
//!   issued, creating and publishing a new registry when needed;
//! * [`revoke`] / [`unrevoke`] flip the status bit of an allocated slot;
//! * [`status`] projects a registry's decoded bitmap for status queries;
//! * [`credential`] renders a registry as a publishable
//!   `BitstringStatusList` credential (unsigned; proofs are the publishing
//!   service's concern).
//!
//! Endpoints are designed to be wrapped by Rust-based HTTP servers, such as
//! [axum](https://docs.rs/axum/latest/axum/), with the hosting layer owning
//! authentication and HTTP status mapping.
//!
//! **Providers**
//!
//! Implementers supply persistence and ledger publication through the
//! [`provider`] traits. The store's `save` must compare-and-swap on
//! `Registry::version`: two concurrent allocations against the same
//! registry must never both observe the same `last_index`, or one
//! credential's status slot silently aliases another's. A failed swap
//! surfaces as [`Error::ConcurrencyConflict`] for the caller to retry.

pub mod bitstring;
pub mod provider;

mod allocate;
mod bitmap;
mod error;
mod registry;
mod revoke;
mod status;

pub mod test_utils;

pub use allocate::{allocate, AllocateRequest, AllocateResponse};
pub use bitmap::StatusBitmap;
pub use error::Error;
pub use registry::{Registry, StatusPurpose, DEFAULT_CAPACITY};
pub use revoke::{revoke, unrevoke, RevokeRequest, RevokeResponse};
pub use status::{
    credential, status, CredentialRequest, StatusListCredential, StatusListSubject,
    StatusRequest, StatusResponse,
};

/// Result type for status registry operations.
pub type Result<T, E = Error> = std::result::Result<T, E>;
