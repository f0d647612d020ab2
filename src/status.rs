//! # Status Endpoints
//!
//! Read-only projections of a registry: the decoded bitmap for "is the
//! credential at slot N currently revoked" queries, and the registry
//! rendered as a Bitstring Status List credential suitable for publishing
//! on a status endpoint for verifiers. No proof is attached; signing is
//! the publishing service's concern.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::error::Error;
use crate::provider::{Provider, RegistryStore};
use crate::registry::StatusPurpose;
use crate::Result;

/// A request for a registry's current status bits.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct StatusRequest {
    /// The registry to project.
    pub registry_id: String,
}

/// A registry's current status, decoded.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct StatusResponse {
    /// The projected registry.
    pub registry_id: String,

    /// Meaning of a set bit.
    pub purpose: StatusPurpose,

    /// Total number of slots.
    pub capacity: usize,

    /// Count of slots allocated so far. Bits at or beyond this index are
    /// meaningless.
    pub last_index: usize,

    /// The full decoded bitmap, `capacity` entries.
    pub bits: Vec<bool>,
}

/// A request to render a registry as a publishable status list credential.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct CredentialRequest {
    /// The registry to render.
    pub registry_id: String,

    /// Issuer identifier to embed in the credential.
    pub issuer: String,
}

/// A Bitstring Status List credential, per the shape published for
/// third-party verifiers.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct StatusListCredential {
    /// The issuer of the status list.
    pub issuer: String,

    /// The moment from which the list is valid.
    pub valid_from: DateTime<Utc>,

    /// The status list itself.
    pub credential_subject: StatusListSubject,
}

/// The `credentialSubject` of a Bitstring Status List credential.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct StatusListSubject {
    /// Subject identifier: the registry id with a `#list` fragment.
    pub id: String,

    /// Always `BitstringStatusList`.
    #[serde(rename = "type")]
    pub type_: String,

    /// Meaning of a set bit in the list.
    pub status_purpose: StatusPurpose,

    /// The compressed, base64url-encoded status list.
    pub encoded_list: String,
}

/// Status request handler.
///
/// # Errors
///
/// Returns `StoreUnavailable` if the registry cannot be loaded and `Codec`
/// if its persisted list is malformed.
#[instrument(level = "debug", skip(provider))]
pub async fn status(provider: impl Provider, request: StatusRequest) -> Result<StatusResponse> {
    tracing::debug!("status::process");

    let registry = RegistryStore::load(&provider, &request.registry_id)
        .await
        .map_err(|e| Error::StoreUnavailable(format!("issue loading registry: {e}")))?;
    let bitmap = registry.bitmap()?;

    Ok(StatusResponse {
        registry_id: registry.id,
        purpose: registry.purpose,
        capacity: registry.capacity,
        last_index: registry.last_index,
        bits: bitmap.to_vec(),
    })
}

/// Credential request handler.
///
/// # Errors
///
/// Returns `StoreUnavailable` if the registry cannot be loaded.
#[instrument(level = "debug", skip(provider))]
pub async fn credential(
    provider: impl Provider, request: CredentialRequest,
) -> Result<StatusListCredential> {
    tracing::debug!("credential::process");

    let registry = RegistryStore::load(&provider, &request.registry_id)
        .await
        .map_err(|e| Error::StoreUnavailable(format!("issue loading registry: {e}")))?;

    Ok(StatusListCredential {
        issuer: request.issuer,
        valid_from: Utc::now(),
        credential_subject: StatusListSubject {
            id: format!("{}#list", registry.id),
            type_: "BitstringStatusList".into(),
            status_purpose: registry.purpose,
            encoded_list: registry.encoded_list,
        },
    })
}
