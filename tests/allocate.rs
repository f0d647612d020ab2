//! Tests for the `allocate` endpoint

use credibil_status::test_utils::{ProviderImpl, CONTEXT, OWNER};
use credibil_status::{allocate, AllocateRequest, Error, StatusPurpose};

fn request() -> AllocateRequest {
    AllocateRequest {
        owner: OWNER.into(),
        context: CONTEXT.into(),
        purpose: StatusPurpose::Revocation,
        capacity: None,
    }
}

// Sequential allocations against a fresh registry return slots 0, 1, .. in
// call order, all from the same registry.
#[tokio::test]
async fn monotonic() {
    let provider = ProviderImpl::new();

    let first = allocate(provider.clone(), request()).await.expect("should allocate");
    assert_eq!(first.slot_index, 0);

    for expected in 1..10 {
        let response = allocate(provider.clone(), request()).await.expect("should allocate");
        assert_eq!(response.registry_id, first.registry_id);
        assert_eq!(response.slot_index, expected);
    }

    assert_eq!(provider.registry_count(), 1);
}

// Allocating capacity + 1 times fills the first registry and opens a second
// one for the final slot.
#[tokio::test]
async fn capacity_rollover() {
    let provider = ProviderImpl::new();
    let request = AllocateRequest {
        capacity: Some(4),
        ..request()
    };

    let mut first_registry = None;
    for expected in 0..4 {
        let response =
            allocate(provider.clone(), request.clone()).await.expect("should allocate");
        assert_eq!(response.slot_index, expected);
        first_registry.get_or_insert(response.registry_id);
    }

    let rollover = allocate(provider.clone(), request).await.expect("should allocate");
    assert_ne!(Some(&rollover.registry_id), first_registry.as_ref());
    assert_eq!(rollover.slot_index, 0);
    assert_eq!(provider.registry_count(), 2);
}

// Owners never allocate from each other's registries, even for the same
// context.
#[tokio::test]
async fn owner_isolation() {
    let provider = ProviderImpl::new();

    let for_owner = allocate(provider.clone(), request()).await.expect("should allocate");

    let other = AllocateRequest {
        owner: "did:web:other.example".into(),
        ..request()
    };
    let for_other = allocate(provider.clone(), other).await.expect("should allocate");

    assert_ne!(for_owner.registry_id, for_other.registry_id);
    assert_eq!(for_other.slot_index, 0);
}

// Separate contexts for the same owner draw from separate registries.
#[tokio::test]
async fn context_isolation() {
    let provider = ProviderImpl::new();

    let first = allocate(provider.clone(), request()).await.expect("should allocate");

    let other = AllocateRequest {
        context: "https://demo.credibil.io/credentials/Developer".into(),
        ..request()
    };
    let second = allocate(provider.clone(), other).await.expect("should allocate");

    assert_ne!(first.registry_id, second.registry_id);
}

// When definition publishing fails, `allocate` fails and no registry is
// left behind for later calls to find.
#[tokio::test]
async fn registration_failure() {
    let provider = ProviderImpl::new();
    provider.fail_registration(true);

    let err = allocate(provider.clone(), request()).await.expect_err("should fail");
    assert!(matches!(err, Error::AllocationFailed(_)));
    assert_eq!(provider.registry_count(), 0);

    // with the registrar healthy again, allocation starts from a fresh
    // registry
    provider.fail_registration(false);
    let response = allocate(provider.clone(), request()).await.expect("should allocate");
    assert_eq!(response.slot_index, 0);
}

#[tokio::test]
async fn zero_capacity() {
    let provider = ProviderImpl::new();
    let request = AllocateRequest {
        capacity: Some(0),
        ..request()
    };

    let err = allocate(provider, request).await.expect_err("should fail");
    assert!(matches!(err, Error::AllocationFailed(_)));
}
