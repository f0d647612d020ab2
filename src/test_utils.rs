//! Hard-coded provider trait implementations that can be used for testing.

pub mod store;

pub use store::ProviderImpl;

/// Issuing principal used by most tests.
pub const OWNER: &str = "did:web:demo.credibil.io";

/// Lookup context used by most tests.
pub const CONTEXT: &str = "https://demo.credibil.io/credentials/EmployeeID";
