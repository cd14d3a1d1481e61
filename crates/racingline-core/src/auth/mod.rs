//! Access key providers for the data bin.
//!
//! - `KeyProvider`: the seam the controller reads the key through
//! - `StaticKey`, `EnvKeyProvider`: fixed or environment-supplied keys
//! - `CredentialStore`: key kept in the OS keychain via keyring

pub mod credentials;
pub mod provider;

pub use credentials::CredentialStore;
pub use provider::{EnvKeyProvider, KeyProvider, StaticKey, ACCESS_KEY_ENV};
