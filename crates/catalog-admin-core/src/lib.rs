//! Core building blocks for catalog-admin.
//!
//! This crate holds the pieces of the admin frontend that never touch the network:
//!
//! - **Domain resolution**: maps the hostname a page was served from to the
//!   auth and data API bases, plus the cookie domain shared across subdomains
//! - **Token storage**: the single persisted session token slot
//!
//! # Example
//!
//! ```
//! use catalog_admin_core::{DomainResolver, MemoryStorage, TokenStore};
//!
//! let resolver = DomainResolver::default();
//! let resolved = resolver.resolve("admin.novostroy.org");
//! assert_eq!(resolved.auth_api_base, "https://auth.novostroy.org");
//! assert_eq!(resolved.cookie_domain.as_deref(), Some(".novostroy.org"));
//!
//! let tokens = TokenStore::new(MemoryStorage::new());
//! tokens.set(Some("T1"));
//! assert_eq!(tokens.get().as_deref(), Some("T1"));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod domain;
pub mod error;
pub mod token;

pub use domain::{
    hostname_from_headers, normalize_hostname, DomainConfig, DomainResolver, DomainRule,
    DomainSettings, HostEntry, HostMatcher, ResolvedDomain,
};
pub use error::{CoreError, Result};
pub use token::{FileStorage, MemoryStorage, TokenStorage, TokenStore, TOKEN_KEY};
