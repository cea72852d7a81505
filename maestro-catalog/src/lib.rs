//! Catalog resolution for maestro
//!
//! Turns a spoken request ("play summer vibes", "play some jazz") into an
//! ordered set of playable URIs. The resolution strategy is selected once per
//! deployment: delegate to a configured streaming catalog, or search the
//! local library in two tiers (exact title-cased tag lookup, then fuzzy
//! matching above a similarity threshold).
//!
//! ```rust,ignore
//! use maestro_catalog::{CatalogResolver, RequestKind, TrackRequest, DEFAULT_SIMILARITY_THRESHOLD};
//!
//! let resolver = CatalogResolver::local_only(DEFAULT_SIMILARITY_THRESHOLD);
//! let request = TrackRequest::new(RequestKind::Playlist, "summer vibes");
//! let uris = resolver.resolve(&player, &request)?;
//! ```

pub mod error;
pub mod request;
pub mod resolver;
pub mod similarity;
pub mod streaming;

pub use error::{CatalogError, Result};
pub use request::{RequestKind, TrackRequest};
pub use resolver::{CatalogResolver, DEFAULT_SIMILARITY_THRESHOLD};
pub use streaming::StreamingCatalog;
