//! # conneg
//!
//! Server-side HTTP content negotiation: given a client's `Accept` or
//! `Accept-Language` header and the representations a server can offer,
//! pick the single best one.
//!
//! ## Choosing a representation
//!
//! ```
//! let header = "text/html,application/xhtml+xml,application/xml;q=0.9,text/*;q=0.7,*/*";
//!
//! let chosen = conneg::negotiate_media(header, &["text/plain", "application/xml"]).unwrap();
//! assert_eq!(chosen.identifier(), "application/xml");
//! ```
//!
//! ## How candidates are ranked
//!
//! Each candidate is scored by the best range in the header that accepts
//! it. Scores compare by [`Specificity`] first, so an exact match always
//! beats `type/*`, which always beats `*/*`, whatever their `q` values.
//! After that the higher quality wins, then the range written earlier in
//! the header, then the candidate listed earlier by the caller.
//!
//! ```
//! // `text/plain` only matches at q=0.1, but it matches exactly.
//! let chosen = conneg::negotiate_media("*/*, text/plain;q=0.1", &["image/png", "text/plain"])
//!     .unwrap();
//! assert_eq!(chosen.identifier(), "text/plain");
//! ```
//!
//! A `q=0` range is no exception: its exact match still outranks `*/*`.
//!
//! ## Aliases
//!
//! Short names like `"html"` resolve through an injected [`Registry`];
//! the chosen identifier comes back with its display name.
//!
//! ```
//! use conneg::{Aliases, Negotiator};
//!
//! let negotiator = Negotiator::new(Aliases::new().with("html", "text/html"));
//! let chosen = negotiator.media("text/*", &["html"]).unwrap();
//!
//! assert_eq!(chosen.identifier(), "text/html");
//! assert_eq!(chosen.name(), "html");
//! ```
//!
//! ## Failures
//!
//! ```
//! use conneg::NegotiationError;
//!
//! let err = conneg::negotiate_media("text", &["text/plain"]).unwrap_err();
//! assert!(err.is_malformed());
//! assert_eq!(err.status_code(), 400);
//!
//! let err = conneg::negotiate_language("da", &["en"]).unwrap_err();
//! assert_eq!(err, NegotiationError::NotAcceptable);
//! assert_eq!(err.status_code(), 406);
//! ```

#![doc(html_root_url = "https://docs.rs/conneg/0.1.0")]
#![deny(missing_docs)]
#![deny(missing_debug_implementations)]

pub use self::error::{InvalidHeader, InvalidKind, NegotiationError};
pub use self::negotiate::{negotiate_language, negotiate_media, Negotiated, Negotiator};
pub use self::range::{parse, to_header, Kind, Range};
pub use self::registry::{Aliases, NoAliases, Registry};
pub use self::score::{MatchScore, Specificity};

mod error;
pub mod language;
pub mod media;
mod negotiate;
mod range;
mod registry;
mod score;
#[cfg(feature = "serde1")]
mod serde_impl;
