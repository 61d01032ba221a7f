//! Bot registry service library.
//!
//! Hexagonal layout: `domain` owns the record model and the registry
//! service, `outbound` implements its store port, `inbound::http` exposes it
//! over Actix Web.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod settings;

pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;
