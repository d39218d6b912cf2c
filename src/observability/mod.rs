//! Observability subsystem.
//!
//! Structured logging via `tracing`; every subsystem logs through the
//! global subscriber installed here. Request-scoped fields (request ID,
//! correlation IDs) ride on the log events of the components that know
//! them.

pub mod logging;
