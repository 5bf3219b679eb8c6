//! HTTP middleware: request tracing and CORS.

pub mod cors;
pub mod trace;

pub use cors::Cors;
pub use trace::{Trace, TraceId, TRACE_ID_HEADER};
