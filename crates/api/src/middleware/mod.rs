//! HTTP middleware components.

pub mod canonical_redirect;
pub mod logging;
pub mod metrics;
pub mod security_headers;
pub mod trace_id;

pub use canonical_redirect::{canonical_redirect, redirect, RemoteUnavailable};
pub use metrics::{init_metrics, metrics_handler, metrics_middleware};
pub use security_headers::security_headers_middleware;
pub use trace_id::{trace_id, REQUEST_ID_HEADER};
