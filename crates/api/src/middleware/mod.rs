//! HTTP middleware components.

pub mod logging;
pub mod metrics;
pub mod rate_limit;
pub mod security_headers;
pub mod session;
pub mod trace_id;

pub use metrics::{init_metrics, metrics_handler, metrics_middleware};
pub use rate_limit::LoginRateLimiter;
pub use security_headers::{security_headers_middleware, SecurityHeaders};
pub use session::require_admin_session;
pub use trace_id::{trace_id, RequestId, REQUEST_ID_HEADER};
