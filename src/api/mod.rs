//! HTTP API for the paystub underwriter.
//!
//! `POST /underwrite` runs the full pipeline. `POST /extract` runs only the
//! field extractor, which is useful when checking what a document yields.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{ExtractRequest, UnderwriteRequest};
pub use response::{ApiError, ApiErrorResponse, HealthResponse};
pub use state::AppState;
