//! Request bodies for the underwriting API.

use serde::{Deserialize, Serialize};

use crate::models::BorrowerFact;

/// Request body for `POST /underwrite`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnderwriteRequest {
    /// Plain text of the paystub.
    pub document_text: String,
    /// Borrower application record. Defaults to an empty object.
    #[serde(default)]
    pub borrower: BorrowerFact,
}

/// Request body for `POST /extract`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractRequest {
    /// Plain text of the paystub.
    pub document_text: String,
}
