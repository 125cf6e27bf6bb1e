//! API query and error types.

use serde::{Deserialize, Serialize};

/// Query parameters for `GET /monthly`.
#[derive(Debug, Deserialize)]
pub struct MonthlyQuery {
    /// 1-based calendar month (1 = January).
    pub month: Option<usize>,
}

/// Error body returned with non-2xx responses.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
