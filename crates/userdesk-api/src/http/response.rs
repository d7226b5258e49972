//! Message body shared by error responses and delete confirmations.
//!
//! ```json
//! { "message": "User not found" }
//! ```

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Single human-readable message. Errors carry no machine-readable code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct MessageBody {
    #[schema(example = "User not found")]
    pub message: String,
}

impl MessageBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
