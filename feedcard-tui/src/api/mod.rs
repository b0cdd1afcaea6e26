mod client;
mod error;

pub use client::{ApiClient, PostService, DEFAULT_BASE_URL};
pub use error::{ApiError, ApiResult};
