pub mod page;
pub mod routes;

pub use routes::{router, ApiResponse, UPLOAD_FIELD};
