pub mod http;
pub mod traits;

pub use http::HttpAdBackend;
pub use traits::AdBackend;
