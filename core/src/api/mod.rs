pub mod http;
pub mod traits;

pub use http::HttpTaskApi;
pub use traits::TaskApi;
