pub mod request;
pub mod response;
pub mod template;

pub use request::*;
pub use response::*;
pub use template::*;
