//! Built-in scheme handlers.

mod http;
mod mailto;
mod urn;
mod uuid;
mod ws;

pub use http::Http;
pub use mailto::Mailto;
pub use urn::Urn;
pub use uuid::UrnUuid;
pub use ws::Ws;
