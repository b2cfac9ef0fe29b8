//! The API client: [`Bot`], its [`session`], and the HTTP transport.

mod bot;
pub mod session;

pub use bot::Bot;
pub use session::middleware::{NextRequest, RequestMiddleware};
pub use session::transport::{ReqwestTransport, Transport};
pub use session::{RawResponse, RequestPayload, Session};
