//! Message model and result types for the Mailgun integration.

mod address;
mod attachment;
mod headers;
mod message;
mod response;

pub use address::EmailAddress;
pub use attachment::{Attachment, AttachmentSource};
pub use headers::{HeaderValue, Headers};
pub use message::{EmailFormat, Message};
pub use response::SendResult;
