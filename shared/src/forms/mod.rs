//! Entry forms: payloads, drafts and the submission lifecycle

mod draft;
mod payloads;
mod session;
mod submission;

pub use draft::*;
pub use payloads::*;
pub use session::*;
pub use submission::*;
