// Application layer: the session that clients drive, plus what it reports back.

pub mod error;
pub mod notification;
pub mod reporting;
pub mod service;

pub use error::*;
pub use notification::*;
pub use reporting::*;
pub use service::*;
