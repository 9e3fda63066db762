mod error;
pub use error::{Result, StreamError};

mod envelope;
pub use envelope::Envelope;

mod publisher;
pub use publisher::Publisher;
