pub mod errors;
pub mod events;
pub mod id;
pub mod types;

pub use errors::SwishError;
pub use events::{EventBus, WidgetEvent};
pub use id::{new_correlation_id, new_id, SessionId};
pub use types::{Message, MessageId, Sender};

pub type Result<T> = std::result::Result<T, SwishError>;
