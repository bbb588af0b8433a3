//! Chat synchronization: the local session/message cache and its
//! reconciliation with the backend chat history.

mod store;
mod view;

pub use store::{ChatState, ChatStore};
pub use view::MessageView;
