pub mod conversation;
pub mod store;

pub use conversation::{ConversationLog, ConversationSentiment, Exchange, EXCHANGE_LOG_CAP};
pub use store::{merge_document, MemoryStore, StoreError};
