pub mod server;
pub mod types;

pub use server::GatewayServer;
pub use types::{MessageRequest, MessageResponse, MoodSnapshot, SummaryQuery};
