pub mod dispatch;
pub mod engine;
pub mod session;
pub mod templates;

pub use dispatch::{decide, Branch, DispatchError, Dispatcher, Turn, INSIGHT_PROBABILITY, RULES};
pub use engine::{Engine, EngineConfig};
pub use session::{Session, SessionStore, DEFAULT_SESSION};
