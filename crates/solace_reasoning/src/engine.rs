use crate::dispatch::{DispatchError, Dispatcher};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use solace_core::state::ContextEntry;
use solace_core::{LexiconError, Lexicons, MoodState, SentimentLabel, SessionMemory, SolaceConfig};
use std::sync::Arc;

const REDACTED_FAULT: &str = "something unexpected";

#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub bot_name: String,
    /// Include the underlying error text in apology replies.
    pub expose_fault_detail: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::from(&SolaceConfig::default())
    }
}

impl From<&SolaceConfig> for EngineConfig {
    fn from(config: &SolaceConfig) -> Self {
        Self {
            bot_name: config.persona.name.clone(),
            expose_fault_detail: config.engine.expose_fault_detail,
        }
    }
}

/// One companion: a memory plus everything needed to answer against it.
pub struct Engine {
    dispatcher: Dispatcher,
    memory: SessionMemory,
    rng: Box<dyn RngCore + Send>,
    config: EngineConfig,
}

impl std::fmt::Debug for Engine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Engine")
            .field("config", &self.config)
            .field("memory", &self.memory)
            .finish_non_exhaustive()
    }
}

impl Engine {
    /// Engine over the shared lexicons with an entropy-seeded RNG.
    pub fn new(config: EngineConfig) -> Result<Self, LexiconError> {
        Ok(Self::with_parts(
            Lexicons::shared()?,
            config,
            Box::new(StdRng::from_entropy()),
        ))
    }

    /// Engine with a caller-chosen random source, for reproducible runs.
    pub fn with_rng<R>(config: EngineConfig, rng: R) -> Result<Self, LexiconError>
    where
        R: RngCore + Send + 'static,
    {
        Ok(Self::with_parts(Lexicons::shared()?, config, Box::new(rng)))
    }

    pub fn with_parts(
        lexicons: Arc<Lexicons>,
        config: EngineConfig,
        rng: Box<dyn RngCore + Send>,
    ) -> Self {
        Self {
            dispatcher: Dispatcher::new(lexicons, config.bot_name.clone()),
            memory: SessionMemory::default(),
            rng,
            config,
        }
    }

    pub fn name(&self) -> &str {
        &self.config.bot_name
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn memory(&self) -> &SessionMemory {
        &self.memory
    }

    pub fn memory_mut(&mut self) -> &mut SessionMemory {
        &mut self.memory
    }

    pub fn replace_memory(&mut self, memory: SessionMemory) -> SessionMemory {
        std::mem::replace(&mut self.memory, memory)
    }

    pub fn mood_state(&self) -> MoodState {
        self.memory.mood_state()
    }

    /// The raw pipeline. Does not record the bot's reply.
    pub fn generate_reply(
        &mut self,
        text: &str,
        sentiment: Option<SentimentLabel>,
    ) -> Result<String, DispatchError> {
        self.dispatcher
            .generate_reply(&mut self.memory, text, sentiment, &mut *self.rng)
    }

    /// Answer `text`, remember the answer, and never fail.
    ///
    /// A pipeline fault becomes an apology; whatever the pipeline changed
    /// before failing is kept.
    pub fn respond(&mut self, text: &str, sentiment: Option<SentimentLabel>) -> String {
        match self.generate_reply(text, sentiment) {
            Ok(reply) => {
                if !text.trim().is_empty() {
                    self.memory.push_context(ContextEntry::Reply { bot: reply.clone() });
                }
                reply
            }
            Err(e) => {
                tracing::error!(error = %e, turn = self.memory.turn_count, "Reply pipeline failed");
                self.apology(&e)
            }
        }
    }

    fn apology(&self, error: &DispatchError) -> String {
        let detail = if self.config.expose_fault_detail {
            error.to_string()
        } else {
            REDACTED_FAULT.to_string()
        };
        format!("I ran into an error: {}. Could you rephrase that?", detail)
    }
}
