// Library surface for headless/integration tests and reuse.
// The binary in main.rs only parses flags and wires these together.
pub mod app;
pub mod app_dirs;
pub mod board;
pub mod config;
pub mod error;
pub mod evaluator;
pub mod hint;
pub mod history;
pub mod keyboard;
pub mod runtime;
pub mod session;
pub mod stats;
pub mod ui;
pub mod word;
pub mod word_source;

pub use evaluator::{evaluate, Verdict};
pub use session::{GameSession, Intent, SessionConfig, SessionStatus};
pub use stats::{Stats, StatsStore};
pub use word::Word;
