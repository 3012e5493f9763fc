//! Arena - Tick-driven combat between the hero and spawned enemies
//!
//! [`CombatManager`] owns a session. An external [`TickSource`] decides when
//! ticks happen; every tick spawns an enemy if the arena is empty and then
//! resolves one round. Everything worth showing a player is pushed into the
//! session's [`EventLog`].

mod events;
mod manager;
mod scheduler;
mod state;

pub use events::{CombatEvent, EventLog, LoggedEvent, Severity};
pub use manager::CombatManager;
pub use scheduler::{FixedInterval, StepTicker, TickSource};
pub use state::{ArenaState, RoundReport, SessionStats, TickOutcome};
