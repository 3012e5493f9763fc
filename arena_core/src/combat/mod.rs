//! Combat resolution - Apply hits to stat blocks

mod resolution;
mod result;

pub use resolution::{mitigated_damage, resolve_damage};
pub use result::{AttackResult, DamageTaken};
