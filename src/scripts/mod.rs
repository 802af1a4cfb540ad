//! Script collection - entity types and the write-through store

mod store;
mod types;

pub use store::ScriptStore;
pub use types::{Command, CommandForm, Script, ScriptForm};

#[cfg(test)]
#[path = "store_tests.rs"]
mod tests;
