pub mod action;
mod action_registry;

pub use action::Action;
pub use action_registry::known_actions;
