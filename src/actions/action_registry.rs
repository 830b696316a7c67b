use crate::actions::action::Action;
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::sync::{LazyLock, PoisonError, RwLock};

pub(in crate::actions) type ActionFactory = fn(&serde_json::Value) -> Result<Box<dyn Action>, serde_json::Error>;

pub(in crate::actions) static ACTION_REGISTRY: LazyLock<RwLock<HashMap<&'static str, ActionFactory>>> =
    LazyLock::new(|| RwLock::new(HashMap::new()));

pub(in crate::actions) fn register_action<T: Action + DeserializeOwned + 'static>(kind: &'static str) {
    ACTION_REGISTRY
        .write()
        .unwrap_or_else(PoisonError::into_inner)
        .insert(kind, |json| Ok(Box::new(serde_json::from_value::<T>(json.clone())?)));
}

pub fn known_actions() -> Vec<&'static str> {
    let registry = ACTION_REGISTRY.read().unwrap_or_else(PoisonError::into_inner);
    let mut kinds: Vec<&'static str> = registry.keys().copied().collect();
    kinds.sort_unstable();
    kinds
}
