use std::collections::HashMap;

use indexmap::IndexMap;

use super::Behavior;
use crate::error::CompositionError;
use crate::val::Val;

/// Type-erased receiver of behavior definitions.
///
/// Composition only ever assigns through this trait, so any mapping from
/// name to [`Behavior`] can be a target. An implementation may refuse a
/// definition; composition stops at the first refusal and keeps whatever
/// was already assigned.
pub trait TargetOps {
    /// Assign `behavior` under `name`, replacing any existing entry.
    fn define(&mut self, name: &str, behavior: Behavior) -> Result<(), CompositionError>;
}

impl TargetOps for HashMap<String, Behavior> {
    fn define(&mut self, name: &str, behavior: Behavior) -> Result<(), CompositionError> {
        self.insert(name.to_string(), behavior);
        Ok(())
    }
}

impl TargetOps for IndexMap<String, Behavior> {
    fn define(&mut self, name: &str, behavior: Behavior) -> Result<(), CompositionError> {
        self.insert(name.to_string(), behavior);
        Ok(())
    }
}

/// Ordered name-to-behavior mapping; the default composition target.
#[derive(Debug, Clone, Default)]
pub struct Target {
    behaviors: IndexMap<String, Behavior>,
}

impl Target {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a free-standing closure, as a caller would on any plain object.
    pub fn insert_fn<F>(&mut self, name: impl Into<String>, f: F) -> &mut Self
    where
        F: Fn(&[Val]) -> Result<Val, CompositionError> + 'static,
    {
        self.behaviors.insert(name.into(), Behavior::new(f));
        self
    }

    pub fn get(&self, name: &str) -> Option<&Behavior> {
        self.behaviors.get(name)
    }

    /// Invoke the behavior stored under `name`.
    pub fn call(&self, name: &str, params: &[Val]) -> Result<Val, CompositionError> {
        self.behaviors
            .get(name)
            .ok_or_else(|| CompositionError::BehaviorNotFound(name.to_string()))?
            .call(params)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.behaviors.contains_key(name)
    }

    /// Keys in first-assignment order. Overwrites keep the original position.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.behaviors.keys().map(String::as_str)
    }

    pub fn remove(&mut self, name: &str) -> Option<Behavior> {
        self.behaviors.shift_remove(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Behavior)> {
        self.behaviors.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.behaviors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.behaviors.is_empty()
    }
}

impl TargetOps for Target {
    fn define(&mut self, name: &str, behavior: Behavior) -> Result<(), CompositionError> {
        self.behaviors.insert(name.to_string(), behavior);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn define_overwrites_in_place() {
        let mut target = Target::new();
        target
            .insert_fn("a", |_| Ok(Val::S64(1)))
            .insert_fn("b", |_| Ok(Val::S64(2)));
        target
            .define("a", Behavior::new(|_| Ok(Val::S64(3))))
            .unwrap();

        assert_eq!(target.keys().collect::<Vec<_>>(), vec!["a", "b"]);
        assert_eq!(target.call("a", &[]).unwrap(), Val::S64(3));
    }

    #[test]
    fn missing_behavior_is_an_error() {
        let target = Target::new();
        let err = target.call("nope", &[]).unwrap_err();
        assert!(matches!(err, CompositionError::BehaviorNotFound(name) if name == "nope"));
    }

    #[test]
    fn plain_maps_are_targets() {
        let mut map: HashMap<String, Behavior> = HashMap::new();
        map.define("x", Behavior::new(|p| Ok(p[0].clone()))).unwrap();
        assert_eq!(map["x"].call(&[Val::Bool(true)]).unwrap(), Val::Bool(true));
    }
}
