pub mod composer;
pub mod descriptor;

use std::any::{Any, TypeId};
use std::cell::{Ref, RefCell, RefMut};
use std::rc::Rc;

use indexmap::IndexMap;

use crate::blueprint::target::{Target, TargetOps};
use crate::blueprint::{Behavior, Blueprint};
use crate::error::CompositionError;
use crate::val::Val;
use descriptor::BlueprintDescriptor;

/// A constructible type layered from an ordered list of blueprints.
///
/// The first blueprint is the base: construction arguments go to its
/// initializer and its behaviors are inherited. Every later blueprint is
/// mixed onto each new instance in order, without arguments.
///
/// Clones share identity: an instance of one clone is an instance of both.
#[derive(Debug, Clone)]
pub struct MixedType {
    base: BlueprintDescriptor,
    mixins: Vec<BlueprintDescriptor>,
    identity: Rc<()>,
}

impl MixedType {
    pub(crate) fn new(base: BlueprintDescriptor, mixins: Vec<BlueprintDescriptor>) -> Self {
        Self {
            base,
            mixins,
            identity: Rc::new(()),
        }
    }

    /// Whether `instance` was produced by this type.
    pub fn is_type_of(&self, instance: &Mixed) -> bool {
        Rc::ptr_eq(&self.identity, &instance.identity)
    }

    pub fn base(&self) -> &BlueprintDescriptor {
        &self.base
    }

    /// All blueprints, base first.
    pub fn blueprints(&self) -> impl Iterator<Item = &BlueprintDescriptor> {
        std::iter::once(&self.base).chain(self.mixins.iter())
    }

    /// Construct a new instance.
    pub fn instantiate(&self, args: &[Val]) -> Result<Mixed, CompositionError> {
        let base = self.base.instantiate(args)?;
        let mut mixed = Mixed {
            base_name: self.base.name(),
            base_type: self.base.type_id(),
            base: base.instance,
            inherited: base.behaviors.into_iter().map(|(n, b)| (n.to_string(), b)).collect(),
            own: Target::new(),
            identity: self.identity.clone(),
        };

        for descriptor in &self.mixins {
            descriptor.mixin(&mut mixed, &[])?;
        }

        tracing::debug!(
            base = mixed.base_name,
            mixins = self.mixins.len(),
            own = mixed.own.len(),
            "instantiated mixed type"
        );
        Ok(mixed)
    }
}

/// An instance of a [`MixedType`].
///
/// Lookup goes to own behaviors first, then to those inherited from the base.
pub struct Mixed {
    base_name: &'static str,
    base_type: TypeId,
    base: Rc<dyn Any>,
    inherited: IndexMap<String, Behavior>,
    own: Target,
    identity: Rc<()>,
}

impl Mixed {
    /// Invoke the behavior visible under `name`.
    pub fn call(&self, name: &str, params: &[Val]) -> Result<Val, CompositionError> {
        self.behavior(name)
            .ok_or_else(|| CompositionError::BehaviorNotFound(name.to_string()))?
            .call(params)
    }

    pub fn behavior(&self, name: &str) -> Option<&Behavior> {
        self.own.get(name).or_else(|| self.inherited.get(name))
    }

    pub fn responds_to(&self, name: &str) -> bool {
        self.behavior(name).is_some()
    }

    /// Own keys only: behaviors copied onto this instance by mixins.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.own.keys()
    }

    /// Behaviors reached through the base.
    pub fn inherited_keys(&self) -> impl Iterator<Item = &str> {
        self.inherited.keys().map(String::as_str)
    }

    /// Blueprint that supplies the behavior visible under `name`.
    pub fn provider(&self, name: &str) -> Option<&'static str> {
        self.behavior(name).and_then(Behavior::provider)
    }

    pub fn base_name(&self) -> &'static str {
        self.base_name
    }

    /// Whether this instance was produced by `mixed_type`.
    pub fn is_instance_of_type(&self, mixed_type: &MixedType) -> bool {
        mixed_type.is_type_of(self)
    }

    /// True only for the base blueprint; mixins contribute behaviors, not identity.
    pub fn is_instance_of<B: Blueprint>(&self) -> bool {
        self.base_type == TypeId::of::<B>()
    }

    /// Borrow the base instance, if it is a `B` and not currently in use.
    pub fn base<B: Blueprint>(&self) -> Option<Ref<'_, B>> {
        self.base.downcast_ref::<RefCell<B>>()?.try_borrow().ok()
    }

    pub fn base_mut<B: Blueprint>(&self) -> Option<RefMut<'_, B>> {
        self.base.downcast_ref::<RefCell<B>>()?.try_borrow_mut().ok()
    }
}

impl TargetOps for Mixed {
    fn define(&mut self, name: &str, behavior: Behavior) -> Result<(), CompositionError> {
        self.own.define(name, behavior)
    }
}

impl std::fmt::Debug for Mixed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Mixed")
            .field("base", &self.base_name)
            .field("own", &self.own.keys().collect::<Vec<_>>())
            .field("inherited", &self.inherited.keys().collect::<Vec<_>>())
            .finish()
    }
}
