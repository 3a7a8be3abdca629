use std::any::{Any, TypeId};
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::blueprint::target::TargetOps;
use crate::blueprint::{bind_table, Behavior, Blueprint, INITIALIZER};
use crate::error::CompositionError;
use crate::mixin::mixin_filtered;
use crate::val::Val;

/// Predicate over behavior names.
pub(crate) type NameFilter = Rc<dyn Fn(&str) -> bool>;

/// A freshly constructed base instance with its behaviors bound.
pub(crate) struct Instantiated {
    pub(crate) instance: Rc<dyn Any>,
    pub(crate) behaviors: Vec<(&'static str, Behavior)>,
}

type InstantiateFn = fn(&[Val], &dyn Fn(&str) -> bool) -> Result<Instantiated, CompositionError>;
type MixinFn =
    fn(&mut dyn TargetOps, &[Val], &dyn Fn(&str) -> bool) -> Result<usize, CompositionError>;

/// Type-erased handle to a [`Blueprint`].
///
/// Lets blueprints of different types sit in one ordered list.
#[derive(Clone)]
pub struct BlueprintDescriptor {
    name: &'static str,
    type_id: TypeId,
    declared: Vec<&'static str>,
    pub(crate) filter: Option<NameFilter>,
    instantiate: InstantiateFn,
    mixin: MixinFn,
}

fn instantiate_erased<B: Blueprint>(
    args: &[Val],
    filter: &dyn Fn(&str) -> bool,
) -> Result<Instantiated, CompositionError> {
    let instance = Rc::new(RefCell::new(B::construct(args)?));
    let behaviors = bind_table(&instance, filter);
    Ok(Instantiated {
        instance,
        behaviors,
    })
}

fn mixin_erased<B: Blueprint>(
    target: &mut dyn TargetOps,
    args: &[Val],
    filter: &dyn Fn(&str) -> bool,
) -> Result<usize, CompositionError> {
    mixin_filtered::<B, _>(target, args, filter)
}

impl BlueprintDescriptor {
    /// Create a descriptor for `B`.
    pub fn of<B: Blueprint>() -> Self {
        let declared = B::behaviors()
            .names()
            .filter(|name| *name != INITIALIZER)
            .collect();
        Self {
            name: B::NAME,
            type_id: TypeId::of::<B>(),
            declared,
            filter: None,
            instantiate: instantiate_erased::<B>,
            mixin: mixin_erased::<B>,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    pub fn is<B: Blueprint>(&self) -> bool {
        self.type_id == TypeId::of::<B>()
    }

    /// Names this descriptor will copy, after filtering.
    pub fn behavior_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.declared
            .iter()
            .copied()
            .filter(move |name| self.accepts(name))
    }

    /// Mix the blueprint into `target`, honoring any filter.
    pub fn mixin<'t>(
        &self,
        target: &'t mut dyn TargetOps,
        args: &[Val],
    ) -> Result<&'t mut dyn TargetOps, CompositionError> {
        (self.mixin)(&mut *target, args, &|name| self.accepts(name))?;
        Ok(target)
    }

    pub(crate) fn instantiate(&self, args: &[Val]) -> Result<Instantiated, CompositionError> {
        (self.instantiate)(args, &|name| self.accepts(name))
    }

    fn accepts(&self, name: &str) -> bool {
        self.filter.as_ref().map_or(true, |f| f(name))
    }
}

impl fmt::Debug for BlueprintDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BlueprintDescriptor")
            .field("name", &self.name)
            .field("behaviors", &self.behavior_names().collect::<Vec<_>>())
            .finish()
    }
}
