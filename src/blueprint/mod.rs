pub mod composition;
pub mod filtered;
pub mod target;

use std::any::Any;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::error::CompositionError;
use crate::val::Val;

/// Name of the initializer slot. Never copied onto a target.
pub const INITIALIZER: &str = "constructor";

/// Signature of a behavior declared by a blueprint.
pub type BehaviorFn<B> = fn(&mut B, &[Val]) -> Result<Val, CompositionError>;

/// The behaviors a blueprint declares, in declaration order.
pub struct BehaviorTable<B> {
    entries: Vec<(&'static str, BehaviorFn<B>)>,
}

impl<B> BehaviorTable<B> {
    pub fn new() -> Self {
        Self { entries: Vec::new() }
    }

    /// Declare a behavior. A later declaration under the same name replaces
    /// the earlier one.
    pub fn with(mut self, name: &'static str, f: BehaviorFn<B>) -> Self {
        if let Some(entry) = self.entries.iter_mut().find(|(n, _)| *n == name) {
            entry.1 = f;
        } else {
            self.entries.push((name, f));
        }
        self
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|(name, _)| *name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, BehaviorFn<B>)> + '_ {
        self.entries.iter().map(|(name, f)| (*name, *f))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<B> Default for BehaviorTable<B> {
    fn default() -> Self {
        Self::new()
    }
}

/// A template for composition: an initializer plus a fixed set of named
/// behaviors operating on the constructed state.
///
/// Implemented per concrete type. The table returned by [`behaviors`]
/// is the complete list of what gets copied onto a target; nothing is
/// discovered at runtime.
///
/// [`behaviors`]: Blueprint::behaviors
pub trait Blueprint: Sized + 'static {
    /// Human-readable name, reported as the provider of bound behaviors.
    const NAME: &'static str;

    /// Initializer. Receives the composition arguments verbatim.
    fn construct(args: &[Val]) -> Result<Self, CompositionError>;

    /// Behaviors declared by this blueprint.
    fn behaviors() -> BehaviorTable<Self>;
}

/// Fail with [`CompositionError::InvalidArgs`] unless exactly `expected`
/// arguments were given.
pub fn expect_arity(
    blueprint: &'static str,
    args: &[Val],
    expected: usize,
) -> Result<(), CompositionError> {
    if args.len() != expected {
        return Err(CompositionError::InvalidArgs {
            blueprint,
            expected,
            got: args.len(),
        });
    }
    Ok(())
}

type DynBehavior = dyn Fn(&[Val]) -> Result<Val, CompositionError>;

/// Callable handle stored on a target.
///
/// Behaviors produced by composition are bound to one shared instance;
/// cloning the handle keeps that instance alive.
#[derive(Clone)]
pub struct Behavior {
    func: Rc<DynBehavior>,
    instance: Option<Rc<dyn Any>>,
    provider: Option<&'static str>,
}

impl Behavior {
    /// Wrap a free-standing closure. It has no instance and no provider.
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&[Val]) -> Result<Val, CompositionError> + 'static,
    {
        Self {
            func: Rc::new(f),
            instance: None,
            provider: None,
        }
    }

    /// Bind `f` to `instance` permanently.
    pub(crate) fn bind<B: Blueprint>(
        instance: &Rc<RefCell<B>>,
        name: &'static str,
        f: BehaviorFn<B>,
    ) -> Self {
        let state = instance.clone();
        let func = move |params: &[Val]| {
            let mut state = state
                .try_borrow_mut()
                .map_err(|_| CompositionError::InstanceBusy {
                    behavior: name.to_string(),
                })?;
            f(&mut state, params)
        };
        let erased: Rc<dyn Any> = instance.clone();
        Self {
            func: Rc::new(func),
            instance: Some(erased),
            provider: Some(B::NAME),
        }
    }

    pub fn call(&self, params: &[Val]) -> Result<Val, CompositionError> {
        (self.func)(params)
    }

    /// Name of the blueprint this behavior was bound from, if any.
    pub fn provider(&self) -> Option<&'static str> {
        self.provider
    }

    /// Whether both handles operate on the same constructed instance.
    pub fn shares_instance(&self, other: &Behavior) -> bool {
        match (&self.instance, &other.instance) {
            (Some(a), Some(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl fmt::Debug for Behavior {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Behavior")
            .field("provider", &self.provider)
            .field("bound", &self.instance.is_some())
            .finish()
    }
}

/// Bind every behavior of `B` accepted by `filter` to `instance`.
///
/// Entries declared under [`INITIALIZER`] are skipped.
pub(crate) fn bind_table<B: Blueprint>(
    instance: &Rc<RefCell<B>>,
    filter: &dyn Fn(&str) -> bool,
) -> Vec<(&'static str, Behavior)> {
    B::behaviors()
        .iter()
        .filter(|(name, _)| {
            if *name == INITIALIZER {
                tracing::trace!(blueprint = B::NAME, "skipping initializer slot");
                return false;
            }
            filter(*name)
        })
        .map(|(name, f)| (name, Behavior::bind(instance, name, f)))
        .collect()
}
