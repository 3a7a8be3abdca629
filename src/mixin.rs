use std::cell::RefCell;
use std::rc::Rc;

use crate::blueprint::target::{Target, TargetOps};
use crate::blueprint::{bind_table, Blueprint};
use crate::error::CompositionError;
use crate::val::Val;

/// Construct one `B` from `args` and copy its behaviors onto `target`,
/// each bound to that instance.
///
/// Same-named entries already on the target are overwritten. The target is
/// returned so calls can be chained. If the initializer fails nothing is
/// assigned; if the target refuses a definition, the behaviors assigned
/// before it stay in place.
pub fn mixin<'t, B, T>(target: &'t mut T, args: &[Val]) -> Result<&'t mut T, CompositionError>
where
    B: Blueprint,
    T: TargetOps + ?Sized,
{
    mixin_filtered::<B, T>(target, args, &|_| true)?;
    Ok(target)
}

/// [`mixin`] onto a fresh [`Target`].
pub fn mixin_new<B: Blueprint>(args: &[Val]) -> Result<Target, CompositionError> {
    let mut target = Target::new();
    mixin::<B, _>(&mut target, args)?;
    Ok(target)
}

/// Returns the number of behaviors assigned.
pub(crate) fn mixin_filtered<B, T>(
    target: &mut T,
    args: &[Val],
    filter: &dyn Fn(&str) -> bool,
) -> Result<usize, CompositionError>
where
    B: Blueprint,
    T: TargetOps + ?Sized,
{
    let instance = Rc::new(RefCell::new(B::construct(args)?));
    let bound = bind_table(&instance, filter);
    let count = bound.len();

    for (name, behavior) in bound {
        tracing::trace!(blueprint = B::NAME, behavior = name, "assigning behavior");
        target.define(name, behavior)?;
    }

    tracing::debug!(
        blueprint = B::NAME,
        args = args.len(),
        behaviors = count,
        "mixed in blueprint"
    );
    Ok(count)
}

/// Caller-facing composition entry points with the blueprint defaulted.
///
/// `Source` is usually `Self`. A mixin may instead name an existing type
/// that already implements [`Blueprint`], exposing it under its own name:
///
/// ```
/// use mixin_composer::{Blueprint, BehaviorTable, CompositionError, Mixin, Val};
///
/// struct Greeter;
///
/// impl Blueprint for Greeter {
///     const NAME: &'static str = "Greeter";
///
///     fn construct(_: &[Val]) -> Result<Self, CompositionError> {
///         Ok(Greeter)
///     }
///
///     fn behaviors() -> BehaviorTable<Self> {
///         BehaviorTable::new().with("greet", |_, _| Ok(Val::from("hello")))
///     }
/// }
///
/// struct GreeterMixin;
///
/// impl Mixin for GreeterMixin {
///     type Source = Greeter;
/// }
///
/// let target = GreeterMixin::mixin_new().unwrap();
/// assert_eq!(target.call("greet", &[]).unwrap(), Val::from("hello"));
/// ```
pub trait Mixin {
    type Source: Blueprint;

    /// Mix `Source` into `target` with no initializer arguments.
    fn mixin<T: TargetOps + ?Sized>(target: &mut T) -> Result<&mut T, CompositionError> {
        mixin::<Self::Source, T>(target, &[])
    }

    fn mixin_with<'t, T: TargetOps + ?Sized>(
        target: &'t mut T,
        args: &[Val],
    ) -> Result<&'t mut T, CompositionError> {
        mixin::<Self::Source, T>(target, args)
    }

    fn mixin_new() -> Result<Target, CompositionError> {
        mixin_new::<Self::Source>(&[])
    }

    fn mixin_new_with(args: &[Val]) -> Result<Target, CompositionError> {
        mixin_new::<Self::Source>(args)
    }
}
