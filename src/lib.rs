//! Compose behavior onto targets from blueprints.
//!
//! A [`Blueprint`] declares an initializer and a fixed table of named
//! behaviors. [`mixin`] constructs one instance and copies every behavior
//! onto a target, bound to that instance. [`Composer`] (or [`mix!`]) layers
//! several blueprints into a new constructible [`MixedType`].

pub mod error;
pub mod blueprint;
mod mixin;
pub mod val;

pub use blueprint::{expect_arity, Behavior, BehaviorFn, BehaviorTable, Blueprint, INITIALIZER};
pub use blueprint::composition::{Mixed, MixedType};
pub use blueprint::composition::composer::{compose_new, Composer};
pub use blueprint::composition::descriptor::BlueprintDescriptor;
pub use blueprint::filtered::ExportFilter;
pub use blueprint::target::{Target, TargetOps};
pub use error::CompositionError;
pub use mixin::{mixin, mixin_new, Mixin};
pub use val::Val;
