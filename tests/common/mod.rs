#![allow(dead_code)]

use std::io;

use mixin_composer::{expect_arity, BehaviorTable, Blueprint, CompositionError, Mixin, Val};

/// Records the arguments its initializer received.
pub struct SimpleMixin {
    args: Vec<Val>,
}

impl Blueprint for SimpleMixin {
    const NAME: &'static str = "SimpleMixin";

    fn construct(args: &[Val]) -> Result<Self, CompositionError> {
        Ok(Self { args: args.to_vec() })
    }

    fn behaviors() -> BehaviorTable<Self> {
        BehaviorTable::new().with("init", |m, _| Ok(Val::List(m.args.clone())))
    }
}

impl Mixin for SimpleMixin {
    type Source = Self;
}

/// An existing type that knows nothing about mixins beyond implementing
/// `Blueprint`.
pub struct ExistingClass {
    label: String,
}

impl Blueprint for ExistingClass {
    const NAME: &'static str = "ExistingClass";

    fn construct(args: &[Val]) -> Result<Self, CompositionError> {
        let label = match args.first() {
            Some(v) => v.as_str()?.to_string(),
            None => "existing".to_string(),
        };
        Ok(Self { label })
    }

    fn behaviors() -> BehaviorTable<Self> {
        BehaviorTable::new().with("init", |c, _| Ok(Val::from(c.label.as_str())))
    }
}

/// Exposes `ExistingClass` under a mixin name.
pub struct ClassMixin;

impl Mixin for ClassMixin {
    type Source = ExistingClass;
}

/// Shared mutable state across its behaviors.
pub struct Counter {
    count: i64,
}

impl Blueprint for Counter {
    const NAME: &'static str = "Counter";

    fn construct(args: &[Val]) -> Result<Self, CompositionError> {
        expect_arity(Self::NAME, args, 1)?;
        Ok(Self { count: args[0].as_s64()? })
    }

    fn behaviors() -> BehaviorTable<Self> {
        BehaviorTable::new()
            .with("increment", |c: &mut Counter, _| {
                c.count += 1;
                Ok(Val::S64(c.count))
            })
            .with("get", |c: &mut Counter, _| Ok(Val::S64(c.count)))
    }
}

impl Counter {
    pub fn count(&self) -> i64 {
        self.count
    }

    pub fn set(&mut self, count: i64) {
        self.count = count;
    }
}

/// Declares nothing but its initializer.
pub struct Empty;

impl Blueprint for Empty {
    const NAME: &'static str = "Empty";

    fn construct(_: &[Val]) -> Result<Self, CompositionError> {
        Ok(Empty)
    }

    fn behaviors() -> BehaviorTable<Self> {
        BehaviorTable::new()
    }
}

/// Initializer always fails with a foreign error.
pub struct Broken;

impl Blueprint for Broken {
    const NAME: &'static str = "Broken";

    fn construct(_: &[Val]) -> Result<Self, CompositionError> {
        let err = io::Error::new(io::ErrorKind::InvalidInput, "broken on purpose");
        Err(CompositionError::Init(Box::new(err)))
    }

    fn behaviors() -> BehaviorTable<Self> {
        BehaviorTable::new().with("never", |_, _| Ok(Val::Unit))
    }
}

macro_rules! single {
    ($name:ident, $behavior:literal, $ret:literal) => {
        pub struct $name;

        impl Blueprint for $name {
            const NAME: &'static str = stringify!($name);

            fn construct(_: &[Val]) -> Result<Self, CompositionError> {
                Ok($name)
            }

            fn behaviors() -> BehaviorTable<Self> {
                BehaviorTable::new().with($behavior, |_, _| Ok(Val::from($ret)))
            }
        }
    };
}

single!(Foo, "foo", "Foo");
single!(Bar, "bar", "Bar");
single!(Baz, "baz", "Baz");
single!(Norf, "norf", "Norf");
single!(FOo, "foo", "FOo");
single!(FOO, "foo", "FOO");
