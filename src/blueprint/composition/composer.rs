use crate::blueprint::Blueprint;
use crate::error::CompositionError;
use super::descriptor::BlueprintDescriptor;
use super::MixedType;

/// Builder for a [`MixedType`].
///
/// Blueprints are layered in the order they are added; the first one is the
/// base. When several declare the same behavior, the last one added wins.
pub struct Composer {
    descriptors: Vec<BlueprintDescriptor>,
}

impl Composer {
    pub fn new() -> Self {
        Self {
            descriptors: Vec::new(),
        }
    }

    /// Add a blueprint descriptor.
    pub fn add(&mut self, descriptor: BlueprintDescriptor) -> &mut Self {
        self.descriptors.push(descriptor);
        self
    }

    /// Add blueprint `B` with all of its behaviors.
    pub fn with<B: Blueprint>(&mut self) -> &mut Self {
        self.add(BlueprintDescriptor::of::<B>())
    }

    /// Validate the list and produce the composed type.
    pub fn compose(self) -> Result<MixedType, CompositionError> {
        let mut descriptors = self.descriptors.into_iter();
        let base = descriptors.next().ok_or(CompositionError::Empty)?;
        let mixins: Vec<_> = descriptors.collect();

        tracing::debug!(
            base = base.name(),
            mixins = ?mixins.iter().map(BlueprintDescriptor::name).collect::<Vec<_>>(),
            "composed mixed type"
        );
        Ok(MixedType::new(base, mixins))
    }
}

impl Default for Composer {
    fn default() -> Self {
        Self::new()
    }
}

/// Compose a new type from `descriptors`, base first.
pub fn compose_new(
    descriptors: impl IntoIterator<Item = BlueprintDescriptor>,
) -> Result<MixedType, CompositionError> {
    let mut composer = Composer::new();
    for descriptor in descriptors {
        composer.add(descriptor);
    }
    composer.compose()
}

/// Compose a new type from blueprint types, base first.
///
/// Expands to a [`Composer`] call and evaluates to
/// `Result<MixedType, CompositionError>`. `mix![]` is an
/// [`Empty`](CompositionError::Empty) error.
#[macro_export]
macro_rules! mix {
    ($($blueprint:ty),* $(,)?) => {{
        #[allow(unused_mut)]
        let mut composer = $crate::Composer::new();
        $( composer.with::<$blueprint>(); )*
        composer.compose()
    }};
}
