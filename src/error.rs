use thiserror::Error;

#[derive(Debug, Error)]
pub enum CompositionError {
    #[error("empty composition: no blueprints added")]
    Empty,

    #[error("behavior not found: '{0}'")]
    BehaviorNotFound(String),

    #[error("blueprint '{blueprint}' expects {expected} argument(s), got {got}")]
    InvalidArgs {
        blueprint: &'static str,
        expected: usize,
        got: usize,
    },

    #[error("type mismatch: expected {expected}, found {found}")]
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
    },

    #[error("instance behind '{behavior}' is already in use")]
    InstanceBusy { behavior: String },

    #[error("target rejected definition of '{name}': {reason}")]
    Rejected { name: String, reason: String },

    #[error(transparent)]
    Init(#[from] Box<dyn std::error::Error + Send + Sync>),
}
