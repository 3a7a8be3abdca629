use std::rc::Rc;

use super::composition::descriptor::{BlueprintDescriptor, NameFilter};

/// Extension methods for restricting which behaviors a descriptor copies.
///
/// Filters stack: each call narrows what previous calls allowed. The
/// initializer still runs in full.
pub trait ExportFilter: Sized {
    /// Keep behaviors whose names satisfy `f`.
    fn filter_behaviors(self, f: impl Fn(&str) -> bool + 'static) -> Self;

    /// Keep only behaviors whose names are in `allow`.
    fn exposing(self, allow: &[&str]) -> Self {
        let allow: Vec<String> = allow.iter().map(|s| s.to_string()).collect();
        self.filter_behaviors(move |name| allow.iter().any(|a| a == name))
    }

    /// Remove behaviors whose names are in `deny`; keep everything else.
    fn hiding(self, deny: &[&str]) -> Self {
        let deny: Vec<String> = deny.iter().map(|s| s.to_string()).collect();
        self.filter_behaviors(move |name| !deny.iter().any(|d| d == name))
    }
}

impl ExportFilter for BlueprintDescriptor {
    fn filter_behaviors(mut self, f: impl Fn(&str) -> bool + 'static) -> Self {
        let filter: NameFilter = match self.filter.take() {
            Some(prev) => Rc::new(move |name: &str| prev(name) && f(name)),
            None => Rc::new(f),
        };
        self.filter = Some(filter);
        self
    }
}
