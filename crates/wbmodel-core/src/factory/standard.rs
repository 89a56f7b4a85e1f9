//! Validating in-memory factory

use std::sync::Arc;

use super::DataObjectFactory;

/// Factory that allocates every shared string on its own
///
/// Stateless and cheap to create; the default backend of the model.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardFactory;

impl StandardFactory {
    pub fn new() -> Self {
        Self
    }
}

impl DataObjectFactory for StandardFactory {
    fn name(&self) -> &'static str {
        "standard"
    }

    fn share_str(&self, value: &str) -> Arc<str> {
        Arc::from(value)
    }
}
