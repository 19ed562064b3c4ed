//! Model Query Handlers

use std::sync::Arc;

use crate::application::queries::ListSupportedModels;
use crate::application::registry::{ModelInfo, ProviderRegistry};

/// ListSupportedModels Handler
pub struct ListSupportedModelsHandler {
    registry: Arc<ProviderRegistry>,
}

impl ListSupportedModelsHandler {
    pub fn new(registry: Arc<ProviderRegistry>) -> Self {
        Self { registry }
    }

    pub fn handle(&self, _query: ListSupportedModels) -> Vec<ModelInfo> {
        self.registry.supported_models()
    }
}
