use std::collections::VecDeque;

use crate::ir::ClassModel;

/// Collects generated classes for one run.
///
/// Models are pushed to the front, so the last class completed (the root)
/// comes first and the deepest nested class comes last. Reverse the result
/// for referenced-before-referencing order.
#[derive(Debug, Default)]
pub struct ModelRegistry {
    models: VecDeque<ClassModel>,
}

impl ModelRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, model: ClassModel) {
        tracing::debug!(class = %model.class_name, fields = model.fields.len(), "class registered");
        self.models.push_front(model);
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }

    pub fn results(self) -> Vec<ClassModel> {
        self.models.into()
    }
}
