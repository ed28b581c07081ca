//! Id-to-widget registry built during interpretation.

use std::collections::BTreeMap;

use crate::backend::NodeHandle;
use crate::model::Widget;

/// A registered widget: the document spec plus the backend node it became.
#[derive(Debug, Clone)]
pub struct RegistryEntry {
    pub spec: Widget,
    pub handle: NodeHandle,
}

/// Widgets addressable by id. Ids are not validated for uniqueness; a
/// duplicate silently replaces the earlier entry.
#[derive(Debug, Clone, Default)]
pub struct Registry(BTreeMap<String, RegistryEntry>);

impl Registry {
    /// Register a widget. Nodes without an id are not addressable and are
    /// skipped.
    pub fn register(&mut self, spec: &Widget, handle: NodeHandle) {
        if spec.id.is_empty() {
            return;
        }
        self.0.insert(
            spec.id.clone(),
            RegistryEntry {
                spec: spec.clone(),
                handle,
            },
        );
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&RegistryEntry> {
        self.0.get(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &RegistryEntry)> {
        self.0.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn anonymous_widgets_are_not_registered() {
        let mut registry = Registry::default();
        registry.register(&Widget::default(), NodeHandle::new(0));
        assert!(registry.is_empty());
    }

    #[test]
    fn last_registration_wins() {
        let mut registry = Registry::default();
        let mut first = Widget::default();
        first.id = "name".to_string();
        first.text = "old".to_string();
        let mut second = first.clone();
        second.text = "new".to_string();

        registry.register(&first, NodeHandle::new(0));
        registry.register(&second, NodeHandle::new(1));

        assert_eq!(registry.len(), 1);
        let entry = registry.get("name").expect("registered");
        assert_eq!(entry.spec.text, "new");
        assert_eq!(entry.handle, NodeHandle::new(1));
    }
}
