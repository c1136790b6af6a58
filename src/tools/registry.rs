//! Insertion-ordered registries keyed by tool name / resource uri.

use std::collections::HashMap;
use std::sync::Arc;

use crate::core::{RegistryError, Resource, ResourceHandler, Tool, ToolHandler};

/// Vec keeps listing order; the map gives O(1) lookup by key.
struct Ordered<E> {
    entries: Vec<E>,
    by_key: HashMap<String, usize>,
}

impl<E> Default for Ordered<E> {
    fn default() -> Self {
        Self { entries: Vec::new(), by_key: HashMap::new() }
    }
}

impl<E> Ordered<E> {
    fn insert(&mut self, key: &str, entry: E) -> bool {
        if self.by_key.contains_key(key) {
            return false;
        }
        self.by_key.insert(key.to_string(), self.entries.len());
        self.entries.push(entry);
        true
    }

    fn get(&self, key: &str) -> Option<&E> {
        self.by_key.get(key).map(|&i| &self.entries[i])
    }
}

#[derive(Clone)]
pub struct ToolEntry {
    pub tool: Tool,
    pub handler: Arc<dyn ToolHandler>,
}

#[derive(Default)]
pub struct ToolRegistry {
    inner: Ordered<ToolEntry>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register<H: ToolHandler + 'static>(&mut self, tool: Tool, handler: H) -> Result<(), RegistryError> {
        let name = tool.name.clone();
        let entry = ToolEntry { tool, handler: Arc::new(handler) };
        if !self.inner.insert(&name, entry) {
            return Err(RegistryError::DuplicateTool(name));
        }
        tracing::debug!(tool = %name, "registered tool");
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&ToolEntry> {
        self.inner.get(name)
    }

    pub fn list(&self) -> Vec<Tool> {
        self.inner.entries.iter().map(|e| e.tool.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.inner.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.entries.is_empty()
    }
}

#[derive(Clone)]
pub struct ResourceEntry {
    pub resource: Resource,
    pub handler: Arc<dyn ResourceHandler>,
}

#[derive(Default)]
pub struct ResourceRegistry {
    inner: Ordered<ResourceEntry>,
}

impl ResourceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register<H: ResourceHandler + 'static>(
        &mut self,
        resource: Resource,
        handler: H,
    ) -> Result<(), RegistryError> {
        let uri = resource.uri.clone();
        let entry = ResourceEntry { resource, handler: Arc::new(handler) };
        if !self.inner.insert(&uri, entry) {
            return Err(RegistryError::DuplicateResource(uri));
        }
        tracing::debug!(uri = %uri, "registered resource");
        Ok(())
    }

    pub fn get(&self, uri: &str) -> Option<&ResourceEntry> {
        self.inner.get(uri)
    }

    pub fn list(&self) -> Vec<Resource> {
        self.inner.entries.iter().map(|e| e.resource.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.inner.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.entries.is_empty()
    }
}
