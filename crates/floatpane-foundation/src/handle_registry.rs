//! Drag-handle registration and initiator validation.
//!
//! A drag scope decides whether a pointer-down may start a drag. Host
//! sub-elements register themselves as handles on mount and unregister on
//! unmount; the registry is owned by the scope instance, never ambient.

use crate::pointer::ElementId;
use rustc_hash::FxHashSet;

/// Set of element identities that are valid drag initiators.
#[derive(Debug, Default)]
pub struct HandleRegistry {
    handles: FxHashSet<ElementId>,
}

impl HandleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, id: ElementId) {
        self.handles.insert(id);
    }

    pub fn unregister(&mut self, id: ElementId) {
        self.handles.remove(&id);
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    pub fn contains(&self, id: ElementId) -> bool {
        self.handles.contains(&id)
    }

    /// True when any element in the hit chain (target or ancestor) is a
    /// registered handle.
    pub fn matches_chain(&self, chain: &[ElementId]) -> bool {
        chain.iter().any(|id| self.handles.contains(id))
    }
}

/// Predicate over a hit chain, used when no handles are registered.
pub type InitiatorPredicate = Box<dyn Fn(&[ElementId]) -> bool>;

/// Scope that determines which pointer-downs may initiate a drag.
///
/// Resolution order: a non-empty registry wins; otherwise the fallback
/// predicate, if configured; otherwise every pointer-down on the surface is
/// a valid initiator. A disabled scope validates nothing and silently
/// ignores registrations.
pub struct DragScope {
    registry: HandleRegistry,
    fallback: Option<InitiatorPredicate>,
    enabled: bool,
}

impl Default for DragScope {
    fn default() -> Self {
        Self::new()
    }
}

impl DragScope {
    pub fn new() -> Self {
        Self {
            registry: HandleRegistry::new(),
            fallback: None,
            enabled: true,
        }
    }

    pub fn with_fallback(mut self, predicate: InitiatorPredicate) -> Self {
        self.fallback = Some(predicate);
        self
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn register(&mut self, id: ElementId) {
        if !self.enabled {
            return;
        }
        self.registry.register(id);
    }

    pub fn unregister(&mut self, id: ElementId) {
        self.registry.unregister(id);
    }

    pub fn registry(&self) -> &HandleRegistry {
        &self.registry
    }

    pub fn is_valid_initiator(&self, chain: &[ElementId]) -> bool {
        if !self.enabled {
            return false;
        }
        if !self.registry.is_empty() {
            return self.registry.matches_chain(chain);
        }
        match &self.fallback {
            Some(predicate) => predicate(chain),
            None => true,
        }
    }
}
