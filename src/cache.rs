use std::cell::{Cell, RefCell};
use std::collections::HashMap;

use crate::property::{PropertyName, PropertyResolution, Resolution, ValueResolution};
use crate::resolver::PrefixResolver;
use crate::surface::StyleSurface;

/// Memoizes resolutions against one surface.
///
/// Capabilities do not change while the process runs, so entries never expire.
#[derive(Debug)]
pub struct CachingResolver<S> {
    inner: PrefixResolver<S>,
    names: RefCell<HashMap<PropertyName, PropertyResolution>>,
    values: RefCell<HashMap<(PropertyName, String), ValueResolution>>,
    hits: Cell<usize>,
}

impl<S> CachingResolver<S>
where
    S: StyleSurface,
{
    pub fn new(inner: PrefixResolver<S>) -> Self {
        Self {
            inner,
            names: RefCell::new(HashMap::new()),
            values: RefCell::new(HashMap::new()),
            hits: Cell::new(0),
        }
    }

    pub fn inner(&self) -> &PrefixResolver<S> {
        &self.inner
    }

    pub fn resolve_property_name(&self, key: &PropertyName) -> PropertyResolution {
        if let Some(cached) = self.names.borrow().get(key) {
            self.hits.set(self.hits.get() + 1);
            return cached.clone();
        }
        let resolved = self.inner.resolve_property_name(key);
        self.names.borrow_mut().insert(key.clone(), resolved.clone());
        resolved
    }

    pub fn resolve_property_value(&self, key: &PropertyName, value: &str) -> ValueResolution {
        let cache_key = (key.clone(), value.to_string());
        if let Some(cached) = self.values.borrow().get(&cache_key) {
            self.hits.set(self.hits.get() + 1);
            return cached.clone();
        }
        let resolved = self.inner.resolve_property_value(key, value);
        self.values.borrow_mut().insert(cache_key, resolved.clone());
        resolved
    }

    /// Same composition as [`PrefixResolver::resolve`], built from the cached halves.
    pub fn resolve(&self, key: &PropertyName, value: &str) -> Resolution {
        match self.resolve_property_name(key) {
            PropertyResolution::Unsupported => match self.resolve_property_value(key, value) {
                ValueResolution::Supported(v) => Resolution::Value(v),
                ValueResolution::Unsupported => Resolution::Unsupported,
            },
            property => Resolution::Property(property),
        }
    }

    pub fn hits(&self) -> usize {
        self.hits.get()
    }

    /// Number of cached answers.
    pub fn len(&self) -> usize {
        self.names.borrow().len() + self.values.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
