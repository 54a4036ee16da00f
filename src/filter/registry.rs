//! Feature descriptors and the registry of interceptor factories.

use std::collections::BTreeMap;

use serde::Serialize;

use super::equivalent::{EmptyFactory, EquivalentReturnFilterFactory};
use super::{CompoundInterceptor, MutationInterceptor};

/// A named, independently switchable filtering capability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Feature {
    pub name: &'static str,
    pub on_by_default: bool,
    pub description: &'static str,
}

impl Feature {
    pub const fn named(name: &'static str) -> Self {
        Self {
            name,
            on_by_default: false,
            description: "",
        }
    }

    pub const fn with_on_by_default(mut self, on: bool) -> Self {
        self.on_by_default = on;
        self
    }

    pub const fn with_description(mut self, description: &'static str) -> Self {
        self.description = description;
        self
    }
}

/// Values an interceptor factory may need at construction time.
#[derive(Debug, Clone)]
pub struct InterceptorParams {
    /// Zero-argument calls recognized as returning an empty value.
    pub empty_factories: Vec<EmptyFactory>,
}

impl Default for InterceptorParams {
    fn default() -> Self {
        Self {
            empty_factories: EmptyFactory::defaults(),
        }
    }
}

/// Builds an interceptor and describes the feature it provides.
pub trait InterceptorFactory: Send + Sync {
    fn description(&self) -> &'static str;

    fn provides(&self) -> Feature;

    fn create_interceptor(&self, params: &InterceptorParams) -> Box<dyn MutationInterceptor>;
}

/// Explicit on/off overrides for features, keyed case-insensitively by name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeatureToggles {
    toggles: BTreeMap<String, bool>,
}

impl FeatureToggles {
    pub fn new<'a>(toggles: impl IntoIterator<Item = (&'a String, &'a bool)>) -> Self {
        Self {
            toggles: toggles
                .into_iter()
                .map(|(name, on)| (name.to_uppercase(), *on))
                .collect(),
        }
    }

    pub fn set(&mut self, name: &str, on: bool) {
        self.toggles.insert(name.to_uppercase(), on);
    }

    /// Whether `feature` is on, falling back to its default.
    pub fn is_enabled(&self, feature: &Feature) -> bool {
        self.toggles
            .get(&feature.name.to_uppercase())
            .copied()
            .unwrap_or(feature.on_by_default)
    }
}

/// A registered feature and whether the current toggles enable it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeatureStatus {
    pub name: &'static str,
    pub enabled: bool,
    pub on_by_default: bool,
    pub description: &'static str,
}

/// Registry of available interceptor factories.
#[derive(Default)]
pub struct FilterRegistry {
    factories: Vec<Box<dyn InterceptorFactory>>,
}

impl FilterRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            factories: Vec::new(),
        }
    }

    pub fn register(&mut self, factory: Box<dyn InterceptorFactory>) {
        self.factories.push(factory);
    }

    pub fn factories(&self) -> &[Box<dyn InterceptorFactory>] {
        &self.factories
    }

    pub fn features(&self) -> Vec<Feature> {
        self.factories.iter().map(|f| f.provides()).collect()
    }

    /// Every registered feature with its state under `toggles`.
    pub fn status(&self, toggles: &FeatureToggles) -> Vec<FeatureStatus> {
        self.features()
            .into_iter()
            .map(|feature| FeatureStatus {
                name: feature.name,
                enabled: toggles.is_enabled(&feature),
                on_by_default: feature.on_by_default,
                description: feature.description,
            })
            .collect()
    }

    /// Chain the interceptors of every enabled feature, in registration order.
    pub fn create_enabled(
        &self,
        toggles: &FeatureToggles,
        params: &InterceptorParams,
    ) -> CompoundInterceptor {
        let mut chain = CompoundInterceptor::default();
        for factory in &self.factories {
            let feature = factory.provides();
            if toggles.is_enabled(&feature) {
                let interceptor = factory.create_interceptor(params);
                tracing::debug!(
                    feature = feature.name,
                    interceptor = interceptor.name(),
                    kind = ?interceptor.kind(),
                    "enabling feature"
                );
                chain.push(interceptor);
            } else {
                tracing::debug!(feature = feature.name, "feature disabled");
            }
        }
        chain
    }
}

impl std::fmt::Debug for FilterRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FilterRegistry")
            .field("features", &self.features())
            .finish()
    }
}

/// Registry with every built-in filter.
pub fn default_registry() -> FilterRegistry {
    let mut registry = FilterRegistry::new();
    registry.register(Box::new(EquivalentReturnFilterFactory));
    registry
}
