// crates/scholarship-providers/src/registry.rs
// ============================================================================
// Module: Option Provider Registry
// Description: Named registry of select-option providers.
// Purpose: Resolve provider names referenced by the form schema.
// Dependencies: scholarship-core
// ============================================================================

//! ## Overview
//! Select fields may name an option provider instead of listing options. The
//! registry maps those names to [`OptionProvider`] implementations. Lookup of
//! an unregistered name is an error; nothing is ever invoked by a name that
//! was not explicitly registered.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use scholarship_core::FormSchema;
use scholarship_core::OptionItem;
use scholarship_core::OptionProvider;
use scholarship_core::OptionResolver;
use scholarship_core::ProviderError;

use crate::builtin::academic_years;
use crate::builtin::class_years;

// ============================================================================
// SECTION: Registry
// ============================================================================

/// Option provider registry keyed by provider name.
#[derive(Default)]
pub struct OptionProviderRegistry {
    /// Providers keyed by name.
    providers: BTreeMap<String, Box<dyn OptionProvider>>,
}

impl OptionProviderRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry with the built-in providers registered.
    #[must_use]
    pub fn with_builtin_providers() -> Self {
        let mut registry = Self::new();
        registry.register_builtin_providers();
        registry
    }

    /// Registers a provider, replacing any earlier provider of the same name.
    pub fn register_provider(
        &mut self,
        name: impl Into<String>,
        provider: impl OptionProvider + 'static,
    ) {
        self.providers.insert(name.into(), Box::new(provider));
    }

    /// Registers `class_years` and `academic_years`.
    pub fn register_builtin_providers(&mut self) {
        self.register_provider("class_years", class_years);
        self.register_provider("academic_years", academic_years);
    }

    /// Returns registered provider names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.providers.keys().map(String::as_str)
    }

    /// Checks that every provider the schema references is registered.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::Unknown`] for the first missing provider.
    pub fn validate_schema(&self, schema: &FormSchema) -> Result<(), ProviderError> {
        for (_, provider) in schema.provider_references() {
            if !self.providers.contains_key(provider) {
                return Err(ProviderError::Unknown(provider.to_string()));
            }
        }
        Ok(())
    }
}

impl OptionResolver for OptionProviderRegistry {
    fn resolve(&self, name: &str) -> Result<Vec<OptionItem>, ProviderError> {
        let Some(provider) = self.providers.get(name) else {
            return Err(ProviderError::Unknown(name.to_string()));
        };
        provider.options()
    }

    fn contains(&self, name: &str) -> bool {
        self.providers.contains_key(name)
    }
}
