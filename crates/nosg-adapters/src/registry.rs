//! Generator registry: turns a loaded component into a runnable generator.

use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::debug;

use nosg_core::{
    application::{
        ApplicationError, GenerateHandle, Generator, ports::GeneratorFactory,
    },
    domain::{Component, DomainError, GeneratorOptions, GeneratorSpec, SourceConventions},
    error::NosgResult,
};

use crate::generators::{CreateComponentGenerator, TemplateGenerator};

/// Generators addressable by id from a component's `[generator] uses`.
#[derive(Clone, Default)]
pub struct GeneratorRegistry {
    generators: BTreeMap<String, Arc<dyn Generator>>,
}

impl GeneratorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding the built-in generators.
    pub fn with_builtin(conventions: SourceConventions) -> Self {
        let mut registry = Self::new();
        let create = CreateComponentGenerator::new(conventions);
        registry.register(create.name().to_string(), Arc::new(create));
        registry
    }

    /// Register `generator` under `id`, replacing any previous one.
    pub fn register(&mut self, id: impl Into<String>, generator: Arc<dyn Generator>) {
        self.generators.insert(id.into(), generator);
    }

    pub fn get(&self, id: &str) -> Option<Arc<dyn Generator>> {
        self.generators.get(id).cloned()
    }

    /// Registered ids, sorted.
    pub fn ids(&self) -> Vec<&str> {
        self.generators.keys().map(String::as_str).collect()
    }
}

impl std::fmt::Debug for GeneratorRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeneratorRegistry")
            .field("ids", &self.ids())
            .finish()
    }
}

impl GeneratorFactory for GeneratorRegistry {
    fn build(&self, component: &Component) -> NosgResult<Arc<dyn Generator>> {
        let Some(spec) = &component.generator else {
            return Err(DomainError::InvalidGeneratorReference {
                value: component.path.display().to_string(),
                kind: "component without generator",
            }
            .into());
        };

        match spec {
            GeneratorSpec::Registered { id, defaults } => {
                let inner = self.get(id).ok_or_else(|| ApplicationError::UnknownGenerator {
                    id: id.clone(),
                    available: self.ids().into_iter().map(String::from).collect(),
                })?;
                debug!(component = %component.name, generator = %id, "using registered generator");
                Ok(Arc::new(WithDefaults {
                    inner,
                    defaults: defaults.clone(),
                }))
            }
            GeneratorSpec::Template { files } => {
                debug!(component = %component.name, files = files.len(), "using template generator");
                Ok(Arc::new(TemplateGenerator::new(
                    component.name.clone(),
                    files.clone(),
                )))
            }
        }
    }
}

/// Runs `inner` with component defaults under the caller's options.
struct WithDefaults {
    inner: Arc<dyn Generator>,
    defaults: GeneratorOptions,
}

impl Generator for WithDefaults {
    fn name(&self) -> &str {
        self.inner.name()
    }

    fn run(&self, handle: GenerateHandle, options: GeneratorOptions) -> NosgResult<()> {
        self.inner.run(handle, options.merged_over(&self.defaults))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generators::CREATE_COMPONENT;
    use nosg_core::domain::TemplateFile;
    use nosg_core::error::NosgError;

    fn component(generator: Option<GeneratorSpec>) -> Component {
        let component = Component::at("/s/set/layer/thing.toml", &SourceConventions::default());
        match generator {
            Some(spec) => component.with_generator(spec),
            None => component,
        }
    }

    #[test]
    fn builtin_registry_lists_create_component() {
        let registry = GeneratorRegistry::with_builtin(SourceConventions::default());
        assert_eq!(registry.ids(), vec![CREATE_COMPONENT]);
    }

    #[test]
    fn component_without_generator_is_rejected() {
        let Err(err) = GeneratorRegistry::new().build(&component(None)) else {
            panic!("a component without generator must not build");
        };
        assert!(matches!(
            err,
            NosgError::Domain(DomainError::InvalidGeneratorReference { .. })
        ));
    }

    #[test]
    fn unknown_id_lists_available_generators() {
        let registry = GeneratorRegistry::with_builtin(SourceConventions::default());
        let Err(err) = registry.build(&component(Some(GeneratorSpec::Registered {
            id: "nope".into(),
            defaults: GeneratorOptions::new(),
        }))) else {
            panic!("an unknown id must not build");
        };

        let Some(ApplicationError::UnknownGenerator { available, .. }) = err.as_application()
        else {
            panic!("expected UnknownGenerator");
        };
        assert_eq!(available, &vec![CREATE_COMPONENT.to_string()]);
    }

    #[test]
    fn registered_generators_keep_their_name() {
        let registry = GeneratorRegistry::with_builtin(SourceConventions::default());
        let generator = registry
            .build(&component(Some(GeneratorSpec::Registered {
                id: CREATE_COMPONENT.into(),
                defaults: GeneratorOptions::new(),
            })))
            .unwrap();
        assert_eq!(generator.name(), CREATE_COMPONENT);
    }

    #[test]
    fn template_generators_are_named_after_the_component() {
        let generator = GeneratorRegistry::new()
            .build(&component(Some(GeneratorSpec::Template {
                files: vec![TemplateFile {
                    path: "a".into(),
                    content: String::new(),
                }],
            })))
            .unwrap();
        assert_eq!(generator.name(), "thing");
    }
}
