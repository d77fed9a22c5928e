//! The production adapters wired into the core services over a real
//! directory tree.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use nosg_adapters::{
    GeneratorRegistry, GlobPatternMatcher, LocalGenerateEngine, ManifestComponentLoader,
    MemorySink,
};
use nosg_core::application::ApplicationError;
use nosg_core::prelude::*;
use tempfile::TempDir;

struct Stack {
    dir: TempDir,
    sink: MemorySink,
    resolver: Arc<ComponentResolver>,
    runner: GeneratorRunner,
}

fn write(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, content).unwrap();
}

fn stack() -> Stack {
    let dir = TempDir::new().unwrap();
    write(
        dir.path(),
        "sources/generators/tools/new-atom.toml",
        r#"
        [component]
        description = "Creates an atom"

        [generator]
        uses = "create-component"

        [generator.defaults]
        layer = "atoms"
        set = "ui"
        "#,
    );
    write(
        dir.path(),
        "sources/generators/tools/readme/index.toml",
        r##"
        [[generator.files]]
        path = "{{name}}/README.md"
        content = "# {{name}}"
        "##,
    );
    write(dir.path(), "sources/ui/atoms/icon.toml", "");

    let sink = MemorySink::new();
    let log: Arc<dyn LogSink> = Arc::new(sink.clone());
    let conventions = SourceConventions::default();

    let validator =
        SourcesDirectoryValidator::new(log.clone()).with_working_directory(dir.path());
    let matcher = FilepathMatcher::new(
        Arc::new(validator),
        Arc::new(GlobPatternMatcher::new()),
        conventions.clone(),
        log.clone(),
    );
    let resolver = Arc::new(ComponentResolver::new(
        Arc::new(matcher),
        Arc::new(ManifestComponentLoader::new(conventions.clone())),
        log.clone(),
    ));
    let runner = GeneratorRunner::new(
        resolver.clone(),
        Arc::new(GeneratorRegistry::with_builtin(conventions)),
        Arc::new(LocalGenerateEngine::new().with_working_directory(dir.path())),
        log,
    );

    Stack {
        dir,
        sink,
        resolver,
        runner,
    }
}

fn options(json: &str) -> GeneratorOptions {
    GeneratorOptions::from_json_str(json).unwrap()
}

#[tokio::test]
async fn registered_generator_creates_a_resolvable_component() {
    let stack = stack();

    let report = stack
        .runner
        .run(
            RunRequest::new("generators:new-atom")
                .with_options(options(r#"{"name": "button"}"#))
                .with_timeout(Duration::from_secs(5)),
        )
        .await
        .unwrap();

    let created = stack.dir.path().join("sources/ui/atoms/button.toml");
    assert_eq!(report.written, vec![created.clone()]);

    let component = stack
        .resolver
        .resolve(&MatchRequest::new(ComponentPath::new("atoms/button").unwrap()))
        .await
        .unwrap();
    assert_eq!(component.path, created);
    assert_eq!(component.name, "button");

    let log = stack.sink.contents();
    assert!(log.contains("NOTICE: "));
    assert!(log.contains("SUCCESS: "));
}

#[tokio::test]
async fn caller_options_override_component_defaults() {
    let stack = stack();

    stack
        .runner
        .run(
            RunRequest::new("new-atom")
                .with_options(options(r#"{"name": "chip", "set": "extra"}"#))
                .with_timeout(Duration::from_secs(5)),
        )
        .await
        .unwrap();

    assert!(
        stack
            .dir
            .path()
            .join("sources/extra/atoms/chip.toml")
            .is_file()
    );
}

#[tokio::test]
async fn existing_components_are_not_overwritten() {
    let stack = stack();

    let report = stack
        .runner
        .run(
            RunRequest::new("new-atom")
                .with_options(options(r#"{"name": "icon"}"#))
                .with_timeout(Duration::from_secs(5)),
        )
        .await
        .unwrap();

    assert!(report.written.is_empty());
    assert_eq!(report.skipped.len(), 1);
    assert_eq!(
        std::fs::read_to_string(stack.dir.path().join("sources/ui/atoms/icon.toml")).unwrap(),
        ""
    );
}

#[tokio::test]
async fn template_components_render_their_files() {
    let stack = stack();
    let out = stack.dir.path().join("out");

    stack
        .runner
        .run(
            RunRequest::new("readme")
                .with_options(options(&format!(
                    r#"{{"name": "card", "outputDirectory": "{}"}}"#,
                    out.display()
                )))
                .with_timeout(Duration::from_secs(5)),
        )
        .await
        .unwrap();

    assert_eq!(
        std::fs::read_to_string(out.join("card/README.md")).unwrap(),
        "# card"
    );
}

#[tokio::test]
async fn components_without_generators_cannot_run() {
    let stack = stack();

    let err = stack
        .runner
        .run(RunRequest::new("icon").with_timeout(Duration::from_secs(5)))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        NosgError::Domain(nosg_core::domain::DomainError::InvalidGeneratorReference { .. })
    ));
}

#[tokio::test]
async fn unknown_components_are_not_found() {
    let stack = stack();

    let err = stack
        .runner
        .run(RunRequest::new("missing").with_timeout(Duration::from_secs(5)))
        .await
        .unwrap_err();

    assert!(matches!(
        err.as_application(),
        Some(ApplicationError::ComponentNotFound { .. })
    ));
}
