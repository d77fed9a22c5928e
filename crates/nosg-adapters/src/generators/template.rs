//! Generator rendering the `[[generator.files]]` a component declares.

use std::path::PathBuf;

use serde_json::Value;
use tracing::debug;

use nosg_core::{
    application::{GenerateHandle, Generator},
    domain::{FileContent, FileMap, GeneratorOptions, TemplateFile, WriteOptions},
    error::NosgResult,
};

/// Option naming the directory relative targets are written under.
pub const OUTPUT_DIRECTORY_KEY: &str = "outputDirectory";

#[derive(Debug, Clone)]
pub struct TemplateGenerator {
    name: String,
    files: Vec<TemplateFile>,
}

impl TemplateGenerator {
    pub fn new(name: impl Into<String>, files: Vec<TemplateFile>) -> Self {
        Self {
            name: name.into(),
            files,
        }
    }

    /// Render every declared file against `options`.
    pub fn render_files(&self, options: &GeneratorOptions) -> FileMap {
        self.files
            .iter()
            .map(|file| {
                (
                    PathBuf::from(render(&file.path, options)),
                    FileContent::Text(render(&file.content, options)),
                )
            })
            .collect()
    }
}

impl Generator for TemplateGenerator {
    fn name(&self) -> &str {
        &self.name
    }

    fn run(&self, handle: GenerateHandle, options: GeneratorOptions) -> NosgResult<()> {
        let files = self.render_files(&options);
        let write_options = WriteOptions {
            root: options.get_str(OUTPUT_DIRECTORY_KEY).map(PathBuf::from),
            ..WriteOptions::default()
        };

        debug!(generator = %self.name, files = files.len(), "rendered template files");
        handle.generate(files, write_options)
    }
}

/// Replace `{{key}}` (inner whitespace allowed) with the option value.
///
/// Strings are inserted as-is, other values as JSON. Unknown keys are left
/// untouched.
pub fn render(template: &str, options: &GeneratorOptions) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];

        let Some(end) = after.find("}}") else {
            rest = &rest[start..];
            break;
        };

        let key = after[..end].trim();
        match options.get(key) {
            Some(Value::String(s)) => out.push_str(s),
            Some(value) => out.push_str(&value.to_string()),
            None => out.push_str(&rest[start..start + 2 + end + 2]),
        }
        rest = &after[end + 2..];
    }

    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options(json: &str) -> GeneratorOptions {
        GeneratorOptions::from_json_str(json).unwrap()
    }

    #[test]
    fn strings_are_inserted_raw() {
        let opts = options(r#"{"name": "button"}"#);
        assert_eq!(render("# {{name}}", &opts), "# button");
        assert_eq!(render("{{ name }}.md", &opts), "button.md");
    }

    #[test]
    fn other_values_are_inserted_as_json() {
        let opts = options(r#"{"size": 3, "flags": [true]}"#);
        assert_eq!(render("{{size}} {{flags}}", &opts), "3 [true]");
    }

    #[test]
    fn unknown_and_unclosed_placeholders_are_kept() {
        let opts = options("{}");
        assert_eq!(render("a {{missing}} b", &opts), "a {{missing}} b");
        assert_eq!(render("a {{open", &opts), "a {{open");
    }

    #[test]
    fn files_render_paths_and_contents() {
        let generator = TemplateGenerator::new(
            "docs",
            vec![TemplateFile {
                path: "docs/{{name}}.md".into(),
                content: "# {{name}}".into(),
            }],
        );

        let files = generator.render_files(&options(r#"{"name": "card"}"#));

        assert_eq!(
            files.get(&PathBuf::from("docs/card.md")),
            Some(&FileContent::from("# card"))
        );
    }
}
