//! Built-in generators.

mod create_component;
mod template;

pub use create_component::{CREATE_COMPONENT, CreateComponentGenerator};
pub use template::{OUTPUT_DIRECTORY_KEY, TemplateGenerator, render};
