//! Generate engines: where generated files end up.

mod local;
mod memory;

pub use local::LocalGenerateEngine;
pub use memory::MemoryGenerateEngine;

use std::path::{Path, PathBuf};

/// Absolute targets are kept; relative ones are joined to `base`.
fn resolve_target(base: &Path, target: &Path) -> PathBuf {
    if target.is_absolute() {
        target.to_path_buf()
    } else {
        base.join(target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relative_targets_are_joined() {
        assert_eq!(
            resolve_target(Path::new("/out"), Path::new("a/b.txt")),
            PathBuf::from("/out/a/b.txt")
        );
        assert_eq!(
            resolve_target(Path::new("/out"), Path::new("/abs.txt")),
            PathBuf::from("/abs.txt")
        );
    }
}
