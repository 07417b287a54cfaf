//! Glob matching for include/exclude lists.

use glob::{MatchOptions, Pattern};

/// Checks whether `path` matches any of `patterns`.
///
/// Patterns are glob expressions matched against the `/`-separated path
/// relative to the analysis root. A pattern such as `**/vendor/**` also
/// matches when its literal core (`/vendor/`) occurs anywhere in the path,
/// so that absolute and relative paths behave alike.
#[must_use]
pub fn matches_any<S: AsRef<str>>(patterns: &[S], path: &str) -> bool {
    let options = MatchOptions {
        case_sensitive: true,
        require_literal_separator: false,
        require_literal_leading_dot: false,
    };

    patterns.iter().any(|pattern| {
        let pattern = pattern.as_ref();
        if let Ok(glob_pattern) = Pattern::new(pattern) {
            if glob_pattern.matches_with(path, options) {
                return true;
            }
        }

        let core = pattern.replace("**", "");
        !core.is_empty() && !core.contains('*') && path.contains(&core)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn globstar_patterns() {
        let patterns = ["**/app/controllers/**"];
        assert!(matches_any(&patterns, "app/controllers/posts_controller.rb"));
        assert!(matches_any(
            &patterns,
            "engines/blog/app/controllers/posts_controller.rb"
        ));
        assert!(!matches_any(&patterns, "app/models/post.rb"));
    }

    #[test]
    fn substring_fallback() {
        assert!(matches_any(&["**/vendor/**"], "/srv/app/vendor/gem/lib.rb"));
        assert!(!matches_any(&["**/vendor/**"], "lib/vendored.rb"));
    }

    #[test]
    fn empty_list_matches_nothing() {
        let none: [&str; 0] = [];
        assert!(!matches_any(&none, "app/models/post.rb"));
    }
}
