//! Core analyzer for orchestrating lint execution.

use crate::config::{Config, RuleConfig};
use crate::context::FileContext;
use crate::parser::SourceParser;
use crate::rule::{Rule, RuleBox};
use crate::syntax::SyntaxTree;
use crate::types::{LintResult, Severity, Suggestion, Violation};
use crate::utils::allowance::check_allow_with_reason;
use crate::utils::patterns::matches_any;

use rayon::prelude::*;
use std::path::{Component, Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors that can occur during analysis.
#[derive(Debug, Error)]
pub enum AnalyzerError {
    /// IO error reading files.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Error walking the source tree.
    #[error("Failed to walk source tree: {0}")]
    Walk(#[from] ignore::Error),

    /// Error parsing a source file.
    #[error("Parse error in {path}: {message}")]
    Parse {
        /// Path to the file that failed to parse.
        path: PathBuf,
        /// Parse error message.
        message: String,
    },

    /// Glob pattern error.
    #[error("Invalid glob pattern: {0}")]
    Glob(#[from] glob::PatternError),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),

    /// The worker pool could not be started.
    #[error("Failed to start worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    /// No parser was registered with the builder.
    #[error("No source parser configured")]
    MissingParser,
}

/// Builder for configuring an [`Analyzer`].
#[derive(Default)]
pub struct AnalyzerBuilder {
    root: Option<PathBuf>,
    parser: Option<Box<dyn SourceParser>>,
    rules: Vec<RuleBox>,
    exclude_patterns: Vec<String>,
    include_patterns: Vec<String>,
    config: Option<Config>,
    fail_on_parse_error: bool,
}

impl AnalyzerBuilder {
    /// Creates a new builder with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the root directory to analyze.
    #[must_use]
    pub fn root(mut self, path: impl Into<PathBuf>) -> Self {
        self.root = Some(path.into());
        self
    }

    /// Sets the parser used for every discovered file.
    #[must_use]
    pub fn parser<P: SourceParser + 'static>(mut self, parser: P) -> Self {
        self.parser = Some(Box::new(parser));
        self
    }

    /// Adds a per-file rule to the analyzer.
    #[must_use]
    pub fn rule<R: Rule + 'static>(mut self, rule: R) -> Self {
        self.rules.push(Box::new(rule));
        self
    }

    /// Adds a boxed per-file rule to the analyzer.
    #[must_use]
    pub fn rule_box(mut self, rule: RuleBox) -> Self {
        self.rules.push(rule);
        self
    }

    /// Adds several boxed rules.
    #[must_use]
    pub fn rules(mut self, rules: impl IntoIterator<Item = RuleBox>) -> Self {
        self.rules.extend(rules);
        self
    }

    /// Adds an exclude glob pattern.
    #[must_use]
    pub fn exclude(mut self, pattern: impl Into<String>) -> Self {
        self.exclude_patterns.push(pattern.into());
        self
    }

    /// Adds multiple exclude glob patterns.
    #[must_use]
    pub fn excludes<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclude_patterns
            .extend(patterns.into_iter().map(Into::into));
        self
    }

    /// Adds an include glob pattern.
    #[must_use]
    pub fn include(mut self, pattern: impl Into<String>) -> Self {
        self.include_patterns.push(pattern.into());
        self
    }

    /// Sets the configuration.
    #[must_use]
    pub fn config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    /// Sets whether to fail on parse errors (default: false).
    #[must_use]
    pub fn fail_on_parse_error(mut self, fail: bool) -> Self {
        self.fail_on_parse_error = fail;
        self
    }

    /// Builds the analyzer.
    ///
    /// # Errors
    ///
    /// Returns an error if no parser was set, a pattern is not a valid glob,
    /// or the working directory cannot be determined.
    pub fn build(self) -> Result<Analyzer, AnalyzerError> {
        let parser = self.parser.ok_or(AnalyzerError::MissingParser)?;
        let config = self.config.unwrap_or_default();

        let root = self
            .root
            .unwrap_or_else(|| config.analyzer.root.clone());
        let root = if root.is_absolute() {
            root
        } else {
            std::env::current_dir()?.join(&root)
        };

        let mut exclude_patterns = self.exclude_patterns;
        for pattern in &config.analyzer.exclude {
            if !exclude_patterns.contains(pattern) {
                exclude_patterns.push(pattern.clone());
            }
        }

        let mut include_patterns = self.include_patterns;
        include_patterns.extend(config.analyzer.include.iter().cloned());

        for pattern in exclude_patterns.iter().chain(&include_patterns) {
            glob::Pattern::new(pattern)?;
        }

        Ok(Analyzer {
            root,
            parser,
            rules: self.rules,
            exclude_patterns,
            include_patterns,
            config,
            fail_on_parse_error: self.fail_on_parse_error,
        })
    }
}

/// The main analyzer that orchestrates lint execution.
///
/// Use [`Analyzer::builder()`] to construct an instance.
pub struct Analyzer {
    root: PathBuf,
    parser: Box<dyn SourceParser>,
    rules: Vec<RuleBox>,
    exclude_patterns: Vec<String>,
    include_patterns: Vec<String>,
    config: Config,
    fail_on_parse_error: bool,
}

impl Analyzer {
    /// Creates a new builder for configuring an analyzer.
    #[must_use]
    pub fn builder() -> AnalyzerBuilder {
        AnalyzerBuilder::new()
    }

    /// Returns the root directory being analyzed.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the number of registered rules.
    #[must_use]
    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    /// Returns the effective configuration.
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Gets the rule configuration for a specific rule.
    #[must_use]
    pub fn rule_config(&self, rule_name: &str) -> Option<&RuleConfig> {
        self.config.rules.get(rule_name)
    }

    /// Analyzes all files and returns the results.
    ///
    /// # Errors
    ///
    /// Returns an error if file discovery or reading fails, or on the first
    /// unparsable file when `fail_on_parse_error` is set.
    pub fn analyze(&self) -> Result<LintResult, AnalyzerError> {
        info!("Starting analysis at {:?}", self.root);

        let files = self.discover_files()?;
        info!(
            "Found {} {} files to analyze",
            files.len(),
            self.parser.language_id()
        );

        let outcomes = self.run_files(&files)?;

        let mut result = LintResult::new();
        for outcome in outcomes {
            match outcome {
                Ok(violations) => {
                    result.violations.extend(violations);
                    result.files_checked += 1;
                }
                Err(AnalyzerError::Parse { path, message }) => {
                    warn!("Failed to parse {}: {}", path.display(), message);
                    if self.fail_on_parse_error {
                        return Err(AnalyzerError::Parse { path, message });
                    }
                    result.files_skipped += 1;
                }
                Err(e) => return Err(e),
            }
        }

        sort_violations(&mut result.violations);

        info!(
            "Analysis complete: {} violations in {} files",
            result.violations.len(),
            result.files_checked
        );

        Ok(result)
    }

    /// Runs every file, on a worker pool unless parallelism is 1.
    ///
    /// Outcomes come back in the order of `files`.
    fn run_files(
        &self,
        files: &[PathBuf],
    ) -> Result<Vec<Result<Vec<Violation>, AnalyzerError>>, AnalyzerError> {
        let outcomes = match self.config.analyzer.parallelism {
            Some(0 | 1) => files.iter().map(|path| self.analyze_file(path)).collect(),
            Some(threads) => {
                debug!("Using {} worker threads", threads);
                let pool = rayon::ThreadPoolBuilder::new()
                    .num_threads(threads)
                    .build()?;
                pool.install(|| {
                    files
                        .par_iter()
                        .map(|path| self.analyze_file(path))
                        .collect()
                })
            }
            None => files
                .par_iter()
                .map(|path| self.analyze_file(path))
                .collect(),
        };
        Ok(outcomes)
    }

    /// Analyzes a single file and returns violations.
    fn analyze_file(&self, path: &Path) -> Result<Vec<Violation>, AnalyzerError> {
        debug!("Analyzing: {}", path.display());

        let content = std::fs::read_to_string(path)?;
        self.check_source(path, &content)
    }

    /// Parses `content` and checks it as if it were the file at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`AnalyzerError::Parse`] if the parser rejects the source.
    pub fn check_source(&self, path: &Path, content: &str) -> Result<Vec<Violation>, AnalyzerError> {
        let tree = self
            .parser
            .parse(content)
            .map_err(|e| AnalyzerError::Parse {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;
        Ok(self.check_tree(path, content, &tree))
    }

    /// Runs every applicable rule over an already parsed tree.
    #[must_use]
    pub fn check_tree(&self, path: &Path, content: &str, tree: &SyntaxTree) -> Vec<Violation> {
        let ctx = FileContext::new(path, content, &self.root);
        let relative = ctx.relative_str();
        let mut violations = Vec::new();

        for rule in &self.rules {
            if !self.config.is_rule_enabled(rule.name()) {
                debug!("Skipping disabled rule: {}", rule.name());
                continue;
            }
            if !self.config.rule_applies(rule.name(), &relative) {
                debug!("Rule {} does not apply to {}", rule.name(), relative);
                continue;
            }

            let rule_violations = rule.check(&ctx, tree);
            let rule_violations = self.apply_severity_override(rule.name(), rule_violations);
            violations.extend(apply_allowances(rule.as_ref(), &ctx, rule_violations));
        }

        sort_violations(&mut violations);
        violations
    }

    /// Applies severity overrides from configuration.
    fn apply_severity_override(
        &self,
        rule_name: &str,
        mut violations: Vec<Violation>,
    ) -> Vec<Violation> {
        if let Some(severity) = self.config.rule_severity(rule_name) {
            for v in &mut violations {
                v.severity = severity;
            }
        }
        violations
    }

    /// Discovers all source files the parser handles.
    fn discover_files(&self) -> Result<Vec<PathBuf>, AnalyzerError> {
        let extensions = self.parser.extensions();

        let mut builder = ignore::WalkBuilder::new(&self.root);
        builder
            .hidden(false)
            .git_ignore(self.config.analyzer.respect_gitignore)
            .git_exclude(self.config.analyzer.respect_gitignore);

        let mut files = Vec::new();
        for entry in builder.build() {
            let entry = entry?;
            let path = entry.path();

            if !path.is_file() {
                continue;
            }

            let ext = path
                .extension()
                .and_then(|e| e.to_str())
                .map(|e| format!(".{e}"))
                .unwrap_or_default();
            if !extensions.contains(&ext.as_str()) {
                continue;
            }

            if self.should_exclude(path) {
                debug!("Excluding: {}", path.display());
                continue;
            }

            files.push(path.to_path_buf());
        }

        files.sort();
        Ok(files)
    }

    /// Checks if a path should be excluded.
    fn should_exclude(&self, path: &Path) -> bool {
        let relative = relative_str(path, &self.root);

        if matches_any(&self.exclude_patterns, &relative) {
            return true;
        }
        !self.include_patterns.is_empty() && !matches_any(&self.include_patterns, &relative)
    }
}

/// Drops violations covered by an allow directive.
///
/// A directive without a reason, on a rule that demands one, is replaced by
/// a warning at the same spot.
fn apply_allowances(rule: &dyn Rule, ctx: &FileContext, violations: Vec<Violation>) -> Vec<Violation> {
    violations
        .into_iter()
        .filter_map(|violation| {
            let allow_check =
                check_allow_with_reason(ctx.content, violation.location.line, rule.name());
            if !allow_check.is_allowed() {
                return Some(violation);
            }

            if rule.requires_allow_reason() && allow_check.reason().is_none() {
                let name = rule.name();
                return Some(
                    Violation::new(
                        rule.code(),
                        name,
                        Severity::Warning,
                        violation.location,
                        format!("Allow directive for '{name}' is missing required reason"),
                    )
                    .with_suggestion(Suggestion::new(
                        "Add reason=\"...\" to explain why this exception is necessary",
                    )),
                );
            }

            debug!(
                "Allowed {} at {}:{}",
                rule.name(),
                violation.location.file.display(),
                violation.location.line
            );
            None
        })
        .collect()
}

/// Sorts by file, then line, then column; ties keep their order.
fn sort_violations(violations: &mut [Violation]) {
    violations.sort_by(|a, b| {
        a.location
            .file
            .cmp(&b.location.file)
            .then(a.location.line.cmp(&b.location.line))
            .then(a.location.column.cmp(&b.location.column))
    });
}

fn relative_str(path: &Path, root: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .components()
        .filter_map(|c| match c {
            Component::Normal(s) => Some(s.to_string_lossy()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::ParseError;
    use crate::syntax::{NodeKind, Span, SyntaxNode};
    use crate::visit::{visit_children, visit_tree, Visit};
    use std::fs;
    use tempfile::TempDir;

    /// Lowers each line `call <name>` to a `Send` node.
    struct LineParser;

    impl SourceParser for LineParser {
        fn language_id(&self) -> &'static str {
            "lines"
        }

        fn extensions(&self) -> &'static [&'static str] {
            &[".rb"]
        }

        fn parse(&self, source: &str) -> Result<SyntaxTree, ParseError> {
            let mut root = SyntaxNode::new(NodeKind::Program, Span::new(0, source.len(), 1, 1));
            let mut offset = 0;
            for (i, line) in source.lines().enumerate() {
                if line.contains("@@@") {
                    return Err(ParseError::Syntax {
                        line: i + 1,
                        column: 1,
                    });
                }
                if let Some(name) = line.trim().strip_prefix("call ") {
                    let name = name.split_whitespace().next().unwrap_or_default();
                    root = root.with_child(
                        SyntaxNode::new(NodeKind::Send, Span::new(offset, offset + line.len(), i + 1, 1))
                            .with_name(name),
                    );
                }
                offset += line.len() + 1;
            }
            Ok(SyntaxTree::new(root))
        }
    }

    /// Flags every `Send` named `bad`.
    struct NoBad;

    impl Rule for NoBad {
        fn name(&self) -> &'static str {
            "no-bad"
        }
        fn code(&self) -> &'static str {
            "T001"
        }
        fn check(&self, ctx: &FileContext, tree: &SyntaxTree) -> Vec<Violation> {
            struct Finder<'a> {
                ctx: &'a FileContext<'a>,
                found: Vec<Violation>,
            }
            impl<'ast> Visit<'ast> for Finder<'_> {
                fn visit_send(&mut self, node: &'ast SyntaxNode) {
                    if node.name() == Some("bad") {
                        self.found.push(Violation::new(
                            "T001",
                            "no-bad",
                            Severity::Error,
                            self.ctx.location(node.span()),
                            "bad call",
                        ));
                    }
                    visit_children(self, node);
                }
            }
            let mut finder = Finder {
                ctx,
                found: Vec::new(),
            };
            visit_tree(&mut finder, tree);
            finder.found
        }
    }

    fn write(root: &Path, relative: &str, content: &str) {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn analyzer(root: &Path, config: Config) -> Analyzer {
        Analyzer::builder()
            .root(root)
            .parser(LineParser)
            .rule(NoBad)
            .config(config)
            .build()
            .expect("Failed to build analyzer")
    }

    #[test]
    fn test_builder_requires_parser() {
        let result = Analyzer::builder().root(".").rule(NoBad).build();
        assert!(matches!(result, Err(AnalyzerError::MissingParser)));
    }

    #[test]
    fn test_builder_rejects_bad_glob() {
        let result = Analyzer::builder()
            .root(".")
            .parser(LineParser)
            .exclude("[unclosed")
            .build();
        assert!(matches!(result, Err(AnalyzerError::Glob(_))));
    }

    #[test]
    fn test_exclude_patterns() {
        let analyzer = Analyzer::builder()
            .root("/srv/blog")
            .parser(LineParser)
            .exclude("**/db/**")
            .build()
            .expect("Failed to build analyzer");

        assert!(analyzer.should_exclude(Path::new("/srv/blog/vendor/bundle/gem.rb")));
        assert!(analyzer.should_exclude(Path::new("/srv/blog/db/schema.rb")));
        assert!(!analyzer.should_exclude(Path::new("/srv/blog/app/models/post.rb")));
    }

    #[test]
    fn test_analyze_tree() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "app/b.rb", "call good\ncall bad\n");
        write(dir.path(), "app/a.rb", "call bad\n");
        write(dir.path(), "app/notes.txt", "call bad\n");
        write(dir.path(), "vendor/gem.rb", "call bad\n");

        let result = analyzer(dir.path(), Config::default()).analyze().unwrap();

        assert_eq!(result.files_checked, 2);
        let places: Vec<_> = result
            .violations
            .iter()
            .map(|v| (v.location.file.clone(), v.location.line))
            .collect();
        assert_eq!(
            places,
            vec![
                (PathBuf::from("app/a.rb"), 1),
                (PathBuf::from("app/b.rb"), 2),
            ]
        );
    }

    #[test]
    fn test_parse_errors_are_skipped() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "a.rb", "call bad\n");
        write(dir.path(), "broken.rb", "@@@\n");

        let result = analyzer(dir.path(), Config::default()).analyze().unwrap();
        assert_eq!(result.files_checked, 1);
        assert_eq!(result.files_skipped, 1);
        assert_eq!(result.violations.len(), 1);

        let strict = Analyzer::builder()
            .root(dir.path())
            .parser(LineParser)
            .rule(NoBad)
            .fail_on_parse_error(true)
            .build()
            .unwrap();
        assert!(matches!(strict.analyze(), Err(AnalyzerError::Parse { .. })));
    }

    #[test]
    fn test_sequential_and_parallel_agree() {
        let dir = TempDir::new().unwrap();
        for i in 0..8 {
            write(dir.path(), &format!("f{i}.rb"), "call bad\ncall ok\ncall bad\n");
        }

        let mut sequential = Config::default();
        sequential.analyzer.parallelism = Some(1);
        let mut pooled = Config::default();
        pooled.analyzer.parallelism = Some(3);

        let a = analyzer(dir.path(), sequential).analyze().unwrap();
        let b = analyzer(dir.path(), pooled).analyze().unwrap();
        let c = analyzer(dir.path(), Config::default()).analyze().unwrap();
        assert_eq!(a.violations.len(), 16);
        assert_eq!(a.violations, b.violations);
        assert_eq!(a.violations, c.violations);
    }

    #[test]
    fn test_rule_config_filters() {
        let config = Config::parse(
            r#"
[rules.no-bad]
severity = "info"
exclude = ["**/legacy/**"]
"#,
        )
        .unwrap();
        let analyzer = analyzer(Path::new("/r"), config);

        let kept = analyzer
            .check_source(Path::new("/r/app/a.rb"), "call bad\n")
            .unwrap();
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].severity, Severity::Info);

        let skipped = analyzer
            .check_source(Path::new("/r/app/legacy/a.rb"), "call bad\n")
            .unwrap();
        assert!(skipped.is_empty());
    }

    #[test]
    fn test_disabled_rule() {
        let config = Config::parse("[rules.no-bad]\nenabled = false\n").unwrap();
        let violations = analyzer(Path::new("/r"), config)
            .check_source(Path::new("/r/a.rb"), "call bad\n")
            .unwrap();
        assert!(violations.is_empty());
    }

    #[test]
    fn test_allow_directives() {
        let analyzer = analyzer(Path::new("/r"), Config::default());
        let source = "\
# norb-lint: allow(no-bad) reason=\"migration shim\"
call bad
call ok
call bad # norb-lint: allow(no-bad)
call ok
call bad
";
        let violations = analyzer.check_source(Path::new("/r/a.rb"), source).unwrap();
        let summary: Vec<_> = violations
            .iter()
            .map(|v| (v.location.line, v.severity))
            .collect();
        assert_eq!(
            summary,
            vec![(4, Severity::Warning), (6, Severity::Error)]
        );
        assert_eq!(
            violations[0].message,
            "Allow directive for 'no-bad' is missing required reason"
        );
    }
}
