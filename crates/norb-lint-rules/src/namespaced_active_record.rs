//! Rule requiring ActiveRecord classes to live in a dedicated namespace.
//!
//! # Rationale
//!
//! Keeping persistence classes under one module (e.g. `Ar::User`) separates
//! ActiveRecord from business objects without name clashes: the business
//! `User` and the table-backed `Ar::User` can coexist.
//!
//! # Detected Patterns
//!
//! A class whose superclass expression mentions one of the accepted
//! superclass names (`ActiveRecord`, `ActiveRecord::Base`,
//! `ApplicationRecord`, ...) and that is not nested inside the required
//! namespace, either through enclosing `module`/`class` blocks or through a
//! compact name such as `class Ar::User`.
//!
//! ```ruby
//! # bad
//! class User < ActiveRecord::Base
//! end
//!
//! # good
//! module Ar
//!   class User < ActiveRecord::Base
//!   end
//! end
//! ```
//!
//! # Configuration
//!
//! See [`RulePolicy`].

use crate::policy::RulePolicy;
use norb_lint_core::utils::{compact_root, enclosing_scopes, search_constants};
use norb_lint_core::visit::{visit_children, visit_tree, Visit};
use norb_lint_core::{
    FileContext, Identifier, Rule, Severity, Suggestion, SyntaxNode, SyntaxTree, Violation,
};

/// Rule code for namespaced-active-record.
pub const CODE: &str = "NB001";

/// Rule name for namespaced-active-record.
pub const NAME: &str = "namespaced-active-record";

/// How a class declaration relates to the namespace requirement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClassType {
    /// Extends an accepted superclass; must be namespaced.
    ActiveRecord,
    /// Anything else. Never reported.
    NotApplicable,
}

impl ClassType {
    /// Classifies a class declaration against `policy`.
    ///
    /// A class qualifies when any constant segment of its superclass
    /// expression is accepted, so `ActiveRecord::Base` matches on
    /// `ActiveRecord`. Classes without a superclass are not applicable.
    #[must_use]
    pub fn classify(class: &SyntaxNode, policy: &RulePolicy) -> Self {
        let accepted = class.superclass().is_some_and(|superclass| {
            search_constants(superclass)
                .iter()
                .any(|segment| policy.accepts_superclass(segment))
        });
        if accepted {
            Self::ActiveRecord
        } else {
            Self::NotApplicable
        }
    }
}

/// Namespace segments a class receives from its position in the file.
///
/// These are the names of every class and module declared before it in
/// document order (see [`enclosing_scopes`]; compact names contribute all
/// their segments) plus the first segment of the class's own compact name,
/// deduplicated in order of appearance.
#[must_use]
pub fn contributed_namespaces(root: &SyntaxNode, class: &SyntaxNode) -> Vec<Identifier> {
    let from_scopes = enclosing_scopes(root, class)
        .into_iter()
        .filter_map(SyntaxNode::identifier)
        .flat_map(search_constants);
    let from_name = class.identifier().and_then(compact_root).cloned();

    let mut contributed: Vec<Identifier> = Vec::new();
    for segment in from_scopes.chain(from_name) {
        if !contributed.contains(&segment) {
            contributed.push(segment);
        }
    }
    contributed
}

/// Requires ActiveRecord classes to be nested in the configured namespace.
#[derive(Debug, Clone)]
pub struct NamespacedActiveRecord {
    policy: RulePolicy,
    severity: Severity,
}

impl Default for NamespacedActiveRecord {
    fn default() -> Self {
        Self::new()
    }
}

impl NamespacedActiveRecord {
    /// Creates a new rule with the default policy.
    #[must_use]
    pub fn new() -> Self {
        Self::with_policy(RulePolicy::default())
    }

    /// Creates a new rule enforcing `policy`.
    #[must_use]
    pub fn with_policy(policy: RulePolicy) -> Self {
        Self {
            policy,
            severity: Severity::Error,
        }
    }

    /// Sets the severity level.
    #[must_use]
    pub fn severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    /// The policy this rule enforces.
    #[must_use]
    pub fn policy(&self) -> &RulePolicy {
        &self.policy
    }

    fn message(&self) -> String {
        format!(
            "ActiveRecord classes must be namespaced with {}.",
            self.policy.required_namespace()
        )
    }
}

impl Rule for NamespacedActiveRecord {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Requires ActiveRecord classes to be nested in the configured namespace"
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn check(&self, ctx: &FileContext, tree: &SyntaxTree) -> Vec<Violation> {
        let mut visitor = NamespaceVisitor {
            ctx,
            rule: self,
            root: tree.root(),
            violations: Vec::new(),
        };

        visit_tree(&mut visitor, tree);
        visitor.violations
    }
}

struct NamespaceVisitor<'a, 'ast> {
    ctx: &'a FileContext<'a>,
    rule: &'a NamespacedActiveRecord,
    root: &'ast SyntaxNode,
    violations: Vec<Violation>,
}

impl<'ast> Visit<'ast> for NamespaceVisitor<'_, 'ast> {
    fn visit_class(&mut self, node: &'ast SyntaxNode) {
        match ClassType::classify(node, &self.rule.policy) {
            ClassType::ActiveRecord => {
                let namespace = self.rule.policy.required_namespace();
                if !contributed_namespaces(self.root, node).contains(namespace) {
                    self.violations.push(
                        Violation::new(
                            CODE,
                            NAME,
                            self.rule.severity,
                            self.ctx.location(node.span()),
                            self.rule.message(),
                        )
                        .with_suggestion(Suggestion::new(format!(
                            "Wrap the class in `module {namespace} ... end`"
                        ))),
                    );
                }
            }
            ClassType::NotApplicable => {}
        }

        visit_children(self, node);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use norb_lint_core::SourceParser;
    use norb_lint_ruby::RubyParser;
    use std::path::Path;

    fn check_with(rule: &NamespacedActiveRecord, code: &str) -> Vec<Violation> {
        let tree = RubyParser::new().parse(code).expect("Failed to parse");
        let ctx = FileContext::new(Path::new("app/models/article.rb"), code, Path::new(""));
        rule.check(&ctx, &tree)
    }

    fn check_code(code: &str) -> Vec<Violation> {
        check_with(&NamespacedActiveRecord::new(), code)
    }

    fn messages(violations: &[Violation]) -> Vec<&str> {
        violations.iter().map(|v| v.message.as_str()).collect()
    }

    const MSG: &str = "ActiveRecord classes must be namespaced with Ar.";

    #[test]
    fn test_classify() {
        let policy = RulePolicy::default();
        let tree = RubyParser::new()
            .parse("class A < ActiveRecord::Base; end\nclass B < Struct; end\nclass C; end\n")
            .unwrap();
        let classes = tree.root().children();

        assert_eq!(
            ClassType::classify(&classes[0], &policy),
            ClassType::ActiveRecord
        );
        assert_eq!(
            ClassType::classify(&classes[1], &policy),
            ClassType::NotApplicable
        );
        assert_eq!(
            ClassType::classify(&classes[2], &policy),
            ClassType::NotApplicable
        );
    }

    #[test]
    fn test_detects_top_level_class() {
        let violations = check_code("class Article < ActiveRecord::Base\nend\n");
        assert_eq!(messages(&violations), [MSG]);
        assert_eq!(violations[0].location.line, 1);
        assert_eq!(violations[0].code, CODE);
        assert_eq!(
            violations[0].suggestion.as_ref().map(|s| s.message.as_str()),
            Some("Wrap the class in `module Ar ... end`")
        );
    }

    #[test]
    fn test_detects_wrong_module() {
        let violations = check_code(
            r"
module RootModule
  class Article < ActiveRecord; end
end
",
        );
        assert_eq!(messages(&violations), [MSG]);
        assert_eq!(violations[0].location.line, 3);
    }

    #[test]
    fn test_detects_deeply_nested_wrong_modules() {
        let violations = check_code(
            r"
module Blog
  module Author
    class Article < ActiveRecord::Base
      def my_method; end
    end
  end
end
",
        );
        assert_eq!(messages(&violations), [MSG]);
    }

    #[test]
    fn test_detects_application_record() {
        let violations = check_code(
            r"
module RootModule
  class Article < ApplicationRecord; end
end
",
        );
        assert_eq!(messages(&violations), [MSG]);
    }

    #[test]
    fn test_detects_compact_name_without_namespace() {
        let violations = check_code("class Article::Comment < ActiveRecord::Base; end\n");
        assert_eq!(messages(&violations), [MSG]);

        let nested = check_code(
            r"
module RootModule
  class Article::Comment < ActiveRecord::Base; end
end
",
        );
        assert_eq!(messages(&nested), [MSG]);
    }

    #[test]
    fn test_allows_namespaced_class() {
        assert!(check_code("module Ar\n  class Article < ApplicationRecord; end\nend\n").is_empty());
        assert!(check_code(
            r"
module Ar
  module Email
    class Article < ActiveRecord::Base; end
  end
end
"
        )
        .is_empty());
    }

    #[test]
    fn test_allows_compact_namespaces() {
        assert!(check_code("class Ar::Article < ApplicationRecord; end\n").is_empty());
        assert!(check_code("module Ar::Email\n  class Article < ApplicationRecord; end\nend\n")
            .is_empty());
        assert!(check_code("module Ar\n  class Article::Comment < ActiveRecord::Base; end\nend\n")
            .is_empty());
    }

    #[test]
    fn test_ignores_non_active_record_classes() {
        assert!(check_code(
            r"
module RootModule
  class Article
    def execute(sql)
      ActiveRecord::Base.connection.execute(sql)
    end
  end
end
"
        )
        .is_empty());
        assert!(check_code("class Article < Struct; end\n").is_empty());
    }

    #[test]
    fn test_preceding_module_namespaces() {
        assert!(check_code(
            r"
module Ar
end

class Article < ApplicationRecord
end
",
        )
        .is_empty());

        let later = check_code(
            r"
class Article < ApplicationRecord
end

module Ar
end
",
        );
        assert_eq!(messages(&later), [MSG]);
    }

    #[test]
    fn test_compact_name_counts_only_first_segment() {
        let violations = check_code("class Blog::Ar::Article < ApplicationRecord\nend\n");
        assert_eq!(messages(&violations), [MSG]);

        assert!(check_code("class Ar::Blog::Article < ApplicationRecord\nend\n").is_empty());
    }

    #[test]
    fn test_inner_class_name_does_not_namespace() {
        let violations = check_code(
            r"
class Ar < ApplicationRecord
end
",
        );
        assert_eq!(violations.len(), 1);
    }

    #[test]
    fn test_custom_policy() {
        let rule = NamespacedActiveRecord::with_policy(RulePolicy::new(
            "AcmeNamespace",
            &["ActiveBlueprint"],
        ));
        let violations = check_with(
            &rule,
            "module RootModule\n  class Article < ActiveBlueprint; end\nend\n",
        );
        assert_eq!(
            messages(&violations),
            ["ActiveRecord classes must be namespaced with AcmeNamespace."]
        );

        assert!(check_with(&rule, "class Article < ActiveRecord::Base; end\n").is_empty());
    }

    #[test]
    fn test_each_class_reported_once() {
        let code = "class A < ApplicationRecord; end\nclass B < ApplicationRecord\n  class C < ApplicationRecord; end\nend\n";
        let first = check_code(code);
        let lines: Vec<_> = first.iter().map(|v| v.location.line).collect();
        assert_eq!(lines, [1, 2, 3]);
        assert_eq!(first, check_code(code));
    }
}
