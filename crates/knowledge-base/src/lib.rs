//! Static issue-category knowledge base for the support chat assistant.
//!
//! The knowledge base maps issue categories to keyword lists and scripted
//! solution trees. It is constructed once at startup, shared by reference
//! (typically `Arc`) into the conversation engine and the completion
//! backend, and never mutated afterwards.
//!
//! Category iteration order is a behavioral contract: when a user message
//! matches keywords from more than one category, the category that was
//! inserted first wins. [`IndexMap`] preserves insertion order, which makes
//! the tie-break structural rather than incidental.

mod data;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Label offered alongside the category names when the user must pick.
pub const OTHER_ISSUE: &str = "Other Issue";

/// One branch of a scripted solution tree: the reply shown after the
/// user picks an option, plus the follow-up options, if any.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Branch {
    /// Scripted reply text.
    pub message: String,
    /// Follow-up quick-reply options, in display order.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
}

/// The scripted question/option/response tree for a category.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolutionTree {
    /// Opening question for the category.
    pub question: String,
    /// First-level options, in display order.
    pub options: Vec<String>,
    /// Responses keyed by option label, in display order.
    pub responses: IndexMap<String, Branch>,
}

/// One issue category: detection keywords plus its solution tree.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    /// Keywords that select this category on substring match.
    pub keywords: Vec<String>,
    /// The scripted troubleshooting tree.
    pub solution: SolutionTree,
}

/// The full knowledge base: ordered categories, read-only after build.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KnowledgeBase {
    categories: IndexMap<String, Category>,
}

impl KnowledgeBase {
    /// Build from an ordered category list. Order is preserved and is
    /// the tie-break for category detection.
    pub fn from_categories(categories: IndexMap<String, Category>) -> Self {
        Self { categories }
    }

    /// The built-in default knowledge base: Login Issues, Payment
    /// Problems, Account Settings, Technical Support, in that order.
    pub fn builtin() -> Self {
        data::builtin()
    }

    /// Category names in insertion order.
    pub fn category_names(&self) -> impl Iterator<Item = &str> {
        self.categories.keys().map(String::as_str)
    }

    /// Whether `name` is a known category.
    pub fn contains(&self, name: &str) -> bool {
        self.categories.contains_key(name)
    }

    /// Look up a category by name.
    pub fn category(&self, name: &str) -> Option<&Category> {
        self.categories.get(name)
    }

    /// The scripted branch for an option within a category, if the
    /// option is a key of that category's responses map.
    pub fn branch(&self, category: &str, option: &str) -> Option<&Branch> {
        self.categories.get(category)?.solution.responses.get(option)
    }

    /// Detect a category from free text: the input is lowercased and the
    /// first category (in insertion order) with at least one keyword
    /// substring hit wins. No scoring or ranking.
    pub fn detect_category(&self, text: &str) -> Option<&str> {
        let lower = text.to_lowercase();
        self.categories
            .iter()
            .find(|(_, category)| {
                category
                    .keywords
                    .iter()
                    .any(|keyword| lower.contains(keyword.as_str()))
            })
            .map(|(name, _)| name.as_str())
    }

    /// The category menu offered when no category can be detected:
    /// every category name plus [`OTHER_ISSUE`].
    pub fn menu_options(&self) -> Vec<String> {
        self.categories
            .keys()
            .cloned()
            .chain(std::iter::once(OTHER_ISSUE.to_string()))
            .collect()
    }

    /// Number of categories.
    pub fn len(&self) -> usize {
        self.categories.len()
    }

    /// Whether the knowledge base has no categories.
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_category_order() {
        let kb = KnowledgeBase::builtin();
        let names: Vec<&str> = kb.category_names().collect();
        assert_eq!(
            names,
            vec![
                "Login Issues",
                "Payment Problems",
                "Account Settings",
                "Technical Support"
            ]
        );
    }

    #[test]
    fn test_detect_category_first_hit_wins() {
        let kb = KnowledgeBase::builtin();

        // "access" is a Login Issues keyword; "issue" is a Technical
        // Support keyword. Login Issues was inserted first, so it wins.
        let detected = kb.detect_category("I have an issue, I can't access my account");
        assert_eq!(detected, Some("Login Issues"));
    }

    #[test]
    fn test_detect_category_is_deterministic() {
        let kb = KnowledgeBase::builtin();
        let input = "billing error on my invoice";
        let first = kb.detect_category(input);
        for _ in 0..10 {
            assert_eq!(kb.detect_category(input), first);
        }
        assert_eq!(first, Some("Payment Problems"));
    }

    #[test]
    fn test_detect_category_case_insensitive() {
        let kb = KnowledgeBase::builtin();
        assert_eq!(kb.detect_category("FORGOT my PASSWORD"), Some("Login Issues"));
    }

    #[test]
    fn test_detect_category_no_hit() {
        let kb = KnowledgeBase::builtin();
        assert_eq!(kb.detect_category("hello there"), None);
    }

    #[test]
    fn test_menu_options_end_with_other_issue() {
        let kb = KnowledgeBase::builtin();
        let menu = kb.menu_options();
        assert_eq!(menu.len(), 5);
        assert_eq!(menu.last().map(String::as_str), Some(OTHER_ISSUE));
    }

    #[test]
    fn test_branch_lookup() {
        let kb = KnowledgeBase::builtin();
        let branch = kb.branch("Login Issues", "Yes, forgot password").unwrap();
        assert!(branch.message.contains("Forgot Password"));
        assert!(branch.options.is_some());

        assert!(kb.branch("Login Issues", "not an option").is_none());
        assert!(kb.branch("No Such Category", "Yes, forgot password").is_none());
    }
}
