//! Keyword routing of free-text commands to tool names.
//!
//! The routing table is a static, ordered list of (tool, triggers) pairs.
//! Matching is plain substring search on the lowercased command: first rule
//! wins, then first trigger within it. There is no scoring and no word
//! boundary check, so `hi` also matches inside `history`.

use std::collections::HashSet;

/// Triggers that select one tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoutingRule {
    pub tool_name: &'static str,
    pub triggers: &'static [&'static str],
}

/// Built-in routing table. Declaration order is the tie-break.
pub const BUILTIN_RULES: &[RoutingRule] = &[
    RoutingRule {
        tool_name: "web_search",
        triggers: &["search", "find", "look up", "google", "web search", "search for"],
    },
    RoutingRule {
        tool_name: "reddit_scrape",
        triggers: &["reddit", "subreddit", "reddit posts", "reddit scrape"],
    },
    RoutingRule {
        tool_name: "say_hello",
        triggers: &["hello", "hi", "greet", "say hello"],
    },
];

/// Where a command matched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteMatch<'r> {
    pub tool_name: &'r str,
    pub trigger: &'r str,
    /// Lowercased text following the first occurrence of `trigger`.
    pub remaining: String,
}

/// Router over a fixed rule table.
#[derive(Debug, Clone, Copy)]
pub struct CommandRouter<'r> {
    rules: &'r [RoutingRule],
}

impl Default for CommandRouter<'static> {
    fn default() -> Self {
        Self::new(BUILTIN_RULES)
    }
}

impl<'r> CommandRouter<'r> {
    pub fn new(rules: &'r [RoutingRule]) -> Self {
        Self { rules }
    }

    /// Resolve a command to a tool name.
    ///
    /// Rules naming tools absent from `available` never match.
    pub fn route(&self, input: &str, available: &HashSet<String>) -> Option<&'r str> {
        self.route_match(input, available).map(|m| m.tool_name)
    }

    /// Resolve a command, keeping the matched trigger and the text after it.
    pub fn route_match(&self, input: &str, available: &HashSet<String>) -> Option<RouteMatch<'r>> {
        if input.trim().is_empty() {
            return None;
        }
        let lowered = input.to_lowercase();

        self.rules
            .iter()
            .filter(|rule| available.contains(rule.tool_name))
            .find_map(|rule| match_rule(rule, &lowered))
    }

    /// Lowercased text after the first trigger of `tool_name` found in `input`.
    ///
    /// Used when the tool was chosen elsewhere (by `route` or by hand) and only
    /// the trigger position is needed. Falls back to the whole lowercased input
    /// when none of the tool's triggers occur in it.
    pub fn remaining_after_trigger(&self, input: &str, tool_name: &str) -> String {
        let lowered = input.to_lowercase();
        self.rules
            .iter()
            .filter(|rule| rule.tool_name == tool_name)
            .find_map(|rule| match_rule(rule, &lowered))
            .map(|m| m.remaining)
            .unwrap_or(lowered)
    }
}

fn match_rule<'r>(rule: &'r RoutingRule, lowered: &str) -> Option<RouteMatch<'r>> {
    rule.triggers
        .iter()
        .filter(|trigger| !trigger.is_empty())
        .find_map(|&trigger| {
            lowered.find(trigger).map(|pos| RouteMatch {
                tool_name: rule.tool_name,
                trigger,
                remaining: lowered[pos + trigger.len()..].to_string(),
            })
        })
}

/// Resolve a command against a rule table.
pub fn route<'r>(
    input: &str,
    available: &HashSet<String>,
    rules: &'r [RoutingRule],
) -> Option<&'r str> {
    CommandRouter::new(rules).route(input, available)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all_tools() -> HashSet<String> {
        ["web_search", "reddit_scrape", "say_hello"]
            .into_iter()
            .map(String::from)
            .collect()
    }

    #[test]
    fn test_single_rule_match() {
        let tools = all_tools();
        assert_eq!(route("Search for Python tutorials", &tools, BUILTIN_RULES), Some("web_search"));
        assert_eq!(route("show me r/rust on Reddit", &tools, BUILTIN_RULES), Some("reddit_scrape"));
        assert_eq!(route("greet Alice", &tools, BUILTIN_RULES), Some("say_hello"));
    }

    #[test]
    fn test_first_declared_rule_wins() {
        let tools = all_tools();
        // Both "reddit" and "hello" occur; reddit_scrape is declared first.
        assert_eq!(route("hello reddit", &tools, BUILTIN_RULES), Some("reddit_scrape"));

        const REVERSED: &[RoutingRule] = &[
            RoutingRule { tool_name: "say_hello", triggers: &["greet", "hello"] },
            RoutingRule { tool_name: "reddit_scrape", triggers: &["reddit"] },
        ];
        assert_eq!(route("hello reddit", &tools, REVERSED), Some("say_hello"));
    }

    #[test]
    fn test_empty_input_never_matches() {
        let tools = all_tools();
        assert_eq!(route("", &tools, BUILTIN_RULES), None);
        assert_eq!(route("   ", &tools, BUILTIN_RULES), None);
    }

    #[test]
    fn test_no_match() {
        assert_eq!(route("what's the weather", &all_tools(), BUILTIN_RULES), None);
    }

    #[test]
    fn test_inactive_rules_are_skipped() {
        let tools: HashSet<String> = ["say_hello".to_string()].into_iter().collect();
        assert_eq!(route("search for hello", &tools, BUILTIN_RULES), Some("say_hello"));
        assert_eq!(route("search for cats", &tools, BUILTIN_RULES), None);
    }

    #[test]
    fn test_substring_false_positive_is_kept() {
        // "hi" inside "history" is a literal substring hit.
        assert_eq!(route("history", &all_tools(), BUILTIN_RULES), Some("say_hello"));
    }

    #[test]
    fn test_route_is_idempotent() {
        let router = CommandRouter::default();
        let tools = all_tools();
        let first = router.route("look up the news", &tools);
        let second = router.route("look up the news", &tools);
        assert_eq!(first, second);
        assert_eq!(first, Some("web_search"));
    }

    #[test]
    fn test_route_match_remaining() {
        let router = CommandRouter::default();
        let m = router.route_match("Say Hello World", &all_tools()).unwrap();
        assert_eq!(m.tool_name, "say_hello");
        assert_eq!(m.trigger, "hello");
        assert_eq!(m.remaining, " world");
    }

    #[test]
    fn test_remaining_after_trigger() {
        let router = CommandRouter::default();
        assert_eq!(router.remaining_after_trigger("Say hello Bob", "say_hello"), " bob");
        assert_eq!(
            router.remaining_after_trigger("Bonjour Marie", "say_hello"),
            "bonjour marie"
        );
    }
}
