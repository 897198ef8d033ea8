//! Proposed argument values derived from the command text.
//!
//! Heuristics are keyed on the parameter *name*, not its declared type.
//! Every value is a proposal the user can edit before the call is made.

use tracing::debug;

use super::catalog::{ArgumentMap, ParameterSpec};
use super::rules::CommandRouter;

/// Substrings cut out of a command to leave the search query, in order.
const QUERY_FILLER: &[&str] = &["search", "for", "find"];

/// Default greeting target when the command names nobody.
const DEFAULT_NAME: &str = "there";

/// Derives default arguments for a routed command.
#[derive(Debug, Clone, Copy)]
pub struct ArgumentExtractor<'r> {
    router: CommandRouter<'r>,
}

impl Default for ArgumentExtractor<'static> {
    fn default() -> Self {
        Self::new(CommandRouter::default())
    }
}

impl<'r> ArgumentExtractor<'r> {
    pub fn new(router: CommandRouter<'r>) -> Self {
        Self { router }
    }

    /// Propose a value for every declared parameter.
    ///
    /// Parameters without a heuristic get an empty string.
    pub fn extract(
        &self,
        parameters: &[ParameterSpec],
        raw_input: &str,
        matched_tool: &str,
    ) -> ArgumentMap {
        let lowered = raw_input.to_lowercase();
        let remaining = self.router.remaining_after_trigger(raw_input, matched_tool);

        let proposals: ArgumentMap = parameters
            .iter()
            .map(|param| {
                let value = propose(&param.name, raw_input, &lowered, &remaining);
                (param.name.clone(), value)
            })
            .collect();

        debug!(tool = matched_tool, ?proposals, "Proposed arguments");
        proposals
    }
}

fn propose(name: &str, raw_input: &str, lowered: &str, remaining: &str) -> String {
    match name {
        "query" if lowered.contains("search") => search_query(lowered),
        "subreddit" if lowered.contains("reddit") => match raw_input.rsplit_once("r/") {
            // Token right after the last `r/`, original casing kept
            Some((_, after)) => after.split_whitespace().next().unwrap_or("").to_string(),
            None => last_token(remaining).to_string(),
        },
        "name" if lowered.contains("hello") => match last_token(remaining) {
            "" => DEFAULT_NAME.to_string(),
            token => token.to_string(),
        },
        _ => String::new(),
    }
}

/// The lowercased command with every filler substring cut out.
///
/// Removal ignores word boundaries ("research" loses its "search") and only
/// the ends are trimmed, so inner runs of spaces are kept.
fn search_query(lowered: &str) -> String {
    QUERY_FILLER
        .iter()
        .fold(lowered.to_string(), |query, filler| query.replace(filler, ""))
        .trim()
        .to_string()
}

fn last_token(text: &str) -> &str {
    text.split_whitespace().last().unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract_one(param: &str, input: &str, tool: &str) -> String {
        let params = vec![ParameterSpec::string(param)];
        ArgumentExtractor::default()
            .extract(&params, input, tool)
            .remove(param)
            .unwrap()
    }

    #[test]
    fn test_query_strips_filler_words() {
        assert_eq!(
            extract_one("query", "search for python tutorials", "web_search"),
            "python tutorials"
        );
        assert_eq!(
            extract_one("query", "Search for Rust vs Go", "web_search"),
            "rust vs go"
        );
    }

    #[test]
    fn test_query_cuts_filler_inside_words() {
        assert_eq!(
            extract_one("query", "searching for research", "web_search"),
            "ing  re"
        );
        assert_eq!(
            extract_one("query", "search for forest fires", "web_search"),
            "est fires"
        );
    }

    #[test]
    fn test_query_requires_search_keyword() {
        assert_eq!(extract_one("query", "look up cats", "web_search"), "");
    }

    #[test]
    fn test_subreddit_from_prefix() {
        assert_eq!(
            extract_one("subreddit", "show me reddit posts from r/programming", "reddit_scrape"),
            "programming"
        );
        assert_eq!(
            extract_one("subreddit", "reddit r/RustLang today", "reddit_scrape"),
            "RustLang"
        );
    }

    #[test]
    fn test_subreddit_from_last_token() {
        assert_eq!(
            extract_one("subreddit", "show reddit posts about golang", "reddit_scrape"),
            "golang"
        );
        assert_eq!(extract_one("subreddit", "reddit", "reddit_scrape"), "");
        assert_eq!(extract_one("subreddit", "reddit r/", "reddit_scrape"), "");
    }

    #[test]
    fn test_name_from_greeting() {
        assert_eq!(extract_one("name", "say hello world", "say_hello"), "world");
        assert_eq!(extract_one("name", "hello", "say_hello"), "there");
        assert_eq!(extract_one("name", "Hello Ada", "say_hello"), "ada");
    }

    #[test]
    fn test_name_requires_hello() {
        assert_eq!(extract_one("name", "greet Alice", "say_hello"), "");
    }

    #[test]
    fn test_unknown_parameters_are_empty() {
        let params = vec![ParameterSpec::string("query"), ParameterSpec::string("max_results")];
        let proposals =
            ArgumentExtractor::default().extract(&params, "search for crabs", "web_search");
        assert_eq!(proposals.len(), 2);
        assert_eq!(proposals["query"], "crabs");
        assert_eq!(proposals["max_results"], "");
    }
}
