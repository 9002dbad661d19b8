use crate::core::synonyms::SynonymTable;
use std::sync::Arc;

/// Decides whether an expected keyword is present in a free-text answer
///
/// # Matching Stages
/// 1. Exact term
/// 2. Morphological variants (plural / singular)
/// 3. Synonym table, both directions ("wrappers", "awaiting" count)
/// 4. Word-boundary prefix ("test" matches "testing", never "latest")
///
/// Every stage is case-insensitive. Stages 1-2 require the candidate to
/// stand on word boundaries at both ends; stages 3-4 only at the start.
#[derive(Debug, Clone)]
pub struct KeywordMatcher {
    synonyms: Arc<SynonymTable>,
}

impl KeywordMatcher {
    pub fn new(synonyms: Arc<SynonymTable>) -> Self {
        Self { synonyms }
    }

    pub fn with_builtin_synonyms() -> Self {
        Self::new(Arc::new(SynonymTable::builtin()))
    }

    pub fn synonyms(&self) -> &SynonymTable {
        &self.synonyms
    }

    /// Check whether `keyword` is present in `answer_text`
    pub fn matches(&self, keyword: &str, answer_text: &str) -> bool {
        self.matches_normalized(&normalize(keyword), &normalize(answer_text))
    }

    /// Same as [`matches`](Self::matches) for inputs already passed through [`normalize`]
    pub(crate) fn matches_normalized(&self, keyword: &str, answer: &str) -> bool {
        if keyword.is_empty() {
            return false;
        }

        // Stage 1: exact term
        if contains_term(answer, keyword) {
            return true;
        }

        // Stage 2: plural / singular variants
        if morphological_variants(keyword)
            .iter()
            .any(|variant| contains_term(answer, variant))
        {
            return true;
        }

        // Stage 3: synonyms, inflected forms included
        if self.synonyms.related_terms(keyword).any(|term| {
            morphological_variants(term)
                .iter()
                .any(|variant| starts_word(answer, variant))
        }) {
            return true;
        }

        // Stage 4: prefix anchored at a word boundary
        starts_word(answer, keyword)
    }
}

impl Default for KeywordMatcher {
    fn default() -> Self {
        Self::with_builtin_synonyms()
    }
}

/// Lowercase, trim and collapse runs of whitespace into single spaces
pub fn normalize(text: &str) -> String {
    text.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Candidate spellings: the keyword, `+s`, `+es`, and the keyword without a trailing `s`
fn morphological_variants(keyword: &str) -> Vec<String> {
    let mut variants = vec![
        keyword.to_string(),
        format!("{}s", keyword),
        format!("{}es", keyword),
    ];

    if let Some(stem) = keyword.strip_suffix('s') {
        if !stem.is_empty() {
            variants.push(stem.to_string());
        }
    }

    variants
}

#[inline]
fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// True when `term` occurs in `text` with a word boundary on both sides
fn contains_term(text: &str, term: &str) -> bool {
    find_bounded(text, term, true)
}

/// True when some word in `text` begins with `term`
fn starts_word(text: &str, term: &str) -> bool {
    find_bounded(text, term, false)
}

fn find_bounded(text: &str, term: &str, whole_word: bool) -> bool {
    if term.is_empty() {
        return false;
    }

    // Occurrences may overlap, so resume one char after each hit
    let mut from = 0;
    while let Some(offset) = text[from..].find(term) {
        let start = from + offset;
        let end = start + term.len();
        let starts_clean = text[..start]
            .chars()
            .next_back()
            .map_or(true, |c| !is_word_char(c));
        let ends_clean = !whole_word
            || text[end..]
                .chars()
                .next()
                .map_or(true, |c| !is_word_char(c));
        if starts_clean && ends_clean {
            return true;
        }

        from = start + text[start..].chars().next().map_or(1, char::len_utf8);
    }

    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_case_insensitive() {
        let matcher = KeywordMatcher::default();
        assert!(matcher.matches("Function", "I wrote a FUNCTION"));
    }

    #[test]
    fn test_plural_variant() {
        let matcher = KeywordMatcher::default();
        assert!(matcher.matches("class", "I defined several classes"));
        assert!(matcher.matches("index", "the table has two indexes"));
    }

    #[test]
    fn test_singular_variant() {
        let matcher = KeywordMatcher::default();
        assert!(matcher.matches("promises", "return a promise from the handler"));
    }

    #[test]
    fn test_synonym_forward_and_reverse() {
        let matcher = KeywordMatcher::default();
        assert!(matcher.matches("decorator", "I used a wrapper around it"));
        assert!(matcher.matches("wrapper", "I used a decorator"));
        assert!(matcher.matches("async", "you await the future"));
    }

    #[test]
    fn test_inflected_synonyms() {
        let matcher = KeywordMatcher::default();
        assert!(matcher.matches("decorator", "we used wrappers"));
        assert!(matcher.matches("async", "awaiting the result"));
        assert!(matcher.matches("wrapper", "python decorators"));
        assert!(matcher.matches("function", "two small methods"));
        assert!(matcher.matches("inheritance", "a few subclasses"));
        // Synonyms still start on a word boundary
        assert!(!matcher.matches("variable", "the avarice of it"));
    }

    #[test]
    fn test_word_boundary_guard() {
        let matcher = KeywordMatcher::default();
        assert!(!matcher.matches("test", "this is the latest version"));
        assert!(matcher.matches("test", "I wrote a testing suite"));
    }

    #[test]
    fn test_multi_word_keyword() {
        let matcher = KeywordMatcher::default();
        assert!(matcher.matches("binary search", "I would use a Binary   Search here"));
        assert!(!matcher.matches("binary search", "a binary tree search"));
    }

    #[test]
    fn test_keyword_with_punctuation() {
        let matcher = KeywordMatcher::default();
        assert!(matcher.matches("c++", "Mostly C++ and some Rust"));
        assert!(matcher.matches(".net", "we shipped on .NET core"));
        assert!(!matcher.matches(".net", "asp.net only"));
    }

    #[test]
    fn test_absent_keyword() {
        let matcher = KeywordMatcher::default();
        assert!(!matcher.matches("mutex", "I used channels between threads"));
        assert!(!matcher.matches("cache", ""));
    }

    #[test]
    fn test_blank_keyword_never_matches() {
        let matcher = KeywordMatcher::default();
        assert!(!matcher.matches("", "anything at all"));
        assert!(!matcher.matches("   ", "anything at all"));
    }

    #[test]
    fn test_custom_synonym_table() {
        let table = SynonymTable::new(vec![("thread", vec!["worker"])]);
        let matcher = KeywordMatcher::new(Arc::new(table));
        assert!(matcher.matches("thread", "spawn a worker per core"));
        assert!(!matcher.matches("decorator", "I used a wrapper around it"));
    }

    #[test]
    fn test_normalize() {
        assert_eq!(normalize("  Hello\n  World\t"), "hello world");
        assert_eq!(normalize(""), "");
    }

    #[test]
    fn test_morphological_variants() {
        assert_eq!(
            morphological_variants("class"),
            vec!["class", "classs", "classes", "clas"]
        );
        assert_eq!(morphological_variants("s"), vec!["s", "ss", "ses"]);
    }

    #[test]
    fn test_contains_term_boundaries() {
        assert!(contains_term("use a hash map", "hash map"));
        assert!(!contains_term("hashmap", "hash"));
        assert!(contains_term("(api)", "api"));
        assert!(!contains_term("rapid", "api"));
        assert!(contains_term("xx x x", "x x"));
    }

    #[test]
    fn test_starts_word() {
        assert!(starts_word("a testing suite", "test"));
        assert!(!starts_word("the latest version", "test"));
        assert!(starts_word("c++17 support", "c++"));
        assert!(!starts_word("asp.net", ".net"));
    }
}
