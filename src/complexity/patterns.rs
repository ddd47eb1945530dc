//! Surface-text detectors shared by the time and space classifiers.
//!
//! Each detector recognizes brace-style (`for (...) {`) and indentation-style
//! (`for x in xs:`) constructs at once. Matching is case-insensitive unless a
//! detector says otherwise. Comments and string literals are scanned like
//! any other text.

use once_cell::sync::Lazy;
use regex::Regex;

static LOOP_HEADER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(?:for|while)\s*\(|for\s+.*\s+in\s+.*:").unwrap());

static NESTED_LOOP: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"(?i)for\s*\(.*?\)\s*\{(?s:.*?)(?:for|while)\s*\(.*?\)",
        r"|while\s*\(.*?\)\s*\{(?s:.*?)(?:for|while)\s*\(.*?\)",
        r"|for\s+.*\s+in\s+.*:\s*(?s:.*?)for\s+.*\s+in\s+.*:",
    ))
    .unwrap()
});

static BRANCH_KEYWORD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(?:if|else|switch|try|except|elif)\b").unwrap());

static SORT_OR_SEARCH_CALL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(?:qsort|mergesort|quicksort|heapsort|sort|heapify|binarysearch)\(").unwrap()
});

static TREE_SEARCH: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)search\s*\([^)]*?(?:->left|->right|\.left|\.right)[^)]*\)\s*;\s*return\s+search",
    )
    .unwrap()
});

static HALVING_LOOP: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\bwhile\s*\(.*?\s*[/*]\s*=?\s*[0-9]+.*\)").unwrap());

static LINEAR_ITERATION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\b(?:for|while)\s*\(|for\s+.*\s+in\s+.*:|\b(?:forEach|map|filter|reduce)\b\s*\(",
    )
    .unwrap()
});

static DYNAMIC_ALLOCATION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"(?i)\b(?:malloc|calloc|realloc",
        r"|new\s+(?:Array|Vector|List|Map|Set|Object|Promise|string|int\[\]|float\[\]|char\[\]|double\[\])",
        r"|std::vector<|std::map<|std::set<",
        r"|ArrayList<|HashMap<|HashSet<|LinkedList<|TreeMap<|TreeSet<",
        r"|new\s+int\[|new\s+float\[|new\s+double\[|new\s+char\[)\b",
    ))
    .unwrap()
});

static LITERAL_GROUP: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[[^\]]*\]|\{[^}]*\}").unwrap());

static STRING_CONCATENATION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"\s*\+\s*["'`].*?["'`]"#).unwrap());

/// Loop headers of either style, counted independently of nesting.
pub fn count_loops(code: &str) -> usize {
    LOOP_HEADER.find_iter(code).count()
}

/// A loop header followed, somewhere after its opening, by another loop.
pub fn has_nested_loop(code: &str) -> bool {
    NESTED_LOOP.is_match(code)
}

pub fn count_branch_keywords(code: &str) -> usize {
    BRANCH_KEYWORD.find_iter(code).count()
}

pub fn has_sort_or_search_call(code: &str) -> bool {
    SORT_OR_SEARCH_CALL.is_match(code)
}

/// `search(node.left ...); return search(...)` style tree descent.
pub fn has_tree_search(code: &str) -> bool {
    TREE_SEARCH.is_match(code)
}

/// A `while` whose line divides or multiplies by a constant.
pub fn has_halving_loop(code: &str) -> bool {
    HALVING_LOOP.is_match(code)
}

/// Any loop, or a higher-order `forEach`/`map`/`filter`/`reduce` call.
pub fn has_linear_iteration(code: &str) -> bool {
    LINEAR_ITERATION.is_match(code)
}

/// Heap allocation calls or growable container construction.
pub fn has_dynamic_allocation(code: &str) -> bool {
    DYNAMIC_ALLOCATION.is_match(code)
}

/// Bracketed `[...]` or braced `{...}` groups.
pub fn count_literal_groups(code: &str) -> usize {
    LITERAL_GROUP.find_iter(code).count()
}

/// `+ "literal"` style concatenations with any quote character.
pub fn count_string_concatenations(code: &str) -> usize {
    STRING_CONCATENATION.find_iter(code).count()
}
