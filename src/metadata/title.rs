use regex::Regex;
use std::sync::OnceLock;

static YEAR_SUFFIX: OnceLock<Regex> = OnceLock::new();

fn year_suffix() -> &'static Regex {
    YEAR_SUFFIX.get_or_init(|| Regex::new(r"\s*\(\s*\d{4}[^()]*\)\s*$").unwrap())
}

/// Turns a candidate title such as "Dune: Part Two (2024)" into the lookup
/// key "Dune: Part Two". A trailing group is dropped when it starts with a
/// year, e.g. "(2023–2024)" or "(2024 film)"; other parentheses are kept.
pub fn clean_title(title: &str) -> String {
    year_suffix().replace(title, "").trim().to_string()
}
