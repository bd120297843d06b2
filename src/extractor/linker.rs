//! Library link placeholder resolution
//!
//! Unlinked bytecode contains 40-character markers where library addresses
//! go, either `__$<34 hex>$__` or `__LibName_____...`. Replacing them with
//! the zero address makes the code executable on its own.

use regex::Regex;
use std::borrow::Cow;
use std::sync::OnceLock;

/// Hex text of the address substituted for every placeholder
pub const NULL_ADDRESS_HEX: &str = "0000000000000000000000000000000000000000";

static PLACEHOLDER_RE: OnceLock<Regex> = OnceLock::new();

fn placeholder_regex() -> &'static Regex {
    PLACEHOLDER_RE.get_or_init(|| {
        // SAFETY: constant pattern, validated by the tests below.
        Regex::new(r"__[A-Za-z0-9_$.:/-]{36}__").expect("link placeholder regex is valid")
    })
}

/// True if `bytecode` still contains link placeholders
pub fn has_placeholders(bytecode: &str) -> bool {
    placeholder_regex().is_match(bytecode)
}

/// Replace every link placeholder in `bytecode` with the null address
///
/// # Examples
///
/// ```
/// use contract_semver::extractor::linker::link_placeholders;
///
/// let unlinked = format!("0x73{}50", "__$1234567890abcdef1234567890abcdef12$__");
/// let linked = link_placeholders(&unlinked);
/// assert_eq!(linked, format!("0x73{}50", "0".repeat(40)));
/// ```
pub fn link_placeholders(bytecode: &str) -> Cow<'_, str> {
    placeholder_regex().replace_all(bytecode, NULL_ADDRESS_HEX)
}
