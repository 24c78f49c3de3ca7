//! Address Deduplication
//!
//! Pure domain logic, no external dependencies.

use std::collections::HashSet;

/// Reduce `addresses` to its distinct entries, in order of first occurrence.
///
/// Equality is exact string equality: no case folding, no canonical IP
/// formatting.
///
/// # Examples
/// ```
/// use ipbatch::dedupe;
///
/// let unique = dedupe(["1.1.1.1", "8.8.8.8", "1.1.1.1"]);
/// assert_eq!(unique, vec!["1.1.1.1", "8.8.8.8"]);
/// ```
pub fn dedupe<I, S>(addresses: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut seen = HashSet::new();
    let mut unique = Vec::new();

    for address in addresses {
        let address = address.as_ref();
        if seen.insert(address.to_string()) {
            unique.push(address.to_string());
        }
    }

    unique
}
