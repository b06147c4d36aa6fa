//! Library inference from data URIs
//!
//! Legacy requests predate the `library` field and only carry a data URI
//! of the form `<users|groups>/<id>/<endpoint>`.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::types::{LibraryRef, LibraryType};

static DATA_URI: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^/?(users|groups)/(\d+)(?:/(.*))?$").expect("data URI pattern is valid")
});

/// Infer the library a data URI points at.
///
/// A missing or empty endpoint defaults to [`LibraryRef::DEFAULT_URI`].
///
/// # Examples
/// ```
/// use zr_requests::{parse_data_uri, LibraryType};
///
/// let library = parse_data_uri("groups/456/collections/ABC/items").unwrap();
/// assert_eq!(library.kind, LibraryType::Groups);
/// assert_eq!(library.path, "groups/456");
/// assert_eq!(library.uri, "collections/ABC/items");
///
/// assert!(parse_data_uri("items/top").is_none());
/// ```
#[must_use]
pub fn parse_data_uri(data_uri: &str) -> Option<LibraryRef> {
    let caps = DATA_URI.captures(data_uri.trim())?;
    let kind = LibraryType::parse(caps.get(1)?.as_str())?;
    let id = caps.get(2)?.as_str();
    let uri = caps
        .get(3)
        .map(|m| m.as_str().trim_end_matches('/'))
        .filter(|s| !s.is_empty())
        .unwrap_or(LibraryRef::DEFAULT_URI);

    Some(LibraryRef::new(kind, id, uri))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_user_items() {
        let lib = parse_data_uri("users/123/items").unwrap();
        assert_eq!(lib.kind, LibraryType::Users);
        assert_eq!(lib.id, "123");
        assert_eq!(lib.path, "users/123");
        assert_eq!(lib.uri, "items");
    }

    #[test]
    fn tolerates_leading_slash_and_whitespace() {
        let lib = parse_data_uri(" /groups/42/items/top ").unwrap();
        assert_eq!(lib.path, "groups/42");
        assert_eq!(lib.uri, "items/top");
    }

    #[test]
    fn bare_library_defaults_endpoint() {
        assert_eq!(parse_data_uri("users/7").unwrap().uri, "items");
        assert_eq!(parse_data_uri("users/7/").unwrap().uri, "items");
    }

    #[test]
    fn rejects_unknown_prefix_and_non_numeric_id() {
        assert!(parse_data_uri("orgs/1/items").is_none());
        assert!(parse_data_uri("users/abc/items").is_none());
        assert!(parse_data_uri("users//items").is_none());
        assert!(parse_data_uri("").is_none());
        assert!(parse_data_uri("https://api.zotero.org/users/1/items").is_none());
    }
}
