//! String transformation utilities for tool naming

use once_cell::sync::Lazy;
use regex::Regex;

static BRACES: Lazy<Regex> = Lazy::new(|| Regex::new(r"[{}]").expect("valid regex"));
static NON_WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^a-zA-Z0-9_]").expect("valid regex"));

/// Sanitizes a path template into an identifier fragment.
///
/// Leading and trailing slashes are stripped, template braces are removed,
/// path separators become underscores and every remaining character outside
/// `[a-zA-Z0-9_]` becomes an underscore.
///
/// # Examples
/// ```
/// use swagger_mcp::core::utils::sanitize_path;
///
/// assert_eq!(sanitize_path("/pet/{petId}/uploadImage"), "pet_petId_uploadImage");
/// assert_eq!(sanitize_path("/v1/near-me.json"), "v1_near_me_json");
/// ```
pub fn sanitize_path(path: &str) -> String {
    let trimmed = path.trim_matches('/');
    let without_braces = BRACES.replace_all(trimmed, "");
    let underscored = without_braces.replace('/', "_");
    NON_WORD.replace_all(&underscored, "_").into_owned()
}

/// Derives the tool identifier of an operation.
///
/// The result is `lowercase(method + "_" + sanitize_path(path))` and only
/// contains characters from `[a-z0-9_]`.
///
/// # Examples
/// ```
/// use swagger_mcp::core::utils::derive_tool_name;
///
/// assert_eq!(derive_tool_name("/companies/{id}", "GET"), "get_companies_id");
/// assert_eq!(derive_tool_name("/search", "get"), "get_search");
/// ```
pub fn derive_tool_name(path: &str, method: &str) -> String {
    format!("{}_{}", method, sanitize_path(path)).to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_path() {
        assert_eq!(sanitize_path("/pet/findByStatus"), "pet_findByStatus");
        assert_eq!(sanitize_path("/pet/{petId}"), "pet_petId");
        assert_eq!(sanitize_path("//store/order//"), "store_order");
        assert_eq!(sanitize_path("/"), "");
        assert_eq!(sanitize_path("/a b/c+d"), "a_b_c_d");
    }

    #[test]
    fn test_derive_tool_name() {
        assert_eq!(derive_tool_name("/pet/{petId}", "get"), "get_pet_petid");
        assert_eq!(derive_tool_name("/pet/{petId}", "DELETE"), "delete_pet_petid");
        assert_eq!(derive_tool_name("/", "get"), "get_");
        assert_eq!(
            derive_tool_name("/users/{user-id}/posts.json", "post"),
            "post_users_user_id_posts_json"
        );
    }

    #[test]
    fn test_derive_tool_name_is_deterministic_and_restricted() {
        let paths = [
            "/companies/{id}",
            "/éléments/{clé}",
            "/a/{b}/c:d",
            "/search?q",
            "/ünïcødé/∆",
            "/v2/things/{thingId}/sub-things",
        ];
        for path in paths {
            for method in ["get", "POST", "Put", "patch", "delete"] {
                let first = derive_tool_name(path, method);
                let second = derive_tool_name(path, method);
                assert_eq!(first, second);
                assert!(
                    first
                        .chars()
                        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_'),
                    "unexpected character in {first}"
                );
            }
        }
    }

    #[test]
    fn test_distinct_paths_can_collide() {
        assert_eq!(
            derive_tool_name("/a-b", "get"),
            derive_tool_name("/a_b", "get")
        );
        assert_eq!(
            derive_tool_name("/items/{id}", "get"),
            derive_tool_name("/items/id", "get")
        );
    }
}
