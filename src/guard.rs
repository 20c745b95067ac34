// Advisory route guarding, run before a page renders.
//
// Only the auth pages redirect, and only for signed-in visitors. Guests can
// browse everything; actions that need auth fail at the API instead. This is
// a UX convenience, not an authorization boundary.

use crate::error::StoreError;
use crate::store::TokenVault;

/// What the interception layer should do with a navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteDecision {
    /// Render the requested route.
    Proceed,
    /// Send the visitor to the home route instead.
    RedirectHome,
}

/// Routes that only make sense for anonymous visitors.
fn is_auth_page(path: &str) -> bool {
    path.starts_with("/login") || path.starts_with("/register")
}

/// Decide redirect behavior for a navigation. A token-holding visitor on a
/// login/registration page goes home; everyone else proceeds.
pub fn guard_route(path: &str, token: Option<&str>) -> RouteDecision {
    if token.is_some() && is_auth_page(path) {
        RouteDecision::RedirectHome
    } else {
        RouteDecision::Proceed
    }
}

/// Token presence as seen by the interception layer: the mirror store
/// first, falling back to a `Bearer `-style authorization header.
pub fn token_from_request(
    vault: &TokenVault,
    authorization: Option<&str>,
) -> Result<Option<String>, StoreError> {
    if let Some(token) = vault.read_mirror()? {
        return Ok(Some(token));
    }
    Ok(authorization
        .and_then(|h| h.strip_prefix("Bearer "))
        .filter(|t| !t.is_empty())
        .map(str::to_string))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_authenticated_visitor_leaves_auth_pages() {
        assert_eq!(
            guard_route("/login", Some("abc")),
            RouteDecision::RedirectHome
        );
        assert_eq!(
            guard_route("/register", Some("abc")),
            RouteDecision::RedirectHome
        );
    }

    #[test]
    fn test_anonymous_visitor_sees_auth_pages() {
        assert_eq!(guard_route("/login", None), RouteDecision::Proceed);
        assert_eq!(guard_route("/register", None), RouteDecision::Proceed);
    }

    #[test]
    fn test_no_route_is_blocked_for_guests() {
        for path in ["/", "/rankings", "/times", "/torneios", "/matchmaking"] {
            assert_eq!(guard_route(path, None), RouteDecision::Proceed);
        }
    }

    #[test]
    fn test_other_routes_proceed_when_authenticated() {
        for path in ["/", "/rankings", "/jogador/shadowfang", "/matchmaking"] {
            assert_eq!(guard_route(path, Some("abc")), RouteDecision::Proceed);
        }
    }

    #[test]
    fn test_header_fallback() {
        let dir = std::env::temp_dir().join(format!("arena-guard-{}", std::process::id()));
        let vault = TokenVault::open(&dir).unwrap();
        vault.clear().unwrap();

        // Empty mirror: fall back to the bearer header.
        let token = token_from_request(&vault, Some("Bearer abc")).unwrap();
        assert_eq!(token.as_deref(), Some("abc"));
        assert_eq!(token_from_request(&vault, Some("Bearer ")).unwrap(), None);
        assert_eq!(token_from_request(&vault, None).unwrap(), None);

        // Mirror wins over the header once populated.
        vault.set("stored").unwrap();
        let token = token_from_request(&vault, Some("Bearer other")).unwrap();
        assert_eq!(token.as_deref(), Some("stored"));

        let _ = std::fs::remove_dir_all(dir);
    }
}
