//! Role-gated navigation decisions.
//!
//! Pure functions: the presentation layer asks whether a page may render for
//! the current session and follows the redirect when it may not.

use super::user::Role;

/// Login page.
pub const LOGIN: &str = "/login";
/// Registration page.
pub const REGISTER: &str = "/register";
/// Customer landing page.
pub const CUSTOMER_DASHBOARD: &str = "/dashboard";
/// Banker landing page.
pub const BANKER_DASHBOARD: &str = "/banker/dashboard";
/// Administrator landing page.
pub const ADMIN_DASHBOARD: &str = "/admin/dashboard";

const CUSTOMER_PAGES: &[Role] = &[Role::Customer, Role::Banker];
const BANKER_PAGES: &[Role] = &[Role::Banker];
const ADMIN_PAGES: &[Role] = &[Role::Admin];

const ROUTES: &[(&str, &[Role])] = &[
    (CUSTOMER_DASHBOARD, CUSTOMER_PAGES),
    ("/accounts", CUSTOMER_PAGES),
    ("/transfer", CUSTOMER_PAGES),
    ("/transactions", CUSTOMER_PAGES),
    ("/billpay", CUSTOMER_PAGES),
    ("/billpay/scheduled", CUSTOMER_PAGES),
    ("/profile", CUSTOMER_PAGES),
    (BANKER_DASHBOARD, BANKER_PAGES),
    ("/banker/customers", BANKER_PAGES),
    ("/banker/pending", BANKER_PAGES),
    (ADMIN_DASHBOARD, ADMIN_PAGES),
    ("/admin/users", ADMIN_PAGES),
];

/// Outcome of a navigation check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteDecision {
    /// Show the requested page.
    Render,
    /// Send the visitor to the login page.
    RedirectToLogin,
    /// Send the user to another page, normally their own dashboard.
    RedirectTo(&'static str),
}

/// Access rule for a known path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteAccess {
    /// Reachable without signing in.
    Public,
    /// Reachable by signed-in users holding one of these roles.
    Roles(&'static [Role]),
    /// Not a known page.
    Unknown,
}

/// Landing page for a role.
pub const fn default_dashboard(role: Role) -> &'static str {
    match role {
        Role::Customer => CUSTOMER_DASHBOARD,
        Role::Banker => BANKER_DASHBOARD,
        Role::Admin => ADMIN_DASHBOARD,
    }
}

/// Decide whether a protected page may render.
///
/// An empty `allowed` list admits any signed-in user. A signed-in user
/// without a known role is treated as signed out.
///
/// # Examples
/// ```
/// use banking_client::domain::{authorize, RouteDecision, Role};
///
/// assert_eq!(
///     authorize(true, Some(Role::Customer), &[Role::Admin]),
///     RouteDecision::RedirectTo("/dashboard")
/// );
/// assert_eq!(authorize(false, None, &[]), RouteDecision::RedirectToLogin);
/// ```
pub fn authorize(is_authenticated: bool, role: Option<Role>, allowed: &[Role]) -> RouteDecision {
    let Some(role) = role.filter(|_| is_authenticated) else {
        return RouteDecision::RedirectToLogin;
    };
    if allowed.is_empty() || allowed.contains(&role) {
        RouteDecision::Render
    } else {
        RouteDecision::RedirectTo(default_dashboard(role))
    }
}

/// Access rule for `path`; a trailing slash is ignored.
pub fn route_access(path: &str) -> RouteAccess {
    let normalized = match path.trim_end_matches('/') {
        "" => "/",
        trimmed => trimmed,
    };
    if normalized == LOGIN || normalized == REGISTER {
        return RouteAccess::Public;
    }
    ROUTES
        .iter()
        .find(|(route, _)| *route == normalized)
        .map_or(RouteAccess::Unknown, |(_, roles)| RouteAccess::Roles(roles))
}

/// Decide what to show for `path` given the session.
///
/// Public pages always render. Unknown paths, including `/`, go to login.
pub fn resolve(path: &str, is_authenticated: bool, role: Option<Role>) -> RouteDecision {
    match route_access(path) {
        RouteAccess::Public => RouteDecision::Render,
        RouteAccess::Roles(allowed) => authorize(is_authenticated, role, allowed),
        RouteAccess::Unknown => RouteDecision::RedirectToLogin,
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Role::Customer, "/dashboard")]
    #[case(Role::Banker, "/banker/dashboard")]
    #[case(Role::Admin, "/admin/dashboard")]
    fn dashboards_follow_role(#[case] role: Role, #[case] expected: &str) {
        assert_eq!(default_dashboard(role), expected);
    }

    #[rstest]
    #[case(false, Some(Role::Admin), RouteDecision::RedirectToLogin)]
    #[case(true, None, RouteDecision::RedirectToLogin)]
    #[case(true, Some(Role::Admin), RouteDecision::Render)]
    #[case(true, Some(Role::Customer), RouteDecision::RedirectTo("/dashboard"))]
    #[case(true, Some(Role::Banker), RouteDecision::RedirectTo("/banker/dashboard"))]
    fn admin_pages_are_gated(
        #[case] authenticated: bool,
        #[case] role: Option<Role>,
        #[case] expected: RouteDecision,
    ) {
        assert_eq!(authorize(authenticated, role, &[Role::Admin]), expected);
    }

    #[rstest]
    fn empty_allow_list_admits_any_signed_in_user() {
        assert_eq!(authorize(true, Some(Role::Banker), &[]), RouteDecision::Render);
    }

    #[rstest]
    #[case("/transfer", Some(Role::Banker), RouteDecision::Render)]
    #[case("/transfer/", Some(Role::Customer), RouteDecision::Render)]
    #[case("/banker/pending", Some(Role::Customer), RouteDecision::RedirectTo("/dashboard"))]
    #[case("/admin/users", Some(Role::Banker), RouteDecision::RedirectTo("/banker/dashboard"))]
    #[case("/login", None, RouteDecision::Render)]
    #[case("/", Some(Role::Admin), RouteDecision::RedirectToLogin)]
    #[case("/nowhere", Some(Role::Customer), RouteDecision::RedirectToLogin)]
    fn route_table_decisions(
        #[case] path: &str,
        #[case] role: Option<Role>,
        #[case] expected: RouteDecision,
    ) {
        assert_eq!(resolve(path, role.is_some(), role), expected);
    }
}
