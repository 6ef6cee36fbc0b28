//! Static route table: which page answers which path, and who may see it.

use crate::application::dto::Navigation;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Page {
    Home,
    Login,
    Signup,
    AllPosts,
    AddPost,
    EditPost,
    Post,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthRequirement {
    Public,
    /// Only reachable with a session; others go to the login page.
    Authenticated,
    /// Only reachable without a session; signed-in users go home.
    GuestOnly,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteEntry {
    pub path: &'static str,
    pub page: Page,
    pub auth: AuthRequirement,
}

/// Path parameter placeholder used by the parameterised routes.
const PARAM: &str = "{slug}";

pub static ROUTES: [RouteEntry; 7] = [
    RouteEntry {
        path: "/",
        page: Page::Home,
        auth: AuthRequirement::Public,
    },
    RouteEntry {
        path: "/login",
        page: Page::Login,
        auth: AuthRequirement::GuestOnly,
    },
    RouteEntry {
        path: "/signup",
        page: Page::Signup,
        auth: AuthRequirement::GuestOnly,
    },
    RouteEntry {
        path: "/all-posts",
        page: Page::AllPosts,
        auth: AuthRequirement::Authenticated,
    },
    RouteEntry {
        path: "/add-posts",
        page: Page::AddPost,
        auth: AuthRequirement::Authenticated,
    },
    RouteEntry {
        path: "/edit-posts/{slug}",
        page: Page::EditPost,
        auth: AuthRequirement::Authenticated,
    },
    RouteEntry {
        path: "/post/{slug}",
        page: Page::Post,
        auth: AuthRequirement::Public,
    },
];

pub const DELETE_POST_PATH: &str = "/post/{slug}/delete";
pub const LOGOUT_PATH: &str = "/logout";
pub const FORM_EVENTS_PATH: &str = "/api/post-form/events";
pub const HEALTH_PATH: &str = "/health";

impl Page {
    pub fn entry(self) -> &'static RouteEntry {
        // Every page has exactly one entry in ROUTES.
        ROUTES
            .iter()
            .find(|entry| entry.page == self)
            .unwrap_or(&ROUTES[0])
    }

    pub fn path(self) -> &'static str {
        self.entry().path
    }

    /// Concrete link to this page, filling the path parameter with `param`.
    pub fn href(self, param: &str) -> String {
        fill(self.path(), param)
    }
}

pub fn fill(pattern: &str, param: &str) -> String {
    pattern.replace(PARAM, param)
}

pub fn navigation_href(navigation: &Navigation) -> String {
    match navigation {
        Navigation::Home => Page::Home.path().to_owned(),
        Navigation::Post(id) => Page::Post.href(id.as_str()),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Allow,
    Redirect(&'static str),
}

/// AuthLayout rule: decide whether a request with or without a session may
/// render a page with the given requirement.
pub fn check_access(requirement: AuthRequirement, authenticated: bool) -> Access {
    match (requirement, authenticated) {
        (AuthRequirement::Authenticated, false) => Access::Redirect(Page::Login.path()),
        (AuthRequirement::GuestOnly, true) => Access::Redirect(Page::Home.path()),
        _ => Access::Allow,
    }
}
