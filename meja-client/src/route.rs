//! Navigation targets and user-facing notices
//!
//! Flows return where the user should go next and what to tell them; the
//! front end decides how to render both.

use std::fmt;

/// Pages a flow can send the user to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    /// Customer entry page (table number / QR scan)
    Home,
    /// Customer menu
    Menu,
    /// Customer cart ("pesanan")
    Orders,
    /// Customer checkout status
    Checkout,
    /// Customer ratings
    Ratings,
    AdminLogin,
    AdminDashboard,
}

impl Route {
    pub fn path(self) -> &'static str {
        match self {
            Self::Home => "/",
            Self::Menu => "/menu",
            Self::Orders => "/pesanan",
            Self::Checkout => "/checkout",
            Self::Ratings => "/rating",
            Self::AdminLogin => "/admin/auth/login",
            Self::AdminDashboard => "/admin/dashboard",
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// Severity of a notice
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Error,
}

/// A toast: short title plus one sentence
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub title: String,
    pub description: String,
}

impl Notice {
    pub fn info(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            title: title.into(),
            description: description.into(),
        }
    }

    pub fn error(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            title: title.into(),
            description: description.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.level == NoticeLevel::Error
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.title, self.description)
    }
}

/// Outcome of a flow that ends on another page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub route: Route,
    pub notice: Option<Notice>,
}

impl Transition {
    pub fn to(route: Route) -> Self {
        Self { route, notice: None }
    }

    pub fn with_notice(mut self, notice: Notice) -> Self {
        self.notice = Some(notice);
        self
    }
}
