//! Navigation commands a view hands back to its host.
//!
//! Views never drive a router themselves. They return [`Effect`]s and the host decides
//! how to carry them out.

use std::fmt::Display;

use crate::model::ResourceId;

/// Pages a view can send the user to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Dashboard,
    EditResource(ResourceId),
}

impl Route {
    pub fn path(&self) -> String {
        match self {
            Route::Dashboard => "/admin/dashboard".to_string(),
            Route::EditResource(id) => format!("/admin/resources/edit/{id}"),
        }
    }
}

impl Display for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.path())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// Push `Route` onto the navigation history.
    NavigateTo(Route),
    /// Return to the previous page.
    Back,
    /// Re-render any server-provided data on the current page.
    RefreshPage,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_paths() {
        assert_eq!(Route::Dashboard.path(), "/admin/dashboard");
        assert_eq!(
            Route::EditResource(ResourceId(7)).to_string(),
            "/admin/resources/edit/7"
        );
    }
}
