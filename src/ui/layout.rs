//! Page routes and the navigation frame around every page

use std::str::FromStr;

use crate::error::AppError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// `/`
    List,
    /// `/add`
    Add,
    /// `/edit/{id}`
    Edit(String),
}

impl Route {
    pub fn path(&self) -> String {
        match self {
            Route::List => "/".to_string(),
            Route::Add => "/add".to_string(),
            Route::Edit(id) => format!("/edit/{}", id),
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Route::List => "Book List",
            Route::Add => "Add Book",
            Route::Edit(_) => "Edit Book",
        }
    }
}

impl FromStr for Route {
    type Err = AppError;

    fn from_str(path: &str) -> Result<Self, Self::Err> {
        let trimmed = path.trim().trim_end_matches('/');
        let segments: Vec<&str> = trimmed.split('/').filter(|s| !s.is_empty()).collect();
        match segments.as_slice() {
            [] => Ok(Route::List),
            ["add"] => Ok(Route::Add),
            ["edit", id] => Ok(Route::Edit((*id).to_string())),
            _ => Err(AppError::NotFound(format!("No page at '{}'", path))),
        }
    }
}

/// Navigation bar; the active entry is bracketed
pub fn render_nav(active: &Route) -> String {
    [Route::List, Route::Add]
        .iter()
        .map(|route| {
            if route == active {
                format!("[{}]", route.title())
            } else {
                format!(" {} ", route.title())
            }
        })
        .collect::<Vec<_>>()
        .join("  ")
}

pub fn render_layout(active: &Route, content: &str) -> String {
    let nav = render_nav(active);
    let rule = "=".repeat(nav.chars().count());
    format!("{}\n{}\n{}", nav, rule, content)
}
