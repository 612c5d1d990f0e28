// Askama template definitions

use askama::Template;
use axum::response::Html;

use crate::error::Result;
use crate::models::Todo;

/// Render a template into an HTML response body
pub fn render<T: Template>(template: &T) -> Result<Html<String>> {
    Ok(Html(template.render()?))
}

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Template)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub version: &'static str,
}

impl Default for HomeTemplate {
    fn default() -> Self {
        Self { version: VERSION }
    }
}

#[derive(Template)]
#[template(path = "register.html")]
pub struct RegisterTemplate {
    pub version: &'static str,
}

impl Default for RegisterTemplate {
    fn default() -> Self {
        Self { version: VERSION }
    }
}

#[derive(Template)]
#[template(path = "login.html")]
pub struct LoginTemplate {
    pub version: &'static str,
}

impl Default for LoginTemplate {
    fn default() -> Self {
        Self { version: VERSION }
    }
}

#[derive(Template)]
#[template(path = "tasks.html")]
pub struct TasksTemplate<'a> {
    pub username: &'a str,
    pub todos: &'a [Todo],
    pub version: &'static str,
}

impl<'a> TasksTemplate<'a> {
    pub fn new(username: &'a str, todos: &'a [Todo]) -> Self {
        Self {
            username,
            todos,
            version: VERSION,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_tasks_page_escapes_titles() {
        let todos = vec![Todo {
            id: 7,
            user_id: 1,
            title: "<script>alert(1)</script>".to_string(),
            completed: false,
            created_at: Utc::now(),
        }];
        let html = TasksTemplate::new("alice", &todos).render().unwrap();

        assert!(html.contains("alice"));
        assert!(html.contains("&lt;script&gt;"));
        assert!(!html.contains("<script>alert(1)</script>"));
    }

    #[test]
    fn test_tasks_page_empty_state() {
        let html = TasksTemplate::new("alice", &[]).render().unwrap();

        assert!(html.contains("No tasks yet"));
    }

    #[test]
    fn test_static_pages_render() {
        assert!(HomeTemplate::default().render().unwrap().contains("/register"));
        assert!(RegisterTemplate::default()
            .render()
            .unwrap()
            .contains("confirmPassword"));
        assert!(LoginTemplate::default()
            .render()
            .unwrap()
            .contains("name=\"password\""));
    }
}
