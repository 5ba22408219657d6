use crate::error::ConfigError;
use crate::route::{HashTransport, QueryTransport, Transport};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

static REPO_PREFIX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^/([^/]+)/").expect("valid regex"));

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransportKind {
    #[default]
    Hash,
    Query,
}

impl TransportKind {
    pub fn build(self) -> Box<dyn Transport> {
        match self {
            TransportKind::Hash => Box::new(HashTransport),
            TransportKind::Query => Box::new(QueryTransport),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SiteConfig {
    pub base_path: Option<String>,
    pub components_dir: String,
    pub projects_dir: String,
    pub transport: TransportKind,
    pub site_title: String,
    pub main_selector: String,
    pub detail_container_id: String,
    pub detail_stylesheet: Option<String>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            base_path: None,
            components_dir: "components".into(),
            projects_dir: "./projects".into(),
            transport: TransportKind::Hash,
            site_title: "포트폴리오".into(),
            main_selector: "main".into(),
            detail_container_id: "project-detail-container".into(),
            detail_stylesheet: Some("./css/project-detail.css".into()),
        }
    }
}

impl SiteConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Explicit `basePath` wins; otherwise the path is detected from the page.
    pub fn base_path(&self, pathname: &str) -> String {
        match &self.base_path {
            Some(path) => path.trim_end_matches('/').to_string(),
            None => detect_base_path(pathname),
        }
    }

    pub fn component_url(&self, base_path: &str, name: &str) -> String {
        format!(
            "{base_path}/{}/{name}.html",
            self.components_dir.trim_matches('/')
        )
    }

    pub fn project_page_url(&self, id: &str) -> String {
        format!("{}/{id}.html", self.projects_dir.trim_end_matches('/'))
    }

    pub fn detail_title(&self, project_title: &str) -> String {
        format!("{project_title} - {}", self.site_title)
    }
}

/// GitHub Pages serves a project site under `/{repo}/`.
pub fn detect_base_path(pathname: &str) -> String {
    REPO_PREFIX
        .captures(pathname)
        .and_then(|caps| caps.get(1))
        .map(|repo| format!("/{}", repo.as_str()))
        .unwrap_or_default()
}
