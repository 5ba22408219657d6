use crate::catalog::ProjectRecord;
use crate::config::SiteConfig;
use crate::loader::Fetch;
use log::{debug, warn};
use serde::Serialize;

/// Link targets stored as `"#"` are placeholders, not real URLs.
pub const LINK_PLACEHOLDER: &str = "#";

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub enum Link {
    Shown(String),
    Hidden,
}

impl Link {
    pub fn from_stored(value: Option<&str>) -> Self {
        match value {
            Some(url) if !url.is_empty() && url != LINK_PLACEHOLDER => Link::Shown(url.to_string()),
            _ => Link::Hidden,
        }
    }

    pub fn href(&self) -> Option<&str> {
        match self {
            Link::Shown(url) => Some(url),
            Link::Hidden => None,
        }
    }

    pub fn is_shown(&self) -> bool {
        matches!(self, Link::Shown(_))
    }
}

/// Element ids the detail view writes into.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DetailField {
    Title,
    Date,
    Role,
    Duration,
    Description,
    Challenges,
    Lessons,
    TechTags,
    FeatureList,
    GithubLink,
    DemoLink,
}

impl DetailField {
    pub const TEXT: [DetailField; 7] = [
        DetailField::Title,
        DetailField::Date,
        DetailField::Role,
        DetailField::Duration,
        DetailField::Description,
        DetailField::Challenges,
        DetailField::Lessons,
    ];

    pub fn element_id(self) -> &'static str {
        match self {
            DetailField::Title => "detail-title",
            DetailField::Date => "detail-date",
            DetailField::Role => "detail-role",
            DetailField::Duration => "detail-duration",
            DetailField::Description => "detail-description-text",
            DetailField::Challenges => "detail-challenges-text",
            DetailField::Lessons => "detail-lessons-text",
            DetailField::TechTags => "detail-tech-tags",
            DetailField::FeatureList => "detail-features-list",
            DetailField::GithubLink => "github-link",
            DetailField::DemoLink => "demo-link",
        }
    }
}

/// Everything the detail view shows for one project, fully derived.
///
/// Rendering the same record always yields an equal page, so showing it
/// twice replaces the previous tags and features instead of appending.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DetailPage {
    pub project_id: String,
    pub title: String,
    pub date: String,
    pub role: String,
    pub duration: String,
    pub description: String,
    pub challenges: String,
    pub lessons: String,
    pub tech_tags: Vec<String>,
    pub features: Vec<String>,
    pub github: Link,
    pub demo: Link,
}

impl DetailPage {
    pub fn from_record(record: &ProjectRecord) -> Self {
        Self {
            project_id: record.id.clone(),
            title: record.title.clone(),
            date: record.date.clone(),
            role: record.role.clone(),
            duration: record.duration.clone(),
            description: record.description.clone(),
            challenges: record.challenges.clone(),
            lessons: record.lessons.clone(),
            tech_tags: record.tech.clone(),
            features: record.features.clone(),
            github: Link::from_stored(record.github_url.as_deref()),
            demo: Link::from_stored(record.demo_url.as_deref()),
        }
    }

    pub fn text(&self, field: DetailField) -> Option<&str> {
        let value = match field {
            DetailField::Title => &self.title,
            DetailField::Date => &self.date,
            DetailField::Role => &self.role,
            DetailField::Duration => &self.duration,
            DetailField::Description => &self.description,
            DetailField::Challenges => &self.challenges,
            DetailField::Lessons => &self.lessons,
            _ => return None,
        };
        Some(value)
    }
}

/// Write-up shown when a project has no `projects/{id}.html` page.
pub fn fallback_write_up() -> &'static str {
    r#"<div class="project-info">
    <h3>프로젝트 정보</h3>
    <p>상세한 프로젝트 정보와 기술 스택, 개발 과정 등을 여기에 작성합니다.</p>
</div>"#
}

/// Optional per-project HTML pages, falling back to the built-in write-up.
pub struct ProjectPages<F> {
    fetch: F,
    config: SiteConfig,
}

impl<F: Fetch> ProjectPages<F> {
    pub fn new(fetch: F, config: SiteConfig) -> Self {
        Self { fetch, config }
    }

    pub async fn write_up(&self, id: &str) -> String {
        let url = self.config.project_page_url(id);
        match self.fetch.get_text(&url).await {
            Ok(html) => {
                debug!("project page {id} loaded from {url}");
                html
            }
            Err(err) => {
                warn!("project page {id} unavailable ({err}), using fallback");
                fallback_write_up().to_string()
            }
        }
    }
}
