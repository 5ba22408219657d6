use crate::error::{CatalogError, LookupError};
use serde::{Deserialize, Serialize};

const BUILTIN_PROJECTS: &str = include_str!("../data/projects.json");

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectRecord {
    pub id: String,
    pub title: String,
    pub date: String,
    pub role: String,
    pub duration: String,
    pub description: String,
    pub tech: Vec<String>,
    pub features: Vec<String>,
    pub challenges: String,
    pub lessons: String,
    #[serde(default)]
    pub github_url: Option<String>,
    #[serde(default)]
    pub demo_url: Option<String>,
}

/// Read-only project table, keyed by project id.
#[derive(Clone, Debug, Default)]
pub struct Catalog {
    projects: Vec<ProjectRecord>,
}

impl Catalog {
    /// The table shipped with the site.
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::from_json(BUILTIN_PROJECTS)
    }

    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let projects: Vec<ProjectRecord> = serde_json::from_str(json)?;
        Self::from_records(projects)
    }

    pub fn from_records(projects: Vec<ProjectRecord>) -> Result<Self, CatalogError> {
        for (idx, project) in projects.iter().enumerate() {
            validate_project(project)?;
            if projects[..idx].iter().any(|p| p.id == project.id) {
                return Err(CatalogError::Duplicate(project.id.clone()));
            }
        }
        Ok(Self { projects })
    }

    pub fn get(&self, id: &str) -> Result<&ProjectRecord, LookupError> {
        self.projects
            .iter()
            .find(|p| p.id == id)
            .ok_or_else(|| LookupError { id: id.to_string() })
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.projects.iter().map(|p| p.id.as_str())
    }

    pub fn len(&self) -> usize {
        self.projects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }
}

fn validate_project(project: &ProjectRecord) -> Result<(), CatalogError> {
    let invalid = |reason: &str| CatalogError::Invalid {
        id: project.id.clone(),
        reason: reason.to_string(),
    };
    if project.id.trim().is_empty() {
        return Err(invalid("id is required"));
    }
    if project.title.trim().is_empty() {
        return Err(invalid("title is required"));
    }
    if project.tech.is_empty() {
        return Err(invalid("at least one technology is required"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_catalog_has_four_projects() {
        let catalog = Catalog::builtin().expect("builtin catalog");
        assert_eq!(catalog.len(), 4);
        assert_eq!(
            catalog.ids().collect::<Vec<_>>(),
            vec!["project-1", "project-2", "project-3", "project-4"]
        );
    }

    #[test]
    fn lookup_project_two() {
        let catalog = Catalog::builtin().expect("builtin catalog");
        let project = catalog.get("project-2").expect("project-2");
        assert_eq!(project.title, "프로젝트 관리 앱");
        assert_eq!(project.tech.len(), 8);
        assert_eq!(project.tech[7], "Vue Router");
        assert_eq!(
            project.github_url.as_deref(),
            Some("https://github.com/username/project-management")
        );
    }

    #[test]
    fn unknown_id_is_lookup_error() {
        let catalog = Catalog::builtin().expect("builtin catalog");
        let err = catalog.get("project-99").unwrap_err();
        assert_eq!(err.id, "project-99");
    }

    #[test]
    fn rejects_duplicate_ids() {
        let catalog = Catalog::builtin().expect("builtin catalog");
        let first = catalog.get("project-1").expect("project-1").clone();
        let err = Catalog::from_records(vec![first.clone(), first]).unwrap_err();
        assert!(matches!(err, CatalogError::Duplicate(id) if id == "project-1"));
    }

    #[test]
    fn rejects_project_without_title() {
        let json = r#"[{
            "id": "p", "title": " ", "date": "", "role": "", "duration": "",
            "description": "", "tech": ["Rust"], "features": [],
            "challenges": "", "lessons": ""
        }]"#;
        let err = Catalog::from_json(json).unwrap_err();
        assert!(matches!(err, CatalogError::Invalid { .. }));
    }

    #[test]
    fn links_default_to_none() {
        let json = r#"[{
            "id": "p", "title": "t", "date": "", "role": "", "duration": "",
            "description": "", "tech": ["Rust"], "features": [],
            "challenges": "", "lessons": ""
        }]"#;
        let catalog = Catalog::from_json(json).expect("catalog");
        let project = catalog.get("p").expect("p");
        assert_eq!(project.github_url, None);
        assert_eq!(project.demo_url, None);
    }
}
