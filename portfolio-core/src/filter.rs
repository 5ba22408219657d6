/// Project card filter selected by a `.filter-btn[data-filter]` button.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ProjectFilter {
    All,
    Category(String),
}

impl ProjectFilter {
    pub fn parse(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            None | Some("") | Some("all") => ProjectFilter::All,
            Some(category) => ProjectFilter::Category(category.to_string()),
        }
    }

    /// Cards carry their category in `data-type`.
    pub fn shows_card(&self, card_type: Option<&str>) -> bool {
        self.matches(card_type)
    }

    /// Grids carry their category in `data-category`.
    pub fn shows_grid(&self, category: Option<&str>) -> bool {
        self.matches(category)
    }

    fn matches(&self, value: Option<&str>) -> bool {
        match self {
            ProjectFilter::All => true,
            ProjectFilter::Category(wanted) => value == Some(wanted.as_str()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_shows_everything() {
        let filter = ProjectFilter::parse(Some("all"));
        assert!(filter.shows_card(Some("design")));
        assert!(filter.shows_card(None));
        assert!(filter.shows_grid(Some("web")));
    }

    #[test]
    fn category_filters_exactly() {
        let filter = ProjectFilter::parse(Some("web"));
        assert_eq!(filter, ProjectFilter::Category("web".into()));
        assert!(filter.shows_card(Some("web")));
        assert!(!filter.shows_card(Some("design")));
        assert!(!filter.shows_grid(None));
    }

    #[test]
    fn missing_attribute_means_all() {
        assert_eq!(ProjectFilter::parse(None), ProjectFilter::All);
    }
}
