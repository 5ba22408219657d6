/// Page sections that arrive as components.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Section {
    Header,
    Hero,
    Projects,
    Skills,
    Contact,
}

/// What the page should wire up once a section's markup is in the document.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SectionInit {
    ProjectFilters,
    ContactForm,
    Nothing,
}

impl Section {
    pub fn from_component(name: &str) -> Option<Self> {
        match name {
            "header" => Some(Section::Header),
            "hero" => Some(Section::Hero),
            "projects" => Some(Section::Projects),
            "skills" => Some(Section::Skills),
            "contact" => Some(Section::Contact),
            _ => None,
        }
    }

    pub fn init(self) -> SectionInit {
        match self {
            Section::Projects => SectionInit::ProjectFilters,
            Section::Contact => SectionInit::ContactForm,
            // scroll and reveal effects only
            Section::Header | Section::Hero | Section::Skills => SectionInit::Nothing,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dispatch_by_component_name() {
        assert_eq!(
            Section::from_component("projects").map(Section::init),
            Some(SectionInit::ProjectFilters)
        );
        assert_eq!(
            Section::from_component("contact").map(Section::init),
            Some(SectionInit::ContactForm)
        );
        assert_eq!(
            Section::from_component("skills").map(Section::init),
            Some(SectionInit::Nothing)
        );
        assert_eq!(Section::from_component("footer"), None);
    }
}
