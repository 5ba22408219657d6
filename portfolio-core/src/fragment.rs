use once_cell::sync::Lazy;
use regex::Regex;

static SCRIPT_TAG: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?is)<script\b([^>]*)>(.*?)</script\s*>").expect("valid regex")
});

static SRC_ATTR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i)(?:^|\s)src\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s"'>]+))"#).expect("valid regex")
});

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Script {
    External(String),
    Inline(String),
}

/// An HTML fragment split into inert markup and the scripts it carried.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Fragment {
    pub markup: String,
    pub scripts: Vec<Script>,
}

impl Fragment {
    pub fn parse(html: &str) -> Self {
        let scripts = SCRIPT_TAG
            .captures_iter(html)
            .map(|caps| {
                let attrs = caps.get(1).map_or("", |m| m.as_str());
                match src_of(attrs) {
                    Some(src) => Script::External(src),
                    None => Script::Inline(caps.get(2).map_or("", |m| m.as_str()).to_string()),
                }
            })
            .collect();
        let markup = SCRIPT_TAG.replace_all(html, "").into_owned();
        Self { markup, scripts }
    }
}

fn src_of(attrs: &str) -> Option<String> {
    let caps = SRC_ATTR.captures(attrs)?;
    caps.get(1)
        .or_else(|| caps.get(2))
        .or_else(|| caps.get(3))
        .map(|m| m.as_str().to_string())
}

pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_markup_passes_through() {
        let frag = Fragment::parse("<section id=\"hero\"><h1>안녕하세요</h1></section>");
        assert_eq!(frag.markup, "<section id=\"hero\"><h1>안녕하세요</h1></section>");
        assert!(frag.scripts.is_empty());
    }

    #[test]
    fn strips_scripts_in_order() {
        let html = r#"<nav>menu</nav>
<script src="./js/menu.js"></script>
<SCRIPT type="module">
  init();
</SCRIPT>
<footer>end</footer>"#;
        let frag = Fragment::parse(html);
        assert_eq!(
            frag.scripts,
            vec![
                Script::External("./js/menu.js".into()),
                Script::Inline("\n  init();\n".into()),
            ]
        );
        assert!(!frag.markup.to_lowercase().contains("<script"));
        assert!(frag.markup.contains("<nav>menu</nav>"));
        assert!(frag.markup.contains("<footer>end</footer>"));
    }

    #[test]
    fn src_attribute_quoting_variants() {
        assert_eq!(src_of(r#" src='a.js'"#), Some("a.js".into()));
        assert_eq!(src_of(" defer src=b.js"), Some("b.js".into()));
        assert_eq!(src_of(r#" data-src="x.js""#), None);
        assert_eq!(src_of(""), None);
    }

    #[test]
    fn escapes_markup_characters() {
        assert_eq!(escape_html("<a href=\"x\">&'"), "&lt;a href=&quot;x&quot;&gt;&amp;&#39;");
    }
}
