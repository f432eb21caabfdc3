use crate::domain::{GroupIdentity, ScopeTarget, WIKI_USER_SPACE};
use anyhow::{Context, Result, ensure};
use reqwest::Url;

const PREFERENCES_PAGE: &str = "WebPreferences";

/// Builds wiki REST resource URLs.
///
/// Every variable segment is pushed through `Url::path_segments_mut`, which
/// percent-encodes it, so names containing spaces or slashes stay one segment.
#[derive(Debug, Clone)]
pub struct WikiPaths {
    base: Url,
    wiki_name: String,
}

impl WikiPaths {
    pub fn new(base_url: &str, wiki_name: &str) -> Result<Self> {
        let base = Url::parse(base_url)
            .with_context(|| format!("Invalid wiki base URL: {}", base_url))?;
        ensure!(
            !base.cannot_be_a_base(),
            "Wiki base URL cannot carry a path: {}",
            base_url
        );
        ensure!(!wiki_name.is_empty(), "Wiki name must not be empty");

        Ok(Self {
            base,
            wiki_name: wiki_name.to_string(),
        })
    }

    /// `.../spaces/XWiki/pages/{document}`
    pub fn document_page(&self, document: &str) -> Url {
        self.build(["spaces", WIKI_USER_SPACE, "pages", document])
    }

    /// `.../spaces/XWiki/pages/{group}`
    pub fn group_page(&self, group: &GroupIdentity) -> Url {
        self.document_page(group.as_str())
    }

    /// `.../spaces/XWiki/pages/{group}/objects`
    pub fn group_objects(&self, group: &GroupIdentity) -> Url {
        self.build(["spaces", WIKI_USER_SPACE, "pages", group.as_str(), "objects"])
    }

    /// `.../spaces/O-{org}[/spaces/P-{project}]/pages/WebPreferences/objects`
    pub fn space_rights_objects(&self, target: &ScopeTarget) -> Url {
        let space_segments = target.space_segments();
        let mut segments: Vec<&str> = Vec::with_capacity(space_segments.len() * 2 + 3);
        for space in &space_segments {
            segments.push("spaces");
            segments.push(space);
        }
        segments.extend(["pages", PREFERENCES_PAGE, "objects"]);
        self.build(segments)
    }

    fn build<'a, I>(&self, segments: I) -> Url
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut url = self.base.clone();
        // cannot_be_a_base was rejected in new()
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty()
                .extend(["rest", "wikis", self.wiki_name.as_str()])
                .extend(segments);
        }
        url
    }
}
