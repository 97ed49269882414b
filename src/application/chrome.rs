//! Site chrome assembly: the profile header and page metadata passthrough.

use std::sync::Arc;

use crate::application::repos::{ContentRepo, RepoError};
use crate::domain::site::{PageMeta, ProfileLink};
use crate::presentation::views::{
    BrandView, MetaTagView, PageMetaView, ProfileLinkView, SiteChrome,
};

#[derive(Clone)]
pub struct ChromeService {
    source: Arc<dyn ContentRepo>,
}

impl ChromeService {
    pub fn new(source: Arc<dyn ContentRepo>) -> Self {
        Self { source }
    }

    pub fn load(&self) -> Result<SiteChrome, RepoError> {
        let profile = self.source.profile()?;

        let links = profile.links.iter().map(map_profile_link).collect();

        Ok(SiteChrome {
            brand: BrandView {
                title: profile.brand_title.clone(),
                href: profile.brand_href.clone(),
            },
            links,
            meta: build_page_meta_view(&profile.meta),
        })
    }
}

fn map_profile_link(link: &ProfileLink) -> ProfileLinkView {
    let mut view = ProfileLinkView {
        label: link.label.clone(),
        href: link.href.clone(),
        target: None,
        rel: None,
    };

    if link.href.starts_with("http://") || link.href.starts_with("https://") {
        view.target = Some("_blank".to_string());
        view.rel = Some("noopener noreferrer".to_string());
    }

    view
}

fn build_page_meta_view(meta: &PageMeta) -> PageMetaView {
    PageMetaView {
        title: meta.title.clone(),
        description: meta.description.clone(),
        url: meta.url.clone(),
        image: meta.image.clone(),
        site_name: meta.site_name.clone(),
        tags: build_meta_tags(meta),
    }
}

/// The ordered head-tag list: plain `name` tags first, then Open Graph and
/// Twitter `property`/`name` pairs. Values pass through unmodified.
fn build_meta_tags(meta: &PageMeta) -> Vec<MetaTagView> {
    let mut tags = vec![
        named("description", &meta.description),
        property("og:type", "website"),
        property("og:title", &meta.title),
        property("og:description", &meta.description),
        property("og:image", &meta.image),
        property("og:url", &meta.url),
        property("og:site_name", &meta.site_name),
        named("twitter:card", "summary"),
        named("twitter:title", &meta.title),
        named("twitter:description", &meta.description),
        named("twitter:image", &meta.image),
    ];

    if let Some(handle) = meta.twitter_handle.as_deref() {
        tags.push(named("twitter:site", handle));
        tags.push(named("twitter:creator", handle));
    }

    tags
}

fn named(key: &str, content: &str) -> MetaTagView {
    MetaTagView {
        attribute: "name",
        key: key.to_string(),
        content: content.to_string(),
    }
}

fn property(key: &str, content: &str) -> MetaTagView {
    MetaTagView {
        attribute: "property",
        key: key.to_string(),
        content: content.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::domain::categories::CategoryCount;
    use crate::domain::posts::Post;
    use crate::domain::site::SiteProfile;

    struct ProfileOnly {
        profile: SiteProfile,
    }

    impl ContentRepo for ProfileOnly {
        fn posts(&self) -> Result<&[Post], RepoError> {
            Ok(&[])
        }

        fn category_counts(&self) -> Result<&[CategoryCount], RepoError> {
            Ok(&[])
        }

        fn profile(&self) -> Result<&SiteProfile, RepoError> {
            Ok(&self.profile)
        }
    }

    fn sample_profile() -> SiteProfile {
        SiteProfile {
            brand_title: "0jo's dev blog".to_string(),
            brand_href: "/".to_string(),
            links: vec![
                ProfileLink {
                    label: "GitHub".to_string(),
                    href: "https://github.com/0jo-gil".to_string(),
                },
                ProfileLink {
                    label: "Email".to_string(),
                    href: "mailto:0joofficial@gmail.com".to_string(),
                },
            ],
            meta: PageMeta {
                title: "Home".to_string(),
                description: "notes on systems and tooling".to_string(),
                url: "https://blog.example.dev/".to_string(),
                image: "https://blog.example.dev/cover.png".to_string(),
                site_name: "0jo's dev blog".to_string(),
                twitter_handle: Some("@seungjun".to_string()),
            },
        }
    }

    #[test]
    fn external_links_open_in_a_new_tab() {
        let service = ChromeService::new(Arc::new(ProfileOnly {
            profile: sample_profile(),
        }));
        let chrome = service.load().expect("chrome");

        let github = &chrome.links[0];
        assert_eq!(github.target.as_deref(), Some("_blank"));
        assert_eq!(github.rel.as_deref(), Some("noopener noreferrer"));

        let email = &chrome.links[1];
        assert!(email.target.is_none());
        assert!(email.rel.is_none());
    }

    #[test]
    fn meta_tags_pass_values_through_unmodified() {
        let service = ChromeService::new(Arc::new(ProfileOnly {
            profile: sample_profile(),
        }));
        let chrome = service.load().expect("chrome");

        let og_title = chrome
            .meta
            .tags
            .iter()
            .find(|tag| tag.key == "og:title")
            .expect("og:title tag");
        assert_eq!(og_title.attribute, "property");
        assert_eq!(og_title.content, "Home");

        let twitter_site = chrome
            .meta
            .tags
            .iter()
            .find(|tag| tag.key == "twitter:site")
            .expect("twitter:site tag");
        assert_eq!(twitter_site.attribute, "name");
        assert_eq!(twitter_site.content, "@seungjun");
    }

    #[test]
    fn twitter_handle_tags_are_optional() {
        let mut profile = sample_profile();
        profile.meta.twitter_handle = None;

        let service = ChromeService::new(Arc::new(ProfileOnly { profile }));
        let chrome = service.load().expect("chrome");

        assert!(!chrome.meta.tags.iter().any(|tag| tag.key == "twitter:site"));
    }
}
