//! Serializable view contracts handed to the external render layer.
//!
//! Nothing here renders: these are the shapes a frontend (or the CLI
//! inspector's JSON output) consumes.

use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct PostCard {
    pub slug: String,
    pub title: String,
    pub summary: String,
    pub iso_date: String,
    pub published: String,
    pub categories: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CategorySummary {
    pub label: String,
    pub path: String,
    pub count: usize,
    pub is_active: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct FeedView {
    pub posts: Vec<PostCard>,
    pub post_count: usize,
    pub total_count: usize,
    pub has_results: bool,
    pub categories: Vec<CategorySummary>,
    pub recent: Vec<PostCard>,
    pub show_category_filters: bool,
    pub posts_ld_json: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct BrandView {
    pub title: String,
    pub href: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProfileLinkView {
    pub label: String,
    pub href: String,
    pub target: Option<String>,
    pub rel: Option<String>,
}

/// A single `<meta>` tag: `attribute` is the HTML attribute carrying the
/// key (`name` or `property`), `content` the passthrough value.
#[derive(Debug, Clone, Serialize)]
pub struct MetaTagView {
    pub attribute: &'static str,
    pub key: String,
    pub content: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct PageMetaView {
    pub title: String,
    pub description: String,
    pub url: String,
    pub image: String,
    pub site_name: String,
    pub tags: Vec<MetaTagView>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SiteChrome {
    pub brand: BrandView,
    pub links: Vec<ProfileLinkView>,
    pub meta: PageMetaView,
}

/// The whole home document: chrome plus the assembled feed.
#[derive(Debug, Clone, Serialize)]
pub struct HomeView {
    pub chrome: SiteChrome,
    pub feed: FeedView,
}
