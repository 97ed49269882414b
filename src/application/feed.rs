//! Feed assembly: filtered post cards, the category filter bar, and the
//! recent-posts strip.

use std::sync::Arc;

use serde_json::json;
use thiserror::Error;

use crate::application::repos::{ContentRepo, RepoError};
use crate::config::FeedSettings;
use crate::domain::categories::{self, ALL_CATEGORY, CategoryCount};
use crate::domain::posts::{self, Post, PostFilter};
use crate::domain::selection::CategorySelection;
use crate::presentation::views::{CategorySummary, FeedView, PostCard};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedFilter {
    All,
    Category(String),
}

impl FeedFilter {
    pub fn from_selection(selection: &CategorySelection) -> Self {
        if selection.is_all() {
            FeedFilter::All
        } else {
            FeedFilter::Category(selection.selected().to_string())
        }
    }

    pub fn category(&self) -> Option<&str> {
        match self {
            FeedFilter::All => None,
            FeedFilter::Category(name) => Some(name.as_str()),
        }
    }

    pub fn base_path(&self) -> String {
        match self {
            FeedFilter::All => "/".to_string(),
            FeedFilter::Category(name) => format!("/categories/{name}"),
        }
    }

    fn as_post_filter(&self) -> PostFilter<'_> {
        match self {
            FeedFilter::All => PostFilter::All,
            FeedFilter::Category(name) => PostFilter::Category(name.as_str()),
        }
    }
}

#[derive(Debug, Error)]
pub enum FeedError {
    #[error(transparent)]
    Repo(#[from] RepoError),
}

#[derive(Clone)]
pub struct FeedService {
    source: Arc<dyn ContentRepo>,
    settings: FeedSettings,
}

impl FeedService {
    pub fn new(source: Arc<dyn ContentRepo>, settings: FeedSettings) -> Self {
        Self { source, settings }
    }

    /// Assemble the home feed for the given filter.
    pub fn home_view(&self, filter: &FeedFilter) -> Result<FeedView, FeedError> {
        let posts = self.source.posts()?;
        let counts = self.source.category_counts()?;
        let profile = self.source.profile()?;

        let visible = posts::collect(posts, filter.as_post_filter());
        let total_count = posts.len();

        let cards: Vec<PostCard> = visible
            .iter()
            .take(home_page_limit(&self.settings))
            .map(|post| post_to_card(post))
            .collect();

        let recent = posts::recent(posts, self.settings.recent_limit as usize)
            .iter()
            .map(post_to_card)
            .collect();

        let categories = if self.settings.show_category_filters {
            build_category_summaries(counts, filter.category(), total_count)
        } else {
            Vec::new()
        };

        let posts_ld_json =
            build_posts_ld_json(&cards, filter, &profile.meta.url, &profile.meta.title);

        let post_count = cards.len();
        Ok(FeedView {
            posts: cards,
            post_count,
            total_count,
            has_results: post_count > 0,
            categories,
            recent,
            show_category_filters: self.settings.show_category_filters,
            posts_ld_json,
        })
    }

    /// The category filter bar on its own, with no active selection.
    pub fn category_summaries(&self) -> Result<Vec<CategorySummary>, FeedError> {
        let posts = self.source.posts()?;
        let counts = self.source.category_counts()?;
        Ok(build_category_summaries(counts, None, posts.len()))
    }
}

fn post_to_card(post: &Post) -> PostCard {
    PostCard {
        slug: post.slug.clone(),
        title: post.title.clone(),
        summary: post.summary.clone(),
        iso_date: posts::format_iso_date(post.date),
        published: posts::format_human_date(post.date),
        categories: post.categories.clone(),
    }
}

fn build_category_summaries(
    counts: &[CategoryCount],
    active: Option<&str>,
    total_posts: usize,
) -> Vec<CategorySummary> {
    let mut summaries = Vec::with_capacity(counts.len() + 1);
    summaries.push(CategorySummary {
        label: ALL_CATEGORY.to_string(),
        path: "/".to_string(),
        count: total_posts,
        is_active: active.is_none(),
    });

    for entry in categories::order_by_count(counts) {
        summaries.push(CategorySummary {
            label: entry.name.clone(),
            path: format!("/categories/{}", entry.name),
            count: usize::try_from(entry.count).unwrap_or(usize::MAX),
            is_active: active.map(|name| name == entry.name).unwrap_or(false),
        });
    }

    summaries
}

fn build_posts_ld_json(
    cards: &[PostCard],
    filter: &FeedFilter,
    public_site_url: &str,
    blog_name: &str,
) -> Option<String> {
    if cards.is_empty() {
        return None;
    }

    let site_url = normalize_public_site_url(public_site_url);
    let blog_url = format!("{site_url}{}", filter.base_path().trim_start_matches('/'));

    let blog_posts = cards
        .iter()
        .map(|card| {
            json!({
                "@type": "BlogPosting",
                "headline": card.title,
                "description": card.summary,
                "datePublished": card.iso_date,
                "url": format!("{site_url}posts/{}", card.slug),
            })
        })
        .collect::<Vec<_>>();

    serde_json::to_string(&json!({
        "@context": "https://schema.org",
        "@type": "Blog",
        "name": blog_name,
        "url": blog_url,
        "blogPost": blog_posts,
    }))
    .ok()
}

fn normalize_public_site_url(url: &str) -> String {
    let trimmed = url.trim_end_matches('/');
    format!("{trimmed}/")
}

fn home_page_limit(settings: &FeedSettings) -> usize {
    settings.home_limit.clamp(1, 48) as usize
}
