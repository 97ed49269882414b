//! TOML content archives: the post record source this crate feeds on.
//!
//! An archive materializes the output of whatever authored the content (a
//! Markdown exporter, a CMS dump, a hand-written file). Its entries arrive
//! loosely typed; loading maps each one to a typed [`Post`] at the boundary,
//! normalizing what it can and rejecting what it cannot. Downstream code
//! never sees a malformed record.

use std::{fs, path::Path};

use serde::{Deserialize, Serialize};
use time::Date;
use tracing::warn;
use url::Url;

use crate::application::repos::{ContentRepo, RepoError};
use crate::domain::categories::CategoryCount;
use crate::domain::posts::{ISO_DATE_FORMAT, Post};
use crate::domain::site::{PageMeta, ProfileLink, SiteProfile};
use crate::domain::slug::generate_unique_slug;
use crate::infra::error::InfraError;

/// Counters describing what ingestion did to the raw entries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct IngestReport {
    pub accepted: usize,
    pub normalized: usize,
    pub rejected: usize,
    pub distinct_categories: usize,
}

/// An in-memory content source backed by a loaded archive.
#[derive(Debug)]
pub struct ArchiveRepo {
    posts: Vec<Post>,
    category_counts: Vec<CategoryCount>,
    profile: SiteProfile,
    report: IngestReport,
}

impl ArchiveRepo {
    pub fn load(path: &Path) -> Result<Self, InfraError> {
        let data = fs::read_to_string(path)?;
        Self::from_toml(&data)
    }

    pub fn from_toml(data: &str) -> Result<Self, InfraError> {
        let raw: RawArchive =
            toml::from_str(data).map_err(|err| InfraError::archive(err.to_string()))?;

        let profile = build_profile(raw.profile)?;
        let (posts, mut report) = ingest_posts(raw.posts);
        let category_counts = compute_category_counts(&posts);
        report.distinct_categories = category_counts.len();

        Ok(Self {
            posts,
            category_counts,
            profile,
            report,
        })
    }

    pub fn report(&self) -> &IngestReport {
        &self.report
    }
}

impl ContentRepo for ArchiveRepo {
    fn posts(&self) -> Result<&[Post], RepoError> {
        Ok(&self.posts)
    }

    fn category_counts(&self) -> Result<&[CategoryCount], RepoError> {
        Ok(&self.category_counts)
    }

    fn profile(&self) -> Result<&SiteProfile, RepoError> {
        Ok(&self.profile)
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawArchive {
    profile: RawProfile,
    posts: Vec<RawPost>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawProfile {
    brand_title: Option<String>,
    brand_href: Option<String>,
    links: Vec<RawProfileLink>,
    meta_title: Option<String>,
    meta_description: Option<String>,
    public_url: Option<String>,
    image: Option<String>,
    twitter_handle: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawProfileLink {
    label: Option<String>,
    href: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawPost {
    id: Option<String>,
    slug: Option<String>,
    title: Option<String>,
    date: Option<String>,
    summary: Option<String>,
    #[serde(alias = "category")]
    categories: Vec<String>,
}

fn ingest_posts(raw_posts: Vec<RawPost>) -> (Vec<Post>, IngestReport) {
    let mut posts = Vec::with_capacity(raw_posts.len());
    let mut report = IngestReport::default();
    let mut taken_slugs: Vec<String> = Vec::new();

    for (index, raw) in raw_posts.into_iter().enumerate() {
        match ingest_post(raw, index, &mut taken_slugs, &mut report) {
            Some(post) => posts.push(post),
            None => report.rejected += 1,
        }
    }

    // The source contract hands consumers a date-descending sequence; the
    // sort is stable so same-day posts keep their archive order.
    posts.sort_by(|left, right| right.date.cmp(&left.date));

    (posts, report)
}

fn ingest_post(
    raw: RawPost,
    index: usize,
    taken_slugs: &mut Vec<String>,
    report: &mut IngestReport,
) -> Option<Post> {
    let mut normalized = false;

    let Some(title) = raw
        .title
        .as_deref()
        .map(str::trim)
        .filter(|title| !title.is_empty())
    else {
        warn!(index, "dropping post entry without a title");
        return None;
    };

    let Some(date_text) = raw
        .date
        .as_deref()
        .map(str::trim)
        .filter(|date| !date.is_empty())
    else {
        warn!(index, title, "dropping post entry without a date");
        return None;
    };

    let date = match Date::parse(date_text, ISO_DATE_FORMAT) {
        Ok(date) => date,
        Err(err) => {
            warn!(index, title, date = date_text, %err, "dropping post entry with unparseable date");
            return None;
        }
    };

    let provided_slug = raw
        .slug
        .as_deref()
        .map(str::trim)
        .filter(|slug| !slug.is_empty());
    let slug_input = provided_slug.unwrap_or(title);
    let slug = match generate_unique_slug(slug_input, |candidate| {
        !taken_slugs.iter().any(|taken| taken == candidate)
    }) {
        Ok(slug) => slug,
        Err(err) => {
            warn!(index, title, %err, "dropping post entry without a usable slug");
            return None;
        }
    };
    if provided_slug != Some(slug.as_str()) {
        normalized = true;
    }
    taken_slugs.push(slug.clone());

    let summary = match raw.summary {
        Some(summary) => summary,
        None => {
            warn!(%slug, "post entry has no summary");
            normalized = true;
            String::new()
        }
    };

    let categories = normalize_categories(raw.categories, &mut normalized);
    if categories.is_empty() {
        // Kept on purpose: an uncategorized post still belongs to the
        // unfiltered feed, it just never matches a category filter.
        warn!(%slug, "post entry has no categories");
    }

    let id = raw
        .id
        .as_deref()
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(ToString::to_string)
        .unwrap_or_else(|| slug.clone());

    if normalized {
        report.normalized += 1;
    }
    report.accepted += 1;

    Some(Post {
        id,
        slug,
        title: title.to_string(),
        summary,
        date,
        categories,
    })
}

fn normalize_categories(raw: Vec<String>, normalized: &mut bool) -> Vec<String> {
    let mut categories: Vec<String> = Vec::with_capacity(raw.len());

    for value in &raw {
        let trimmed = value.trim();
        if trimmed.is_empty() || categories.iter().any(|existing| existing == trimmed) {
            *normalized = true;
            continue;
        }
        if trimmed != value {
            *normalized = true;
        }
        categories.push(trimmed.to_string());
    }

    categories
}

/// Per-category totals in first-appearance order over the date-descending
/// sequence. First appearance fixes the tie order the aggregator preserves.
fn compute_category_counts(posts: &[Post]) -> Vec<CategoryCount> {
    let mut counts: Vec<CategoryCount> = Vec::new();

    for post in posts {
        for name in &post.categories {
            match counts.iter_mut().find(|entry| entry.name == *name) {
                Some(entry) => entry.count += 1,
                None => counts.push(CategoryCount {
                    name: name.clone(),
                    count: 1,
                }),
            }
        }
    }

    counts
}

fn build_profile(raw: RawProfile) -> Result<SiteProfile, InfraError> {
    let public_url = raw.public_url.unwrap_or_default();
    if !public_url.is_empty() {
        Url::parse(&public_url).map_err(|err| {
            InfraError::archive(format!("profile.public_url is not an absolute URL: {err}"))
        })?;
    }

    let brand_title = raw.brand_title.unwrap_or_default();
    let meta_title = raw.meta_title.unwrap_or_else(|| brand_title.clone());

    let mut links = Vec::with_capacity(raw.links.len());
    for (index, link) in raw.links.into_iter().enumerate() {
        match (link.label, link.href) {
            (Some(label), Some(href)) if !label.trim().is_empty() && !href.trim().is_empty() => {
                links.push(ProfileLink {
                    label: label.trim().to_string(),
                    href: href.trim().to_string(),
                });
            }
            _ => warn!(index, "dropping profile link without label or href"),
        }
    }

    Ok(SiteProfile {
        brand_href: raw.brand_href.unwrap_or_else(|| "/".to_string()),
        links,
        meta: PageMeta {
            site_name: meta_title.clone(),
            title: meta_title,
            description: raw.meta_description.unwrap_or_default(),
            url: public_url,
            image: raw.image.unwrap_or_default(),
            twitter_handle: raw.twitter_handle,
        },
        brand_title,
    })
}
