//! Post records and the pure operations the feed is assembled from.
//!
//! Every function here is total and synchronous: the source hands over an
//! already date-descending sequence, and filtering, recency selection, and
//! category lookups never reorder it.

use std::collections::BTreeSet;

use time::{Date, format_description::FormatItem, macros::format_description};

pub const HUMAN_DATE_FORMAT: &[FormatItem<'static>] =
    format_description!("[month repr:long] [day padding:none], [year]");
pub const ISO_DATE_FORMAT: &[FormatItem<'static>] =
    format_description!("[year]-[month]-[day]");

#[derive(Debug, Clone, PartialEq)]
pub struct Post {
    pub id: String,
    pub slug: String,
    pub title: String,
    pub summary: String,
    pub date: Date,
    pub categories: Vec<String>,
}

impl Post {
    pub fn has_category(&self, name: &str) -> bool {
        self.categories.iter().any(|category| category == name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostFilter<'a> {
    All,
    Category(&'a str),
}

impl<'a> PostFilter<'a> {
    pub fn category(&self) -> Option<&'a str> {
        match self {
            PostFilter::All => None,
            PostFilter::Category(name) => Some(name),
        }
    }
}

/// Collect the posts visible under the given filter.
///
/// The source order is authoritative: `All` returns the sequence untouched,
/// and a category filter keeps the matching subsequence in place. A category
/// no post carries yields an empty list, not an error.
pub fn collect<'a>(posts: &'a [Post], filter: PostFilter<'_>) -> Vec<&'a Post> {
    let mut visible: Vec<&Post> = posts.iter().collect();

    match filter {
        PostFilter::All => {}
        PostFilter::Category(name) => visible.retain(|post| post.has_category(name)),
    }

    visible
}

/// The first `limit` posts of the date-descending sequence. Never re-sorts.
pub fn recent(posts: &[Post], limit: usize) -> &[Post] {
    &posts[..limit.min(posts.len())]
}

pub fn known_categories(posts: &[Post]) -> BTreeSet<&str> {
    posts
        .iter()
        .flat_map(|post| post.categories.iter().map(String::as_str))
        .collect()
}

pub fn is_known_category(posts: &[Post], value: &str) -> bool {
    posts.iter().any(|post| post.has_category(value))
}

pub fn format_human_date(date: Date) -> String {
    date.format(HUMAN_DATE_FORMAT).expect("valid calendar date")
}

pub fn format_iso_date(date: Date) -> String {
    date.format(ISO_DATE_FORMAT).expect("valid calendar date")
}
