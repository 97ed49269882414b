//! Foglio: the content core of a personal developer blog.
//!
//! A [`ContentRepo`](application::repos::ContentRepo) supplies typed post
//! records and category counts (the bundled adapter ingests a TOML content
//! archive); the application services assemble what a static frontend
//! renders: the category filter bar, the filtered post list, the
//! recent-posts strip, the profile header, and SEO metadata tags.

pub mod application;
pub mod config;
pub mod domain;
pub mod infra;
pub mod presentation;
