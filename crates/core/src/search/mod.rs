//! Search state over the posts port
//!
//! Query text, a post type tab and an optional category filter drive the
//! result list. Switching tabs resets the category and results; clearing the
//! category empties the results rather than falling back to a broad search.

use std::sync::Arc;

use tracing::debug;

use positivevoice_domain::{Post, PostCategory, PostType, Result};

use crate::posts::ports::{PostQuery, PostsApi};

/// Read-only view of the current search state
#[derive(Debug, Clone)]
pub struct SearchSnapshot {
    pub query: String,
    pub post_type: PostType,
    pub category: Option<PostCategory>,
    pub results: Vec<Post>,
}

/// Stateful search over posts
pub struct SearchService {
    api: Arc<dyn PostsApi>,
    query: String,
    post_type: PostType,
    category: Option<PostCategory>,
    results: Vec<Post>,
}

impl SearchService {
    #[must_use]
    pub fn new(api: Arc<dyn PostsApi>) -> Self {
        Self {
            api,
            query: String::new(),
            post_type: PostType::GoodThing,
            category: None,
            results: Vec::new(),
        }
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    /// Switch the post-type tab, dropping the category filter and results
    pub fn select_post_type(&mut self, post_type: PostType) {
        self.post_type = post_type;
        self.category = None;
        self.results.clear();
    }

    /// Apply a category filter and search immediately
    pub async fn select_category(&mut self, category: PostCategory) -> Result<()> {
        self.category = Some(category);
        self.search().await
    }

    /// Drop the category filter and empty the results
    pub fn clear_category(&mut self) {
        self.category = None;
        self.results.clear();
    }

    /// Run the search with the current query/type/category.
    ///
    /// A blank query with no category filter short-circuits to empty results
    /// without touching the network.
    pub async fn search(&mut self) -> Result<()> {
        if self.query.trim().is_empty() && self.category.is_none() {
            self.results.clear();
            return Ok(());
        }

        let results = self
            .api
            .search_posts(PostQuery {
                query: self.query.trim().to_string(),
                post_type: Some(self.post_type),
                category: self.category,
            })
            .await?;
        debug!(count = results.len(), "search completed");
        self.results = results;
        Ok(())
    }

    #[must_use]
    pub fn snapshot(&self) -> SearchSnapshot {
        SearchSnapshot {
            query: self.query.clone(),
            post_type: self.post_type,
            category: self.category,
            results: self.results.clone(),
        }
    }
}
