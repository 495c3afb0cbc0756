//! Origin Resource Catalogue
//!
//! Maps the origin API's resources to URLs and cache keys, and exposes one
//! fetch per resource on top of [`ReadThrough`].

use serde::Serialize;
use tracing::warn;

use super::read_through::{FetchResult, ReadThrough};
use crate::error::OriginError;
use crate::store::KvStore;

// == Resource ==
/// A resource exposed by the origin API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    Posts,
    Post(u64),
    Users,
    User(u64),
}

impl Resource {
    /// Store key for the resource. Distinct resources never share a key.
    pub fn cache_key(&self) -> String {
        match self {
            Resource::Posts => "posts".to_string(),
            Resource::Post(id) => format!("post:{}", id),
            Resource::Users => "users".to_string(),
            Resource::User(id) => format!("user:{}", id),
        }
    }

    /// Path of the resource on the origin.
    pub fn path(&self) -> String {
        match self {
            Resource::Posts => "/posts".to_string(),
            Resource::Post(id) => format!("/posts/{}", id),
            Resource::Users => "/users".to_string(),
            Resource::User(id) => format!("/users/{}", id),
        }
    }
}

// == Post Detail ==
/// A post together with its author, as shown on the post page.
#[derive(Debug, Clone, Serialize)]
pub struct PostDetail {
    pub post: FetchResult,
    /// `None` when the post carries no usable `userId`
    pub author: Option<FetchResult>,
}

// == Origin API ==
/// Cached access to the origin API's posts and users.
#[derive(Debug, Clone)]
pub struct OriginApi {
    fetcher: ReadThrough,
    base_url: String,
    ttl: u64,
}

impl OriginApi {
    pub fn new(fetcher: ReadThrough, base_url: impl Into<String>, ttl: u64) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            fetcher,
            base_url,
            ttl,
        }
    }

    pub fn store(&self) -> &KvStore {
        self.fetcher.store()
    }

    pub fn url_for(&self, resource: Resource) -> String {
        format!("{}{}", self.base_url, resource.path())
    }

    /// Read-through fetch of any catalogue resource.
    pub async fn fetch(
        &self,
        resource: Resource,
        skip_cache: bool,
    ) -> Result<FetchResult, OriginError> {
        self.fetcher
            .fetch_with_cache(
                &self.url_for(resource),
                &resource.cache_key(),
                self.ttl,
                skip_cache,
            )
            .await
    }

    pub async fn fetch_posts(&self, skip_cache: bool) -> Result<FetchResult, OriginError> {
        self.fetch(Resource::Posts, skip_cache).await
    }

    pub async fn fetch_post(&self, id: u64, skip_cache: bool) -> Result<FetchResult, OriginError> {
        self.fetch(Resource::Post(id), skip_cache).await
    }

    pub async fn fetch_users(&self, skip_cache: bool) -> Result<FetchResult, OriginError> {
        self.fetch(Resource::Users, skip_cache).await
    }

    pub async fn fetch_user(&self, id: u64, skip_cache: bool) -> Result<FetchResult, OriginError> {
        self.fetch(Resource::User(id), skip_cache).await
    }

    /// Fetches post `id`, then its author through the post's `userId`.
    pub async fn fetch_post_detail(
        &self,
        id: u64,
        skip_cache: bool,
    ) -> Result<PostDetail, OriginError> {
        let post = self.fetch_post(id, skip_cache).await?;

        let author = match post.data.get("userId").and_then(|v| v.as_u64()) {
            Some(user_id) => Some(self.fetch_user(user_id, skip_cache).await?),
            None => {
                warn!(post_id = id, "post has no usable userId");
                None
            }
        };

        Ok(PostDetail { post, author })
    }
}
