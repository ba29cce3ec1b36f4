//! Optimistic bookmark/follow services
//!
//! Both services share the same toggle shape: flip the local set first,
//! persist it to the edge cache, then perform the remote call; a remote
//! failure reverses the flip and rewrites the cache before the error is
//! re-raised. A toggle for an id that already has an operation in flight is
//! rejected with `VoiceError::Conflict` instead of racing the cache.

use std::collections::HashSet;
use std::sync::Arc;

use parking_lot::{Mutex, RwLock};
use tracing::{debug, warn};

use positivevoice_domain::constants::{BOOKMARKED_POST_IDS_KEY, FOLLOWING_USER_IDS_KEY};
use positivevoice_domain::{Post, Result, UserProfile, VoiceError};

use super::ports::{BookmarkApi, EdgeCache, FollowApi, ProfilesApi};

/// Local id set with cache persistence and per-id in-flight guard
struct EdgeSet {
    cache: Arc<dyn EdgeCache>,
    key: &'static str,
    ids: RwLock<HashSet<String>>,
    pending: Mutex<HashSet<String>>,
}

impl EdgeSet {
    fn new(cache: Arc<dyn EdgeCache>, key: &'static str) -> Self {
        let ids = match cache.load_ids(key) {
            Ok(ids) => ids.into_iter().collect(),
            Err(e) => {
                warn!(key = %key, error = %e, "edge cache load failed, starting empty");
                HashSet::new()
            }
        };
        Self { cache, key, ids: RwLock::new(ids), pending: Mutex::new(HashSet::new()) }
    }

    fn contains(&self, id: &str) -> bool {
        self.ids.read().contains(id)
    }

    /// Reserve the id and apply the optimistic flip.
    ///
    /// Returns the membership state before the flip.
    fn begin_toggle(&self, id: &str) -> Result<bool> {
        {
            let mut pending = self.pending.lock();
            if !pending.insert(id.to_string()) {
                return Err(VoiceError::Conflict(format!(
                    "toggle already in flight for {id}"
                )));
            }
        }

        let was_member = {
            let mut ids = self.ids.write();
            if !ids.remove(id) {
                ids.insert(id.to_string());
                false
            } else {
                true
            }
        };
        self.persist();
        Ok(was_member)
    }

    /// Release the in-flight reservation after a successful remote call
    fn finish_toggle(&self, id: &str) {
        self.pending.lock().remove(id);
    }

    /// Reverse the flip after a remote failure, then release the reservation
    fn rollback_toggle(&self, id: &str, was_member: bool) {
        {
            let mut ids = self.ids.write();
            if was_member {
                ids.insert(id.to_string());
            } else {
                ids.remove(id);
            }
        }
        self.persist();
        self.pending.lock().remove(id);
        debug!(key = %self.key, id = %id, "optimistic toggle rolled back");
    }

    fn replace(&self, ids: Vec<String>) {
        *self.ids.write() = ids.into_iter().collect();
        self.persist();
    }

    fn clear(&self) {
        self.ids.write().clear();
        if let Err(e) = self.cache.clear(self.key) {
            warn!(key = %self.key, error = %e, "edge cache clear failed");
        }
    }

    fn persist(&self) {
        let snapshot: Vec<String> = self.ids.read().iter().cloned().collect();
        if let Err(e) = self.cache.save_ids(self.key, &snapshot) {
            warn!(key = %self.key, error = %e, "edge cache write failed");
        }
    }
}

/// Bookmark membership with optimistic toggle
pub struct BookmarkService {
    api: Arc<dyn BookmarkApi>,
    edges: EdgeSet,
}

impl BookmarkService {
    /// Create the service, seeding local state from the edge cache
    #[must_use]
    pub fn new(api: Arc<dyn BookmarkApi>, cache: Arc<dyn EdgeCache>) -> Self {
        Self { api, edges: EdgeSet::new(cache, BOOKMARKED_POST_IDS_KEY) }
    }

    /// Pure local lookup, no network
    #[must_use]
    pub fn is_bookmarked(&self, post_id: &str) -> bool {
        self.edges.contains(post_id)
    }

    /// Toggle bookmark membership for a post.
    ///
    /// The remote call is issued even when the optimistic local state already
    /// matched the desired end state; idempotency is the backend's contract.
    pub async fn toggle(&self, post_id: &str) -> Result<()> {
        let was_bookmarked = self.edges.begin_toggle(post_id)?;

        let remote = if was_bookmarked {
            self.api.remove_bookmark(post_id).await
        } else {
            self.api.add_bookmark(post_id).await
        };

        match remote {
            Ok(()) => {
                self.edges.finish_toggle(post_id);
                Ok(())
            }
            Err(e) => {
                self.edges.rollback_toggle(post_id, was_bookmarked);
                Err(e)
            }
        }
    }

    /// Replace local state with server truth
    pub async fn sync_with_server(&self) -> Result<()> {
        let ids = self.api.list_bookmarked_ids().await?;
        self.edges.replace(ids);
        Ok(())
    }

    /// Bookmarked posts from the server
    pub async fn fetch_bookmarked_posts(&self) -> Result<Vec<Post>> {
        self.api.fetch_bookmarked_posts().await
    }

    /// Drop local state (sign-out)
    pub fn clear_cache(&self) {
        self.edges.clear();
    }
}

/// Follow membership with optimistic toggle
pub struct FollowService {
    api: Arc<dyn FollowApi>,
    profiles: Arc<dyn ProfilesApi>,
    edges: EdgeSet,
}

impl FollowService {
    /// Create the service, seeding local state from the edge cache
    #[must_use]
    pub fn new(
        api: Arc<dyn FollowApi>,
        profiles: Arc<dyn ProfilesApi>,
        cache: Arc<dyn EdgeCache>,
    ) -> Self {
        Self { api, profiles, edges: EdgeSet::new(cache, FOLLOWING_USER_IDS_KEY) }
    }

    /// Pure local lookup, no network
    #[must_use]
    pub fn is_following(&self, user_id: &str) -> bool {
        self.edges.contains(user_id)
    }

    /// Toggle the follow edge towards a user
    pub async fn toggle(&self, user_id: &str) -> Result<()> {
        let was_following = self.edges.begin_toggle(user_id)?;

        let remote = if was_following {
            self.api.unfollow(user_id).await
        } else {
            self.api.follow(user_id).await
        };

        match remote {
            Ok(()) => {
                self.edges.finish_toggle(user_id);
                Ok(())
            }
            Err(e) => {
                self.edges.rollback_toggle(user_id, was_following);
                Err(e)
            }
        }
    }

    /// Replace local state with server truth
    pub async fn sync_with_server(&self) -> Result<()> {
        let ids = self.api.list_following_ids().await?;
        self.edges.replace(ids);
        Ok(())
    }

    pub async fn fetch_followers(&self, user_id: &str) -> Result<Vec<UserProfile>> {
        self.profiles.fetch_followers(user_id).await
    }

    pub async fn fetch_following(&self, user_id: &str) -> Result<Vec<UserProfile>> {
        self.profiles.fetch_following(user_id).await
    }

    /// Fetch a profile, overriding `is_following` with local state so an
    /// optimistic flip is visible before the server catches up
    pub async fn fetch_user_profile(&self, user_id: &str) -> Result<UserProfile> {
        let mut profile = self.profiles.fetch_user_profile(user_id).await?;
        profile.is_following = self.is_following(user_id);
        Ok(profile)
    }

    /// Drop local state (sign-out)
    pub fn clear_cache(&self) {
        self.edges.clear();
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::time::Duration;

    use async_trait::async_trait;
    use chrono::Utc;

    use super::*;

    #[derive(Default)]
    struct MemoryEdgeCache {
        sets: Mutex<std::collections::HashMap<String, Vec<String>>>,
        fail_loads: AtomicBool,
    }

    impl EdgeCache for MemoryEdgeCache {
        fn load_ids(&self, key: &str) -> Result<Vec<String>> {
            if self.fail_loads.load(Ordering::SeqCst) {
                return Err(VoiceError::Internal("load disabled".into()));
            }
            Ok(self.sets.lock().get(key).cloned().unwrap_or_default())
        }

        fn save_ids(&self, key: &str, ids: &[String]) -> Result<()> {
            self.sets.lock().insert(key.to_string(), ids.to_vec());
            Ok(())
        }

        fn clear(&self, key: &str) -> Result<()> {
            self.sets.lock().remove(key);
            Ok(())
        }
    }

    #[derive(Default)]
    struct StubBookmarkApi {
        fail_next: AtomicBool,
        delay_ms: AtomicUsize,
        adds: AtomicUsize,
        removes: AtomicUsize,
    }

    #[async_trait]
    impl BookmarkApi for StubBookmarkApi {
        async fn list_bookmarked_ids(&self) -> Result<Vec<String>> {
            Ok(vec!["server-post".into()])
        }

        async fn fetch_bookmarked_posts(&self) -> Result<Vec<Post>> {
            Ok(vec![])
        }

        async fn add_bookmark(&self, _post_id: &str) -> Result<()> {
            self.adds.fetch_add(1, Ordering::SeqCst);
            self.finish().await
        }

        async fn remove_bookmark(&self, _post_id: &str) -> Result<()> {
            self.removes.fetch_add(1, Ordering::SeqCst);
            self.finish().await
        }
    }

    impl StubBookmarkApi {
        async fn finish(&self) -> Result<()> {
            let delay = self.delay_ms.load(Ordering::SeqCst);
            if delay > 0 {
                tokio::time::sleep(Duration::from_millis(delay as u64)).await;
            }
            if self.fail_next.swap(false, Ordering::SeqCst) {
                return Err(VoiceError::Network("connection reset".into()));
            }
            Ok(())
        }
    }

    fn bookmark_service() -> (Arc<BookmarkService>, Arc<StubBookmarkApi>, Arc<MemoryEdgeCache>) {
        let api = Arc::new(StubBookmarkApi::default());
        let cache = Arc::new(MemoryEdgeCache::default());
        let service = Arc::new(BookmarkService::new(api.clone(), cache.clone()));
        (service, api, cache)
    }

    #[tokio::test]
    async fn double_toggle_returns_to_original_state() {
        let (service, api, _cache) = bookmark_service();

        assert!(!service.is_bookmarked("post-1"));
        service.toggle("post-1").await.unwrap();
        assert!(service.is_bookmarked("post-1"));
        service.toggle("post-1").await.unwrap();
        assert!(!service.is_bookmarked("post-1"));

        assert_eq!(api.adds.load(Ordering::SeqCst), 1);
        assert_eq!(api.removes.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn failed_toggle_rolls_back_membership_and_cache() {
        let (service, api, cache) = bookmark_service();

        api.fail_next.store(true, Ordering::SeqCst);
        let result = service.toggle("post-1").await;

        assert!(matches!(result, Err(VoiceError::Network(_))));
        assert!(!service.is_bookmarked("post-1"));
        assert!(cache
            .sets
            .lock()
            .get(BOOKMARKED_POST_IDS_KEY)
            .map(|ids| ids.is_empty())
            .unwrap_or(true));
    }

    #[tokio::test]
    async fn failed_untoggle_restores_membership() {
        let (service, api, _cache) = bookmark_service();

        service.toggle("post-1").await.unwrap();
        api.fail_next.store(true, Ordering::SeqCst);
        assert!(service.toggle("post-1").await.is_err());
        assert!(service.is_bookmarked("post-1"), "rollback must restore membership");
    }

    #[tokio::test]
    async fn concurrent_toggle_on_same_id_is_rejected() {
        let (service, api, _cache) = bookmark_service();
        api.delay_ms.store(50, Ordering::SeqCst);

        let first = {
            let service = service.clone();
            tokio::spawn(async move { service.toggle("post-1").await })
        };
        tokio::time::sleep(Duration::from_millis(10)).await;
        let second = service.toggle("post-1").await;

        assert!(matches!(second, Err(VoiceError::Conflict(_))));
        first.await.unwrap().unwrap();
        assert!(service.is_bookmarked("post-1"));
        assert_eq!(api.adds.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn concurrent_toggles_on_different_ids_proceed() {
        let (service, api, _cache) = bookmark_service();
        api.delay_ms.store(20, Ordering::SeqCst);

        let first = {
            let service = service.clone();
            tokio::spawn(async move { service.toggle("post-1").await })
        };
        tokio::time::sleep(Duration::from_millis(5)).await;
        service.toggle("post-2").await.unwrap();
        first.await.unwrap().unwrap();

        assert!(service.is_bookmarked("post-1"));
        assert!(service.is_bookmarked("post-2"));
    }

    #[tokio::test]
    async fn sync_with_server_replaces_local_state() {
        let (service, _api, cache) = bookmark_service();

        service.toggle("local-post").await.unwrap();
        service.sync_with_server().await.unwrap();

        assert!(service.is_bookmarked("server-post"));
        assert!(!service.is_bookmarked("local-post"));
        assert_eq!(
            cache.sets.lock().get(BOOKMARKED_POST_IDS_KEY),
            Some(&vec!["server-post".to_string()])
        );
    }

    #[tokio::test]
    async fn new_service_seeds_from_cache() {
        let cache = Arc::new(MemoryEdgeCache::default());
        cache.save_ids(BOOKMARKED_POST_IDS_KEY, &["post-9".to_string()]).unwrap();

        let service = BookmarkService::new(Arc::new(StubBookmarkApi::default()), cache);
        assert!(service.is_bookmarked("post-9"));
    }

    #[tokio::test]
    async fn cache_load_failure_starts_empty() {
        let cache = Arc::new(MemoryEdgeCache::default());
        cache.fail_loads.store(true, Ordering::SeqCst);

        let service = BookmarkService::new(Arc::new(StubBookmarkApi::default()), cache);
        assert!(!service.is_bookmarked("anything"));
    }

    #[derive(Default)]
    struct StubFollowApi {
        fail_next: AtomicBool,
    }

    #[async_trait]
    impl FollowApi for StubFollowApi {
        async fn list_following_ids(&self) -> Result<Vec<String>> {
            Ok(vec![])
        }

        async fn follow(&self, _user_id: &str) -> Result<()> {
            if self.fail_next.swap(false, Ordering::SeqCst) {
                return Err(VoiceError::Network("connection reset".into()));
            }
            Ok(())
        }

        async fn unfollow(&self, _user_id: &str) -> Result<()> {
            Ok(())
        }
    }

    struct StubProfilesApi;

    #[async_trait]
    impl ProfilesApi for StubProfilesApi {
        async fn fetch_followers(&self, _user_id: &str) -> Result<Vec<UserProfile>> {
            Ok(vec![])
        }

        async fn fetch_following(&self, _user_id: &str) -> Result<Vec<UserProfile>> {
            Ok(vec![])
        }

        async fn fetch_user_profile(&self, user_id: &str) -> Result<UserProfile> {
            Ok(UserProfile {
                id: user_id.to_string(),
                nickname: "ユーザーB".into(),
                bio: None,
                avatar_url: None,
                post_count: 4,
                follower_count: 10,
                following_count: 3,
                is_following: false,
                created_at: Utc::now(),
            })
        }
    }

    fn follow_service() -> (FollowService, Arc<StubFollowApi>) {
        let api = Arc::new(StubFollowApi::default());
        let service = FollowService::new(
            api.clone(),
            Arc::new(StubProfilesApi),
            Arc::new(MemoryEdgeCache::default()),
        );
        (service, api)
    }

    #[tokio::test]
    async fn follow_toggle_rolls_back_on_failure() {
        let (service, api) = follow_service();

        api.fail_next.store(true, Ordering::SeqCst);
        assert!(service.toggle("user-2").await.is_err());
        assert!(!service.is_following("user-2"));
    }

    #[tokio::test]
    async fn profile_reflects_local_follow_state() {
        let (service, _api) = follow_service();

        service.toggle("user-2").await.unwrap();
        let profile = service.fetch_user_profile("user-2").await.unwrap();
        assert!(profile.is_following, "local optimistic state wins over server view");
    }

    #[tokio::test]
    async fn clear_cache_forgets_membership() {
        let (service, _api) = follow_service();

        service.toggle("user-2").await.unwrap();
        service.clear_cache();
        assert!(!service.is_following("user-2"));
    }
}
