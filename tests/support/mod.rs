#![allow(dead_code)]

use std::sync::{
    Arc,
    atomic::{AtomicBool, AtomicUsize, Ordering},
};

use async_trait::async_trait;
use axum::{Router, body::Body, http::HeaderName};
use http_body_util::BodyExt;
use time::OffsetDateTime;
use tokio::sync::Mutex;

use quillpost::application::admin::posts::AdminPostService;
use quillpost::application::posts::PostReadService;
use quillpost::application::render::MarkdownRenderer;
use quillpost::application::repos::{
    CreatePostParams, DatabaseHealth, PostsRepo, PostsWriteRepo, RepoError, UpdatePostParams,
};
use quillpost::domain::entities::{Post, PostSummary};
use quillpost::infra::auth::HeaderAdminGate;
use quillpost::infra::http::{self, AdminState, HttpState, RouterState};

pub const ADMIN_EMAIL: &str = "admin@example.com";
pub const IDENTITY_HEADER: &str = "x-forwarded-email";

pub async fn body_to_string(body: Body) -> String {
    let bytes = body.collect().await.expect("collect body").to_bytes();
    String::from_utf8(bytes.to_vec()).expect("utf8 body")
}

/// In-memory post store. Posts keep insertion order; `writes` counts successful mutations.
#[derive(Default)]
pub struct MemoryPostStore {
    posts: Mutex<Vec<Post>>,
    writes: AtomicUsize,
    unavailable: AtomicBool,
}

impl MemoryPostStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub async fn with_posts(posts: &[(&str, &str, &str)]) -> Arc<Self> {
        let store = Self::new();
        for (slug, title, markdown) in posts {
            store
                .create_post(CreatePostParams {
                    slug: slug.to_string(),
                    title: title.to_string(),
                    markdown: markdown.to_string(),
                })
                .await
                .expect("seed post");
        }
        store.writes.store(0, Ordering::SeqCst);
        store
    }

    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    /// Make every subsequent call fail with a timeout.
    pub fn set_unavailable(&self) {
        self.unavailable.store(true, Ordering::SeqCst);
    }

    pub async fn snapshot(&self) -> Vec<Post> {
        self.posts.lock().await.clone()
    }

    fn check_available(&self) -> Result<(), RepoError> {
        if self.unavailable.load(Ordering::SeqCst) {
            Err(RepoError::Timeout)
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl PostsRepo for MemoryPostStore {
    async fn list_post_summaries(&self) -> Result<Vec<PostSummary>, RepoError> {
        self.check_available()?;
        Ok(self.posts.lock().await.iter().map(PostSummary::from).collect())
    }

    async fn list_posts(&self) -> Result<Vec<Post>, RepoError> {
        self.check_available()?;
        Ok(self.posts.lock().await.clone())
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Post>, RepoError> {
        self.check_available()?;
        Ok(self
            .posts
            .lock()
            .await
            .iter()
            .find(|post| post.slug == slug)
            .cloned())
    }
}

#[async_trait]
impl PostsWriteRepo for MemoryPostStore {
    async fn create_post(&self, params: CreatePostParams) -> Result<Post, RepoError> {
        self.check_available()?;
        let mut posts = self.posts.lock().await;
        if posts.iter().any(|post| post.slug == params.slug) {
            return Err(RepoError::ConstraintViolation {
                constraint: "posts_pkey".into(),
            });
        }

        let now = OffsetDateTime::now_utc();
        let post = Post {
            slug: params.slug,
            title: params.title,
            markdown: params.markdown,
            created_at: now,
            updated_at: now,
        };
        posts.push(post.clone());
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(post)
    }

    async fn update_post(&self, slug: &str, params: UpdatePostParams) -> Result<Post, RepoError> {
        self.check_available()?;
        let mut posts = self.posts.lock().await;
        if params.slug != slug && posts.iter().any(|post| post.slug == params.slug) {
            return Err(RepoError::ConstraintViolation {
                constraint: "posts_pkey".into(),
            });
        }

        let post = posts
            .iter_mut()
            .find(|post| post.slug == slug)
            .ok_or(RepoError::NotFound)?;
        post.slug = params.slug;
        post.title = params.title;
        post.markdown = params.markdown;
        post.updated_at = OffsetDateTime::now_utc();
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(post.clone())
    }

    async fn delete_post(&self, slug: &str) -> Result<(), RepoError> {
        self.check_available()?;
        let mut posts = self.posts.lock().await;
        let index = posts
            .iter()
            .position(|post| post.slug == slug)
            .ok_or(RepoError::NotFound)?;
        posts.remove(index);
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

#[async_trait]
impl DatabaseHealth for MemoryPostStore {
    async fn health_check(&self) -> Result<(), RepoError> {
        self.check_available()
    }
}

pub fn admin_service(store: Arc<MemoryPostStore>) -> AdminPostService {
    AdminPostService::new(store.clone(), store)
}

pub fn read_service(store: Arc<MemoryPostStore>) -> PostReadService {
    PostReadService::new(store, Arc::new(MarkdownRenderer::new()))
}

pub fn router(store: Arc<MemoryPostStore>) -> Router {
    let http_state = HttpState {
        posts: Arc::new(read_service(store.clone())),
        health: store.clone(),
    };
    let admin_state = AdminState {
        posts: Arc::new(admin_service(store)),
        gate: Arc::new(HeaderAdminGate::new(
            ADMIN_EMAIL,
            HeaderName::from_static(IDENTITY_HEADER),
            "/login",
        )),
    };

    http::build_router(RouterState {
        http: http_state,
        admin: admin_state,
    })
}
