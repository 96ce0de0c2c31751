use std::sync::Arc;

use tracing::{debug, info, instrument};
use uuid::Uuid;

use super::domain::{Comment, CommentInput, Like, NewComment, NewPost, Post, PostInput};
use super::repository::PostRepository;
use crate::auth::{authorize_owner, domain::User, repository::UserRepository};
use crate::errors::ServiceError;

/// Post business rules: creation with author snapshots, like set, comment list.
#[derive(Clone)]
pub struct PostService {
    posts: Arc<dyn PostRepository>,
    users: Arc<dyn UserRepository>,
}

fn require_text(text: &str) -> Result<(), ServiceError> {
    if text.trim().is_empty() {
        return Err(ServiceError::Validation("Text is required".into()));
    }
    Ok(())
}

impl PostService {
    pub fn new(posts: Arc<dyn PostRepository>, users: Arc<dyn UserRepository>) -> Self { Self { posts, users } }

    async fn author(&self, id: Uuid) -> Result<User, ServiceError> {
        self.users.find_by_id(id).await?.ok_or_else(|| ServiceError::not_found("User"))
    }

    async fn ensure_exists(&self, id: Uuid) -> Result<Post, ServiceError> {
        self.posts.find(id).await?.ok_or_else(|| ServiceError::not_found("Post"))
    }

    #[instrument(skip(self, input), fields(author_id = %author_id))]
    pub async fn create(&self, author_id: Uuid, input: PostInput) -> Result<Post, ServiceError> {
        require_text(&input.text)?;
        let author = self.author(author_id).await?;
        let post = self
            .posts
            .create(NewPost { user_id: author.id, text: input.text, name: author.name, avatar: author.avatar })
            .await?;
        info!(post_id = %post.id, "post_created");
        Ok(post)
    }

    /// Every post, newest first.
    pub async fn list(&self) -> Result<Vec<Post>, ServiceError> {
        self.posts.list().await
    }

    pub async fn get(&self, id: Uuid) -> Result<Post, ServiceError> {
        self.ensure_exists(id).await
    }

    #[instrument(skip(self), fields(post_id = %id, subject = %subject))]
    pub async fn delete(&self, id: Uuid, subject: Uuid) -> Result<(), ServiceError> {
        let post = self.ensure_exists(id).await?;
        authorize_owner(post.user_id, subject)?;
        if !self.posts.delete(id).await? {
            return Err(ServiceError::not_found("Post"));
        }
        info!("post_removed");
        Ok(())
    }

    /// Add `subject` to the like set.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    /// use service::errors::ServiceError;
    /// use service::posts::{PostService, domain::PostInput, repository::mock::MockPostRepository};
    /// use service::auth::{UserRegistry, avatar::Gravatar, credentials::mock::PlainCredentials};
    /// use service::auth::{domain::RegisterInput, repository::mock::MockUserRepository};
    /// let users = Arc::new(MockUserRepository::default());
    /// let registry = UserRegistry::new(users.clone(), Arc::new(PlainCredentials), Arc::new(Gravatar::default()));
    /// let posts = PostService::new(Arc::new(MockPostRepository::default()), users);
    /// tokio_test::block_on(async {
    ///     let a = registry.register(RegisterInput { name: "A".into(), email: "a@example.com".into(), password: "secret1".into() }).await.unwrap();
    ///     let post = posts.create(a.id, PostInput { text: "hello".into() }).await.unwrap();
    ///     assert_eq!(posts.like(post.id, a.id).await.unwrap().len(), 1);
    ///     assert!(matches!(posts.like(post.id, a.id).await, Err(ServiceError::AlreadyExists(_))));
    /// });
    /// ```
    #[instrument(skip(self), fields(post_id = %post_id, subject = %subject))]
    pub async fn like(&self, post_id: Uuid, subject: Uuid) -> Result<Vec<Like>, ServiceError> {
        self.ensure_exists(post_id).await?;
        if !self.posts.add_like(post_id, subject).await? {
            debug!("like rejected, already present");
            return Err(ServiceError::AlreadyExists("Post already liked".into()));
        }
        self.posts.likes(post_id).await
    }

    #[instrument(skip(self), fields(post_id = %post_id, subject = %subject))]
    pub async fn unlike(&self, post_id: Uuid, subject: Uuid) -> Result<Vec<Like>, ServiceError> {
        self.ensure_exists(post_id).await?;
        if !self.posts.remove_like(post_id, subject).await? {
            return Err(ServiceError::NotLiked("Post has not yet been liked".into()));
        }
        self.posts.likes(post_id).await
    }

    #[instrument(skip(self, input), fields(post_id = %post_id, subject = %subject))]
    pub async fn add_comment(&self, post_id: Uuid, subject: Uuid, input: CommentInput) -> Result<Vec<Comment>, ServiceError> {
        require_text(&input.text)?;
        self.ensure_exists(post_id).await?;
        let author = self.author(subject).await?;
        let comment = self
            .posts
            .add_comment(post_id, NewComment { user_id: author.id, text: input.text, name: author.name, avatar: author.avatar })
            .await?;
        debug!(comment_id = %comment.id, "comment_added");
        self.posts.comments(post_id).await
    }

    /// Remove the comment with `comment_id`. Lookup is by comment id only; the author
    /// check applies to that comment's own author.
    #[instrument(skip(self), fields(post_id = %post_id, comment_id = %comment_id, subject = %subject))]
    pub async fn remove_comment(&self, post_id: Uuid, comment_id: Uuid, subject: Uuid) -> Result<Vec<Comment>, ServiceError> {
        self.ensure_exists(post_id).await?;
        let comment = self
            .posts
            .find_comment(post_id, comment_id)
            .await?
            .ok_or_else(|| ServiceError::NotFound("Comment does not exist".into()))?;
        authorize_owner(comment.user_id, subject)?;
        if !self.posts.remove_comment(post_id, comment_id).await? {
            return Err(ServiceError::NotFound("Comment does not exist".into()));
        }
        debug!("comment_removed");
        self.posts.comments(post_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{register, services};

    fn text(t: &str) -> PostInput { PostInput { text: t.into() } }
    fn comment(t: &str) -> CommentInput { CommentInput { text: t.into() } }

    #[tokio::test]
    async fn create_snapshots_author() {
        let s = services();
        let a = register(&s, "Ann", "ann@example.com").await;
        let post = s.posts.create(a.id, text("hello")).await.unwrap();
        assert_eq!(post.user_id, a.id);
        assert_eq!(post.name, "Ann");
        assert_eq!(post.avatar, a.avatar);
        assert!(post.likes.is_empty() && post.comments.is_empty());
    }

    #[tokio::test]
    async fn empty_text_rejected() {
        let s = services();
        let a = register(&s, "Ann", "ann@example.com").await;
        assert!(matches!(s.posts.create(a.id, text("  ")).await, Err(ServiceError::Validation(_))));
        assert!(s.posts.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn snapshot_survives_author_removal() {
        let s = services();
        let a = register(&s, "Ann", "ann@example.com").await;
        let post = s.posts.create(a.id, text("hello")).await.unwrap();
        s.user_repo.delete(a.id).await.unwrap();
        let fetched = s.posts.get(post.id).await.unwrap();
        assert_eq!(fetched.name, "Ann");
    }

    #[tokio::test]
    async fn list_is_newest_first() {
        let s = services();
        let a = register(&s, "Ann", "ann@example.com").await;
        let first = s.posts.create(a.id, text("one")).await.unwrap();
        let second = s.posts.create(a.id, text("two")).await.unwrap();
        let ids: Vec<Uuid> = s.posts.list().await.unwrap().into_iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![second.id, first.id]);
    }

    #[tokio::test]
    async fn get_unknown_is_not_found() {
        let s = services();
        assert!(matches!(s.posts.get(Uuid::new_v4()).await, Err(ServiceError::NotFound(_))));
    }

    #[tokio::test]
    async fn delete_requires_author() {
        let s = services();
        let a = register(&s, "Ann", "ann@example.com").await;
        let b = register(&s, "Bob", "bob@example.com").await;
        let post = s.posts.create(a.id, text("hello")).await.unwrap();

        assert!(matches!(s.posts.delete(post.id, b.id).await, Err(ServiceError::Forbidden(_))));
        assert_eq!(s.posts.list().await.unwrap().len(), 1);

        s.posts.delete(post.id, a.id).await.unwrap();
        assert!(s.posts.list().await.unwrap().is_empty());
        assert!(matches!(s.posts.delete(post.id, a.id).await, Err(ServiceError::NotFound(_))));
    }

    #[tokio::test]
    async fn double_like_is_already_exists_and_set_unchanged() {
        let s = services();
        let a = register(&s, "Ann", "ann@example.com").await;
        let b = register(&s, "Bob", "bob@example.com").await;
        let post = s.posts.create(a.id, text("hello")).await.unwrap();

        let likes = s.posts.like(post.id, b.id).await.unwrap();
        assert_eq!(likes, vec![Like { user_id: b.id }]);
        assert!(matches!(s.posts.like(post.id, b.id).await, Err(ServiceError::AlreadyExists(_))));
        assert_eq!(s.posts.get(post.id).await.unwrap().likes.len(), 1);
    }

    #[tokio::test]
    async fn like_unknown_post_is_not_found() {
        let s = services();
        let a = register(&s, "Ann", "ann@example.com").await;
        assert!(matches!(s.posts.like(Uuid::new_v4(), a.id).await, Err(ServiceError::NotFound(_))));
        assert!(matches!(s.posts.unlike(Uuid::new_v4(), a.id).await, Err(ServiceError::NotFound(_))));
    }

    #[tokio::test]
    async fn unlike_without_like_is_not_liked() {
        let s = services();
        let a = register(&s, "Ann", "ann@example.com").await;
        let b = register(&s, "Bob", "bob@example.com").await;
        let post = s.posts.create(a.id, text("hello")).await.unwrap();

        assert!(matches!(s.posts.unlike(post.id, b.id).await, Err(ServiceError::NotLiked(_))));
        s.posts.like(post.id, a.id).await.unwrap();
        s.posts.like(post.id, b.id).await.unwrap();
        let likes = s.posts.unlike(post.id, b.id).await.unwrap();
        assert_eq!(likes, vec![Like { user_id: a.id }]);
    }

    #[tokio::test]
    async fn concurrent_likes_all_land() {
        let s = services();
        let a = register(&s, "Ann", "ann@example.com").await;
        let post = s.posts.create(a.id, text("popular")).await.unwrap();
        let mut likers = Vec::new();
        for i in 0..16 {
            likers.push(register(&s, "Fan", &format!("fan{i}@example.com")).await.id);
        }

        let handles: Vec<_> = likers
            .iter()
            .map(|uid| {
                let svc = s.posts.clone();
                let (pid, uid) = (post.id, *uid);
                tokio::spawn(async move { svc.like(pid, uid).await })
            })
            .collect();
        for h in handles {
            h.await.unwrap().unwrap();
        }
        assert_eq!(s.posts.get(post.id).await.unwrap().likes.len(), likers.len());
    }

    #[tokio::test]
    async fn comments_prepend_with_snapshot() {
        let s = services();
        let a = register(&s, "Ann", "ann@example.com").await;
        let b = register(&s, "Bob", "bob@example.com").await;
        let post = s.posts.create(a.id, text("hello")).await.unwrap();

        s.posts.add_comment(post.id, a.id, comment("first")).await.unwrap();
        let list = s.posts.add_comment(post.id, b.id, comment("second")).await.unwrap();
        assert_eq!(list.len(), 2);
        assert_eq!(list[0].text, "second");
        assert_eq!(list[0].name, "Bob");
        assert_eq!(list[1].text, "first");
    }

    #[tokio::test]
    async fn comment_validation_and_missing_post() {
        let s = services();
        let a = register(&s, "Ann", "ann@example.com").await;
        let post = s.posts.create(a.id, text("hello")).await.unwrap();
        assert!(matches!(s.posts.add_comment(post.id, a.id, comment("")).await, Err(ServiceError::Validation(_))));
        assert!(matches!(s.posts.add_comment(Uuid::new_v4(), a.id, comment("hi")).await, Err(ServiceError::NotFound(_))));
    }

    #[tokio::test]
    async fn remove_comment_by_id_keeps_order_of_rest() {
        let s = services();
        let a = register(&s, "Ann", "ann@example.com").await;
        let post = s.posts.create(a.id, text("hello")).await.unwrap();
        for t in ["c1", "c2", "c3"] {
            s.posts.add_comment(post.id, a.id, comment(t)).await.unwrap();
        }
        let before = s.posts.get(post.id).await.unwrap().comments;
        let middle = before[1].id;

        let after = s.posts.remove_comment(post.id, middle, a.id).await.unwrap();
        assert_eq!(after.len(), 2);
        let texts: Vec<&str> = after.iter().map(|c| c.text.as_str()).collect();
        assert_eq!(texts, vec!["c3", "c1"]);
    }

    // Same author on several comments: the named comment goes, not the author's first one.
    #[tokio::test]
    async fn remove_comment_targets_named_comment_not_authors_first() {
        let s = services();
        let a = register(&s, "Ann", "ann@example.com").await;
        let b = register(&s, "Bob", "bob@example.com").await;
        let post = s.posts.create(a.id, text("hello")).await.unwrap();

        s.posts.add_comment(post.id, b.id, comment("bob old")).await.unwrap();
        s.posts.add_comment(post.id, a.id, comment("ann")).await.unwrap();
        let list = s.posts.add_comment(post.id, b.id, comment("bob new")).await.unwrap();
        let target = list.iter().find(|c| c.text == "bob old").unwrap().id;

        let after = s.posts.remove_comment(post.id, target, b.id).await.unwrap();
        let texts: Vec<&str> = after.iter().map(|c| c.text.as_str()).collect();
        assert_eq!(texts, vec!["bob new", "ann"]);
    }

    #[tokio::test]
    async fn remove_comment_checks_that_comments_author() {
        let s = services();
        let a = register(&s, "Ann", "ann@example.com").await;
        let b = register(&s, "Bob", "bob@example.com").await;
        let post = s.posts.create(a.id, text("hello")).await.unwrap();
        let list = s.posts.add_comment(post.id, a.id, comment("mine")).await.unwrap();
        let cid = list[0].id;

        assert!(matches!(s.posts.remove_comment(post.id, cid, b.id).await, Err(ServiceError::Forbidden(_))));
        assert!(matches!(s.posts.remove_comment(post.id, Uuid::new_v4(), a.id).await, Err(ServiceError::NotFound(_))));
        assert_eq!(s.posts.get(post.id).await.unwrap().comments.len(), 1);
    }
}
