use async_trait::async_trait;
use uuid::Uuid;

use super::domain::{Comment, Like, NewComment, NewPost, Post};
use crate::errors::ServiceError;

/// Post persistence. Like and comment mutations are single atomic store operations,
/// never a read-modify-write of the whole post.
#[async_trait]
pub trait PostRepository: Send + Sync {
    async fn create(&self, new: NewPost) -> Result<Post, ServiceError>;
    /// All posts, newest first.
    async fn list(&self) -> Result<Vec<Post>, ServiceError>;
    async fn find(&self, id: Uuid) -> Result<Option<Post>, ServiceError>;
    async fn delete(&self, id: Uuid) -> Result<bool, ServiceError>;

    /// Insert into the like set; `false` if `user_id` was already a member.
    async fn add_like(&self, post_id: Uuid, user_id: Uuid) -> Result<bool, ServiceError>;
    /// Remove from the like set; `false` if `user_id` was not a member.
    async fn remove_like(&self, post_id: Uuid, user_id: Uuid) -> Result<bool, ServiceError>;
    async fn likes(&self, post_id: Uuid) -> Result<Vec<Like>, ServiceError>;

    async fn add_comment(&self, post_id: Uuid, new: NewComment) -> Result<Comment, ServiceError>;
    async fn find_comment(&self, post_id: Uuid, comment_id: Uuid) -> Result<Option<Comment>, ServiceError>;
    /// Remove exactly the comment with `comment_id`; `false` if absent.
    async fn remove_comment(&self, post_id: Uuid, comment_id: Uuid) -> Result<bool, ServiceError>;
    async fn comments(&self, post_id: Uuid) -> Result<Vec<Comment>, ServiceError>;
}

/// Simple in-memory mock repository for tests and doc examples
pub mod mock {
    use super::*;
    use tokio::sync::Mutex;

    /// Posts kept in insertion order; every mutation happens under one lock.
    #[derive(Default)]
    pub struct MockPostRepository {
        posts: Mutex<Vec<Post>>,
    }

    fn missing() -> ServiceError { ServiceError::not_found("Post") }

    #[async_trait]
    impl PostRepository for MockPostRepository {
        async fn create(&self, new: NewPost) -> Result<Post, ServiceError> {
            let post = Post {
                id: Uuid::new_v4(),
                text: new.text,
                user_id: new.user_id,
                name: new.name,
                avatar: new.avatar,
                created_at: chrono::Utc::now(),
                likes: Vec::new(),
                comments: Vec::new(),
            };
            self.posts.lock().await.push(post.clone());
            Ok(post)
        }

        async fn list(&self) -> Result<Vec<Post>, ServiceError> {
            let mut out: Vec<Post> = self.posts.lock().await.iter().rev().cloned().collect();
            // stable: equal timestamps keep later-inserted first
            out.sort_by(|a, b| b.created_at.cmp(&a.created_at));
            Ok(out)
        }

        async fn find(&self, id: Uuid) -> Result<Option<Post>, ServiceError> {
            Ok(self.posts.lock().await.iter().find(|p| p.id == id).cloned())
        }

        async fn delete(&self, id: Uuid) -> Result<bool, ServiceError> {
            let mut posts = self.posts.lock().await;
            let before = posts.len();
            posts.retain(|p| p.id != id);
            Ok(posts.len() != before)
        }

        async fn add_like(&self, post_id: Uuid, user_id: Uuid) -> Result<bool, ServiceError> {
            let mut posts = self.posts.lock().await;
            let post = posts.iter_mut().find(|p| p.id == post_id).ok_or_else(missing)?;
            if post.is_liked_by(user_id) {
                return Ok(false);
            }
            post.likes.insert(0, Like { user_id });
            Ok(true)
        }

        async fn remove_like(&self, post_id: Uuid, user_id: Uuid) -> Result<bool, ServiceError> {
            let mut posts = self.posts.lock().await;
            let post = posts.iter_mut().find(|p| p.id == post_id).ok_or_else(missing)?;
            let before = post.likes.len();
            post.likes.retain(|l| l.user_id != user_id);
            Ok(post.likes.len() != before)
        }

        async fn likes(&self, post_id: Uuid) -> Result<Vec<Like>, ServiceError> {
            let posts = self.posts.lock().await;
            let post = posts.iter().find(|p| p.id == post_id).ok_or_else(missing)?;
            Ok(post.likes.clone())
        }

        async fn add_comment(&self, post_id: Uuid, new: NewComment) -> Result<Comment, ServiceError> {
            let mut posts = self.posts.lock().await;
            let post = posts.iter_mut().find(|p| p.id == post_id).ok_or_else(missing)?;
            let comment = Comment {
                id: Uuid::new_v4(),
                text: new.text,
                user_id: new.user_id,
                name: new.name,
                avatar: new.avatar,
                created_at: chrono::Utc::now(),
            };
            post.comments.insert(0, comment.clone());
            Ok(comment)
        }

        async fn find_comment(&self, post_id: Uuid, comment_id: Uuid) -> Result<Option<Comment>, ServiceError> {
            let posts = self.posts.lock().await;
            let post = posts.iter().find(|p| p.id == post_id).ok_or_else(missing)?;
            Ok(post.comments.iter().find(|c| c.id == comment_id).cloned())
        }

        async fn remove_comment(&self, post_id: Uuid, comment_id: Uuid) -> Result<bool, ServiceError> {
            let mut posts = self.posts.lock().await;
            let post = posts.iter_mut().find(|p| p.id == post_id).ok_or_else(missing)?;
            match post.comments.iter().position(|c| c.id == comment_id) {
                Some(idx) => {
                    post.comments.remove(idx);
                    Ok(true)
                }
                None => Ok(false),
            }
        }

        async fn comments(&self, post_id: Uuid) -> Result<Vec<Comment>, ServiceError> {
            let posts = self.posts.lock().await;
            let post = posts.iter().find(|p| p.id == post_id).ok_or_else(missing)?;
            Ok(post.comments.clone())
        }
    }
}
