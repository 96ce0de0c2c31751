use std::collections::HashMap;

use sea_orm::{DatabaseConnection, EntityTrait};
use uuid::Uuid;

use models::errors::ModelError;

use crate::errors::ServiceError;
use crate::posts::domain::{Comment, Like, NewComment, NewPost, Post};
use crate::posts::repository::PostRepository;

/// The post was deleted between the caller's lookup and the insert.
fn post_gone(e: ModelError) -> ServiceError {
    match e {
        ModelError::MissingParent(_) => ServiceError::not_found("Post"),
        other => other.into(),
    }
}

pub struct SeaOrmPostRepository {
    pub db: DatabaseConnection,
}

impl SeaOrmPostRepository {
    async fn assemble(&self, rows: Vec<models::post::Model>) -> Result<Vec<Post>, ServiceError> {
        let ids: Vec<Uuid> = rows.iter().map(|p| p.id).collect();
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let mut likes: HashMap<Uuid, Vec<Like>> = HashMap::new();
        for l in models::post_like::list_for_posts(&self.db, ids.clone()).await? {
            likes.entry(l.post_id).or_default().push(l.into());
        }
        let mut comments: HashMap<Uuid, Vec<Comment>> = HashMap::new();
        for c in models::post_comment::list_for_posts(&self.db, ids).await? {
            comments.entry(c.post_id).or_default().push(c.into());
        }
        Ok(rows
            .into_iter()
            .map(|p| {
                let l = likes.remove(&p.id).unwrap_or_default();
                let c = comments.remove(&p.id).unwrap_or_default();
                Post::from_parts(p, l, c)
            })
            .collect())
    }
}

#[async_trait::async_trait]
impl PostRepository for SeaOrmPostRepository {
    async fn create(&self, new: NewPost) -> Result<Post, ServiceError> {
        let created = models::post::create(&self.db, new.user_id, &new.text, &new.name, &new.avatar).await?;
        Ok(Post::from_parts(created, Vec::new(), Vec::new()))
    }

    async fn list(&self) -> Result<Vec<Post>, ServiceError> {
        let rows = models::post::list_newest_first(&self.db).await?;
        self.assemble(rows).await
    }

    async fn find(&self, id: Uuid) -> Result<Option<Post>, ServiceError> {
        let Some(row) = models::post::Entity::find_by_id(id).one(&self.db).await.map_err(ServiceError::unavailable)? else {
            return Ok(None);
        };
        Ok(self.assemble(vec![row]).await?.pop())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, ServiceError> {
        Ok(models::post::hard_delete(&self.db, id).await?)
    }

    async fn add_like(&self, post_id: Uuid, user_id: Uuid) -> Result<bool, ServiceError> {
        models::post_like::insert_if_absent(&self.db, post_id, user_id).await.map_err(post_gone)
    }

    async fn remove_like(&self, post_id: Uuid, user_id: Uuid) -> Result<bool, ServiceError> {
        Ok(models::post_like::remove(&self.db, post_id, user_id).await?)
    }

    async fn likes(&self, post_id: Uuid) -> Result<Vec<Like>, ServiceError> {
        let rows = models::post_like::list_for_post(&self.db, post_id).await?;
        Ok(rows.into_iter().map(Like::from).collect())
    }

    async fn add_comment(&self, post_id: Uuid, new: NewComment) -> Result<Comment, ServiceError> {
        let created = models::post_comment::create(&self.db, post_id, new.user_id, &new.text, &new.name, &new.avatar)
            .await
            .map_err(post_gone)?;
        Ok(created.into())
    }

    async fn find_comment(&self, post_id: Uuid, comment_id: Uuid) -> Result<Option<Comment>, ServiceError> {
        let found = models::post_comment::find_for_post(&self.db, post_id, comment_id).await?;
        Ok(found.map(Comment::from))
    }

    async fn remove_comment(&self, post_id: Uuid, comment_id: Uuid) -> Result<bool, ServiceError> {
        Ok(models::post_comment::delete_for_post(&self.db, post_id, comment_id).await?)
    }

    async fn comments(&self, post_id: Uuid) -> Result<Vec<Comment>, ServiceError> {
        let rows = models::post_comment::list_for_post(&self.db, post_id).await?;
        Ok(rows.into_iter().map(Comment::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::get_db;
    use std::sync::Arc;

    #[tokio::test]
    async fn concurrent_likes_are_not_lost() {
        let Some(db) = get_db().await else { return };
        let repo = Arc::new(SeaOrmPostRepository { db });
        let post = repo
            .create(NewPost { user_id: Uuid::new_v4(), text: "race".into(), name: "Ann".into(), avatar: "a".into() })
            .await
            .unwrap();

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let repo = repo.clone();
                tokio::spawn(async move { repo.add_like(post.id, Uuid::new_v4()).await })
            })
            .collect();
        for h in handles {
            assert!(h.await.unwrap().unwrap());
        }
        assert_eq!(repo.likes(post.id).await.unwrap().len(), 8);
        assert!(repo.delete(post.id).await.unwrap());
    }

    #[tokio::test]
    async fn comment_removal_is_by_id() {
        let Some(db) = get_db().await else { return };
        let repo = SeaOrmPostRepository { db };
        let author = Uuid::new_v4();
        let post = repo
            .create(NewPost { user_id: author, text: "thread".into(), name: "Ann".into(), avatar: "a".into() })
            .await
            .unwrap();
        let new = |t: &str| NewComment { user_id: author, text: t.into(), name: "Ann".into(), avatar: "a".into() };
        let first = repo.add_comment(post.id, new("first")).await.unwrap();
        repo.add_comment(post.id, new("second")).await.unwrap();

        assert!(repo.remove_comment(post.id, first.id).await.unwrap());
        let left = repo.comments(post.id).await.unwrap();
        assert_eq!(left.len(), 1);
        assert_eq!(left[0].text, "second");
        repo.delete(post.id).await.unwrap();
    }

    #[tokio::test]
    async fn writes_against_a_deleted_post_are_not_found() {
        let Some(db) = get_db().await else { return };
        let repo = SeaOrmPostRepository { db };
        let author = Uuid::new_v4();
        let post = repo
            .create(NewPost { user_id: author, text: "gone".into(), name: "Ann".into(), avatar: "a".into() })
            .await
            .unwrap();
        assert!(repo.delete(post.id).await.unwrap());

        let comment = NewComment { user_id: author, text: "late".into(), name: "Ann".into(), avatar: "a".into() };
        let err = repo.add_comment(post.id, comment).await.unwrap_err();
        assert!(matches!(&err, ServiceError::NotFound(m) if m == "Post not found"), "{err:?}");
        let err = repo.add_like(post.id, author).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)), "{err:?}");
    }
}
