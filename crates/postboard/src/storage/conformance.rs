//! Behavior every storage engine must share.
//!
//! Each function drives one property through the repository traits only, so
//! the same assertions run against the in-memory and the SQLite engine. The
//! engine-specific test modules call these with a fresh, empty repository.

use postboard_core::storage::{
    CommentRepository, Pagination, PostRepository, RepositoryError, UserRepository,
};

/// Anything implementing all three repository traits.
pub(crate) trait Engine: UserRepository + PostRepository + CommentRepository {}

impl<T: UserRepository + PostRepository + CommentRepository> Engine for T {}

fn assert_not_found<T: std::fmt::Debug>(result: Result<T, RepositoryError>) {
    assert!(
        matches!(result, Err(RepositoryError::NotFound { .. })),
        "expected NotFound, got {result:?}"
    );
}

async fn seed_user<E: Engine>(engine: &E, username: &str) -> i64 {
    engine.create_user(username, "password").await.unwrap().id
}

async fn seed_posts<E: Engine>(engine: &E, user_id: i64, count: usize) -> Vec<i64> {
    let mut ids = Vec::with_capacity(count);
    for i in 0..count {
        let post = engine
            .create_post(&format!("Post {i}"), "Body", user_id, true)
            .await
            .unwrap();
        ids.push(post.id);
    }
    ids
}

pub(crate) async fn user_roundtrip_and_password<E: Engine>(engine: &E) {
    let created = engine.create_user("alice", "hunter2").await.unwrap();
    assert!(created.id > 0);
    assert_eq!(created.username, "alice");
    assert_ne!(created.password_hash, "hunter2");

    let by_name = engine.get_user_by_username("alice").await.unwrap();
    assert_eq!(by_name.id, created.id);
    assert!(by_name.check_password("hunter2"));
    assert!(!by_name.check_password("hunter3"));
    assert!(!by_name.check_password(""));

    let by_id = engine.get_user_by_id(created.id).await.unwrap();
    assert_eq!(by_id, by_name);
}

pub(crate) async fn duplicate_username_rejected<E: Engine>(engine: &E) {
    let first = engine.create_user("alice", "first").await.unwrap();

    let second = engine.create_user("alice", "second").await;
    assert!(
        matches!(second, Err(RepositoryError::DuplicateUsername(ref name)) if name == "alice"),
        "expected DuplicateUsername, got {second:?}"
    );

    let stored = engine.get_user_by_username("alice").await.unwrap();
    assert_eq!(stored, first);
    assert!(stored.check_password("first"));
    assert!(!stored.check_password("second"));
}

/// Racing registrations of one name admit exactly one winner.
pub(crate) async fn concurrent_duplicate_usernames<E: Engine + Clone + 'static>(engine: &E) {
    let handles: Vec<_> = (0..8)
        .map(|_| {
            let engine = engine.clone();
            tokio::spawn(async move { engine.create_user("contested", "pw").await })
        })
        .collect();

    let mut created = Vec::new();
    let mut duplicates = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(user) => created.push(user),
            Err(RepositoryError::DuplicateUsername(_)) => duplicates += 1,
            Err(other) => panic!("unexpected error: {other}"),
        }
    }

    assert_eq!(created.len(), 1);
    assert_eq!(duplicates, 7);
    assert_eq!(
        engine.get_user_by_username("contested").await.unwrap(),
        created[0]
    );
}

pub(crate) async fn username_is_case_sensitive<E: Engine>(engine: &E) {
    let lower = engine.create_user("alice", "pw").await.unwrap();
    let upper = engine.create_user("Alice", "pw").await.unwrap();

    assert_ne!(lower.id, upper.id);
    assert_eq!(
        engine.get_user_by_username("Alice").await.unwrap().id,
        upper.id
    );
}

pub(crate) async fn user_lookups_not_found<E: Engine>(engine: &E) {
    assert_not_found(engine.get_user_by_id(999).await);
    assert_not_found(engine.get_user_by_username("nobody").await);
}

pub(crate) async fn batch_users_partial_miss<E: Engine>(engine: &E) {
    let first = seed_user(engine, "first").await;
    let second = seed_user(engine, "second").await;

    let users = engine
        .get_users_by_ids(&[second, 999, first, second])
        .await
        .unwrap();
    let ids: Vec<i64> = users.iter().map(|u| u.id).collect();
    assert_eq!(ids, vec![first, second]);

    assert!(engine.get_users_by_ids(&[]).await.unwrap().is_empty());
    assert!(engine.get_users_by_ids(&[999]).await.unwrap().is_empty());
}

pub(crate) async fn pagination_bounds<E: Engine>(engine: &E) {
    let author = seed_user(engine, "author").await;
    let ids = seed_posts(engine, author, 5).await;

    let tail = engine.get_posts(Pagination::new(10, 3)).await.unwrap();
    assert_eq!(
        tail.iter().map(|p| p.id).collect::<Vec<_>>(),
        ids[3..].to_vec()
    );

    assert!(engine
        .get_posts(Pagination::new(2, 10))
        .await
        .unwrap()
        .is_empty());
    assert!(engine
        .get_posts(Pagination::new(0, 0))
        .await
        .unwrap()
        .is_empty());

    let all = engine.get_posts(Pagination::default()).await.unwrap();
    assert_eq!(all.iter().map(|p| p.id).collect::<Vec<_>>(), ids);
}

pub(crate) async fn posts_by_user<E: Engine>(engine: &E) {
    let alice = seed_user(engine, "alice").await;
    let bob = seed_user(engine, "bob").await;
    let alice_posts = seed_posts(engine, alice, 3).await;
    seed_posts(engine, bob, 2).await;

    let page = engine
        .get_posts_by_user(alice, Pagination::new(2, 1))
        .await
        .unwrap();
    assert_eq!(
        page.iter().map(|p| p.id).collect::<Vec<_>>(),
        alice_posts[1..].to_vec()
    );
    assert!(page.iter().all(|p| p.user_id == alice));

    let nobody = engine
        .get_posts_by_user(999, Pagination::default())
        .await
        .unwrap();
    assert!(nobody.is_empty());
}

pub(crate) async fn update_post_by_owner<E: Engine>(engine: &E) {
    let owner = seed_user(engine, "owner").await;
    let post = engine
        .create_post("Draft", "Body", owner, true)
        .await
        .unwrap();

    let updated = engine
        .update_post(post.id, "Final", "New body", owner, false)
        .await
        .unwrap();
    assert_eq!(updated.id, post.id);
    assert_eq!(updated.title, "Final");
    assert_eq!(updated.content, "New body");
    assert!(!updated.commentable);
    assert_eq!(updated.user_id, owner);

    assert_eq!(engine.get_post_by_id(post.id).await.unwrap(), updated);
    assert_not_found(
        engine
            .update_post(999, "Final", "New body", owner, false)
            .await,
    );
}

pub(crate) async fn update_post_scoped_to_owner<E: Engine>(engine: &E) {
    let owner = seed_user(engine, "owner").await;
    let intruder = seed_user(engine, "intruder").await;
    let post = engine
        .create_post("Mine", "Body", owner, true)
        .await
        .unwrap();

    assert_not_found(
        engine
            .update_post(post.id, "Hijacked", "Gone", intruder, false)
            .await,
    );

    assert_eq!(engine.get_post_by_id(post.id).await.unwrap(), post);
}

pub(crate) async fn delete_post_twice<E: Engine>(engine: &E) {
    let author = seed_user(engine, "author").await;
    let post = engine
        .create_post("Title", "Body", author, true)
        .await
        .unwrap();

    engine.delete_post(post.id).await.unwrap();
    assert_not_found(engine.get_post_by_id(post.id).await);
    assert_not_found(engine.delete_post(post.id).await);
    assert_not_found(engine.delete_post(999).await);
}

pub(crate) async fn threading<E: Engine>(engine: &E) {
    let author = seed_user(engine, "author").await;
    let post = engine
        .create_post("Title", "Body", author, true)
        .await
        .unwrap();

    let first = engine
        .create_comment("Top", author, post.id, None)
        .await
        .unwrap();
    assert!(!first.is_reply());
    let second = engine
        .create_comment("Reply", author, post.id, Some(first.id))
        .await
        .unwrap();
    assert_eq!(second.parent_id, Some(first.id));

    let replies = engine.get_replies(first.id).await.unwrap();
    assert_eq!(replies, vec![second.clone()]);
    assert!(engine.get_replies(second.id).await.unwrap().is_empty());

    let on_post = engine
        .get_comments_by_post(post.id, Pagination::default())
        .await
        .unwrap();
    assert_eq!(on_post, vec![first, second]);
}

pub(crate) async fn reply_parent_validation<E: Engine>(engine: &E) {
    let author = seed_user(engine, "author").await;
    let post = engine
        .create_post("One", "Body", author, true)
        .await
        .unwrap();
    let other = engine
        .create_post("Two", "Body", author, true)
        .await
        .unwrap();
    let elsewhere = engine
        .create_comment("On another post", author, other.id, None)
        .await
        .unwrap();

    let missing = engine
        .create_comment("Orphan", author, post.id, Some(999))
        .await;
    assert!(
        matches!(missing, Err(RepositoryError::ConstraintViolation(_))),
        "expected ConstraintViolation, got {missing:?}"
    );

    let cross_post = engine
        .create_comment("Cross", author, post.id, Some(elsewhere.id))
        .await;
    assert!(
        matches!(cross_post, Err(RepositoryError::ConstraintViolation(_))),
        "expected ConstraintViolation, got {cross_post:?}"
    );

    let stored = engine
        .get_comments_by_post(post.id, Pagination::default())
        .await
        .unwrap();
    assert!(stored.is_empty());
}

pub(crate) async fn comments_by_posts_batch<E: Engine>(engine: &E) {
    let author = seed_user(engine, "author").await;
    let posts = seed_posts(engine, author, 3).await;

    let a = engine
        .create_comment("a", author, posts[0], None)
        .await
        .unwrap();
    let b = engine
        .create_comment("b", author, posts[2], None)
        .await
        .unwrap();
    let c = engine
        .create_comment("c", author, posts[0], Some(a.id))
        .await
        .unwrap();
    engine
        .create_comment("d", author, posts[1], None)
        .await
        .unwrap();

    let batch = engine
        .get_comments_by_posts(&[posts[2], posts[0], 999])
        .await
        .unwrap();
    assert_eq!(batch, vec![a, b, c]);

    assert!(engine.get_comments_by_posts(&[]).await.unwrap().is_empty());
}

pub(crate) async fn comment_pagination<E: Engine>(engine: &E) {
    let author = seed_user(engine, "author").await;
    let post = engine
        .create_post("Title", "Body", author, true)
        .await
        .unwrap();

    let mut ids = Vec::new();
    for i in 0..4 {
        let comment = engine
            .create_comment(&format!("Comment {i}"), author, post.id, None)
            .await
            .unwrap();
        ids.push(comment.id);
    }

    let page = engine
        .get_comments_by_post(post.id, Pagination::new(2, 1))
        .await
        .unwrap();
    assert_eq!(
        page.iter().map(|c| c.id).collect::<Vec<_>>(),
        ids[1..3].to_vec()
    );

    assert!(engine
        .get_comments_by_post(post.id, Pagination::new(5, 4))
        .await
        .unwrap()
        .is_empty());
}

pub(crate) async fn update_comment<E: Engine>(engine: &E) {
    let author = seed_user(engine, "author").await;
    let post = engine
        .create_post("Title", "Body", author, true)
        .await
        .unwrap();
    let comment = engine
        .create_comment("Before", author, post.id, None)
        .await
        .unwrap();

    let updated = engine.update_comment(comment.id, "After").await.unwrap();
    assert_eq!(updated.id, comment.id);
    assert_eq!(updated.content, "After");
    assert_eq!(updated.post_id, comment.post_id);
    assert_eq!(updated.parent_id, comment.parent_id);

    assert_eq!(engine.get_comment_by_id(comment.id).await.unwrap(), updated);
    assert_not_found(engine.update_comment(999, "After").await);
}

pub(crate) async fn delete_comment_twice<E: Engine>(engine: &E) {
    let author = seed_user(engine, "author").await;
    let post = engine
        .create_post("Title", "Body", author, true)
        .await
        .unwrap();
    let comment = engine
        .create_comment("Bye", author, post.id, None)
        .await
        .unwrap();

    engine.delete_comment(comment.id).await.unwrap();
    assert_not_found(engine.get_comment_by_id(comment.id).await);
    assert_not_found(engine.delete_comment(comment.id).await);
    assert_not_found(engine.delete_comment(999).await);
}

pub(crate) async fn ids_not_reused<E: Engine>(engine: &E) {
    let author = seed_user(engine, "author").await;
    let ids = seed_posts(engine, author, 2).await;

    engine.delete_post(ids[1]).await.unwrap();
    let next = engine
        .create_post("Next", "Body", author, true)
        .await
        .unwrap();

    assert!(next.id > ids[1]);
}
