//! SQLite schema definitions and SQL query constants.
//!
//! Pure data, no I/O. Every statement binds its inputs as numbered
//! parameters, and every list query orders by `id`.

/// SQL statement to create all tables.
///
/// `AUTOINCREMENT` keeps SQLite from handing out the ID of a deleted row.
pub const CREATE_TABLES: &str = r#"
-- Users table
CREATE TABLE IF NOT EXISTS users (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    username TEXT NOT NULL UNIQUE,
    password_hash TEXT NOT NULL
);

-- Posts table
CREATE TABLE IF NOT EXISTS posts (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    title TEXT NOT NULL,
    content TEXT NOT NULL,
    user_id INTEGER NOT NULL,
    commentable BOOLEAN NOT NULL DEFAULT 1,
    FOREIGN KEY (user_id) REFERENCES users(id) ON DELETE CASCADE
);

-- Comments table; parent_id is NULL for top-level comments
CREATE TABLE IF NOT EXISTS comments (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    content TEXT NOT NULL,
    user_id INTEGER NOT NULL,
    post_id INTEGER NOT NULL,
    parent_id INTEGER,
    FOREIGN KEY (user_id) REFERENCES users(id) ON DELETE CASCADE,
    FOREIGN KEY (post_id) REFERENCES posts(id) ON DELETE CASCADE,
    FOREIGN KEY (parent_id) REFERENCES comments(id) ON DELETE CASCADE
);

-- Indexes for efficient queries
CREATE INDEX IF NOT EXISTS idx_posts_user_id ON posts(user_id);
CREATE INDEX IF NOT EXISTS idx_comments_post_id ON comments(post_id);
CREATE INDEX IF NOT EXISTS idx_comments_parent_id ON comments(parent_id);
"#;

// User queries
pub const INSERT_USER: &str = r#"
INSERT INTO users (username, password_hash)
VALUES (?1, ?2)
RETURNING id, username, password_hash
"#;

pub const SELECT_USER_BY_ID: &str = r#"
SELECT id, username, password_hash
FROM users
WHERE id = ?1
"#;

pub const SELECT_USER_BY_USERNAME: &str = r#"
SELECT id, username, password_hash
FROM users
WHERE username = ?1
"#;

/// `?1` is a JSON array of IDs.
pub const SELECT_USERS_BY_IDS: &str = r#"
SELECT id, username, password_hash
FROM users
WHERE id IN (SELECT value FROM json_each(?1))
ORDER BY id
"#;

// Post queries
pub const INSERT_POST: &str = r#"
INSERT INTO posts (title, content, user_id, commentable)
VALUES (?1, ?2, ?3, ?4)
RETURNING id, title, content, user_id, commentable
"#;

pub const SELECT_POST_BY_ID: &str = r#"
SELECT id, title, content, user_id, commentable
FROM posts
WHERE id = ?1
"#;

pub const SELECT_POSTS: &str = r#"
SELECT id, title, content, user_id, commentable
FROM posts
ORDER BY id
LIMIT ?1 OFFSET ?2
"#;

pub const SELECT_POSTS_BY_USER: &str = r#"
SELECT id, title, content, user_id, commentable
FROM posts
WHERE user_id = ?1
ORDER BY id
LIMIT ?2 OFFSET ?3
"#;

/// Scoped to the owner: a post owned by someone else matches no row.
pub const UPDATE_POST: &str = r#"
UPDATE posts
SET title = ?3, content = ?4, commentable = ?5
WHERE id = ?1 AND user_id = ?2
RETURNING id, title, content, user_id, commentable
"#;

pub const DELETE_POST: &str = r#"
DELETE FROM posts WHERE id = ?1
"#;

// Comment queries

/// Inserts nothing (and returns no row) unless `?4` is NULL or names a
/// comment on the same post.
pub const INSERT_COMMENT: &str = r#"
INSERT INTO comments (content, user_id, post_id, parent_id)
SELECT ?1, ?2, ?3, ?4
WHERE ?4 IS NULL
   OR EXISTS (SELECT 1 FROM comments WHERE id = ?4 AND post_id = ?3)
RETURNING id, content, user_id, post_id, parent_id
"#;

pub const SELECT_COMMENT_BY_ID: &str = r#"
SELECT id, content, user_id, post_id, parent_id
FROM comments
WHERE id = ?1
"#;

pub const SELECT_COMMENTS_BY_POST: &str = r#"
SELECT id, content, user_id, post_id, parent_id
FROM comments
WHERE post_id = ?1
ORDER BY id
LIMIT ?2 OFFSET ?3
"#;

/// `?1` is a JSON array of post IDs.
pub const SELECT_COMMENTS_BY_POSTS: &str = r#"
SELECT id, content, user_id, post_id, parent_id
FROM comments
WHERE post_id IN (SELECT value FROM json_each(?1))
ORDER BY id
"#;

pub const SELECT_REPLIES: &str = r#"
SELECT id, content, user_id, post_id, parent_id
FROM comments
WHERE parent_id = ?1
ORDER BY id
"#;

pub const UPDATE_COMMENT: &str = r#"
UPDATE comments
SET content = ?2
WHERE id = ?1
RETURNING id, content, user_id, post_id, parent_id
"#;

pub const DELETE_COMMENT: &str = r#"
DELETE FROM comments WHERE id = ?1
"#;
