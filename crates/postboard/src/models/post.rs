use serde::Deserialize;

/// Request payload for creating a new post.
#[derive(Debug, Deserialize)]
pub struct CreatePost {
    pub title: String,
    pub content: String,
    pub user_id: i64,
    #[serde(default = "default_commentable")]
    pub commentable: bool,
}

/// Request payload for updating a post.
///
/// `user_id` names the claimed owner; the update only applies if it matches.
#[derive(Debug, Deserialize)]
pub struct UpdatePost {
    pub title: String,
    pub content: String,
    pub user_id: i64,
    #[serde(default = "default_commentable")]
    pub commentable: bool,
}

fn default_commentable() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_post_commentable_by_default() {
        let payload: CreatePost =
            serde_json::from_str(r#"{"title":"T","content":"C","user_id":1}"#).unwrap();

        assert!(payload.commentable);
    }

    #[test]
    fn test_update_post_keeps_explicit_flag() {
        let payload: UpdatePost = serde_json::from_str(
            r#"{"title":"T","content":"C","user_id":1,"commentable":false}"#,
        )
        .unwrap();

        assert!(!payload.commentable);
    }
}
