use crate::user_obj;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug)]
pub struct Post {
    pub id: String,
    pub user: String,
    pub content: String,
    pub created_at: u64,
}

/// One feed entry: a post joined with its author. The author is None when
/// the account has since been deleted.
pub struct PostWithAuthor {
    pub post: Post,
    pub author: Option<user_obj::User>,
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn serialize_roundtrip() {
        let post = Post {
            id: "a1b2".to_string(),
            user: "someone@example.com".to_string(),
            content: "🔥".to_string(),
            created_at: 1_700_000_000_000,
        };
        let serialized = serde_json::to_string(&post).unwrap();
        let back: Post = serde_json::from_str(&serialized).unwrap();
        assert_eq!(back.id, post.id);
        assert_eq!(back.content, "🔥");
        assert_eq!(back.created_at, post.created_at);
    }
}
