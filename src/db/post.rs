use crate::db::user;
use crate::post_obj;
use crate::user_obj;
use futures::stream::FuturesOrdered;
use futures::StreamExt;
use uuid::Uuid;
use worker::*;

const FEED_LIMIT: u64 = 100;
pub const MAX_CONTENT_CHARS: usize = 280;

/*
 * Feed keys embed the inverted creation time so the KV store's ascending
 * lexicographic listing comes back newest-first. The uuid suffix keeps two
 * posts created in the same millisecond from colliding.
 */
pub fn feed_key(created_at: u64, post_id: &str) -> String {
    format!("{:020}-{}", u64::MAX - created_at, post_id)
}

pub fn validate_content(content: &str) -> std::result::Result<(), &'static str> {
    if content.trim().is_empty() {
        return Err("Post content must not be empty");
    }
    if content.chars().count() > MAX_CONTENT_CHARS {
        return Err("Post content is too long");
    }
    Ok(())
}

pub async fn create_post(
    env: &Env,
    content: &str,
    user: &user_obj::User,
) -> Result<post_obj::Post> {
    let kv = env.kv("POSTS")?;

    let content = html_escape::encode_text(content);
    let post = post_obj::Post {
        id: Uuid::new_v4().to_simple().to_string(),
        user: user.user_id.clone(),
        content: content.to_string(),
        created_at: Date::now().as_millis(),
    };

    let key = feed_key(post.created_at, post.id.as_str());
    let post_string = serde_json::to_string(&post)?;
    kv.put(key.as_str(), post_string)?.execute().await?;
    Ok(post)
}

/// Lists the newest posts and hydrates each author. Authors are fetched
/// concurrently but the listing order is preserved; entries deleted between
/// the list and the get are skipped.
pub async fn list_posts(env: &Env) -> Result<Vec<post_obj::PostWithAuthor>> {
    let keys = env.kv("POSTS")?.list().limit(FEED_LIMIT).execute().await?;

    let posts = keys
        .keys
        .iter()
        .map(|key| async move {
            let kv = env.kv("POSTS")?;
            if let Some(body) = kv.get(key.name.as_str()).await? {
                let post: post_obj::Post = serde_json::from_str(body.as_string().as_str())?;
                let author = user::get_user(env, &post.user).await?;
                return worker::Result::Ok(post_obj::PostWithAuthor { post, author });
            }
            Err(worker::Error::RustError(String::from(
                "feed entry vanished between list and get",
            )))
        })
        .collect::<FuturesOrdered<_>>()
        .filter_map(|v| async { v.ok() })
        .collect::<Vec<_>>()
        .await;
    Ok(posts)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn newer_posts_sort_first() {
        let older = feed_key(1_000, "aaaa");
        let newer = feed_key(2_000, "aaaa");
        assert!(newer < older, "newer key must sort before older key");
    }

    #[test]
    fn same_instant_distinct_keys() {
        let a = feed_key(1_000, "aaaa");
        let b = feed_key(1_000, "bbbb");
        assert_ne!(a, b);
    }

    #[test]
    fn content_validation() {
        assert!(validate_content("🔥").is_ok());
        assert!(validate_content("").is_err());
        assert!(validate_content("   \n\t").is_err());

        let long: String = std::iter::repeat('🔥').take(MAX_CONTENT_CHARS).collect();
        assert!(validate_content(long.as_str()).is_ok());
        let too_long: String = std::iter::repeat('🔥').take(MAX_CONTENT_CHARS + 1).collect();
        assert!(validate_content(too_long.as_str()).is_err());
    }
}
