use worker::*;

pub mod post;
pub mod user;

const FEED_FRAGMENT_KEY: &str = "feed:html";

// Short enough that relative timestamps in a quiet feed do not drift a
// whole bucket; KV enforces a 60 second floor on TTLs.
const FEED_FRAGMENT_TTL: u64 = 300;

/*
 * Rendered-feed cache. The create handler marks the feed stale by deleting
 * the fragment; the next page render repopulates it. The TTL only bounds
 * how long "N minutes ago" labels can go stale between posts.
 */

pub async fn cached_feed(env: &Env) -> Result<Option<String>> {
    let cache = env.kv("CACHE")?;
    Ok(cache.get(FEED_FRAGMENT_KEY).await?.map(|v| v.as_string()))
}

pub async fn store_feed(env: &Env, fragment: &str) -> Result<()> {
    let cache = env.kv("CACHE")?;
    cache
        .put(FEED_FRAGMENT_KEY, fragment)?
        .expiration_ttl(FEED_FRAGMENT_TTL)
        .execute()
        .await?;
    Ok(())
}

pub async fn invalidate_feed(env: &Env) -> Result<()> {
    let cache = env.kv("CACHE")?;
    cache.delete(FEED_FRAGMENT_KEY).await?;
    Ok(())
}
