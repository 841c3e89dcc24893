use super::db;
use super::post_obj::PostWithAuthor;
use super::timeago;
use super::user_obj::User;
use regex::Regex;
use worker::*;

/// Renders one feed entry. Pure; the caller supplies the clock so relative
/// timestamps are stable under test.
pub fn render_post(entry: &PostWithAuthor, now_ms: u64) -> String {
    let (username, avatar) = match &entry.author {
        Some(user) => (
            user.account.username.as_str(),
            user.account.profile_image_url.clone(),
        ),
        None => ("[deleted]", db::user::profile_image_url("deleted")),
    };

    include_str!("html/templates/post.html")
        .replace("<!--avatar-->", avatar.as_str())
        .replace("<!--username-->", username)
        .replace(
            "<!--timeago-->",
            timeago::fmt_relative(entry.post.created_at, now_ms).as_str(),
        )
        .replace("<!--content-->", entry.post.content.as_str())
}

/// Renders the feed in the exact order the listing returned it. An empty
/// listing renders an empty fragment, not an error.
pub fn render_feed(posts: &[PostWithAuthor], now_ms: u64) -> String {
    posts
        .iter()
        .map(|entry| render_post(entry, now_ms))
        .collect::<String>()
}

/// Fills the page shell around a feed fragment. Signed-out visitors get the
/// sign-in/register forms and no create-post widget; signed-in users get the
/// widget and the sign-out control.
pub fn compose_page(feed_html: &str, user: Option<&User>, is_login_error: bool) -> String {
    let style = include_str!("html/index.css");

    let mut response = include_str!("html/index.html")
        .replace("/*style*/", style)
        .replace("<!--feed-->", feed_html);

    let signed_out_regex = Regex::new(r"<!--startSignedOut-->(.|\n)*<!--endSignedOut-->").unwrap();
    let signed_in_regex = Regex::new(r"<!--startSignedIn-->(.|\n)*<!--endSignedIn-->").unwrap();
    let wizard_regex =
        Regex::new(r"<!--createPostUIStart-->(.|\n)*<!--createPostUIEnd-->").unwrap();
    response = match user {
        Some(user) => {
            response = response
                .replace("<!--username-->", user.account.username.as_str())
                .replace("<!--avatar-->", user.account.profile_image_url.as_str());
            signed_out_regex.replace_all(&response, "").into_owned()
        }
        None => {
            response = signed_in_regex.replace_all(&response, "").into_owned();
            wizard_regex.replace_all(&response, "").into_owned()
        }
    };

    match is_login_error {
        true => response.replace(
            "<!--loginError-->",
            include_str!("html/templates/login-error.html"),
        ),
        false => response.replace("<!--loginError-->", ""),
    }
}

pub async fn render_feed_page(
    env: &Env,
    is_login_error: bool,
    user: Option<User>,
) -> Result<Response> {
    // A cache read failure is just a miss; the listing below is the source
    // of truth.
    let cached = db::cached_feed(env).await.ok().flatten();
    let feed_html = match cached {
        Some(fragment) => fragment,
        None => match db::post::list_posts(env).await {
            Ok(posts) => {
                let fragment = render_feed(posts.as_slice(), Date::now().as_millis());
                db::store_feed(env, fragment.as_str()).await?;
                fragment
            }
            // Listing failures render the static failure fragment; the
            // fragment is never cached.
            Err(_) => include_str!("html/templates/feed-error.html").to_string(),
        },
    };

    let html = compose_page(feed_html.as_str(), user.as_ref(), is_login_error);
    Response::from_html(html)
}
