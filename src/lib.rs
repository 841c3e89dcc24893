use worker::*;

mod actions;
mod crypto_helpers;
mod db;
mod post_obj;
mod render;
mod timeago;
mod user_obj;
mod utils;

fn log_request(req: &Request) {
    console_log!(
        "{} - [{}], located at: {:?}, within: {}",
        Date::now().to_string(),
        req.path(),
        req.cf().coordinates().unwrap_or_default(),
        req.cf().region().unwrap_or("unknown region".into())
    );
}

/// Extracts the session id from a Cookie header value.
fn session_cookie(header: &str) -> Option<String> {
    header
        .split(';')
        .find_map(|pair| pair.trim().strip_prefix("sessionId="))
        .map(|id| id.to_string())
}

#[event(fetch)]
pub async fn main(req: Request, env: Env) -> Result<Response> {
    log_request(&req);
    utils::set_panic_hook();

    if req.path() != "/" {
        return Response::error("Page Not Found", 404);
    }

    // Resolve the session before rendering anything, so the page never
    // shows sign-in state it has not confirmed.
    let session_id = req
        .headers()
        .get("Cookie")?
        .and_then(|header| session_cookie(header.as_str()));
    let user = match &session_id {
        Some(session_id) => db::user::get_session(&env, session_id).await?,
        None => None,
    };

    match req.method() {
        Method::Get => render::render_feed_page(&env, false, user).await,
        Method::Post => actions::handle_action(req, &env, user, session_id).await,
        _ => Response::error("Method Not Allowed", 405),
    }
}
