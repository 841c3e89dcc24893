use std::collections::HashMap;
use worker::*;

use crate::db;
use crate::db::post::{create_post, validate_content};
use crate::db::user::{create_session, create_user, delete_session};
use crate::render::render_feed_page;
use crate::user_obj;

/// Form submissions to `/`. The action is selected by query parameter, with
/// priority login -> register -> logout -> create; everything except login
/// and register requires a signed-in user.
pub async fn handle_action<S: AsRef<str>>(
    mut req: Request,
    env: &Env,
    user: Option<user_obj::User>,
    session_id: Option<S>,
) -> Result<Response> {
    let url = req.url()?;
    let pairs = url.query_pairs();
    let params: HashMap<_, _> = pairs.to_owned().collect();

    let form_data = req.form_data().await?;

    if params.contains_key("login") {
        if let Some(FormEntry::Field(email)) = form_data.get("email") {
            if let Some(FormEntry::Field(password)) = form_data.get("password") {
                return match create_session(env, email, password).await? {
                    Some(session_id) => redirect_with_session(session_id.as_str()),
                    None => render_feed_page(env, true, user).await,
                };
            }
        }
        return Response::error("Bad request, email and password must both be present.", 400);
    } else if params.contains_key("register") {
        if let Some(FormEntry::Field(email)) = form_data.get("email") {
            if let Some(FormEntry::Field(username)) = form_data.get("username") {
                if let Some(FormEntry::Field(password)) = form_data.get("password") {
                    return match create_user(env, email, username, password).await? {
                        Some(session_id) => redirect_with_session(session_id.as_str()),
                        // Email already registered.
                        None => render_feed_page(env, true, user).await,
                    };
                }
            }
        }
        return Response::error(
            "Bad request, email, username and password must all be present.",
            400,
        );
    }

    let user = match user {
        None => return Response::error("Error, user is not signed in!", 401),
        Some(user) => user,
    };

    if params.contains_key("logout") {
        let session_id = session_id.ok_or_else(|| {
            Error::RustError(String::from("signed-in request without a session cookie"))
        })?;
        delete_session(env, session_id).await?;

        let mut headers = Headers::new();
        headers.set("Set-Cookie", "sessionId=deleted")?;
        headers.set("Location", "/")?;
        return Ok(Response::empty()?.with_status(303).with_headers(headers));
    }

    if let Some(FormEntry::Field(content)) = form_data.get("content") {
        if let Err(reason) = validate_content(content.as_str()) {
            return Response::error(reason, 400);
        }

        create_post(env, content.as_str(), &user).await?;
        // The feed only goes stale once the create has resolved; the
        // redirect below makes the browser re-read it.
        db::invalidate_feed(env).await?;

        let mut headers = Headers::new();
        headers.set("Location", "/")?;
        return Ok(Response::empty()?.with_status(303).with_headers(headers));
    }
    Response::error("Bad request, content must be present.", 400)
}

fn redirect_with_session(session_id: &str) -> Result<Response> {
    let mut headers = Headers::new();
    headers.set("Set-Cookie", format!("sessionId={}", session_id).as_str())?;
    headers.set("Location", "/")?;
    Ok(Response::empty()?.with_status(303).with_headers(headers))
}
