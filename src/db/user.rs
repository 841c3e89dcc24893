use crate::crypto_helpers;
use crate::user_obj;
use url::Url;
use uuid::Uuid;
use worker::*;

/// Verifies credentials and mints a fresh session id. None means the
/// account does not exist or the password did not match; the caller cannot
/// tell which, by design of the login form.
pub async fn create_session<S: AsRef<str>>(
    env: &Env,
    user_id: S,
    password: S,
) -> Result<Option<String>> {
    let user_id = user_id.as_ref();
    let password = password.as_ref();

    match get_user(env, user_id).await? {
        None => Ok(None),
        Some(user) => {
            if crypto_helpers::verify_password(password, &user.account.hash) {
                let session_id = Uuid::new_v4().to_simple().to_string();
                update_session(env, user_id, &session_id).await?;

                Ok(Some(session_id))
            } else {
                Ok(None)
            }
        }
    }
}

/*
 * Write the session to the kv store with the configured expiry; called on
 * every authenticated request so the TTL slides.
 */
async fn update_session<S: AsRef<str>, S2: AsRef<str>>(
    env: &Env,
    user_id: S,
    session_id: S2,
) -> Result<()> {
    let sessions_kv = env.kv("SESSIONS")?;

    let expiry = env
        .var("SESSION_EXPIRY")?
        .to_string()
        .parse::<u64>()
        .map_err(|_| Error::RustError(String::from("SESSION_EXPIRY is not a number")))?;

    sessions_kv
        .put(session_id.as_ref(), user_id.as_ref())?
        .expiration_ttl(expiry)
        .execute()
        .await?;

    Ok(())
}

pub async fn delete_session<S: AsRef<str>>(env: &Env, session_id: S) -> Result<()> {
    let sessions_kv = env.kv("SESSIONS")?;
    sessions_kv.delete(session_id.as_ref()).await?;
    Ok(())
}

pub async fn get_user<S: AsRef<str>>(env: &Env, user_id: S) -> Result<Option<user_obj::User>> {
    let user_id = user_id.as_ref();
    let users_kv = env.kv("USERS")?;
    Ok(match users_kv.get(user_id).await? {
        Some(data) => {
            let account: user_obj::UserAccount =
                serde_json::from_str(data.as_string().as_str())?;
            Some(user_obj::User {
                account,
                user_id: user_id.to_string(),
            })
        }
        None => None,
    })
}

/// Resolves a session cookie to its user. The page renders nothing until
/// this has settled, so sign-in state is never shown stale.
pub async fn get_session<S: AsRef<str>>(
    env: &Env,
    session_id: S,
) -> Result<Option<user_obj::User>> {
    let session_id = session_id.as_ref();
    let sessions_kv = env.kv("SESSIONS")?;

    match sessions_kv.get(session_id).await? {
        None => Ok(None),
        Some(user_id) => {
            let user_id = user_id.as_string();
            update_session(env, &user_id, session_id).await?;
            get_user(env, &user_id).await
        }
    }
}

/// Registers an account and signs it in. None means the email is taken.
pub async fn create_user<S: AsRef<str>>(
    env: &Env,
    user_id: S,
    username: S,
    password: S,
) -> Result<Option<String>> {
    let user_id = user_id.as_ref();
    let username = username.as_ref();
    let password = password.as_ref();

    if get_user(env, user_id).await?.is_some() {
        return Ok(None);
    }

    // Usernames are rendered into the page, so escape at the storage
    // boundary like post content.
    let username = html_escape::encode_text(username);
    let username = username.as_ref();
    let account = user_obj::UserAccount {
        username: username.to_string(),
        hash: crypto_helpers::hash_password(password),
        profile_image_url: profile_image_url(username),
    };
    let serialized = serde_json::to_string(&account)?;

    let users_kv = env.kv("USERS")?;
    users_kv.put(user_id, serialized)?.execute().await?;

    let session_id = create_session(env, user_id, password).await?.ok_or_else(|| {
        Error::RustError(String::from("session creation failed for a fresh account"))
    })?;
    Ok(Some(session_id))
}

/// Deterministic identicon for accounts that never upload an avatar. The
/// seed comes from user input, so it goes through the URL serializer
/// rather than straight string formatting.
pub fn profile_image_url(username: &str) -> String {
    Url::parse_with_params(
        "https://api.dicebear.com/7.x/identicon/svg",
        &[("seed", username)],
    )
    .expect("static base URL parses")
    .to_string()
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn profile_image_is_per_username() {
        let a = profile_image_url("jess");
        let b = profile_image_url("sam");
        assert_ne!(a, b);
        assert!(a.starts_with("https://"));
        assert!(a.ends_with("seed=jess"));
    }

    #[test]
    fn profile_image_seed_is_escaped() {
        let url = profile_image_url("spaced out#25%");
        assert!(!url.contains(' '));
        assert!(!url.contains('#'));
        assert!(url.contains("seed="));
        // Plain seeds still come through readable.
        assert!(profile_image_url("jess").ends_with("seed=jess"));
    }
}
