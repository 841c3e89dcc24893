use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

/// Hash a password to a PHC string ($argon2id$v=19$...) with a fresh salt.
pub fn hash_password(password: &str) -> String {
    let salt = SaltString::generate(&mut OsRng);
    let hasher = Argon2::default();

    hasher
        .hash_password_simple(password.as_bytes(), &salt)
        .unwrap() //Should never fail
        .to_string()
}

/// A stored hash that fails to parse counts as a failed verification rather
/// than a panic; accounts written by hand into the KV store stay locked out.
pub fn verify_password(password: &str, hash: &str) -> bool {
    let parsed_hash = match PasswordHash::new(hash) {
        Ok(parsed) => parsed,
        Err(_) => return false,
    };

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok()
}
