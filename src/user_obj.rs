use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug)]
pub struct UserAccount {
    pub username: String,
    pub hash: String,
    pub profile_image_url: String,
}

pub struct User {
    pub account: UserAccount,
    pub user_id: String,
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn serialize_account() {
        let acc = UserAccount {
            username: "jess".to_string(),
            hash: "$argon2id$v=19$stub".to_string(),
            profile_image_url: "https://example.com/jess.svg".to_string(),
        };
        let serialized = serde_json::to_string(&acc).unwrap();
        let back: UserAccount = serde_json::from_str(&serialized).unwrap();
        assert_eq!(back.username, "jess");
        assert_eq!(back.profile_image_url, acc.profile_image_url);
    }
}
