//! Generated registration credentials
//!
//! Registration accepts caller-supplied credentials or generates a
//! plausible set: a word-pair username, a mail address on one of the
//! common domains, and a random password meeting the server's rules.

use rand::distributions::Alphanumeric;
use rand::seq::SliceRandom;
use rand::Rng;

const EMAIL_DOMAINS: [&str; 4] = ["gmail.com", "outlook.com", "ya.ru", "hotmail.com"];

const NAME_PARTS: [&str; 12] = [
    "silver", "amber", "north", "cedar", "raven", "ember", "delta", "vega", "lumen", "orbit",
    "pine", "flint",
];

const PASSWORD_SPECIALS: [char; 6] = ['!', '@', '#', '$', '%', '_'];
const PASSWORD_LEN: usize = 12;

/// A complete set of registration credentials.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub nickname: String,
    pub email: String,
    pub password: String,
}

impl Credentials {
    /// Generate a random credential set.
    #[must_use]
    pub fn generate() -> Self {
        let mut rng = rand::thread_rng();

        let first = NAME_PARTS.choose(&mut rng).copied().unwrap_or("user");
        let second = NAME_PARTS.choose(&mut rng).copied().unwrap_or("name");
        let suffix: u16 = rng.gen_range(10..1000);
        let username = format!("{first}{second}{suffix}");

        let mut nickname = format!("{first} {second}");
        if let Some(head) = nickname.get_mut(0..1) {
            head.make_ascii_uppercase();
        }

        let domain = EMAIL_DOMAINS.choose(&mut rng).copied().unwrap_or("gmail.com");
        let email = format!("{username}@{domain}");

        Self {
            username,
            nickname,
            email,
            password: generate_password(&mut rng),
        }
    }
}

/// Alphanumeric password with at least one uppercase letter, one digit
/// and one special character.
fn generate_password<R: Rng>(rng: &mut R) -> String {
    let mut password: String = (0..PASSWORD_LEN - 3)
        .map(|_| char::from(rng.sample(Alphanumeric)))
        .collect();

    password.push(rng.gen_range(b'A'..=b'Z') as char);
    password.push(rng.gen_range(b'0'..=b'9') as char);
    password.push(*PASSWORD_SPECIALS.choose(rng).unwrap_or(&'!'));
    password
}
