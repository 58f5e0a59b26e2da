// src/session.rs
use std::fmt;

use uuid::Uuid;

const PREFIX: &str = "session_";
const RANDOM_LEN: usize = 13;
const ALPHABET: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Correlation token sent with every request. Opaque to the widget.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SessionId(String);

impl SessionId {
    pub fn generate() -> Self {
        let mut bits = random_bits(Uuid::new_v4());
        let mut id = String::with_capacity(PREFIX.len() + RANDOM_LEN);
        id.push_str(PREFIX);
        for _ in 0..RANDOM_LEN {
            id.push(ALPHABET[(bits % 36) as usize] as char);
            bits /= 36;
        }
        Self(id)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// The 110 bits of a v4 uuid below the variant and above the version field.
///
/// 13 base-36 digits need about 68 of them.
fn random_bits(uuid: Uuid) -> u128 {
    let raw = uuid.as_u128();
    let low = raw & ((1 << 62) - 1);
    let high = raw >> 80;
    low | (high << 62)
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
