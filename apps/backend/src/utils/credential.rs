//! Agent bearer token minting.

use rand::Rng;

const ALPHABET: &[u8] = b"0123456789abcdefghjkmnpqrstvwxyz";
const TOKEN_LEN: usize = 40;

/// Mints a random bearer token from a Crockford-style base32 alphabet
/// (no ambiguous characters, URL-safe).
pub fn mint_token() -> String {
    let mut rng = rand::rng();
    (0..TOKEN_LEN)
        .map(|_| {
            let idx = rng.random_range(0..ALPHABET.len());
            ALPHABET[idx] as char
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokens_have_expected_shape() {
        let token = mint_token();
        assert_eq!(token.len(), TOKEN_LEN);
        assert!(token.bytes().all(|b| ALPHABET.contains(&b)));
    }

    #[test]
    fn tokens_are_unique_enough() {
        let a = mint_token();
        let b = mint_token();
        assert_ne!(a, b);
    }
}
