//! Random password generation for new accounts

use rand::Rng;

/// Alphabet the generator draws from
pub const PASSWORD_CHARSET: &[u8] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789!@#$%^&*";

/// Length of generated passwords
pub const PASSWORD_LENGTH: usize = 16;

/// Generate a password of [`PASSWORD_LENGTH`] characters
pub fn generate_password() -> String {
    generate_password_with(&mut rand::thread_rng(), PASSWORD_LENGTH)
}

/// Generate a password of `length` characters from the given RNG
pub fn generate_password_with<R: Rng + ?Sized>(rng: &mut R, length: usize) -> String {
    (0..length)
        .map(|_| {
            let idx = rng.gen_range(0..PASSWORD_CHARSET.len());
            PASSWORD_CHARSET[idx] as char
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_length_and_alphabet() {
        let password = generate_password();
        assert_eq!(password.len(), PASSWORD_LENGTH);
        assert!(password.bytes().all(|b| PASSWORD_CHARSET.contains(&b)));
    }

    #[test]
    fn test_seeded_generation_is_reproducible() {
        let a = generate_password_with(&mut StdRng::seed_from_u64(7), 16);
        let b = generate_password_with(&mut StdRng::seed_from_u64(7), 16);
        assert_eq!(a, b);
    }

    #[test]
    fn test_passwords_differ() {
        // 70^16 possibilities; a collision here means the RNG is not used
        assert_ne!(generate_password(), generate_password());
    }
}
