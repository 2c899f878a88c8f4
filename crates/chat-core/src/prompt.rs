//! Prompt fingerprinting for tracking prompt versions in logs.

use sha2::{Digest, Sha256};

/// Compute a stable SHA-256 fingerprint for a prompt string.
pub fn hash_prompt(prompt: &str) -> String {
    let digest = Sha256::digest(prompt.as_bytes());
    digest.iter().map(|b| format!("{b:02x}")).collect()
}

#[cfg(test)]
mod tests {
    use super::hash_prompt;

    #[test]
    fn test_fingerprint_is_stable() {
        let a = hash_prompt("you are a support assistant");
        let b = hash_prompt("you are a support assistant");
        let c = hash_prompt("you are a routing assistant");

        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(a.len(), 64);
    }
}
