use bcrypt::{hash, verify};

#[derive(Debug, thiserror::Error)]
#[error("Failed to hash password: {0}")]
pub struct PasswordError(#[from] bcrypt::BcryptError);

/// Plaintext behind the stand-in hash checked for unknown accounts
const DUMMY_PASSWORD: &str = "catalog-api-no-such-user";

/// Salted one-way password hashing backed by bcrypt.
#[derive(Debug, Clone)]
pub struct PasswordHasher {
    cost: u32,
    dummy_hash: String,
}

impl PasswordHasher {
    pub fn new(cost: u32) -> Self {
        let dummy_hash = hash(DUMMY_PASSWORD, cost).unwrap_or_else(|e| {
            tracing::warn!("Could not precompute dummy password hash: {}", e);
            String::new()
        });

        Self { cost, dummy_hash }
    }

    pub fn hash(&self, password: &str) -> Result<String, PasswordError> {
        Ok(hash(password, self.cost)?)
    }

    /// A malformed stored hash verifies as `false`.
    pub fn verify(&self, password: &str, hashed: &str) -> bool {
        verify(password, hashed).unwrap_or(false)
    }

    /// Run bcrypt against a stand-in hash when no account matches. Always `false`.
    pub fn verify_missing(&self, password: &str) -> bool {
        let _ = self.verify(password, &self.dummy_hash);
        false
    }
}
