//! Configuration for the account service

/// Configuration for the account service
#[derive(Debug, Clone)]
pub struct AccountServiceConfig {
    /// Bcrypt work factor for password hashing
    pub bcrypt_cost: u32,
}

impl Default for AccountServiceConfig {
    fn default() -> Self {
        Self {
            bcrypt_cost: bcrypt::DEFAULT_COST,
        }
    }
}

impl AccountServiceConfig {
    /// Low-cost configuration for tests
    pub fn for_tests() -> Self {
        Self {
            bcrypt_cost: 4, // bcrypt minimum, keeps test suites fast
        }
    }
}
