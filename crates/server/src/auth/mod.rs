//! Shared-secret PIN checks for the free and premium tiers

pub const DEFAULT_FREE_PIN: &str = "FREEMASON";
pub const DEFAULT_PREMIUM_PIN: &str = "MASTERGUARD";

/// Access level gated by a PIN
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    Free,
    Premium,
}

/// Holds one normalized secret per tier
#[derive(Debug, Clone)]
pub struct PinPolicy {
    free: String,
    premium: String,
}

impl Default for PinPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_FREE_PIN, DEFAULT_PREMIUM_PIN)
    }
}

impl PinPolicy {
    pub fn new(free: impl AsRef<str>, premium: impl AsRef<str>) -> Self {
        Self {
            free: normalize(free.as_ref()),
            premium: normalize(premium.as_ref()),
        }
    }

    fn secret(&self, tier: Tier) -> &str {
        match tier {
            Tier::Free => &self.free,
            Tier::Premium => &self.premium,
        }
    }

    /// Case-insensitive, whitespace-trimmed comparison. An empty secret
    /// never matches.
    pub fn check(&self, tier: Tier, candidate: &str) -> bool {
        let secret = self.secret(tier);
        !secret.is_empty() && normalize(candidate) == secret
    }
}

fn normalize(pin: &str) -> String {
    pin.trim().to_uppercase()
}
