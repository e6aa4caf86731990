use crate::consts::{FREE_PLAN, FREE_PLAN_CREDITS, FREE_PLAN_MESSAGES};
use garde::Validate;

/// Local stand-in for the signed-in user's record.
#[derive(Debug, Clone, PartialEq, Eq, Validate)]
pub struct UserProfile {
    #[garde(length(min = 1, max = 256))]
    pub name: String,
    #[garde(email)]
    pub email: String,
    #[garde(length(min = 1, max = 32))]
    pub plan: String,
    #[garde(skip)]
    pub remaining_msg: u32,
    #[garde(skip)]
    pub credits: u32,
}

impl UserProfile {
    pub fn free(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            plan: FREE_PLAN.to_string(),
            remaining_msg: FREE_PLAN_MESSAGES,
            credits: FREE_PLAN_CREDITS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn free_profile_is_valid() {
        let profile = UserProfile::free("Ada", "ada@example.com");
        assert!(profile.validate().is_ok());
        assert_eq!(profile.remaining_msg, 5);
        assert_eq!(profile.credits, 1000);
    }

    #[test]
    fn rejects_bad_email_and_empty_name() {
        assert!(UserProfile::free("Ada", "not-an-email").validate().is_err());
        assert!(UserProfile::free("", "ada@example.com").validate().is_err());
    }
}
