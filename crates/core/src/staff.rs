//! Staff directory rules: name validation, email normalization, and the
//! first-claim-wins precondition for binding an account to a staff entry.

use crate::error::CoreError;

/// Normalize an email for storage and comparison: trimmed, lowercased.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Validate a staff member's display name (managers create entries with
/// name + area only).
pub fn validate_name(name: &str) -> Result<String, CoreError> {
    let clean = name.trim();
    if clean.is_empty() {
        return Err(CoreError::Validation("Staff name must not be empty".into()));
    }
    Ok(clean.to_string())
}

/// Check whether an account may claim a staff entry.
///
/// A claim only proceeds when the entry is currently unclaimed. Re-claiming
/// by the same account is a no-op (idempotent); a claim by a different
/// account is a conflict. There is no reassignment operation.
pub fn check_claim(current_claim_uid: &str, claiming_uid: &str) -> Result<ClaimOutcome, CoreError> {
    if claiming_uid.is_empty() {
        return Err(CoreError::Validation("Claiming account id is empty".into()));
    }
    if current_claim_uid.is_empty() {
        Ok(ClaimOutcome::Claim)
    } else if current_claim_uid == claiming_uid {
        Ok(ClaimOutcome::AlreadyOwn)
    } else {
        Err(CoreError::Conflict(
            "Staff entry is already claimed by another account".into(),
        ))
    }
}

/// Result of a claim precondition check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClaimOutcome {
    /// Entry is unclaimed; proceed with the claim.
    Claim,
    /// Entry is already claimed by this very account; nothing to do.
    AlreadyOwn,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_email() {
        assert_eq!(normalize_email("  Ana@Example.COM "), "ana@example.com");
        assert_eq!(normalize_email(""), "");
    }

    #[test]
    fn rejects_blank_name() {
        assert!(validate_name("   ").is_err());
        assert_eq!(validate_name("  Ana ").unwrap(), "Ana");
    }

    #[test]
    fn unclaimed_entry_can_be_claimed() {
        assert_eq!(check_claim("", "u1").unwrap(), ClaimOutcome::Claim);
    }

    #[test]
    fn reclaim_by_same_account_is_noop() {
        assert_eq!(check_claim("u1", "u1").unwrap(), ClaimOutcome::AlreadyOwn);
    }

    #[test]
    fn claim_by_other_account_conflicts() {
        assert!(matches!(
            check_claim("u1", "u2"),
            Err(CoreError::Conflict(_))
        ));
    }

    #[test]
    fn empty_claimer_is_invalid() {
        assert!(matches!(
            check_claim("", ""),
            Err(CoreError::Validation(_))
        ));
    }
}
