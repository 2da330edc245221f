//! Authorization policy shared by every Owned Resource handler.
//!
//! Two pure decisions: who may create catalog entries at all, and who may
//! mutate an existing entry. Callers check existence first so that a missing
//! record always surfaces as 404, never as a 403 that would leak ownership.

use crate::errors::ApiError;
use crate::models::UserAccount;

/// Create gate: only ADMIN, SUPER_ADMIN or MINI_ADMIN accounts may create
/// Owned Resources.
pub fn require_staff(user: &UserAccount) -> Result<(), ApiError> {
    if user.role().is_staff() {
        Ok(())
    } else {
        Err(ApiError::Forbidden(
            "Admin or Mini-Admin access required".to_string(),
        ))
    }
}

/// Ownership-or-admin check: mutation is allowed iff the caller is admin-grade
/// or is the recorded creator of the resource. Independent of the create gate.
pub fn authorize_mutation(user: &UserAccount, owner_id: i32) -> Result<(), ApiError> {
    if user.role().is_admin() || user.user_id == owner_id {
        Ok(())
    } else {
        Err(ApiError::Forbidden(
            "You can only modify your own records".to_string(),
        ))
    }
}
