//! Route-level authorization predicates.
//!
//! Guards are pure functions over an already-validated [`AuthContext`]; they
//! never touch the store. Everything they consult was loaded by the
//! credential validator on the same request.

use crate::middleware::auth::AuthContext;
use crate::utils::errors::AppError;

/// Permits admins, or a user operating on their own record.
pub fn require_self_or_admin(ctx: &AuthContext, requested_user_id: i64) -> Result<(), AppError> {
    if ctx.is_admin || ctx.user_id == requested_user_id {
        return Ok(());
    }

    Err(AppError::forbidden(
        "You are not allowed to access this user",
    ))
}

/// Permits admins, or a teacher of the requested course.
pub fn require_course_teacher_or_admin(
    ctx: &AuthContext,
    requested_course_id: i64,
) -> Result<(), AppError> {
    if ctx.is_admin || ctx.teaches_course_ids.contains(&requested_course_id) {
        return Ok(());
    }

    Err(AppError::forbidden(
        "You are not allowed to manage this course",
    ))
}

/// Permits admins only. Used by routes with no ownership dimension.
pub fn require_admin(ctx: &AuthContext) -> Result<(), AppError> {
    if ctx.is_admin {
        return Ok(());
    }

    Err(AppError::forbidden("Administrator privileges required"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn context(user_id: i64, is_admin: bool, teaches: &[i64]) -> AuthContext {
        AuthContext {
            token_id: 1,
            user_id,
            is_admin,
            teaches_course_ids: teaches.iter().copied().collect::<HashSet<_>>(),
        }
    }

    #[test]
    fn admin_may_access_any_user() {
        let ctx = context(1, true, &[]);
        assert!(require_self_or_admin(&ctx, 1).is_ok());
        assert!(require_self_or_admin(&ctx, 999).is_ok());
    }

    #[test]
    fn non_admin_may_only_access_self() {
        let ctx = context(7, false, &[]);
        assert!(require_self_or_admin(&ctx, 7).is_ok());
        assert!(require_self_or_admin(&ctx, 8).is_err());
    }

    #[test]
    fn admin_may_manage_any_course() {
        let ctx = context(1, true, &[]);
        assert!(require_course_teacher_or_admin(&ctx, 55).is_ok());
    }

    #[test]
    fn teacher_may_only_manage_taught_courses() {
        let ctx = context(7, false, &[3, 5]);
        assert!(require_course_teacher_or_admin(&ctx, 3).is_ok());
        assert!(require_course_teacher_or_admin(&ctx, 5).is_ok());
        assert!(require_course_teacher_or_admin(&ctx, 4).is_err());
    }

    #[test]
    fn student_with_no_courses_is_forbidden() {
        let ctx = context(7, false, &[]);
        assert!(require_course_teacher_or_admin(&ctx, 1).is_err());
    }

    #[test]
    fn require_admin_rejects_non_admins() {
        assert!(require_admin(&context(1, true, &[])).is_ok());
        assert!(require_admin(&context(1, false, &[])).is_err());
    }
}
