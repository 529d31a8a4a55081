use std::sync::Arc;

use super::common::{seeded_store, sign_in, UnavailableStore};
use crate::portal::access::AccessGate;
use crate::portal::domain::{AuthorizationContext, ReviewAccess};

#[tokio::test]
async fn signed_out_caller_is_denied() {
    let store = seeded_store();
    let gate = AccessGate::new(store);

    let ctx = gate.resolve().await;
    assert_eq!(ctx, AuthorizationContext::denied());
}

#[tokio::test]
async fn caller_without_membership_row_is_denied() {
    let store = seeded_store();
    sign_in(&store, "ghost");
    let gate = AccessGate::new(store);

    let ctx = gate.resolve().await;
    assert_eq!(ctx, AuthorizationContext::denied());
}

#[tokio::test]
async fn lookup_failure_fails_closed() {
    let gate = AccessGate::new(Arc::new(UnavailableStore));

    let ctx = gate.resolve().await;
    assert_eq!(ctx, AuthorizationContext::denied());
}

#[tokio::test]
async fn pic_counts_as_active() {
    let store = seeded_store();
    sign_in(&store, "pic");
    let gate = AccessGate::new(store);

    let ctx = gate.resolve().await;
    assert!(ctx.is_pic);
    assert!(ctx.is_active, "a PIC is always active for gating purposes");
}

#[tokio::test]
async fn active_member_is_not_a_pic() {
    let store = seeded_store();
    sign_in(&store, "tia");
    let gate = AccessGate::new(store);

    let ctx = gate.resolve().await;
    assert!(!ctx.is_pic);
    assert!(ctx.is_active);
}

#[tokio::test]
async fn prospect_holds_no_standing() {
    let store = seeded_store();
    sign_in(&store, "ann");
    let gate = AccessGate::new(store);

    let ctx = gate.resolve().await;
    assert!(!ctx.is_pic);
    assert!(!ctx.is_active);
}

#[test]
fn review_access_tags_the_pic_gate() {
    assert_eq!(
        AuthorizationContext::denied().review_access(),
        ReviewAccess::Denied
    );
    assert_eq!(
        AuthorizationContext {
            is_pic: true,
            is_active: true
        }
        .review_access(),
        ReviewAccess::Granted
    );
    // Active standing alone does not open the review roster.
    assert_eq!(
        AuthorizationContext {
            is_pic: false,
            is_active: true
        }
        .review_access(),
        ReviewAccess::Denied
    );
}
