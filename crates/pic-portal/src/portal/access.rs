use std::sync::Arc;

use tracing::warn;

use super::domain::{AuthorizationContext, MembershipFlags};
use super::store::PortalStore;

/// Resolves the signed-in caller into authorization flags.
///
/// Resolution never surfaces an error: an absent identity, a missing
/// membership row, and a failed lookup all collapse to the denied context.
pub struct AccessGate<S> {
    store: Arc<S>,
}

impl<S> AccessGate<S>
where
    S: PortalStore,
{
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    pub async fn resolve(&self) -> AuthorizationContext {
        let caller = match self.store.current_caller().await {
            Ok(Some(caller)) => caller,
            Ok(None) => return AuthorizationContext::denied(),
            Err(err) => {
                warn!(error = %err, "caller identity lookup failed; treating as signed out");
                return AuthorizationContext::denied();
            }
        };

        match self.store.membership_flags(&caller.member_id).await {
            Ok(Some(flags)) => context_from_flags(flags),
            Ok(None) => {
                warn!(member = %caller.member_id.0, "no membership row for signed-in caller");
                AuthorizationContext::denied()
            }
            Err(err) => {
                warn!(
                    member = %caller.member_id.0,
                    error = %err,
                    "membership lookup failed; denying access"
                );
                AuthorizationContext::denied()
            }
        }
    }
}

/// A PIC is always considered active for gating purposes. The conflation is
/// documented portal behavior, not an oversight.
fn context_from_flags(flags: MembershipFlags) -> AuthorizationContext {
    AuthorizationContext {
        is_pic: flags.is_pic,
        is_active: flags.is_active || flags.is_pic,
    }
}
