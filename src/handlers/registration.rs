//! HELLO-FROM handler.

use super::Context;
use crate::error::{HandlerError, HandlerResult};
use crate::state::Claim;
use relay_proto::Reply;
use tracing::{debug, info};

/// Claim `handle` for the session.
pub(super) fn hello(ctx: &mut Context<'_>, handle: String) -> HandlerResult {
    match ctx.hub.directory.claim(&handle, ctx.session.outbound()) {
        Claim::Granted => {
            ctx.session.authenticate(handle.clone());
            info!(
                handle = %handle,
                users = ctx.hub.directory.len(),
                "Client authenticated"
            );
            Ok(Reply::Hello(handle))
        }
        Claim::InUse => {
            debug!(handle = %handle, "Handle already claimed");
            Err(HandlerError::HandleInUse(handle))
        }
        Claim::Full => {
            debug!(
                capacity = ctx.hub.directory.capacity(),
                "Rejecting claim, server full"
            );
            Err(HandlerError::ServerFull)
        }
    }
}
