//! SEND handler.

use super::Context;
use crate::error::{HandlerError, HandlerResult};
use relay_proto::Reply;
use std::sync::Arc;
use tracing::debug;

/// Queue a DELIVERY for `dest` and acknowledge it.
///
/// The delivery is queued before `SEND-OK` is returned, so a client sending
/// to itself sees `DELIVERY` first.
pub(super) fn send(ctx: &mut Context<'_>, from: &str, dest: &str, body: String) -> HandlerResult {
    let Some(recipient) = ctx.hub.directory.lookup(dest) else {
        debug!(dest = %dest, "No such user");
        return Err(HandlerError::NoSuchUser(dest.to_owned()));
    };

    let delivery = Arc::new(Reply::Delivery {
        from: from.to_owned(),
        body,
    });

    recipient
        .deliver(delivery)
        .map_err(|source| HandlerError::Undeliverable {
            dest: dest.to_owned(),
            source,
        })?;

    ctx.hub.stats.message_delivered();
    Ok(Reply::SendOk)
}
