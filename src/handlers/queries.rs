//! LIST handler.

use super::Context;
use relay_proto::Reply;

/// Snapshot of every claimed handle, the requester included.
pub(super) fn list(ctx: &Context<'_>) -> Reply {
    Reply::ListOk(ctx.hub.directory.handles())
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{hub, session};
    use super::*;

    #[test]
    fn test_list_contains_everyone() {
        let hub = hub(16);
        let (mut alice, _rx1) = session(&hub);
        let (bob, _rx2) = session(&hub);

        hub.directory.claim("alice", alice.outbound());
        hub.directory.claim("bob", bob.outbound());

        let reply = list(&Context::new(&hub, &mut alice));
        assert_eq!(reply, Reply::ListOk(vec!["alice".into(), "bob".into()]));
    }

    #[test]
    fn test_list_after_release() {
        let hub = hub(16);
        let (mut alice, _rx1) = session(&hub);
        let (bob, _rx2) = session(&hub);

        hub.directory.claim("alice", alice.outbound());
        hub.directory.claim("bob", bob.outbound());
        hub.directory.release("bob", bob.id());

        let reply = list(&Context::new(&hub, &mut alice));
        assert_eq!(reply, Reply::ListOk(vec!["alice".into()]));
    }
}
