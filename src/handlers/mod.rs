//! Request handlers.
//!
//! [`dispatch`] routes a parsed [`Command`] according to the session's
//! authentication state and returns the reply for the requesting client.
//! Handlers never write to sockets; deliveries to other clients go through
//! their [`Outbound`](crate::state::Outbound) queues.
//!
//! | State           | Request            | Outcome                         |
//! |-----------------|--------------------|---------------------------------|
//! | unauthenticated | `HELLO-FROM`       | `HELLO` / `IN-USE` / `BUSY`     |
//! | unauthenticated | bad `HELLO-FROM`   | `BAD-RQST-BODY`                 |
//! | unauthenticated | anything else      | `BAD-RQST-HDR`                  |
//! | authenticated   | `LIST`             | `LIST-OK`                       |
//! | authenticated   | `SEND`             | `SEND-OK` / `BAD-DEST-USER`     |
//! | authenticated   | bad `SEND`         | `BAD-RQST-BODY`                 |
//! | authenticated   | anything else      | `BAD-RQST-HDR`                  |

mod messaging;
mod queries;
mod registration;

use crate::error::{HandlerError, HandlerResult};
use crate::state::{Hub, Session};
use relay_proto::{Command, Malformed, Verb};

/// Everything a handler may touch while serving one request.
pub struct Context<'a> {
    pub hub: &'a Hub,
    pub session: &'a mut Session,
}

impl<'a> Context<'a> {
    pub fn new(hub: &'a Hub, session: &'a mut Session) -> Self {
        Self { hub, session }
    }
}

/// Route a request and produce the reply for the requester.
pub fn dispatch(ctx: &mut Context<'_>, command: Command) -> HandlerResult {
    let Some(handle) = ctx.session.handle().map(str::to_owned) else {
        return dispatch_unauthenticated(ctx, command);
    };

    match command {
        Command::List => Ok(queries::list(ctx)),
        Command::Send { dest, body } => messaging::send(ctx, &handle, &dest, body),
        Command::Malformed(Malformed::Body(Verb::Send)) => {
            Err(HandlerError::MalformedBody(Verb::Send))
        }
        Command::Hello(_) | Command::Malformed(Malformed::Body(Verb::HelloFrom)) => {
            Err(HandlerError::AlreadyAuthenticated)
        }
        Command::Malformed(_) => Err(HandlerError::UnknownCommand),
    }
}

fn dispatch_unauthenticated(ctx: &mut Context<'_>, command: Command) -> HandlerResult {
    match command {
        Command::Hello(handle) => registration::hello(ctx, handle),
        Command::Malformed(Malformed::Body(Verb::HelloFrom)) => {
            Err(HandlerError::MalformedBody(Verb::HelloFrom))
        }
        Command::Malformed(Malformed::Header) => Err(HandlerError::UnknownCommand),
        Command::List | Command::Send { .. } | Command::Malformed(Malformed::Body(_)) => {
            Err(HandlerError::NotAuthenticated)
        }
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::{hub, session};
    use super::*;
    use relay_proto::Reply;

    fn reply(hub: &Hub, session: &mut Session, line: &str) -> Reply {
        let mut ctx = Context::new(hub, session);
        match dispatch(&mut ctx, Command::parse(line)) {
            Ok(reply) => reply,
            Err(err) => err.to_reply(),
        }
    }

    #[test]
    fn test_unauthenticated_table() {
        let hub = hub(16);
        let (mut s, _rx) = session(&hub);

        assert_eq!(reply(&hub, &mut s, "LIST"), Reply::BadRequestHeader);
        assert_eq!(reply(&hub, &mut s, "SEND bob hi"), Reply::BadRequestHeader);
        assert_eq!(reply(&hub, &mut s, "SEND bob"), Reply::BadRequestHeader);
        assert_eq!(reply(&hub, &mut s, "WHOAMI"), Reply::BadRequestHeader);
        assert_eq!(reply(&hub, &mut s, ""), Reply::BadRequestHeader);
        assert_eq!(reply(&hub, &mut s, "HELLO-FROM al#ice"), Reply::BadRequestBody);
        assert_eq!(reply(&hub, &mut s, "HELLO-FROM"), Reply::BadRequestBody);
        assert!(!s.is_authenticated());

        assert_eq!(
            reply(&hub, &mut s, "HELLO-FROM alice"),
            Reply::Hello("alice".into())
        );
        assert!(s.is_authenticated());
    }

    #[test]
    fn test_authenticated_table() {
        let hub = hub(16);
        let (mut s, _rx) = session(&hub);
        reply(&hub, &mut s, "HELLO-FROM alice");

        assert_eq!(reply(&hub, &mut s, "HELLO-FROM bob"), Reply::BadRequestHeader);
        assert_eq!(reply(&hub, &mut s, "HELLO-FROM b#b"), Reply::BadRequestHeader);
        assert_eq!(reply(&hub, &mut s, "FOO"), Reply::BadRequestHeader);
        assert_eq!(reply(&hub, &mut s, "SEND bob"), Reply::BadRequestBody);
        assert_eq!(reply(&hub, &mut s, "SEND bob "), Reply::BadRequestBody);
        assert_eq!(reply(&hub, &mut s, "SEND"), Reply::BadRequestBody);
        assert_eq!(reply(&hub, &mut s, "SEND bob hi"), Reply::BadDestUser);
        assert_eq!(
            reply(&hub, &mut s, "LIST"),
            Reply::ListOk(vec!["alice".into()])
        );

        // Still alice after the rejected second HELLO-FROM.
        assert_eq!(s.handle(), Some("alice"));
        assert_eq!(hub.directory.len(), 1);
    }

    #[test]
    fn test_list_trailing_content_ignored() {
        let hub = hub(16);
        let (mut s, _rx) = session(&hub);
        reply(&hub, &mut s, "HELLO-FROM alice");

        assert_eq!(
            reply(&hub, &mut s, "LIST everyone please"),
            Reply::ListOk(vec!["alice".into()])
        );
    }
}
