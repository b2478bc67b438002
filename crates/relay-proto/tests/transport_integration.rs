//! Integration tests for the framing layer over real async I/O.
//!
//! These tests drive `FramedRead`/`FramedWrite` over an in-memory duplex pipe
//! to check behaviour that only shows up with split reads and stream ends.

use futures_util::{SinkExt, StreamExt};
use relay_proto::{Command, Frame, LineCodec, Malformed, RelayCodec, Reply};
use tokio::io::AsyncWriteExt;
use tokio_util::codec::{FramedRead, FramedWrite};

#[tokio::test]
async fn lines_straddling_writes_are_reassembled() {
    let (mut client, server) = tokio::io::duplex(64);
    let mut reader = FramedRead::new(server, RelayCodec::new());

    client.write_all(b"HELLO-FR").await.unwrap();
    client.write_all(b"OM alice\nSE").await.unwrap();
    client.write_all(b"ND bob hi\n").await.unwrap();
    drop(client);

    assert_eq!(
        reader.next().await.unwrap().unwrap(),
        Command::Hello("alice".into())
    );
    assert_eq!(
        reader.next().await.unwrap().unwrap(),
        Command::Send {
            dest: "bob".into(),
            body: "hi".into()
        }
    );
    assert!(reader.next().await.is_none(), "expected end-of-stream");
}

#[tokio::test]
async fn end_of_stream_drops_partial_line() {
    let (mut client, server) = tokio::io::duplex(64);
    let mut reader = FramedRead::new(server, LineCodec::new());

    client.write_all(b"LIST\nSEND bob unfinished").await.unwrap();
    drop(client);

    assert_eq!(
        reader.next().await.unwrap().unwrap(),
        Frame::Line("LIST".into())
    );
    assert!(reader.next().await.is_none());
}

#[tokio::test]
async fn oversized_line_does_not_end_the_stream() {
    let (mut client, server) = tokio::io::duplex(256);
    let mut reader = FramedRead::new(server, RelayCodec::with_max_len(32));

    let long = format!("SEND bob {}\n", "x".repeat(100));
    client.write_all(long.as_bytes()).await.unwrap();
    client.write_all(b"LIST\n").await.unwrap();
    drop(client);

    assert_eq!(
        reader.next().await.unwrap().unwrap(),
        Command::Malformed(Malformed::Header)
    );
    assert_eq!(reader.next().await.unwrap().unwrap(), Command::List);
    assert!(reader.next().await.is_none());
}

#[tokio::test]
async fn replies_are_newline_terminated() {
    let (client, server) = tokio::io::duplex(256);
    let mut writer = FramedWrite::new(server, RelayCodec::new());
    let mut reader = FramedRead::new(client, LineCodec::new());

    writer.send(Reply::Hello("alice".into())).await.unwrap();
    writer
        .send(Reply::Delivery {
            from: "bob".into(),
            body: "hey there".into(),
        })
        .await
        .unwrap();
    writer.send(Reply::ListOk(Vec::new())).await.unwrap();

    let mut received = Vec::new();
    for _ in 0..3 {
        match reader.next().await.unwrap().unwrap() {
            Frame::Line(line) => received.push(line.parse::<Reply>().unwrap()),
            other => panic!("unexpected frame: {other:?}"),
        }
    }

    assert_eq!(
        received,
        vec![
            Reply::Hello("alice".into()),
            Reply::Delivery {
                from: "bob".into(),
                body: "hey there".into()
            },
            Reply::ListOk(Vec::new()),
        ]
    );
}
