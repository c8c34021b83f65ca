//! CLI channel — interactive terminal-based chat.
//!
//! Reads visitor lines from stdin and prints replies to stdout.
//! Used by `folio chat` interactive mode.

use async_trait::async_trait;
use folio_core::channel::{Channel, ChannelId, ChannelMessage};
use folio_core::error::ChannelError;
use tokio::io::{self, AsyncBufRead, AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;

const EXIT_COMMANDS: [&str; 5] = ["exit", "quit", "/exit", "/quit", ":q"];

/// Interactive CLI channel for terminal-based chat.
pub struct CliChannel {
    id: ChannelId,
}

impl CliChannel {
    pub fn new() -> Self {
        Self {
            id: ChannelId("cli".into()),
        }
    }
}

impl Default for CliChannel {
    fn default() -> Self {
        Self::new()
    }
}

/// Forward lines from `reader` until EOF, an exit command, or the receiver goes away.
/// Blank lines are skipped; everything else is forwarded as typed.
async fn pump_lines<R>(
    reader: R,
    channel_id: ChannelId,
    tx: mpsc::Sender<Result<ChannelMessage, ChannelError>>,
) where
    R: AsyncBufRead + Unpin,
{
    let mut lines = reader.lines();

    loop {
        match lines.next_line().await {
            Ok(Some(line)) => {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }
                if EXIT_COMMANDS.contains(&trimmed) {
                    break;
                }

                let msg = ChannelMessage {
                    channel_id: channel_id.clone(),
                    sender_id: "local_user".into(),
                    content: line,
                    chat_id: "cli_session".into(),
                };

                if tx.send(Ok(msg)).await.is_err() {
                    break;
                }
            }
            Ok(None) => break, // EOF (Ctrl+D)
            Err(e) => {
                let _ = tx.send(Err(ChannelError::ConnectionLost(e.to_string()))).await;
                break;
            }
        }
    }
}

/// Print an assistant reply, one prefixed line per line of text.
fn write_reply<W: std::io::Write>(out: &mut W, content: &str) -> Result<(), ChannelError> {
    let delivery_failed = |e: std::io::Error| ChannelError::DeliveryFailed {
        channel: "cli".into(),
        reason: e.to_string(),
    };
    for line in content.lines() {
        writeln!(out, "  Assistant > {line}").map_err(delivery_failed)?;
    }
    writeln!(out).map_err(delivery_failed)?;
    out.flush().map_err(delivery_failed)
}

#[async_trait]
impl Channel for CliChannel {
    fn name(&self) -> &str {
        "cli"
    }

    fn id(&self) -> &ChannelId {
        &self.id
    }

    async fn start(
        &self,
    ) -> Result<mpsc::Receiver<Result<ChannelMessage, ChannelError>>, ChannelError> {
        let (tx, rx) = mpsc::channel(32);
        let channel_id = self.id.clone();

        tokio::spawn(async move {
            pump_lines(BufReader::new(io::stdin()), channel_id, tx).await;
        });

        Ok(rx)
    }

    async fn send(&self, _chat_id: &str, content: &str) -> Result<(), ChannelError> {
        write_reply(&mut std::io::stdout().lock(), content)
    }

    async fn send_typing(&self, _chat_id: &str, composing: bool) -> Result<(), ChannelError> {
        if composing {
            eprint!("  Typing...");
        } else {
            eprint!("\r           \r");
        }
        Ok(())
    }

    fn is_allowed(&self, _sender_id: &str) -> bool {
        true // local user
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_channel_properties() {
        let ch = CliChannel::new();
        assert_eq!(ch.name(), "cli");
        assert_eq!(ch.id().0, "cli");
        assert!(ch.is_allowed("anyone"));
    }

    #[tokio::test]
    async fn pump_skips_blank_and_stops_at_exit() {
        let input: &[u8] = b"hello\n\n   \n  what's your stack?  \nquit\nnever read\n";
        let (tx, mut rx) = mpsc::channel(8);

        pump_lines(input, ChannelId("cli".into()), tx).await;

        let first = rx.recv().await.unwrap().unwrap();
        assert_eq!(first.content, "hello");
        let second = rx.recv().await.unwrap().unwrap();
        assert_eq!(second.content, "  what's your stack?  ");
        assert!(rx.recv().await.is_none());
    }

    #[test]
    fn reply_lines_are_prefixed() {
        let mut out = Vec::new();
        write_reply(&mut out, "first\nsecond").unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "  Assistant > first\n  Assistant > second\n\n"
        );
    }

    struct ClosedPipe;

    impl std::io::Write for ClosedPipe {
        fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
            Err(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "stdout closed"))
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn closed_stdout_is_delivery_failure() {
        let err = write_reply(&mut ClosedPipe, "hi").unwrap_err();
        assert!(matches!(
            err,
            ChannelError::DeliveryFailed { ref channel, ref reason }
                if channel == "cli" && reason.contains("stdout closed")
        ));
    }
}
