//! Line server for the headless adapter
//!
//! Reads one request, applies it to the session, writes one reply, then reads
//! the next. There is no concurrency: a request is fully handled before the
//! next line is even read.

use std::io::{BufRead, Write};

use anyhow::Result;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::core::rng::RandomSource;
use crate::core::{PuzzleSession, PuzzleSnapshot, SimpleRng};
use crate::engine;
use crate::protocol::*;
use crate::types::PuzzleAction;

/// Owns a session and answers protocol lines for it.
pub struct LineServer<R = SimpleRng> {
    session: PuzzleSession<R>,
    seq: u64,
    snap: PuzzleSnapshot,
}

impl<R: RandomSource> LineServer<R> {
    pub fn new(session: PuzzleSession<R>) -> Self {
        Self {
            session,
            seq: 0,
            snap: PuzzleSnapshot::default(),
        }
    }

    pub fn session(&self) -> &PuzzleSession<R> {
        &self.session
    }

    pub fn into_session(self) -> PuzzleSession<R> {
        self.session
    }

    fn next_seq(&mut self) -> u64 {
        self.seq += 1;
        self.seq
    }

    /// Handle one input line and return the serialized reply.
    ///
    /// Blank lines are skipped and produce no reply.
    pub fn handle_line(&mut self, line: &str) -> Result<Option<String>> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(None);
        }

        let reply = match parse_message(line) {
            Ok(ParsedMessage::Observe(m)) => self.observe(Some(m.seq))?,
            Ok(ParsedMessage::Rotate(m)) => self.rotate(m)?,
            Ok(ParsedMessage::Reset(m)) => self.reset(m)?,
            Ok(ParsedMessage::Hint(m)) => self.hint(m)?,
            Ok(ParsedMessage::Unknown(m)) => {
                warn!(msg_type = %m.msg_type, seq = m.seq, "unknown message type");
                let message = format!("unknown message type: {}", m.msg_type);
                let seq = self.next_seq();
                to_line(&create_error(seq, ErrorCode::UnknownType, &message))?
            }
            Err(e) => {
                warn!(code = ?e.code(), error = %e, "rejected protocol line");
                let seq = self.next_seq();
                to_line(&create_error(seq, e.code(), &e.to_string()))?
            }
        };
        Ok(Some(reply))
    }

    /// Serve until `input` is exhausted.
    ///
    /// Lines that are not valid UTF-8 are decoded lossily and answered with
    /// an `invalid_json` error; only I/O failures end the loop.
    pub fn serve<I: BufRead, O: Write>(&mut self, mut input: I, mut output: O) -> Result<()> {
        info!("headless adapter ready");
        let mut buf = Vec::with_capacity(256);
        loop {
            buf.clear();
            if input.read_until(b'\n', &mut buf)? == 0 {
                break;
            }
            let line = String::from_utf8_lossy(&buf);
            if let Some(reply) = self.handle_line(&line)? {
                output.write_all(reply.as_bytes())?;
                output.write_all(b"\n")?;
                output.flush()?;
            }
        }
        info!(replies = self.seq, "input closed");
        Ok(())
    }

    /// Observation of the current state, unprompted or answering `request_seq`.
    pub fn observe(&mut self, request_seq: Option<u64>) -> Result<String> {
        self.session.snapshot_into(&mut self.snap);
        let seq = self.next_seq();
        to_line(&create_observation(seq, request_seq, &self.snap))
    }

    fn rotate(&mut self, m: RotateMessage) -> Result<String> {
        let applied = match m.tile_id() {
            Some(id) => self.session.apply_action(PuzzleAction::Rotate(id)),
            None => false,
        };
        debug!(tile_id = m.tile_id, applied, "rotate request");
        let completed = self.session.take_last_event().is_some();
        let seq = self.next_seq();
        to_line(&create_ack(
            seq,
            m.seq,
            AckAction::Rotate,
            applied,
            self.session.status(),
            self.session.attempts(),
            completed,
        ))
    }

    fn reset(&mut self, m: ResetMessage) -> Result<String> {
        self.session.apply_action(PuzzleAction::Reset);
        let seq = self.next_seq();
        to_line(&create_ack(
            seq,
            m.seq,
            AckAction::Reset,
            true,
            self.session.status(),
            self.session.attempts(),
            false,
        ))
    }

    fn hint(&mut self, m: HintMessage) -> Result<String> {
        let step = engine::plan(&self.session).first().copied();
        let seq = self.next_seq();
        to_line(&create_hint(
            seq,
            m.seq,
            step.map(|s| s.tile_id),
            step.map(|s| s.turns),
        ))
    }
}

fn to_line<T: Serialize>(msg: &T) -> Result<String> {
    Ok(serde_json::to_string(msg)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{PuzzleConfig, TileGrid};
    use crate::types::{WireType, TILE_COUNT};
    use serde_json::Value;

    fn reply(server: &mut LineServer, line: &str) -> Value {
        let text = server.handle_line(line).unwrap().unwrap();
        serde_json::from_str(&text).unwrap()
    }

    #[test]
    fn blank_lines_are_skipped() {
        let mut server = LineServer::new(PuzzleSession::new(1));
        assert!(server.handle_line("   ").unwrap().is_none());
    }

    #[test]
    fn seq_increases_across_replies() {
        let mut server = LineServer::new(PuzzleSession::new(1));
        let a = reply(&mut server, r#"{"type":"observe","seq":10}"#);
        let b = reply(&mut server, "garbage");
        let c = reply(&mut server, r#"{"type":"hint"}"#);
        assert_eq!(a["seq"], 1);
        assert_eq!(b["seq"], 2);
        assert_eq!(c["seq"], 3);
        assert_eq!(a["request_seq"], 10);
    }

    #[test]
    fn rotate_acks_with_attempts() {
        let mut server = LineServer::new(PuzzleSession::new(1));
        let v = reply(&mut server, r#"{"type":"rotate","seq":3,"tile_id":2}"#);
        assert_eq!(v["type"], "ack");
        assert_eq!(v["action"], "rotate");
        assert_eq!(v["applied"], true);
        assert_eq!(v["attempts"], 1);
        assert_eq!(v["request_seq"], 3);
    }

    #[test]
    fn unknown_tile_is_not_applied() {
        let mut server = LineServer::new(PuzzleSession::new(1));
        let v = reply(&mut server, r#"{"type":"rotate","tile_id":16}"#);
        assert_eq!(v["applied"], false);
        assert_eq!(v["attempts"], 0);
        assert_eq!(server.session().attempts(), 0);
    }

    #[test]
    fn completion_is_flagged_once() {
        // Every tile at 0°: seven of ten targets met. Rotating (0,3) once more
        // brings it to 90° and the count to eight.
        let grid = TileGrid::uniform(WireType::Straight, 0.0);
        let session = PuzzleSession::from_grid(PuzzleConfig::default(), SimpleRng::new(1), grid);
        let mut server = LineServer::new(session);

        let v = reply(&mut server, r#"{"type":"rotate","tile_id":3}"#);
        assert_eq!(v["status"], "complete");
        assert_eq!(v["completed"], true);

        let v = reply(&mut server, r#"{"type":"rotate","tile_id":0}"#);
        assert_eq!(v["status"], "complete");
        assert_eq!(v["completed"], false);
    }

    #[test]
    fn hint_points_at_fixable_tile() {
        let grid = TileGrid::uniform(WireType::Straight, 0.0);
        let session = PuzzleSession::from_grid(PuzzleConfig::default(), SimpleRng::new(1), grid);
        let mut server = LineServer::new(session);
        let v = reply(&mut server, r#"{"type":"hint","seq":1}"#);
        assert_eq!(v["tile_id"], 3);
        assert_eq!(v["turns"], 1);
    }

    #[test]
    fn errors_are_in_band() {
        let mut server = LineServer::new(PuzzleSession::new(1));
        let v = reply(&mut server, r#"{"type":"teleport"}"#);
        assert_eq!(v["code"], "unknown_type");
        let v = reply(&mut server, "[1,2");
        assert_eq!(v["code"], "invalid_json");
        let v = reply(&mut server, r#"{"type":"rotate"}"#);
        assert_eq!(v["code"], "invalid_command");
    }

    #[test]
    fn serve_answers_every_line() {
        let mut server = LineServer::new(PuzzleSession::new(4));
        let input = b"{\"type\":\"observe\"}\n\n{\"type\":\"reset\",\"seq\":2}\n";
        let mut out = Vec::new();
        server.serve(&input[..], &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);

        let obs: Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(obs["tiles"].as_array().unwrap().len(), TILE_COUNT);
        let ack: Value = serde_json::from_str(lines[1]).unwrap();
        assert_eq!(ack["action"], "reset");
        assert_eq!(server.session().episode_id(), 1);
    }

    #[test]
    fn serve_survives_invalid_utf8() {
        let mut server = LineServer::new(PuzzleSession::new(4));
        let mut input = b"{\"type\":\"observe\"}\n".to_vec();
        input.extend_from_slice(&[0xFF, 0xFE, b'\n']);
        input.extend_from_slice(b"{\"type\":\"hint\"}\n");
        let mut out = Vec::new();
        server.serve(&input[..], &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        let lines: Vec<Value> = text
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0]["type"], "observation");
        assert_eq!(lines[1]["type"], "error");
        assert_eq!(lines[1]["code"], "invalid_json");
        assert_eq!(lines[2]["type"], "hint");
    }

    #[test]
    fn serve_handles_missing_trailing_newline() {
        let mut server = LineServer::new(PuzzleSession::new(4));
        let mut out = Vec::new();
        server.serve(&b"{\"type\":\"hint\"}"[..], &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap().lines().count(), 1);
    }
}
