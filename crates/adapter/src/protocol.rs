//! Protocol module - JSON message types for the headless adapter
//!
//! Every line is one JSON object with a `type` tag. Client messages carry an
//! optional `seq` that the reply echoes as `request_seq`; server messages
//! carry their own monotonically increasing `seq` and a `ts` in milliseconds.

use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};

use crate::core::{PuzzleSnapshot, TileSnapshot};
use crate::types::{SessionPhase, SessionStatus, TileId, Verdict, WireType, TILE_COUNT};

// ============== Client -> Game Messages ==============

/// Observe request (no payload)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObserveMessage {
    #[serde(default)]
    pub seq: u64,
}

/// Rotate one tile a quarter turn clockwise
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RotateMessage {
    #[serde(default)]
    pub seq: u64,
    /// Wider than `TileId` so out-of-range ids reach the session as no-ops
    /// instead of failing to parse.
    pub tile_id: u32,
}

impl RotateMessage {
    /// The id as a `TileId`, if it fits.
    pub fn tile_id(&self) -> Option<TileId> {
        TileId::try_from(self.tile_id).ok()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResetMessage {
    #[serde(default)]
    pub seq: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HintMessage {
    #[serde(default)]
    pub seq: u64,
}

// ============== Game -> Client Messages ==============

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObservationType {
    #[serde(rename = "observation")]
    Observation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AckType {
    #[serde(rename = "ack")]
    Ack,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HintType {
    #[serde(rename = "hint")]
    Hint,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorType {
    #[serde(rename = "error")]
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorCode {
    /// Line is not a JSON object
    #[serde(rename = "invalid_json")]
    InvalidJson,
    /// `type` names no known message
    #[serde(rename = "unknown_type")]
    UnknownType,
    /// Known `type`, but fields are missing or malformed
    #[serde(rename = "invalid_command")]
    InvalidCommand,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AckAction {
    #[serde(rename = "rotate")]
    Rotate,
    #[serde(rename = "reset")]
    Reset,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusLower {
    InProgress,
    Complete,
}

impl From<SessionStatus> for StatusLower {
    fn from(s: SessionStatus) -> Self {
        match s {
            SessionStatus::InProgress => StatusLower::InProgress,
            SessionStatus::Complete => StatusLower::Complete,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PhaseLower {
    Playing,
    Complete,
}

impl From<SessionPhase> for PhaseLower {
    fn from(p: SessionPhase) -> Self {
        match p {
            SessionPhase::Playing => PhaseLower::Playing,
            SessionPhase::Complete => PhaseLower::Complete,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WireLower {
    Straight,
    Corner,
}

impl From<WireType> for WireLower {
    fn from(w: WireType) -> Self {
        match w {
            WireType::Straight => WireLower::Straight,
            WireType::Corner => WireLower::Corner,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerdictLower {
    Correct,
    Incorrect,
    NotApplicable,
}

impl From<Verdict> for VerdictLower {
    fn from(v: Verdict) -> Self {
        match v {
            Verdict::Correct => VerdictLower::Correct,
            Verdict::Incorrect => VerdictLower::Incorrect,
            Verdict::NotApplicable => VerdictLower::NotApplicable,
        }
    }
}

/// One tile as seen by a client
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TileObservation {
    pub id: TileId,
    pub row: u8,
    pub col: u8,
    pub wire: WireLower,
    pub rotation: f64,
    pub selected: bool,
    pub verdict: VerdictLower,
    pub powered: bool,
}

impl From<&TileSnapshot> for TileObservation {
    fn from(t: &TileSnapshot) -> Self {
        Self {
            id: t.id,
            row: t.position.row,
            col: t.position.col,
            wire: t.wire.into(),
            rotation: t.rotation,
            selected: t.selected,
            verdict: t.verdict.into(),
            powered: t.powered,
        }
    }
}

/// Full puzzle state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObservationMessage {
    #[serde(rename = "type")]
    pub msg_type: ObservationType,
    pub seq: u64,
    pub ts: u64,
    /// Client `seq` this answers; absent when sent unprompted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_seq: Option<u64>,
    pub episode_id: u32,
    pub attempts: u32,
    pub status: StatusLower,
    pub phase: PhaseLower,
    pub correct: u8,
    pub required: u8,
    pub rotation_mode: String,
    pub tiles: [TileObservation; TILE_COUNT],
}

/// Result of a rotate or reset
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AckMessage {
    #[serde(rename = "type")]
    pub msg_type: AckType,
    pub seq: u64,
    pub ts: u64,
    pub request_seq: u64,
    pub action: AckAction,
    /// False when a rotate named no tile
    pub applied: bool,
    pub status: StatusLower,
    pub attempts: u32,
    /// This action completed the circuit for the first time in the episode
    pub completed: bool,
}

/// Suggested next rotation; `tile_id` is null when no required tile can be
/// fixed by rotating.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HintReply {
    #[serde(rename = "type")]
    pub msg_type: HintType,
    pub seq: u64,
    pub ts: u64,
    pub request_seq: u64,
    pub tile_id: Option<TileId>,
    pub turns: Option<u8>,
}

/// Error message
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorMessage {
    #[serde(rename = "type")]
    pub msg_type: ErrorType,
    pub seq: u64,
    pub ts: u64,
    pub code: ErrorCode,
    pub message: String,
}

// ============== Message Parsing ==============

/// Parsed incoming message
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedMessage {
    Observe(ObserveMessage),
    Rotate(RotateMessage),
    Reset(ResetMessage),
    Hint(HintMessage),
    Unknown(UnknownMessage),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownMessage {
    pub seq: u64,
    pub msg_type: String,
}

/// Why a line could not be turned into a [`ParsedMessage`]
#[derive(Debug, Display, Error)]
pub enum ParseError {
    #[display("invalid json: {_0}")]
    Json(#[error(source)] serde_json::Error),
    #[display("invalid command: {_0}")]
    Command(#[error(source)] serde_json::Error),
}

impl ParseError {
    pub fn code(&self) -> ErrorCode {
        match self {
            ParseError::Json(_) => ErrorCode::InvalidJson,
            ParseError::Command(_) => ErrorCode::InvalidCommand,
        }
    }
}

const KNOWN_TYPES: [&str; 4] = ["observe", "rotate", "reset", "hint"];

/// Parse one protocol line
pub fn parse_message(json: &str) -> Result<ParsedMessage, ParseError> {
    #[derive(Debug, Deserialize)]
    #[serde(tag = "type")]
    enum InboundMessage {
        #[serde(rename = "observe")]
        Observe(ObserveMessage),
        #[serde(rename = "rotate")]
        Rotate(RotateMessage),
        #[serde(rename = "reset")]
        Reset(ResetMessage),
        #[serde(rename = "hint")]
        Hint(HintMessage),
    }

    match serde_json::from_str::<InboundMessage>(json) {
        Ok(InboundMessage::Observe(m)) => Ok(ParsedMessage::Observe(m)),
        Ok(InboundMessage::Rotate(m)) => Ok(ParsedMessage::Rotate(m)),
        Ok(InboundMessage::Reset(m)) => Ok(ParsedMessage::Reset(m)),
        Ok(InboundMessage::Hint(m)) => Ok(ParsedMessage::Hint(m)),
        Err(e) => {
            // An unknown type is reported in-band, not as a parse failure.
            #[derive(Debug, Deserialize)]
            struct Envelope {
                #[serde(rename = "type")]
                msg_type: Option<String>,
                seq: Option<u64>,
            }
            let envelope = serde_json::from_str::<Envelope>(json).map_err(ParseError::Json)?;
            let msg_type = envelope.msg_type.unwrap_or_default();
            if KNOWN_TYPES.contains(&msg_type.as_str()) {
                return Err(ParseError::Command(e));
            }
            Ok(ParsedMessage::Unknown(UnknownMessage {
                seq: envelope.seq.unwrap_or(0),
                msg_type,
            }))
        }
    }
}

// ============== Utility Functions ==============

/// Build an observation from a snapshot
pub fn create_observation(
    seq: u64,
    request_seq: Option<u64>,
    snap: &PuzzleSnapshot,
) -> ObservationMessage {
    let mut tiles = [TileObservation::from(&snap.tiles[0]); TILE_COUNT];
    for (out, tile) in tiles.iter_mut().zip(snap.tiles.iter()) {
        *out = TileObservation::from(tile);
    }
    ObservationMessage {
        msg_type: ObservationType::Observation,
        seq,
        ts: current_timestamp_ms(),
        request_seq,
        episode_id: snap.episode_id,
        attempts: snap.attempts,
        status: snap.status.into(),
        phase: snap.phase.into(),
        correct: snap.correct,
        required: snap.required,
        rotation_mode: snap.rotation_mode.as_str().to_string(),
        tiles,
    }
}

/// Create an acknowledgment
pub fn create_ack(
    seq: u64,
    request_seq: u64,
    action: AckAction,
    applied: bool,
    status: SessionStatus,
    attempts: u32,
    completed: bool,
) -> AckMessage {
    AckMessage {
        msg_type: AckType::Ack,
        seq,
        ts: current_timestamp_ms(),
        request_seq,
        action,
        applied,
        status: status.into(),
        attempts,
        completed,
    }
}

pub fn create_hint(
    seq: u64,
    request_seq: u64,
    tile_id: Option<TileId>,
    turns: Option<u8>,
) -> HintReply {
    HintReply {
        msg_type: HintType::Hint,
        seq,
        ts: current_timestamp_ms(),
        request_seq,
        tile_id,
        turns,
    }
}

/// Create an error message
pub fn create_error(seq: u64, code: ErrorCode, message: &str) -> ErrorMessage {
    ErrorMessage {
        msg_type: ErrorType::Error,
        seq,
        ts: current_timestamp_ms(),
        code,
        message: message.to_string(),
    }
}

/// Get current timestamp in milliseconds
fn current_timestamp_ms() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}
