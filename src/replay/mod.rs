//! Replay recording and the compact replay codec.
//!
//! ## Key Types
//!
//! - `ReplayRecorder`: Idle → Recording → Stopped move capture
//! - `Replay` / `ReplayMove`: the finalized, immutable record
//! - `CompactReplay`: short-key storage form, see [`codec`]
//! - `ReplayCode`: six-character share code

pub mod codec;
pub mod record;
pub mod recorder;
pub mod stats;

pub use codec::{compress, decompress, from_bytes, from_json, to_bytes, to_json, CompactMove, CompactReplay};
pub use record::{Replay, ReplayCode, ReplayId, ReplayMode, ReplayMove};
pub use recorder::{RecorderState, ReplayMetadata, ReplayRecorder};
pub use stats::{format_duration, ReplayStats};
