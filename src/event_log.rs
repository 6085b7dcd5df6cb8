//! JSON-lines event log
//!
//! One JSON object per line, appended to the file named by
//! `BLOCKFALL_LOG_PATH`:
//!
//! ```text
//! {"seq":1,"ts":0,"event":"session","seed":42}
//! {"seq":2,"ts":3,"event":"spawned","kind":"t"}
//! {"seq":9,"ts":2411,"event":"linesCleared","count":2,"points":300}
//! ```
//!
//! `ts` is milliseconds since the session started.

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::types::CoreEvent;

/// One log line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventRecord {
    pub seq: u64,
    pub ts: u64,
    pub event: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub row: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub points: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level_tenths: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tick_ms: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<u32>,
}

impl EventRecord {
    fn named(seq: u64, ts: u64, event: &str) -> Self {
        Self {
            seq,
            ts,
            event: event.to_string(),
            seed: None,
            kind: None,
            row: None,
            count: None,
            points: None,
            level_tenths: None,
            tick_ms: None,
            reason: None,
            score: None,
        }
    }

    pub fn from_core(seq: u64, ts: u64, event: &CoreEvent) -> Self {
        let mut rec = Self::named(seq, ts, event.name());
        match *event {
            CoreEvent::Spawned { kind } | CoreEvent::SupplyFallback { kind } => {
                rec.kind = Some(kind.as_str().to_string());
            }
            CoreEvent::Locked { kind, row } => {
                rec.kind = Some(kind.as_str().to_string());
                rec.row = Some(row);
            }
            CoreEvent::LinesCompleted { count } => rec.count = Some(count),
            CoreEvent::LinesCleared { count, points } => {
                rec.count = Some(count);
                rec.points = Some(points);
            }
            CoreEvent::LevelUp {
                level_tenths,
                tick_ms,
            } => {
                rec.level_tenths = Some(level_tenths);
                rec.tick_ms = Some(tick_ms);
            }
            CoreEvent::Ended { reason } => rec.reason = Some(reason.as_str().to_string()),
            CoreEvent::Paused | CoreEvent::Resumed => {}
        }
        rec
    }
}

/// Appends [`EventRecord`]s as JSON lines to any writer.
pub struct EventLog<W: Write> {
    out: BufWriter<W>,
    seq: u64,
    line: Vec<u8>,
}

impl EventLog<File> {
    /// Open `path` for appending, creating it if needed.
    pub fn open(path: &Path) -> Result<Self> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("opening event log {}", path.display()))?;
        Ok(Self::new(file))
    }
}

impl<W: Write> EventLog<W> {
    pub fn new(out: W) -> Self {
        Self {
            out: BufWriter::new(out),
            seq: 0,
            line: Vec::with_capacity(256),
        }
    }

    /// First line of a session.
    pub fn session(&mut self, ts: u64, seed: u32) -> Result<()> {
        let mut rec = EventRecord::named(self.next_seq(), ts, "session");
        rec.seed = Some(seed);
        self.write(&rec)
    }

    pub fn core_event(&mut self, ts: u64, event: &CoreEvent) -> Result<()> {
        let rec = EventRecord::from_core(self.next_seq(), ts, event);
        self.write(&rec)
    }

    /// Last line of a session.
    pub fn summary(&mut self, ts: u64, score: u32) -> Result<()> {
        let mut rec = EventRecord::named(self.next_seq(), ts, "summary");
        rec.score = Some(score);
        self.write(&rec)?;
        self.flush()
    }

    pub fn flush(&mut self) -> Result<()> {
        self.out.flush()?;
        Ok(())
    }

    /// Number of lines written so far.
    pub fn len(&self) -> u64 {
        self.seq
    }

    pub fn is_empty(&self) -> bool {
        self.seq == 0
    }

    /// Flush and hand back the underlying writer.
    pub fn into_inner(self) -> Result<W> {
        self.out
            .into_inner()
            .map_err(|e| anyhow::anyhow!("flushing event log: {}", e.error()))
    }

    fn next_seq(&mut self) -> u64 {
        self.seq += 1;
        self.seq
    }

    fn write(&mut self, rec: &EventRecord) -> Result<()> {
        self.line.clear();
        serde_json::to_writer(&mut self.line, rec)?;
        self.line.push(b'\n');
        self.out.write_all(&self.line)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{EndReason, PieceKind};

    #[test]
    fn test_core_event_fields() {
        let rec = EventRecord::from_core(
            3,
            120,
            &CoreEvent::Locked {
                kind: PieceKind::T,
                row: 18,
            },
        );
        assert_eq!(rec.event, "locked");
        assert_eq!(rec.kind.as_deref(), Some("t"));
        assert_eq!(rec.row, Some(18));
        assert_eq!(rec.points, None);
    }

    #[test]
    fn test_optional_fields_are_omitted() {
        let rec = EventRecord::from_core(1, 0, &CoreEvent::Paused);
        let json = serde_json::to_string(&rec).unwrap();
        assert_eq!(json, r#"{"seq":1,"ts":0,"event":"paused"}"#);
    }

    #[test]
    fn test_lines_are_sequenced() {
        let mut log = EventLog::new(Vec::new());
        log.session(0, 9).unwrap();
        log.core_event(
            5,
            &CoreEvent::Ended {
                reason: EndReason::LockOut,
            },
        )
        .unwrap();
        log.summary(6, 1234).unwrap();
        assert_eq!(log.len(), 3);

        let bytes = log.into_inner().unwrap();
        let text = String::from_utf8(bytes).unwrap();
        let recs: Vec<EventRecord> = text
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();

        assert_eq!(recs.len(), 3);
        assert_eq!(recs[0].seed, Some(9));
        assert_eq!(recs[1].reason.as_deref(), Some("lockOut"));
        assert_eq!(recs[2].score, Some(1234));
        assert_eq!(
            recs.iter().map(|r| r.seq).collect::<Vec<_>>(),
            vec![1, 2, 3]
        );
    }
}
