// Shared test helpers: scripted line source, hand-driven clock, EDID builder

#![allow(dead_code)]

use hwprobe::clock::Clock;
use hwprobe::line_source::LineSource;
use std::path::Path;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Serves whatever lines were last set and counts reads.
#[derive(Clone, Default)]
pub struct ScriptedSource {
    lines: Arc<Mutex<Vec<String>>>,
    reads: Arc<AtomicUsize>,
}

impl ScriptedSource {
    pub fn new(lines: &[&str]) -> Self {
        let source = Self::default();
        source.set(lines);
        source
    }

    pub fn set(&self, lines: &[&str]) {
        *self.lines.lock().unwrap() = lines.iter().map(|l| l.to_string()).collect();
    }

    pub fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }
}

impl LineSource for ScriptedSource {
    fn read_lines(&self, _path: &Path) -> Vec<String> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        self.lines.lock().unwrap().clone()
    }
}

#[derive(Clone, Default)]
pub struct ManualClock(Arc<AtomicU64>);

impl ManualClock {
    pub fn advance(&self, ms: u64) {
        self.0.fetch_add(ms, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now_millis(&self) -> u64 {
        self.0.load(Ordering::SeqCst)
    }
}

/// Pack three letters A-Z into the EDID manufacturer field (bytes 8-9).
pub fn pack_manufacturer(id: &[u8; 3]) -> [u8; 2] {
    let v = |c: u8| u16::from(c - b'A' + 1);
    ((v(id[0]) << 10) | (v(id[1]) << 5) | v(id[2])).to_be_bytes()
}

/// A plausible 1920x1080 monitor EDID (Dell "DEL", product 0xA0B1).
pub fn sample_edid() -> [u8; 128] {
    let mut e = [0u8; 128];
    e[..8].copy_from_slice(&[0x00, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0x00]);
    e[8..10].copy_from_slice(&pack_manufacturer(b"DEL"));
    e[10..12].copy_from_slice(&0xA0B1u16.to_le_bytes());
    e[12..16].copy_from_slice(b"4321");
    e[16] = 12;
    e[17] = 27;
    e[18] = 1;
    e[19] = 4;
    e[20] = 0xA5;
    e[21] = 53;
    e[22] = 30;
    // detailed timing: 148.5 MHz 1920x1080
    e[54..62].copy_from_slice(&[0x02, 0x3A, 0x80, 0x18, 0x71, 0x38, 0x2D, 0x40]);
    // serial text
    e[72..76].copy_from_slice(&[0, 0, 0, 0xFF]);
    e[77..90].copy_from_slice(b"CFV9N7B4321\n ");
    // range limits
    e[90..100].copy_from_slice(&[0, 0, 0, 0xFD, 0, 56, 76, 30, 83, 17]);
    // monitor name
    e[108..112].copy_from_slice(&[0, 0, 0, 0xFC]);
    e[113..126].copy_from_slice(b"DELL U2415\n  ");
    e
}
