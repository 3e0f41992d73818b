//! Log events emitted while scanning.
//!
//! A `tracing_subscriber::fmt` subscriber writing into a shared buffer is
//! installed for the duration of each scan, and the captured text is checked
//! for the stage events.

use std::io;
use std::sync::{Arc, Mutex};

use swf_scanner::{ScanConfig, Scanner};
use swf_tests::SwfBuilder;
use tracing::Level;

#[derive(Clone, Default)]
struct Captured(Arc<Mutex<Vec<u8>>>);

impl Captured {
    fn text(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl io::Write for Captured {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

fn capture(level: Level, f: impl FnOnce()) -> String {
    let captured = Captured::default();
    let writer = captured.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_ansi(false)
        .with_writer(move || writer.clone())
        .finish();
    tracing::subscriber::with_default(subscriber, f);
    captured.text()
}

#[test]
fn permissive_signature_logs_a_warning() {
    let bytes = SwfBuilder::with_signature(*b"FXX").build();
    let logs = capture(Level::WARN, || {
        Scanner::default().scan(bytes.as_slice()).unwrap();
    });
    assert!(logs.contains("WARN"), "{logs}");
    assert!(logs.contains("signature literal is not"), "{logs}");
    assert!(logs.contains("FXX"), "{logs}");
}

#[test]
fn valid_file_is_quiet_at_warn() {
    let bytes = SwfBuilder::zlib().build();
    let logs = capture(Level::WARN, || {
        Scanner::default().scan(bytes.as_slice()).unwrap();
    });
    assert!(logs.is_empty(), "{logs}");
}

#[test]
fn debug_level_traces_each_stage() {
    let bytes = SwfBuilder::zlib().filler(100).build();
    let logs = capture(Level::DEBUG, || {
        Scanner::default().scan_movie(bytes.as_slice()).unwrap();
    });
    assert!(logs.contains("read header"), "{logs}");
    assert!(logs.contains("inflated body"), "{logs}");
    assert!(logs.contains("read frame size"), "{logs}");
    assert!(logs.contains("scan_movie"), "{logs}");
}

#[test]
fn streaming_traces_frame_info() {
    let bytes = SwfBuilder::zlib().frame_info(0x1E00, 7).build();
    let logs = capture(Level::DEBUG, || {
        Scanner::new(ScanConfig::streaming())
            .scan_movie(bytes.as_slice())
            .unwrap();
    });
    assert!(logs.contains("read frame info"), "{logs}");
    assert!(logs.contains("frame_count=7"), "{logs}");
}
