//! Async scanning over tokio sources, checked against the blocking scanner.

use std::path::Path;

use swf_scanner::{ScanConfig, ScanError, Scanner};
use swf_tests::{SwfBuilder, golden, rect};
use tokio::io::AsyncWriteExt;

#[tokio::test]
async fn golden_files_match_blocking_scan() {
    let scanner = Scanner::default();
    for fixture in ["signup", "uncompressed", "negative_origin", "zero_rect"] {
        let bytes = golden(fixture);
        let blocking = scanner.scan(bytes.as_slice()).unwrap();
        let asynchronous = scanner.scan_async(bytes.as_slice()).await.unwrap();
        assert_eq!(asynchronous, blocking, "{fixture}");
    }
}

#[tokio::test]
async fn scan_async_from_file() {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/golden/signup/movie.swf");
    let file = tokio::fs::File::open(&path).await.unwrap();
    let (header, frame) = Scanner::default().scan_async(file).await.unwrap();
    assert_eq!(header.file_length, 12794);
    assert_eq!(frame.xmax / 20, 160);
    assert_eq!(frame.ymax / 20, 290);
}

#[tokio::test]
async fn scan_async_over_slow_pipe() {
    let bytes = SwfBuilder::zlib()
        .frame_size(rect(-40, 40, -60, 60))
        .filler(2048)
        .build();
    let (mut tx, rx) = tokio::io::duplex(3);
    let writer = tokio::spawn(async move {
        for chunk in bytes.chunks(5) {
            tx.write_all(chunk).await.unwrap();
        }
    });

    let (_, frame) = Scanner::default().scan_async(rx).await.unwrap();
    writer.await.unwrap();
    assert_eq!(frame, rect(-40, 40, -60, 60));
}

#[tokio::test]
async fn scan_async_rejects_truncated_zlib() {
    let err = Scanner::default()
        .scan_async(golden("truncated_zlib").as_slice())
        .await
        .unwrap_err();
    assert!(matches!(err, ScanError::Decompression(_)), "got {err:?}");
}

#[tokio::test]
async fn scan_async_enforces_body_limit() {
    let bytes = SwfBuilder::uncompressed().filler(512).build();
    let scanner = Scanner::new(ScanConfig {
        max_body_size: 64,
        ..ScanConfig::default()
    });
    let err = scanner.scan_async(bytes.as_slice()).await.unwrap_err();
    assert!(matches!(err, ScanError::BodyTooLarge { limit: 64 }));
}

#[tokio::test]
async fn scan_async_accepts_body_exactly_at_limit() {
    for builder in [SwfBuilder::uncompressed(), SwfBuilder::zlib()] {
        let builder = builder.filler(1000);
        let body_len = builder.body().len();
        let bytes = builder.build();
        let scanner = Scanner::new(ScanConfig {
            max_body_size: body_len,
            ..ScanConfig::default()
        });
        let (_, frame) = scanner.scan_async(bytes.as_slice()).await.unwrap();
        assert_eq!(frame.xmax, 11000);
    }
}

#[tokio::test]
async fn scan_async_unknown_flag() {
    let bytes = SwfBuilder::with_signature(*b"QWS").build();
    let err = Scanner::default()
        .scan_async(bytes.as_slice())
        .await
        .unwrap_err();
    assert!(matches!(err, ScanError::UnknownFormat { flag: b'Q' }));
}
