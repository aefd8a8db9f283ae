//! End-to-end flow: intake → bulk convert → export → persisted history.

use std::io::Cursor;
use std::path::Path;

use image::{DynamicImage, ImageFormat, RgbaImage};
use tempfile::TempDir;

use image_converter::{ARCHIVE_NAME, HistoryStore, OutputFormat, commands};

fn write_png_sized(path: &Path, width: u32, height: u32) {
    let img = RgbaImage::from_pixel(width, height, image::Rgba([200, 100, 50, 255]));
    let mut buf = Cursor::new(Vec::new());
    DynamicImage::ImageRgba8(img)
        .write_to(&mut buf, ImageFormat::Png)
        .unwrap();
    std::fs::write(path, buf.into_inner()).unwrap();
}

fn write_sample_png(path: &Path) {
    write_png_sized(path, 8, 8);
}

#[tokio::test]
async fn single_file_is_exported_directly_and_recorded() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("photo.v2.png");
    write_sample_png(&input);

    let out = dir.path().join("out");
    let history_path = dir.path().join("history.json");

    commands::convert::run(
        vec![input],
        OutputFormat::WebP,
        None,
        out.clone(),
        false,
        history_path.clone(),
    )
    .await
    .unwrap();

    // First-dot truncation applies end to end: "photo.v2.png" → "photo.webp".
    let exported = out.join("photo.webp");
    assert!(exported.exists());
    assert!(!out.join(ARCHIVE_NAME).exists());

    let store = HistoryStore::load(history_path);
    assert_eq!(store.records().len(), 1);
    assert_eq!(store.records()[0].converted_name, "photo.webp");
    assert_eq!(store.records()[0].format, "WebP");
}

#[tokio::test]
async fn multiple_files_produce_one_archive() {
    let dir = TempDir::new().unwrap();
    let a = dir.path().join("a.png");
    let b = dir.path().join("b.png");
    write_sample_png(&a);
    write_sample_png(&b);

    let out = dir.path().join("out");
    let history_path = dir.path().join("history.json");

    commands::convert::run(
        vec![a, b],
        OutputFormat::Jpeg,
        Some(85),
        out.clone(),
        false,
        history_path.clone(),
    )
    .await
    .unwrap();

    assert!(out.join(ARCHIVE_NAME).exists());
    assert!(!out.join("a.jpg").exists());
    assert_eq!(HistoryStore::load(history_path).records().len(), 2);
}

#[tokio::test]
async fn separate_mode_writes_individual_files() {
    let dir = TempDir::new().unwrap();
    let a = dir.path().join("a.png");
    let b = dir.path().join("b.png");
    write_sample_png(&a);
    write_sample_png(&b);

    let out = dir.path().join("out");
    commands::convert::run(
        vec![a, b],
        OutputFormat::Png,
        None,
        out.clone(),
        true,
        dir.path().join("history.json"),
    )
    .await
    .unwrap();

    assert!(out.join("a.png").exists());
    assert!(out.join("b.png").exists());
    assert!(!out.join(ARCHIVE_NAME).exists());
}

#[tokio::test]
async fn undecodable_input_fails_the_run_but_writes_no_history() {
    let dir = TempDir::new().unwrap();
    let fake = dir.path().join("fake.png");
    std::fs::write(&fake, b"not really a png").unwrap();

    let history_path = dir.path().join("history.json");
    let result = commands::convert::run(
        vec![fake],
        OutputFormat::WebP,
        None,
        dir.path().join("out"),
        false,
        history_path.clone(),
    )
    .await;

    assert!(result.is_err());
    assert!(HistoryStore::load(history_path).records().is_empty());
}

#[tokio::test]
async fn unreadable_inputs_are_skipped_without_aborting_the_batch() {
    let dir = TempDir::new().unwrap();
    let good = dir.path().join("good.png");
    write_sample_png(&good);
    let missing = dir.path().join("does-not-exist.png");

    let out = dir.path().join("out");
    let history_path = dir.path().join("history.json");
    commands::convert::run(
        vec![missing, good],
        OutputFormat::WebP,
        None,
        out.clone(),
        false,
        history_path.clone(),
    )
    .await
    .unwrap();

    assert!(out.join("good.webp").exists());
    assert_eq!(HistoryStore::load(history_path).records().len(), 1);
}

#[tokio::test]
async fn encode_failure_does_not_stop_the_bulk_pass() {
    let dir = TempDir::new().unwrap();
    // Wider than libwebp's 16383-pixel limit, so decoding succeeds but the
    // WebP encoder refuses it.
    let huge = dir.path().join("huge.png");
    write_png_sized(&huge, 16384, 1);
    let good = dir.path().join("good.png");
    write_sample_png(&good);

    let out = dir.path().join("out");
    let history_path = dir.path().join("history.json");
    let result = commands::convert::run(
        vec![huge, good],
        OutputFormat::WebP,
        None,
        out.clone(),
        false,
        history_path.clone(),
    )
    .await;

    // The run exits non-zero because one conversion failed, but the healthy
    // file still converts, exports, and lands in history.
    assert!(result.is_err());
    assert!(out.join("good.webp").exists());

    let store = HistoryStore::load(history_path);
    assert_eq!(store.records().len(), 1);
    assert_eq!(store.records()[0].converted_name, "good.webp");
}

#[tokio::test]
async fn non_image_inputs_are_rejected_without_aborting_the_batch() {
    let dir = TempDir::new().unwrap();
    let good = dir.path().join("good.png");
    write_sample_png(&good);
    let doc = dir.path().join("notes.txt");
    std::fs::write(&doc, b"plain text").unwrap();

    let out = dir.path().join("out");
    commands::convert::run(
        vec![doc, good],
        OutputFormat::WebP,
        None,
        out.clone(),
        false,
        dir.path().join("history.json"),
    )
    .await
    .unwrap();

    assert!(out.join("good.webp").exists());
}
