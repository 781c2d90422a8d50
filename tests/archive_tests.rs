//! Tests for zip and tar.gz extraction.

use std::fs;
use zomboid_workshop::archive::{extract, ArchiveKind};
use zomboid_workshop::Error;

mod common;
use common::helpers::*;

fn fixture_path(dir: &std::path::Path, kind: ArchiveKind) -> std::path::PathBuf {
    match kind {
        ArchiveKind::Zip => dir.join("fixture.zip"),
        ArchiveKind::TarGz => dir.join("fixture.tar.gz"),
    }
}

fn build(kind: ArchiveKind, path: &std::path::Path, entries: &[Entry]) {
    match kind {
        ArchiveKind::Zip => build_zip(path, entries),
        ArchiveKind::TarGz => build_tar_gz(path, entries),
    }
}

fn extracts_fixture_tree(kind: ArchiveKind) {
    let temp_dir = create_temp_dir();
    let archive = fixture_path(temp_dir.path(), kind);
    let output = temp_dir.path().join("steamcmd");
    let entries = steamcmd_fixture();
    build(kind, &archive, &entries);

    extract(kind, &archive, &output).unwrap();

    assert_fixture_extracted(&output, &entries);
}

#[test]
fn test_zip_extracts_fixture_tree() {
    extracts_fixture_tree(ArchiveKind::Zip);
}

#[test]
fn test_tar_gz_extracts_fixture_tree() {
    extracts_fixture_tree(ArchiveKind::TarGz);
}

#[test]
fn test_empty_explicit_directory_is_created() {
    for kind in [ArchiveKind::Zip, ArchiveKind::TarGz] {
        let temp_dir = create_temp_dir();
        let archive = fixture_path(temp_dir.path(), kind);
        let output = temp_dir.path().join("out");
        build(kind, &archive, &[Entry::Dir("logs/", 0o755)]);

        extract(kind, &archive, &output).unwrap();

        assert!(output.join("logs").is_dir(), "{kind:?} lost the empty directory");
        assert_eq!(fs::read_dir(output.join("logs")).unwrap().count(), 0);
    }
}

#[cfg(unix)]
#[test]
fn test_permission_bits_are_restored() {
    for kind in [ArchiveKind::Zip, ArchiveKind::TarGz] {
        let temp_dir = create_temp_dir();
        let archive = fixture_path(temp_dir.path(), kind);
        let output = temp_dir.path().join("out");
        build(kind, &archive, &steamcmd_fixture());

        extract(kind, &archive, &output).unwrap();

        assert_mode(&output.join("steamcmd.sh"), 0o755);
        assert_mode(&output.join("linux32/steamcmd"), 0o755);
        assert_mode(&output.join("linux32/libstdc++.so.6"), 0o644);
        assert_mode(&output.join("package"), 0o700);
    }
}

#[cfg(unix)]
#[test]
fn test_read_only_directory_listed_before_its_files() {
    let entries = [
        Entry::Dir("ro/", 0o555),
        Entry::File("ro/inner.txt", b"inside", 0o644),
    ];
    for kind in [ArchiveKind::Zip, ArchiveKind::TarGz] {
        let temp_dir = create_temp_dir();
        let archive = fixture_path(temp_dir.path(), kind);
        let output = temp_dir.path().join("out");
        build(kind, &archive, &entries);

        extract(kind, &archive, &output).unwrap();

        assert_file_content(&output.join("ro/inner.txt"), b"inside");
        assert_mode(&output.join("ro"), 0o555);

        // Let the temp dir clean up after itself.
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(output.join("ro"), fs::Permissions::from_mode(0o755)).unwrap();
    }
}

#[test]
fn test_existing_files_are_overwritten() {
    for kind in [ArchiveKind::Zip, ArchiveKind::TarGz] {
        let temp_dir = create_temp_dir();
        let archive = fixture_path(temp_dir.path(), kind);
        let output = temp_dir.path().join("steamcmd");
        create_temp_file(&output, "steamcmd.sh", b"stale");
        create_temp_file(&output, "keep.txt", b"unrelated");
        build(kind, &archive, &steamcmd_fixture());

        extract(kind, &archive, &output).unwrap();

        assert_file_content(&output.join("steamcmd.sh"), b"#!/bin/sh\nexit 0\n");
        assert_file_content(&output.join("keep.txt"), b"unrelated");
    }
}

#[test]
fn test_extracting_twice_is_idempotent() {
    for kind in [ArchiveKind::Zip, ArchiveKind::TarGz] {
        let temp_dir = create_temp_dir();
        let archive = fixture_path(temp_dir.path(), kind);
        let output = temp_dir.path().join("steamcmd");
        let entries = steamcmd_fixture();
        build(kind, &archive, &entries);

        extract(kind, &archive, &output).unwrap();
        extract(kind, &archive, &output).unwrap();

        assert_fixture_extracted(&output, &entries);
    }
}

#[test]
fn test_corrupt_archive_is_an_extraction_error() {
    for kind in [ArchiveKind::Zip, ArchiveKind::TarGz] {
        let temp_dir = create_temp_dir();
        let archive = create_temp_file(temp_dir.path(), "broken.bin", b"definitely not an archive");

        let err = extract(kind, &archive, &temp_dir.path().join("out")).unwrap_err();

        assert!(matches!(err, Error::Archive { .. }), "{kind:?}: {err:?}");
        assert_eq!(err.exit_code(), 4);
    }
}

#[test]
fn test_missing_archive_is_an_io_error() {
    let temp_dir = create_temp_dir();
    let err = extract(
        ArchiveKind::Zip,
        &temp_dir.path().join("missing.zip"),
        &temp_dir.path().join("out"),
    )
    .unwrap_err();

    assert!(matches!(err, Error::Io { .. }));
}
