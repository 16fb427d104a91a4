// SPDX-License-Identifier: MIT

use super::*;
use std::path::Path;

fn roots() -> PathRoots {
    PathRoots::new("/data/uploads", "/data/shared")
}

#[test]
fn absolute_uploads_path_maps_to_upload_root() {
    let chat_key = ChatKey::new("g1");
    let host = roots()
        .to_host_path(Path::new("/app/uploads/test.txt"), &chat_key, None)
        .unwrap();
    assert_eq!(host, Path::new("/data/uploads/g1/test.txt"));
}

#[test]
fn relative_path_is_rooted_at_app_before_scanning() {
    let chat_key = ChatKey::new("g1");
    let host = roots().to_host_path(Path::new("uploads/test.txt"), &chat_key, None).unwrap();
    assert_eq!(host, Path::new("/data/uploads/g1/test.txt"));
}

#[test]
fn shared_path_requires_container_key() {
    let chat_key = ChatKey::new("g1");
    let err = roots().to_host_path(Path::new("/app/shared/out.png"), &chat_key, None).unwrap_err();
    assert_eq!(
        err,
        InvalidPathError::MissingContainerKey("/app/shared/out.png".to_string())
    );
}

#[test]
fn shared_path_with_container_key_maps_under_shared_root() {
    let chat_key = ChatKey::new("g1");
    let host = roots()
        .to_host_path(Path::new("/app/shared/out.png"), &chat_key, Some("container_789"))
        .unwrap();
    assert_eq!(host, Path::new("/data/shared/container_789/out.png"));
}

#[test]
fn nested_sub_paths_are_preserved_after_the_marker() {
    let chat_key = ChatKey::new("g1");
    let host = roots()
        .to_host_path(Path::new("/app/shared/plots/fig1.png"), &chat_key, Some("c1"))
        .unwrap();
    assert_eq!(host, Path::new("/data/shared/c1/plots/fig1.png"));
}

#[test]
fn path_without_marker_is_invalid() {
    let chat_key = ChatKey::new("g1");
    let err = roots().to_host_path(Path::new("/tmp/evil"), &chat_key, None).unwrap_err();
    assert!(matches!(err, InvalidPathError::NoLocationMarker(_)));
}

#[test]
fn result_never_escapes_the_two_roots() {
    // Even a path with `..` components stays under the mapped root because
    // only the tail after the marker segment is joined on — `..` in the
    // tail is inert unless the caller later canonicalizes it, which the
    // mapper itself never does.
    let chat_key = ChatKey::new("g1");
    let host = roots()
        .to_host_path(Path::new("/app/uploads/../../etc/passwd"), &chat_key, None)
        .unwrap();
    assert!(host.starts_with("/data/uploads/g1"));
}

#[test]
fn get_upload_file_path_with_explicit_name_creates_parent_but_not_file() {
    let tmp = tempfile::tempdir().unwrap();
    let roots = PathRoots::new(tmp.path().join("uploads"), tmp.path().join("shared"));
    let chat_key = ChatKey::new("g1");
    let path = roots.get_upload_file_path(&chat_key, Some("plot.png"), "", None).unwrap();
    assert_eq!(path, tmp.path().join("uploads").join("g1").join("plot.png"));
    assert!(path.parent().unwrap().is_dir());
    assert!(!path.exists());
}

#[test]
fn get_upload_file_path_synthesizes_name_from_seed() {
    let tmp = tempfile::tempdir().unwrap();
    let roots = PathRoots::new(tmp.path().join("uploads"), tmp.path().join("shared"));
    let chat_key = ChatKey::new("g1");
    let path1 = roots.get_upload_file_path(&chat_key, None, ".png", Some("seed-1")).unwrap();
    let path2 = roots.get_upload_file_path(&chat_key, None, ".png", Some("seed-1")).unwrap();
    assert_eq!(path1, path2, "same seed produces the same synthesized name");
    assert!(path1.file_name().unwrap().to_str().unwrap().ends_with(".png"));
}

#[test]
fn get_upload_file_path_without_seed_is_random_each_time() {
    let tmp = tempfile::tempdir().unwrap();
    let roots = PathRoots::new(tmp.path().join("uploads"), tmp.path().join("shared"));
    let chat_key = ChatKey::new("g1");
    let path1 = roots.get_upload_file_path(&chat_key, None, "", None).unwrap();
    let path2 = roots.get_upload_file_path(&chat_key, None, "", None).unwrap();
    assert_ne!(path1, path2);
}

#[test]
fn upload_roundtrip_via_filename_helper() {
    let chat_key = ChatKey::new("g1");
    let roots = roots();
    let sandbox_path = filename_to_sandbox_upload_path("report.csv");
    let host = roots.to_host_path(&sandbox_path, &chat_key, None).unwrap();
    assert_eq!(host, Path::new("/data/uploads/g1/report.csv"));
}

#[test]
fn filename_helpers_discard_directories() {
    assert_eq!(
        filename_to_sandbox_upload_path("a/b/c.txt"),
        Path::new("/app/uploads/c.txt")
    );
    assert_eq!(
        filename_to_sandbox_shared_path("a/b/c.txt"),
        Path::new("/app/shared/c.txt")
    );
}

#[test]
fn filepath_helpers_preserve_sub_paths() {
    assert_eq!(
        filepath_to_sandbox_shared_path(Path::new("plots/fig1.png")),
        Path::new("/app/shared/plots/fig1.png")
    );
    assert_eq!(
        filepath_to_sandbox_upload_path(Path::new("data/in.csv")),
        Path::new("/app/uploads/data/in.csv")
    );
}

#[test]
fn shared_filename_roundtrip_matches_p9() {
    let chat_key = ChatKey::new("g1");
    let roots = roots();
    let sandbox_path = filename_to_sandbox_shared_path("fig.png");
    let host = roots.to_host_path(&sandbox_path, &chat_key, Some("container_789")).unwrap();
    assert_eq!(host, roots.shared_root.join("container_789").join("fig.png"));
}
