//! 文件名工具测试：版本号后缀、URL 推导、防撞查找、路径对。

use url::Url;

use crate::local_file::{
    file_stem_and_extension, join_file_name, next_file_name, writable_file_name,
    DestinationPaths, IN_PROGRESS_EXTENSION,
};
use crate::tests::temp_save_dir;

#[test]
fn next_file_name_starts_at_one() {
    assert_eq!(next_file_name("report"), "report (1)");
}

#[test]
fn next_file_name_increments_existing_version() {
    assert_eq!(next_file_name("report (1)"), "report (2)");
    assert_eq!(next_file_name("report (9)"), "report (10)");
}

#[test]
fn next_file_name_ignores_invalid_version_suffix() {
    // 括号里不是数字就当没版本号，从 (1) 重新开始
    assert_eq!(next_file_name("report (x)"), "report (x) (1)");
    assert_eq!(next_file_name("report ()"), "report () (1)");
    assert_eq!(next_file_name("report (1) extra"), "report (1) extra (1)");
}

#[test]
fn stem_and_extension_from_url() {
    let url = Url::parse("http://example.com/a/My%20File.tar.gz").unwrap();
    assert_eq!(
        file_stem_and_extension(&url),
        Some(("My File.tar".to_string(), "gz".to_string()))
    );

    let url = Url::parse("http://example.com/README").unwrap();
    assert_eq!(
        file_stem_and_extension(&url),
        Some(("README".to_string(), String::new()))
    );

    // 只有点开头的名字整个当主干名
    let url = Url::parse("http://example.com/.env").unwrap();
    assert_eq!(
        file_stem_and_extension(&url),
        Some((".env".to_string(), String::new()))
    );

    let url = Url::parse("http://example.com/").unwrap();
    assert_eq!(file_stem_and_extension(&url), None);
}

#[test]
fn join_file_name_skips_dot_for_empty_extension() {
    assert_eq!(join_file_name("data", "bin"), "data.bin");
    assert_eq!(join_file_name("README", ""), "README");
}

#[tokio::test]
async fn writable_file_name_walks_versions() {
    let dir = temp_save_dir("naming");

    assert_eq!(writable_file_name(&dir, "data", "bin").await, "data");

    std::fs::write(dir.join("data.bin"), b"x").unwrap();
    assert_eq!(writable_file_name(&dir, "data", "bin").await, "data (1)");

    std::fs::write(dir.join("data (1).bin"), b"x").unwrap();
    assert_eq!(writable_file_name(&dir, "data", "bin").await, "data (2)");
}

#[test]
fn destination_paths_share_stem() {
    let paths = DestinationPaths::resolve(std::path::Path::new("/tmp"), "data", "bin");

    assert_eq!(paths.final_path, std::path::Path::new("/tmp/data.bin"));
    assert_eq!(
        paths.partial_path,
        std::path::Path::new(&format!("/tmp/data.{}", IN_PROGRESS_EXTENSION))
    );
}
