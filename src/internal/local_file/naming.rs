//! 文件名工具：从 URL 推导文件名、版本号后缀防撞、找到可写的文件名。

use percent_encoding::percent_decode_str;
use tokio::fs;
use url::Url;

/// 给文件名追加或递增版本号后缀：`report` → `report (1)` → `report (2)`。
///
/// 末尾不是合法的 ` (n)` 形式时，一律从 ` (1)` 开始。
pub fn next_file_name(filename: &str) -> String {
    if let Some(rest) = filename.strip_suffix(')') {
        if let Some((prefix, version)) = rest.rsplit_once(" (") {
            if let Ok(n) = version.parse::<u32>() {
                return format!("{} ({})", prefix, n + 1);
            }
        }
    }

    format!("{} (1)", filename)
}

/// 拼出完整文件名；扩展名为空时不带点。
pub fn join_file_name(stem: &str, extension: &str) -> String {
    if extension.is_empty() {
        stem.to_string()
    } else {
        format!("{}.{}", stem, extension)
    }
}

/// 在目录下找一个不会覆盖已有文件的主干名：已存在则不断递增版本号后缀。
pub async fn writable_file_name(
    dir: &std::path::Path,
    stem: &str,
    extension: &str,
) -> String {
    let mut stem = stem.to_string();

    loop {
        let candidate = dir.join(join_file_name(&stem, extension));
        match fs::try_exists(&candidate).await {
            Ok(true) => stem = next_file_name(&stem),
            _ => return stem,
        }
    }
}

/// 从 URL 的最后一个路径段推导（主干名, 扩展名）。
///
/// 路径段先做百分号解码；按最后一个点切分，没有点则扩展名为空。
pub fn file_stem_and_extension(url: &Url) -> Option<(String, String)> {
    let last_segment = url
        .path_segments()?
        .filter(|segment| !segment.is_empty())
        .last()?;

    let decoded = percent_decode_str(last_segment)
        .decode_utf8_lossy()
        .to_string();
    if decoded.is_empty() {
        return None;
    }

    match decoded.rsplit_once('.') {
        Some((stem, extension)) if !stem.is_empty() => {
            Some((stem.to_string(), extension.to_string()))
        }
        _ => Some((decoded, String::new())),
    }
}
