use std::path::{Component, Path, PathBuf};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const ELLIPSIS: &str = "...";

/// 문자열을 최대 너비에 맞춰 중간 생략한다.
pub fn truncate_middle(text: &str, max_width: usize) -> String {
    if max_width == 0 {
        return String::new();
    }
    if text.width() <= max_width {
        return text.to_string();
    }
    if max_width < 5 {
        return take_prefix_by_width(text, max_width);
    }

    let side_width = (max_width - ELLIPSIS.width()) / 2;
    format!(
        "{}{}{}",
        take_prefix_by_width(text, side_width),
        ELLIPSIS,
        take_suffix_by_width(text, side_width)
    )
}

/// 경로를 최대 너비에 맞춰 앞쪽을 생략한다. (출력 경로는 뒤쪽이 중요)
pub fn truncate_path_start(path: &Path, max_width: usize) -> String {
    let text = path.to_string_lossy();
    if max_width == 0 {
        return String::new();
    }
    if text.width() <= max_width {
        return text.to_string();
    }
    if max_width <= ELLIPSIS.width() {
        return take_prefix_by_width(&text, max_width);
    }
    format!(
        "{}{}",
        ELLIPSIS,
        take_suffix_by_width(&text, max_width - ELLIPSIS.width())
    )
}

/// 파일시스템 접근 없이 `.`/`..` 컴포넌트를 정리한다.
///
/// 루트 위로 올라가는 `..`는 무시하고, 상대 경로 앞쪽의 `..`는 유지한다.
pub fn normalize_lexically(path: &Path) -> PathBuf {
    let mut out: Vec<Component> = Vec::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match out.last() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => out.push(component),
            },
            other => out.push(other),
        }
    }
    out.iter().map(|c| c.as_os_str()).collect()
}

fn take_prefix_by_width(text: &str, max_width: usize) -> String {
    let mut result = String::new();
    let mut width = 0;
    for ch in text.chars() {
        let ch_width = UnicodeWidthChar::width(ch).unwrap_or(1);
        if width + ch_width > max_width {
            break;
        }
        result.push(ch);
        width += ch_width;
    }
    result
}

fn take_suffix_by_width(text: &str, max_width: usize) -> String {
    let mut rev_chars: Vec<char> = Vec::new();
    let mut width = 0;
    for ch in text.chars().rev() {
        let ch_width = UnicodeWidthChar::width(ch).unwrap_or(1);
        if width + ch_width > max_width {
            break;
        }
        rev_chars.push(ch);
        width += ch_width;
    }
    rev_chars.into_iter().rev().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_middle() {
        assert_eq!(truncate_middle("short", 10), "short");
        let long = "shot_010_comp_v003.1001.exr";
        let truncated = truncate_middle(long, 13);
        assert!(truncated.contains("..."));
        assert!(truncated.width() <= 13);
    }

    #[test]
    fn test_truncate_path_start_keeps_tail() {
        let path = Path::new("/mnt/projects/foo/delivery/client/foo--010.zip");
        let truncated = truncate_path_start(path, 20);
        assert!(truncated.starts_with("..."));
        assert!(truncated.ends_with("foo--010.zip"));
        assert!(truncated.width() <= 20);
    }

    #[test]
    fn test_normalize_lexically() {
        assert_eq!(
            normalize_lexically(Path::new("/a/./b/../c")),
            PathBuf::from("/a/c")
        );
        assert_eq!(
            normalize_lexically(Path::new("/../a")),
            PathBuf::from("/a")
        );
        assert_eq!(
            normalize_lexically(Path::new("../a/b/..")),
            PathBuf::from("../a")
        );
    }
}
