//! 출력 위치 결정
//!
//! 프로젝트 설정 경로와 사용자 경로를 하나의 선택 목록으로 합치고,
//! 선택한 기준 경로 + 하위 폴더 + 파일명으로 최종 출력 경로를 만든다.

use crate::core::naming::{format_name, FormattedName};
use crate::models::project::ProjectConfig;
use crate::models::settings::ExportLocation;
use crate::utils::path_display::normalize_lexically;
use std::collections::HashSet;
use std::path::{Path, PathBuf, MAIN_SEPARATOR};
use unicode_width::UnicodeWidthStr;

/// 선택 가능한 출력 위치 목록
///
/// 렌더 경로 → 프로젝트 내보내기 경로 → 사용자 경로 순서이며,
/// 이미 나온 경로는 건너뛴다 (먼저 나온 이름이 우선).
pub fn list_destinations(
    project: &ProjectConfig,
    user_locations: &[ExportLocation],
) -> Vec<ExportLocation> {
    let mut seen: HashSet<PathBuf> = HashSet::new();
    project
        .render_paths
        .iter()
        .chain(project.export_paths.iter())
        .chain(user_locations.iter())
        .filter(|location| !location.path.trim().is_empty())
        .filter(|location| seen.insert(path_key(&location.path)))
        .cloned()
        .collect()
}

/// 중복 비교용 경로 키 (끝 구분자, `.` 컴포넌트 차이 무시)
fn path_key(path: &str) -> PathBuf {
    normalize_lexically(Path::new(path.trim()))
}

/// 콤보 박스용 표시 레이블 (`이름:   경로`, 경로 열 정렬)
pub fn destination_labels(locations: &[ExportLocation]) -> Vec<String> {
    let max_name = locations
        .iter()
        .map(|l| l.name.width())
        .max()
        .unwrap_or(0);
    locations
        .iter()
        .map(|l| {
            let padding = " ".repeat(max_name - l.name.width());
            format!(
                "{}:{}   {}",
                l.name,
                padding,
                normalize_lexically(Path::new(&l.path)).display()
            )
        })
        .collect()
}

/// 하위 폴더 입력 정리
///
/// 앞에 구분자를 하나 붙이고, 각 구간을 파일명 규칙으로 정리한다.
/// 비어 있으면 빈 문자열.
pub fn normalize_append_folder(input: &str) -> FormattedName {
    let mut reserved = false;
    let segments: Vec<String> = input
        .split(['/', '\\'])
        .map(str::trim)
        .filter(|s| !s.is_empty() && *s != ".")
        .map(|segment| {
            let formatted = format_name(segment);
            reserved |= formatted.reserved;
            formatted.value
        })
        .collect();

    let value = if segments.is_empty() {
        String::new()
    } else {
        format!(
            "{}{}",
            MAIN_SEPARATOR,
            segments.join(&MAIN_SEPARATOR.to_string())
        )
    };
    FormattedName { value, reserved }
}

/// 최종 출력 경로
///
/// 같은 입력이면 항상 같은 경로를 돌려준다.
pub fn compose_output_path(base: &Path, append_folder: &str, file_name: &str) -> PathBuf {
    let mut path = base.to_path_buf();
    let append = append_folder.trim().trim_start_matches(['/', '\\']);
    if !append.is_empty() {
        path.push(append);
    }
    if !file_name.is_empty() {
        path.push(file_name);
    }
    normalize_lexically(&path)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn project(render: &[(&str, &str)], export: &[(&str, &str)]) -> ProjectConfig {
        ProjectConfig {
            project_name: "Foo".into(),
            render_paths: render
                .iter()
                .map(|(n, p)| ExportLocation::new(*n, *p))
                .collect(),
            export_paths: export
                .iter()
                .map(|(n, p)| ExportLocation::new(*n, *p))
                .collect(),
        }
    }

    #[test]
    fn test_list_destinations_dedups_by_path_first_wins() {
        let project = project(&[("A", "/p1"), ("B", "/p2")], &[]);
        let user = vec![ExportLocation::new("C", "/p1")];
        let list = list_destinations(&project, &user);

        let names: Vec<&str> = list.iter().map(|l| l.name.as_str()).collect();
        assert_eq!(names, vec!["A", "B"]);
    }

    #[test]
    fn test_list_destinations_order_and_normalized_duplicates() {
        let project = project(&[("Renders", "/p/renders")], &[("Exports", "/p/renders/")]);
        let user = vec![
            ExportLocation::new("Client", "/mnt/client"),
            ExportLocation::new("Empty", "  "),
        ];
        let list = list_destinations(&project, &user);
        let names: Vec<&str> = list.iter().map(|l| l.name.as_str()).collect();
        assert_eq!(names, vec!["Renders", "Client"]);
    }

    #[test]
    fn test_destination_labels_align_paths() {
        let labels = destination_labels(&[
            ExportLocation::new("A", "/p1"),
            ExportLocation::new("Client", "/mnt/client/"),
        ]);
        assert_eq!(labels[0], "A:        /p1");
        assert_eq!(labels[1], "Client:   /mnt/client");
    }

    #[test]
    fn test_normalize_append_folder() {
        let sep = MAIN_SEPARATOR;
        assert_eq!(normalize_append_folder("").value, "");
        assert_eq!(normalize_append_folder("delivery").value, format!("{sep}delivery"));
        assert_eq!(
            normalize_append_folder("\\delivery/day 1:final").value,
            format!("{sep}delivery{sep}day 1_final")
        );
        assert!(normalize_append_folder("out/aux").reserved);
    }

    #[test]
    fn test_normalize_append_folder_is_idempotent() {
        let once = normalize_append_folder("//a//b?/c").value;
        assert_eq!(normalize_append_folder(&once).value, once);
    }

    #[test]
    fn test_compose_output_path() {
        let base = Path::new("/mnt/client");
        assert_eq!(
            compose_output_path(base, "", "Foo--010.zip"),
            PathBuf::from("/mnt/client/Foo--010.zip")
        );
        assert_eq!(
            compose_output_path(base, "/delivery/./day1", "Foo--010.zip"),
            PathBuf::from("/mnt/client/delivery/day1/Foo--010.zip")
        );
    }

    #[test]
    fn test_compose_output_path_is_idempotent() {
        let base = Path::new("/mnt/client/");
        let first = compose_output_path(base, "/delivery", "a.exr");
        let second = compose_output_path(base, "/delivery", "a.exr");
        assert_eq!(first, second);
    }
}
