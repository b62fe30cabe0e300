//! 네이밍 엔진
//!
//! 컨텍스트별 템플릿(`@PROJECT@--@SHOT@` 등)에서 기본 출력 이름을 만들고,
//! 사용자가 수정한 이름을 파일명으로 쓸 수 있게 정리한다.

use crate::models::file_context::{file_stem, FileContext, MenuContext};
use crate::models::settings::Settings;

use crate::models::file_context::MenuContext::{
    AssetFiles, LibraryFiles, MediaFiles, ProductFiles, ProjectFiles, SceneFiles, ShotFiles,
};

/// OS 예약 장치 이름
const RESERVED_NAMES: [&str; 22] = [
    "CON", "PRN", "AUX", "NUL", "COM1", "COM2", "COM3", "COM4", "COM5", "COM6", "COM7", "COM8",
    "COM9", "LPT1", "LPT2", "LPT3", "LPT4", "LPT5", "LPT6", "LPT7", "LPT8", "LPT9",
];

pub const RESERVED_NAME_WARNING: &str =
    "Name Not Allowed\n\nDo Not Use:\n\n   CON, PRN, AUX, NUL, COM, LPT";

/// 시퀀스 내보내기 방식 (미디어 시퀀스에서만 의미 있음)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SequenceMode {
    /// 현재 프레임 한 장
    #[default]
    SingleImage,
    /// 시퀀스 전체
    ImageSequence,
}

/// 템플릿 토큰과 그 토큰이 의미 있는 컨텍스트
pub struct Placeholder {
    pub token: &'static str,
    pub contexts: &'static [MenuContext],
}

const EVERY_CONTEXT: &[MenuContext] = &MenuContext::ALL;

pub const PLACEHOLDERS: &[Placeholder] = &[
    Placeholder { token: "@PROJECT@", contexts: EVERY_CONTEXT },
    Placeholder { token: "@USER@", contexts: EVERY_CONTEXT },
    Placeholder { token: "@DATE@", contexts: EVERY_CONTEXT },
    Placeholder { token: "@TYPE@", contexts: &[SceneFiles, ProductFiles, MediaFiles] },
    Placeholder { token: "@SEQUENCE@", contexts: &[ShotFiles, SceneFiles, ProductFiles, MediaFiles] },
    Placeholder { token: "@SHOT@", contexts: &[ShotFiles, SceneFiles, ProductFiles, MediaFiles] },
    Placeholder { token: "@ASSET@", contexts: &[AssetFiles, SceneFiles, ProductFiles, MediaFiles] },
    Placeholder { token: "@DEPARTMENT@", contexts: &[SceneFiles, ProductFiles, MediaFiles] },
    Placeholder { token: "@TASK@", contexts: &[SceneFiles, ProductFiles, MediaFiles] },
    Placeholder {
        token: "@FILENAME@",
        contexts: &[AssetFiles, ShotFiles, SceneFiles, ProductFiles, MediaFiles, LibraryFiles],
    },
    Placeholder { token: "@VERSION@", contexts: &[SceneFiles, ProductFiles, MediaFiles] },
    Placeholder { token: "@FILETYPE@", contexts: &[SceneFiles, ProductFiles, MediaFiles] },
    Placeholder {
        token: "@EXTENSION@",
        contexts: &[SceneFiles, ProductFiles, MediaFiles, LibraryFiles],
    },
    Placeholder { token: "@PRODUCT@", contexts: &[ProductFiles] },
    Placeholder { token: "@AOV@", contexts: &[MediaFiles] },
    Placeholder { token: "@CHANNEL@", contexts: &[MediaFiles] },
    Placeholder { token: "@IDENTIFIER@", contexts: &[MediaFiles] },
    Placeholder { token: "@FRAME@", contexts: &[MediaFiles] },
];

/// 정리된 이름
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormattedName {
    pub value: String,
    /// 예약 장치 이름과 일치 (경고만 하고 사용은 막지 않음)
    pub reserved: bool,
}

/// 파일명 정리
///
/// 허용 문자(영숫자, `_ - ( ) # .`, 공백) 이외는 `_`로 바꾼다.
pub fn format_name(input: &str) -> FormattedName {
    let value: String = input
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | ' ' | '(' | ')' | '#' | '.') {
                c
            } else {
                '_'
            }
        })
        .collect();
    let reserved = is_reserved_name(&value);
    FormattedName { value, reserved }
}

/// 예약 장치 이름 검사 (대소문자 무시, 첫 `.` 앞부분 기준)
pub fn is_reserved_name(name: &str) -> bool {
    let head = name.split('.').next().unwrap_or(name).trim();
    RESERVED_NAMES
        .iter()
        .any(|reserved| reserved.eq_ignore_ascii_case(head))
}

/// 컨텍스트에서 사용할 수 있는 토큰 목록 (툴팁)
pub fn available_placeholders(context: MenuContext) -> Vec<&'static str> {
    PLACEHOLDERS
        .iter()
        .filter(|p| p.contexts.contains(&context))
        .map(|p| p.token)
        .collect()
}

pub fn is_placeholder(token: &str) -> bool {
    PLACEHOLDERS.iter().any(|p| p.token == token)
}

/// 토큰별 치환 값
fn placeholder_value(token: &str, file: &FileContext, formatted_filename: &str) -> Option<String> {
    let value = match token {
        "@PROJECT@" => file.project_name.clone(),
        "@USER@" => file.user.clone(),
        "@DATE@" => file.date_stamp.clone(),
        "@TYPE@" => file.entity_type.clone(),
        "@SEQUENCE@" => file.sequence.clone(),
        "@SHOT@" => file.shot.clone(),
        "@ASSET@" => file.asset.clone(),
        "@DEPARTMENT@" => file.department.clone(),
        "@TASK@" => file.task.clone(),
        "@PRODUCT@" => file.product.clone(),
        "@IDENTIFIER@" => file.identifier.clone(),
        "@VERSION@" => file.version.clone(),
        "@AOV@" => file.aov.clone(),
        "@CHANNEL@" => file.channel.clone(),
        "@FILENAME@" => formatted_filename.to_string(),
        "@FRAME@" => file.frame_number.clone(),
        "@FILETYPE@" => file.extension.trim_start_matches('.').to_uppercase(),
        "@EXTENSION@" => file.extension.clone(),
        _ => return None,
    };
    Some(value)
}

/// 템플릿 치환
///
/// 한 번만 훑으므로 치환된 값 안의 `@...@`는 다시 해석되지 않는다.
/// 모르는 토큰은 그대로 남는다.
pub fn substitute(template: &str, file: &FileContext, formatted_filename: &str) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find('@') {
        out.push_str(&rest[..start]);
        let tail = &rest[start..];
        let token = tail[1..]
            .find('@')
            .map(|end| &tail[..end + 2])
            .and_then(|candidate| {
                placeholder_value(candidate, file, formatted_filename).map(|v| (candidate, v))
            });
        match token {
            Some((candidate, value)) => {
                out.push_str(&value);
                rest = &tail[candidate.len()..];
            }
            None => {
                out.push('@');
                rest = &tail[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

/// 템플릿 적용 전 기본 이름 (확장자 없음)
pub fn default_base_name(
    context: MenuContext,
    file: &FileContext,
    single_file_mode: bool,
    sequence_mode: SequenceMode,
) -> String {
    let frame_stem = file
        .current_frame
        .as_deref()
        .map(|frame| file_stem(frame_basename(frame)).to_string());

    if single_file_mode {
        frame_stem.unwrap_or_else(|| file_stem(&file.source_filename).to_string())
    } else if context.is_entity_directory() {
        file.source_filename.clone()
    } else if sequence_mode == SequenceMode::ImageSequence {
        file_stem(&file.source_filename).to_string()
    } else {
        frame_stem.unwrap_or_else(|| file_stem(&file.source_filename).to_string())
    }
}

fn frame_basename(frame: &str) -> &str {
    frame.rsplit(['/', '\\']).next().unwrap_or(frame)
}

/// 템플릿으로 기본 출력 이름 생성
///
/// 템플릿이 없거나 비어 있으면 정리된 소스 파일명을 그대로 쓴다.
pub fn build_placeholder_name(
    settings: &Settings,
    context: MenuContext,
    file: &FileContext,
    single_file_mode: bool,
    sequence_mode: SequenceMode,
) -> String {
    let base = default_base_name(context, file, single_file_mode, sequence_mode);
    let formatted_filename = format!("{}{}", format_name(&base).value, file.extension);

    match settings.template_for(context) {
        Some(template) if !template.trim().is_empty() => {
            substitute(template, file, &formatted_filename)
        }
        _ => formatted_filename,
    }
}

/// 이름에서 확장자 분리 (`.hidden` 같은 점으로 시작하는 이름은 확장자 없음)
pub fn split_extension(name: &str) -> (&str, &str) {
    match name.rfind('.') {
        Some(idx) if idx > 0 && !name[..idx].ends_with(['/', '\\']) => (&name[..idx], &name[idx..]),
        _ => (name, ""),
    }
}

/// 사용자 입력 이름으로 최종 파일명 생성
///
/// 입력에 확장자가 있으면 떼어내고 소스 확장자(또는 `.zip`)를 다시 붙인다.
/// zip 시퀀스는 프레임 패딩 흔적(`#`, `_`, `.`)을 끝에서 지운다.
pub fn output_file_name(
    edited_name: &str,
    source_extension: &str,
    zip: bool,
    sequence: bool,
) -> FormattedName {
    let (root, ext) = split_extension(edited_name.trim());
    let stem = if ext.is_empty() { edited_name.trim() } else { root };
    let formatted = format_name(stem);

    let value = if zip {
        let base = if sequence {
            formatted.value.trim_end_matches(['#', '_', '.'])
        } else {
            formatted.value.as_str()
        };
        format!("{}.zip", base)
    } else {
        format!("{}{}", formatted.value, source_extension)
    };

    FormattedName {
        value,
        reserved: formatted.reserved,
    }
}
