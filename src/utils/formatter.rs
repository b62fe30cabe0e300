// Formatters - 파일 크기, 날짜 스탬프, 진행률 표시

use chrono::{DateTime, Local};

/// 파일 크기를 읽기 쉬운 형식으로 포맷팅 (숫자와 단위 사이 공백)
///
/// 예: `0 B`, `512 B`, `1.5 KB`, `1.0 MB`
pub fn format_file_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    match bytes {
        0 => "0 B".to_string(),
        b if b < KB => format!("{} B", b),
        b if b < MB => format!("{:.1} KB", b as f64 / KB as f64),
        b if b < GB => format!("{:.1} MB", b as f64 / MB as f64),
        b => format!("{:.1} GB", b as f64 / GB as f64),
    }
}

/// 네이밍 템플릿의 `@DATE@` 값 (DDMMYY)
pub fn date_stamp(now: DateTime<Local>) -> String {
    now.format("%d%m%y").to_string()
}

/// 오늘 날짜 스탬프
pub fn today_stamp() -> String {
    date_stamp(Local::now())
}

/// 개수에 따라 단수/복수형 반환
pub fn pluralize(count: usize, singular: &str, plural: &str) -> String {
    if count == 1 {
        format!("{} {}", count, singular)
    } else {
        format!("{} {}", count, plural)
    }
}

/// 진행 비율 계산 (0-100, 내림)
///
/// 분모가 0이면 나눌 대상이 없으므로 100을 반환한다.
pub fn percent_of(done: u64, total: u64) -> u8 {
    if total == 0 {
        return 100;
    }
    ((done.min(total) as u128 * 100) / total as u128) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_format_file_size() {
        assert_eq!(format_file_size(0), "0 B");
        assert_eq!(format_file_size(1023), "1023 B");
        assert_eq!(format_file_size(1536), "1.5 KB");
        assert_eq!(format_file_size(3_670_016), "3.5 MB");
        assert_eq!(format_file_size(2_147_483_648), "2.0 GB");
    }

    #[test]
    fn test_date_stamp_is_day_month_year() {
        let date = Local.with_ymd_and_hms(2024, 3, 7, 10, 0, 0).unwrap();
        assert_eq!(date_stamp(date), "070324");
    }

    #[test]
    fn test_pluralize() {
        assert_eq!(pluralize(0, "file", "files"), "0 files");
        assert_eq!(pluralize(1, "file", "files"), "1 file");
        assert_eq!(pluralize(7, "file", "files"), "7 files");
    }

    #[test]
    fn test_percent_of_floors_and_handles_zero_total() {
        assert_eq!(percent_of(0, 0), 100);
        assert_eq!(percent_of(1, 3), 33);
        assert_eq!(percent_of(2, 3), 66);
        assert_eq!(percent_of(3, 3), 100);
        assert_eq!(percent_of(10, 3), 100);
    }
}
