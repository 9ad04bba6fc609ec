// ==========================================
// 网店订单出货系统 - 单元格解析器
// ==========================================
// 职责: 把自由文本单元格解析为数字/整数/时间
// 约定: 千分位逗号（半角/全角）一律剔除；
//       数字形态的日期按表格序列日期（非闰 1900 约定）解读
// ==========================================

use crate::importer::error::{ImportError, ImportResult};
use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, NaiveTime, Utc};

/// 序列日期纪元: 1899-12-30（非闰 1900 约定）
const EXCEL_EPOCH_YMD: (i32, u32, u32) = (1899, 12, 30);

/// 文本日期布局，按序尝试，首个命中生效
///
/// chrono 的数字域本身接受未补零的月/日，
/// 点号布局因此同时覆盖「2024.01.02」与「2024.1.2」两种写法。
const DATE_LAYOUTS: [(&str, bool); 5] = [
    ("%Y/%m/%d %H:%M:%S", true),
    ("%Y-%m-%d %H:%M:%S", true),
    ("%Y/%m/%d", false),
    ("%Y-%m-%d", false),
    ("%Y.%m.%d %H:%M:%S", true),
];

/// 剔除千分位逗号并去除首尾空白
fn strip_separators(raw: &str) -> String {
    raw.chars()
        .filter(|c| *c != ',' && *c != '，')
        .collect::<String>()
        .trim()
        .to_string()
}

/// 解析十进制数字
///
/// # 示例
/// - "1,234.50" → 1234.5
/// - "３" 之类全角数字不做转换，解析失败
pub fn parse_number(raw: &str) -> ImportResult<f64> {
    let clean = strip_separators(raw);
    if clean.is_empty() {
        return Err(ImportError::InvalidNumber {
            value: raw.to_string(),
        });
    }
    clean.parse::<f64>().map_err(|_| ImportError::InvalidNumber {
        value: raw.to_string(),
    })
}

/// 解析整数
///
/// 带小数点的文本先按十进制解析，小数部分必须恰为零
/// （"3.0" 可接受，"3.5" 报 InvalidInteger）。
pub fn parse_integer(raw: &str) -> ImportResult<i64> {
    let clean = strip_separators(raw);
    if clean.is_empty() {
        return Err(ImportError::InvalidNumber {
            value: raw.to_string(),
        });
    }

    if clean.contains('.') {
        let parsed = clean.parse::<f64>().map_err(|_| ImportError::InvalidNumber {
            value: raw.to_string(),
        })?;
        if parsed.fract() != 0.0 {
            return Err(ImportError::InvalidInteger {
                value: raw.to_string(),
            });
        }
        return Ok(parsed as i64);
    }

    clean.parse::<i64>().map_err(|_| ImportError::InvalidNumber {
        value: raw.to_string(),
    })
}

/// 解析订购时间
///
/// 纯数字文本按表格序列日期转换；否则按 [`DATE_LAYOUTS`]
/// 逐个尝试文本布局。日期无时间部分时取当日零点（UTC）。
pub fn parse_datetime(raw: &str) -> ImportResult<DateTime<Utc>> {
    let clean = raw.trim();
    if clean.is_empty() {
        return Err(ImportError::InvalidDate {
            value: raw.to_string(),
        });
    }

    if let Ok(serial) = clean.parse::<f64>() {
        if let Some(ts) = excel_serial_to_datetime(serial) {
            return Ok(ts);
        }
        // 负数或越界的序列值继续走文本布局
    }

    for (layout, has_time) in DATE_LAYOUTS {
        if has_time {
            if let Ok(dt) = NaiveDateTime::parse_from_str(clean, layout) {
                return Ok(DateTime::<Utc>::from_naive_utc_and_offset(dt, Utc));
            }
        } else if let Ok(date) = NaiveDate::parse_from_str(clean, layout) {
            let dt = date.and_time(NaiveTime::MIN);
            return Ok(DateTime::<Utc>::from_naive_utc_and_offset(dt, Utc));
        }
    }

    Err(ImportError::InvalidDate {
        value: raw.to_string(),
    })
}

/// 表格序列日期 → UTC 时间
///
/// 天数加在 1899-12-30 纪元上，小数部分按当日秒数折算。
/// 负值或溢出返回 None，由调用方退回文本解析。
fn excel_serial_to_datetime(serial: f64) -> Option<DateTime<Utc>> {
    if !serial.is_finite() || serial < 0.0 {
        return None;
    }

    let days = serial.trunc() as i64;
    let day_fraction_secs = ((serial - serial.trunc()) * 86_400.0).round() as i64;

    let (y, m, d) = EXCEL_EPOCH_YMD;
    let epoch = NaiveDate::from_ymd_opt(y, m, d)?.and_time(NaiveTime::MIN);
    let naive = epoch
        .checked_add_signed(Duration::try_days(days)?)?
        .checked_add_signed(Duration::try_seconds(day_fraction_secs)?)?;

    Some(DateTime::<Utc>::from_naive_utc_and_offset(naive, Utc))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn test_parse_number_strips_thousand_separators() {
        assert_eq!(parse_number("1,234.50").unwrap(), 1234.5);
        assert_eq!(parse_number(" 42 ").unwrap(), 42.0);
        assert_eq!(parse_number("3，000").unwrap(), 3000.0);
    }

    #[test]
    fn test_parse_number_rejects_garbage() {
        assert!(matches!(
            parse_number("abc"),
            Err(ImportError::InvalidNumber { .. })
        ));
        assert!(matches!(
            parse_number("   "),
            Err(ImportError::InvalidNumber { .. })
        ));
    }

    #[test]
    fn test_parse_integer_accepts_zero_fraction() {
        assert_eq!(parse_integer("3.0").unwrap(), 3);
        assert_eq!(parse_integer("3").unwrap(), 3);
        assert_eq!(parse_integer("1,000").unwrap(), 1000);
    }

    #[test]
    fn test_parse_integer_rejects_nonzero_fraction() {
        assert!(matches!(
            parse_integer("3.5"),
            Err(ImportError::InvalidInteger { .. })
        ));
        assert!(matches!(
            parse_integer("-3.5"),
            Err(ImportError::InvalidInteger { .. })
        ));
    }

    #[test]
    fn test_parse_datetime_slash_date() {
        let ts = parse_datetime("2024/01/15").unwrap();
        assert_eq!((ts.year(), ts.month(), ts.day()), (2024, 1, 15));
        assert_eq!((ts.hour(), ts.minute()), (0, 0));
    }

    #[test]
    fn test_parse_datetime_dash_datetime() {
        let ts = parse_datetime("2024-01-15 10:30:00").unwrap();
        assert_eq!((ts.year(), ts.month(), ts.day()), (2024, 1, 15));
        assert_eq!((ts.hour(), ts.minute(), ts.second()), (10, 30, 0));
    }

    #[test]
    fn test_parse_datetime_dotted_lenient() {
        let ts = parse_datetime("2024.1.2 03:04:05").unwrap();
        assert_eq!((ts.year(), ts.month(), ts.day()), (2024, 1, 2));
        assert_eq!(ts.hour(), 3);
    }

    #[test]
    fn test_parse_datetime_excel_serial() {
        // 序列值 45000 对应 2023-03-15
        let ts = parse_datetime("45000").unwrap();
        assert_eq!((ts.year(), ts.month(), ts.day()), (2023, 3, 15));

        // 小数部分为当日时刻
        let noon = parse_datetime("45000.5").unwrap();
        assert_eq!(noon.hour(), 12);
    }

    #[test]
    fn test_parse_datetime_negative_serial_falls_back() {
        // 负数不是合法序列日期，文本布局也不适用
        assert!(matches!(
            parse_datetime("-5"),
            Err(ImportError::InvalidDate { .. })
        ));
    }

    #[test]
    fn test_parse_datetime_rejects_garbage() {
        let err = parse_datetime("not-a-date").unwrap_err();
        assert!(matches!(err, ImportError::InvalidDate { .. }));
        assert!(err.to_string().contains("not-a-date"));
    }
}
