use chrono::{NaiveDate, NaiveDateTime};

const DATE_FORMATS: [&str; 4] = ["%Y-%m-%d", "%Y/%m/%d", "%d %B %Y", "%B %d, %Y"];
const DATE_TIME_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M"];

/// RFC 822 as used by RSS readers, always in GMT
const RFC822_FORMAT: &str = "%a, %d %b %Y %H:%M:%S GMT";

pub fn parse_date(buf: &str) -> Result<NaiveDate, String> {
    let buf = buf.trim();

    for fmt in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(buf, fmt) {
            return Ok(date);
        }
    }

    // A full timestamp is accepted too, only the day matters for a post
    for fmt in DATE_TIME_FORMATS {
        if let Ok(date_time) = NaiveDateTime::parse_from_str(buf, fmt) {
            return Ok(date_time.date());
        }
    }

    Err(format!("Unable to parse date [{}]", buf))
}

pub fn format_date(date: &NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

pub fn format_rfc822(date_time: &NaiveDateTime) -> String {
    date_time.format(RFC822_FORMAT).to_string()
}

pub fn start_of_day(date: &NaiveDate) -> NaiveDateTime {
    date.and_time(chrono::NaiveTime::MIN)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_parse_date() {
        assert_eq!(parse_date("2024-03-01"), Ok(ymd(2024, 3, 1)));
        assert_eq!(parse_date("  2024-03-01 "), Ok(ymd(2024, 3, 1)));
        assert_eq!(parse_date("2024/03/01"), Ok(ymd(2024, 3, 1)));
        assert_eq!(parse_date("1 March 2024"), Ok(ymd(2024, 3, 1)));
        assert_eq!(parse_date("March 1, 2024"), Ok(ymd(2024, 3, 1)));
        assert_eq!(parse_date("2017-09-10 10:42:32"), Ok(ymd(2017, 9, 10)));
        assert_eq!(parse_date("2017-09-10 10:42"), Ok(ymd(2017, 9, 10)));
    }

    #[test]
    fn test_parse_invalid_date() {
        assert_eq!(parse_date("someday"), Err("Unable to parse date [someday]".to_string()));
        assert!(parse_date("2024-02-30").is_err());
        assert!(parse_date("").is_err());
    }

    #[test]
    fn test_format_rfc822() {
        let dt = start_of_day(&ymd(2024, 1, 2));
        assert_eq!(format_rfc822(&dt), "Tue, 02 Jan 2024 00:00:00 GMT");
        assert_eq!(format_date(&ymd(2024, 1, 2)), "2024-01-02");
    }
}
