use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use lazy_static::lazy_static;
use regex::Regex;
use unidecode::unidecode;

const DATE_FORMATS: [&str; 5] = ["%Y-%m-%d", "%Y/%m/%d", "%B %d, %Y", "%b %d, %Y", "%d %B %Y"];
const DATE_TIME_FORMATS: [&str; 3] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%d %H:%M"];

/// Calendar value of a frontmatter date. `None` when no known format matches.
pub fn parse_post_date(buf: &str) -> Option<NaiveDateTime> {
    let buf = buf.trim();
    if buf.is_empty() {
        return None;
    }

    if let Ok(date_time) = DateTime::parse_from_rfc3339(buf) {
        return Some(date_time.naive_utc());
    }

    for format in DATE_TIME_FORMATS {
        if let Ok(date_time) = NaiveDateTime::parse_from_str(buf, format) {
            return Some(date_time);
        }
    }

    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(buf, format) {
            return Some(NaiveDateTime::new(date, NaiveTime::MIN));
        }
    }

    None
}

/// Directory name for a new post, e.g. `Enhancing UX & DX` -> `enhancing-ux-dx`.
pub fn slug_from_title(title: &str) -> String {
    lazy_static! {
        static ref NON_ALNUM: Regex = Regex::new(r"[^a-z0-9]+").unwrap();
    }

    let ascii = unidecode(title).to_ascii_lowercase();
    NON_ALNUM.replace_all(&ascii, "-")
        .trim_matches('-')
        .to_string()
}
