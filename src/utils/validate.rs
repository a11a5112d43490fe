use chrono::{NaiveDate, NaiveTime};
use once_cell::sync::Lazy;
use regex::Regex;

static USERNAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9_.-]+$").expect("Invalid username regex"));

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$").expect("Invalid email regex")
});

static PHONE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9+\-() ]{10,20}$").expect("Invalid phone regex"));

static CLASS_CODE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9_-]+$").expect("Invalid class code regex"));

pub const MAX_CLASS_CAPACITY: i32 = 100;

pub fn validate_username(username: &str) -> Result<(), &'static str> {
    // 用户名长度校验：3 <= x <= 50
    if username.len() < 3 || username.len() > 50 {
        return Err("Username length must be between 3 and 50 characters");
    }
    if !USERNAME_RE.is_match(username) {
        return Err("Username must contain only letters, numbers, dots, underscores or hyphens");
    }
    Ok(())
}

pub fn validate_email(email: &str) -> Result<(), &'static str> {
    if !EMAIL_RE.is_match(email) {
        return Err("Email format is invalid");
    }
    Ok(())
}

pub fn validate_password(password: &str) -> Result<(), &'static str> {
    if password.chars().count() < 6 {
        return Err("Password must be at least 6 characters long");
    }
    Ok(())
}

pub fn validate_phone(phone: &str) -> Result<(), &'static str> {
    if !PHONE_RE.is_match(phone) {
        return Err("Phone number is invalid");
    }
    Ok(())
}

/// 班级代码：1-20 个字符，字母数字、下划线或连字符
pub fn validate_class_code(code: &str) -> Result<(), &'static str> {
    let code = code.trim();
    if code.is_empty() || code.chars().count() > 20 {
        return Err("Class code length must be between 1 and 20 characters");
    }
    if !CLASS_CODE_RE.is_match(code) {
        return Err("Class code must contain only letters, numbers, underscores or hyphens");
    }
    Ok(())
}

pub fn validate_class_name(name: &str) -> Result<(), &'static str> {
    let len = name.trim().chars().count();
    if len == 0 || len > 100 {
        return Err("Class name length must be between 1 and 100 characters");
    }
    Ok(())
}

pub fn validate_max_students(max_students: i32) -> Result<(), &'static str> {
    if !(1..=MAX_CLASS_CAPACITY).contains(&max_students) {
        return Err("max_students must be between 1 and 100");
    }
    Ok(())
}

pub fn validate_date_range(start: NaiveDate, end: Option<NaiveDate>) -> Result<(), &'static str> {
    match end {
        Some(end) if end < start => Err("end_date must not be earlier than start_date"),
        _ => Ok(()),
    }
}

pub fn validate_time_range(start: NaiveTime, end: NaiveTime) -> Result<(), &'static str> {
    if end <= start {
        return Err("time_end must be later than time_start");
    }
    Ok(())
}

pub fn validate_location(location: Option<&str>) -> Result<(), &'static str> {
    match location {
        Some(loc) if loc.chars().count() > 100 => Err("Location must be at most 100 characters"),
        _ => Ok(()),
    }
}

pub fn validate_rejection_reason(reason: &str) -> Result<(), &'static str> {
    if reason.trim().is_empty() {
        return Err("A rejection reason is required");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn time(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn test_username() {
        assert!(validate_username("sensei.kim").is_ok());
        assert!(validate_username("ab").is_err());
        assert!(validate_username("has space").is_err());
    }

    #[test]
    fn test_email() {
        assert!(validate_email("student@dojo.org").is_ok());
        assert!(validate_email("student@dojo").is_err());
    }

    #[test]
    fn test_password_length() {
        assert!(validate_password("kiai!!").is_ok());
        assert!(validate_password("short").is_err());
    }

    #[test]
    fn test_phone() {
        assert!(validate_phone("+84 912-345-678").is_ok());
        assert!(validate_phone("12345").is_err());
    }

    #[test]
    fn test_class_code() {
        assert!(validate_class_code("K-101").is_ok());
        assert!(validate_class_code("").is_err());
        assert!(validate_class_code("ABCDEFGHIJKLMNOPQRSTU").is_err());
        assert!(validate_class_code("K 101").is_err());
    }

    #[test]
    fn test_class_name() {
        assert!(validate_class_name("Karate for beginners").is_ok());
        assert!(validate_class_name("   ").is_err());
        assert!(validate_class_name(&"x".repeat(101)).is_err());
    }

    #[test]
    fn test_max_students_bounds() {
        assert!(validate_max_students(1).is_ok());
        assert!(validate_max_students(100).is_ok());
        assert!(validate_max_students(0).is_err());
        assert!(validate_max_students(101).is_err());
    }

    #[test]
    fn test_date_range() {
        assert!(validate_date_range(date(2025, 3, 1), None).is_ok());
        assert!(validate_date_range(date(2025, 3, 1), Some(date(2025, 3, 1))).is_ok());
        assert!(validate_date_range(date(2025, 3, 1), Some(date(2025, 2, 28))).is_err());
    }

    #[test]
    fn test_time_range() {
        assert!(validate_time_range(time(18, 0), time(20, 0)).is_ok());
        assert!(validate_time_range(time(18, 0), time(18, 0)).is_err());
        assert!(validate_time_range(time(20, 0), time(18, 0)).is_err());
    }

    #[test]
    fn test_rejection_reason() {
        assert!(validate_rejection_reason("Room unavailable").is_ok());
        assert!(validate_rejection_reason("  ").is_err());
    }
}
