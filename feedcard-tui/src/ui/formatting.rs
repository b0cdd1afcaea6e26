use chrono::{DateTime, Utc};
use feedcard_types::Viewer;

/// Avatar shown when a user has no profile image
pub const DEFAULT_AVATAR: &str = "assets/DemoProfileImage.png";

pub const SHARE_CONFIRMATION_TEXT: &str = "URL is copied to your clipboard!";
pub const DELETE_PROMPT: &str = "Are you sure you want to delete this post?";
pub const COMMENT_PLACEHOLDER: &str = "Add a comment...";

/// Format a timestamp relative to `now` ("5 minutes ago", "a day ago")
pub fn format_relative(timestamp: &DateTime<Utc>, now: &DateTime<Utc>) -> String {
    let seconds = now.signed_duration_since(*timestamp).num_seconds().max(0);
    let minutes = (seconds as f64 / 60.0).round() as i64;
    let hours = (seconds as f64 / 3600.0).round() as i64;
    let days = (seconds as f64 / 86_400.0).round() as i64;

    if seconds < 45 {
        "a few seconds ago".to_string()
    } else if seconds < 90 {
        "a minute ago".to_string()
    } else if minutes < 45 {
        format!("{} minutes ago", minutes)
    } else if minutes < 90 {
        "an hour ago".to_string()
    } else if hours < 22 {
        format!("{} hours ago", hours)
    } else if hours < 36 {
        "a day ago".to_string()
    } else if days < 26 {
        format!("{} days ago", days)
    } else if days < 45 {
        "a month ago".to_string()
    } else if days < 320 {
        format!("{} months ago", (days as f64 / 30.4).round() as i64)
    } else if days < 548 {
        "a year ago".to_string()
    } else {
        format!("{} years ago", (days as f64 / 365.25).round() as i64)
    }
}

/// Education details shown after an author's name ("Undergraduate, Year 2")
pub fn format_author_details(user: &Viewer) -> String {
    let mut parts = Vec::new();
    if let Some(level) = user.education_level.as_deref().filter(|l| !l.is_empty()) {
        parts.push(level.to_string());
    }
    if let Some(year) = user.academic_year.as_deref().filter(|y| !y.is_empty()) {
        parts.push(format!("Year {}", year));
    }
    parts.join(", ")
}

pub fn avatar_or_default(user: &Viewer) -> &str {
    user.profile_image
        .as_deref()
        .filter(|p| !p.is_empty())
        .unwrap_or(DEFAULT_AVATAR)
}

pub fn submit_label(in_flight: bool) -> &'static str {
    if in_flight {
        "Posting..."
    } else {
        "Post"
    }
}

/// Wrap body text to the given width, keeping blank lines
pub fn wrap_text(content: &str, max_width: usize) -> Vec<String> {
    let width = max_width.max(1);
    let mut lines = Vec::new();

    for line in content.lines() {
        if line.is_empty() {
            lines.push(String::new());
            continue;
        }
        lines.extend(textwrap::wrap(line, width).into_iter().map(|l| l.into_owned()));
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn viewer(level: Option<&str>, year: Option<&str>) -> Viewer {
        Viewer {
            id: "u1".to_string(),
            username: "ada".to_string(),
            profile_image: None,
            education_level: level.map(String::from),
            academic_year: year.map(String::from),
        }
    }

    #[test]
    fn test_format_relative_thresholds() {
        let now = Utc::now();
        assert_eq!(format_relative(&now, &now), "a few seconds ago");
        assert_eq!(format_relative(&(now - Duration::seconds(60)), &now), "a minute ago");
        assert_eq!(format_relative(&(now - Duration::minutes(5)), &now), "5 minutes ago");
        assert_eq!(format_relative(&(now - Duration::minutes(60)), &now), "an hour ago");
        assert_eq!(format_relative(&(now - Duration::hours(3)), &now), "3 hours ago");
        assert_eq!(format_relative(&(now - Duration::hours(30)), &now), "a day ago");
        assert_eq!(format_relative(&(now - Duration::days(4)), &now), "4 days ago");
        assert_eq!(format_relative(&(now - Duration::days(800)), &now), "2 years ago");
    }

    #[test]
    fn test_format_relative_future_clamps_to_now() {
        let now = Utc::now();
        assert_eq!(
            format_relative(&(now + Duration::minutes(10)), &now),
            "a few seconds ago"
        );
    }

    #[test]
    fn test_format_author_details() {
        assert_eq!(
            format_author_details(&viewer(Some("Undergraduate"), Some("2"))),
            "Undergraduate, Year 2"
        );
        assert_eq!(format_author_details(&viewer(Some("Masters"), None)), "Masters");
        assert_eq!(format_author_details(&viewer(None, Some("3"))), "Year 3");
        assert_eq!(format_author_details(&viewer(None, None)), "");
    }

    #[test]
    fn test_avatar_falls_back_to_default() {
        let mut user = viewer(None, None);
        assert_eq!(avatar_or_default(&user), DEFAULT_AVATAR);
        user.profile_image = Some("me.png".to_string());
        assert_eq!(avatar_or_default(&user), "me.png");
    }

    #[test]
    fn test_wrap_text_keeps_blank_lines() {
        let lines = wrap_text("one two three\n\nfour", 8);
        assert_eq!(lines, vec!["one two", "three", "", "four"]);
    }
}
