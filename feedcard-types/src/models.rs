use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// The post service emits ISO-8601 strings ("2024-03-01T12:00:00.000Z");
// keep them as RFC3339 on the way back out.
mod datetime_format {
    use chrono::{DateTime, Utc};
    use serde::{self, Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(date: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&date.to_rfc3339())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse::<DateTime<Utc>>().map_err(serde::de::Error::custom)
    }
}

/// A user record as the post service returns it: the current viewer, a post
/// author or a comment author.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Viewer {
    #[serde(rename = "_id")]
    pub id: String,
    pub username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub education_level: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub academic_year: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "user")]
    pub author: Viewer,
    pub text: String,
    #[serde(with = "datetime_format")]
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "user")]
    pub author: Viewer,
    pub text: String,
    /// Image reference (URL or asset path)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub img: Option<String>,
    /// Ids of the users who liked the post
    #[serde(default)]
    pub likes: Vec<String>,
    /// Comments in server order
    #[serde(default)]
    pub comments: Vec<Comment>,
    #[serde(with = "datetime_format")]
    pub created_at: DateTime<Utc>,
}

// Request/Response types for API
#[derive(Debug, Serialize, Deserialize)]
pub struct CommentRequest {
    pub text: String,
}

/// Body returned by the comment endpoint. Only the refreshed comment list is
/// read; the rest of the post document is ignored.
#[derive(Debug, Serialize, Deserialize)]
pub struct CommentResponse {
    #[serde(default)]
    pub comments: Vec<Comment>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    #[serde(alias = "message")]
    pub error: String,
    #[serde(default)]
    pub details: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_post_deserializes_service_document() {
        let json = r#"{
            "_id": "p1",
            "user": {
                "_id": "u1",
                "username": "ada",
                "educationLevel": "Undergraduate",
                "academicYear": "2"
            },
            "text": "first post",
            "likes": ["u2"],
            "comments": [{
                "_id": "c1",
                "user": { "_id": "u2", "username": "bob" },
                "text": "hello",
                "timestamp": "2024-03-01T12:00:00.000Z"
            }],
            "createdAt": "2024-03-01T11:00:00.000Z",
            "__v": 0
        }"#;

        let post: Post = serde_json::from_str(json).unwrap();
        assert_eq!(post.id, "p1");
        assert_eq!(post.author.education_level.as_deref(), Some("Undergraduate"));
        assert_eq!(post.author.profile_image, None);
        assert_eq!(post.img, None);
        assert_eq!(post.likes, vec!["u2".to_string()]);
        assert_eq!(post.comments.len(), 1);
        assert_eq!(post.comments[0].author.username, "bob");
    }

    #[test]
    fn test_post_missing_volatile_fields_default_to_empty() {
        let json = r#"{
            "_id": "p2",
            "user": { "_id": "u1", "username": "ada" },
            "text": "no reactions yet",
            "createdAt": "2024-03-01T11:00:00Z"
        }"#;

        let post: Post = serde_json::from_str(json).unwrap();
        assert!(post.likes.is_empty());
        assert!(post.comments.is_empty());
    }

    #[test]
    fn test_comment_response_without_comments_is_empty() {
        let response: CommentResponse = serde_json::from_str(r#"{"_id": "p1"}"#).unwrap();
        assert!(response.comments.is_empty());
    }

    #[test]
    fn test_viewer_serializes_camel_case_and_skips_missing_fields() {
        let viewer = Viewer {
            id: "u1".to_string(),
            username: "ada".to_string(),
            profile_image: Some("ada.png".to_string()),
            education_level: None,
            academic_year: None,
        };

        let json = serde_json::to_value(&viewer).unwrap();
        assert_eq!(json["_id"], "u1");
        assert_eq!(json["profileImage"], "ada.png");
        assert!(json.get("educationLevel").is_none());
    }
}
