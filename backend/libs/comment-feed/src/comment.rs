//! Comment record exchanged between storage, the feed and its subscribers

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A comment attached to a post.
///
/// Comments are immutable once created. `parent_id == None` marks a top-level
/// comment; a parent id that matches no stored comment is legal and simply
/// has no siblings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Comment {
    pub id: String,
    pub post_id: String,
    pub parent_id: Option<String>,
    pub content: String,
    pub author: String,
    pub created_at: DateTime<Utc>,
}

impl Comment {
    /// Whether this comment hangs directly off the post
    pub fn is_top_level(&self) -> bool {
        self.parent_id.is_none()
    }

    /// Whether this comment is a direct reply to `parent_id`
    pub fn is_reply_to(&self, parent_id: &str) -> bool {
        self.parent_id.as_deref() == Some(parent_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn comment(parent_id: Option<&str>) -> Comment {
        Comment {
            id: "c1".to_string(),
            post_id: "p1".to_string(),
            parent_id: parent_id.map(str::to_string),
            content: "hi".to_string(),
            author: "alice".to_string(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_top_level_and_reply() {
        assert!(comment(None).is_top_level());
        assert!(!comment(None).is_reply_to("c0"));

        let reply = comment(Some("c0"));
        assert!(!reply.is_top_level());
        assert!(reply.is_reply_to("c0"));
        assert!(!reply.is_reply_to("c9"));
    }

    #[test]
    fn test_json_payload_shape() {
        let c = comment(Some("c0"));
        let json = serde_json::to_value(&c).unwrap();

        assert_eq!(json["id"], "c1");
        assert_eq!(json["post_id"], "p1");
        assert_eq!(json["parent_id"], "c0");
        assert!(json["created_at"].is_string());

        let top_level = serde_json::to_value(comment(None)).unwrap();
        assert!(top_level["parent_id"].is_null());
    }
}
