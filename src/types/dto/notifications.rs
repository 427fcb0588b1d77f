use poem_openapi::Object;

use crate::types::db::notification;

/// Response model representing an inbox notification
#[derive(Object, Debug)]
pub struct NotificationView {
    /// Unique identifier of the notification
    pub id: String,

    /// Short title
    pub title: String,

    /// Message body
    pub body: String,

    /// Category tag, e.g. "contact_request"
    pub category: String,

    /// Contact request this notification correlates to, if any
    pub reference_id: Option<String>,

    /// Whether the notification has been read
    pub is_read: bool,

    /// When the notification was first read (Unix milliseconds)
    pub read_at: Option<i64>,

    /// Creation time (Unix milliseconds)
    pub created_at: i64,
}

impl From<notification::Model> for NotificationView {
    fn from(model: notification::Model) -> Self {
        Self {
            id: model.id,
            title: model.title,
            body: model.body,
            category: model.category,
            reference_id: model.reference_id,
            is_read: model.is_read,
            read_at: model.read_at,
            created_at: model.created_at,
        }
    }
}

/// Response model for the paginated notification inbox
#[derive(Object, Debug)]
pub struct NotificationPageView {
    /// Notifications on this page, newest first
    pub notifications: Vec<NotificationView>,

    /// Total number of notifications for the recipient
    pub total: u64,

    /// Number of unread notifications for the recipient
    pub unread: u64,

    /// 1-based page number
    pub page: u64,

    /// Page size used for this query
    pub limit: u64,
}

/// Response model for the bulk mark-read endpoint
#[derive(Object, Debug)]
pub struct ReadAllResponse {
    /// Number of notifications newly marked as read
    pub updated: u64,
}
