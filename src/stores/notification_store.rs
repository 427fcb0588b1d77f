use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};
use uuid::Uuid;

use crate::errors::InternalError;
use crate::types::db::notification::{self, Entity as Notification};

/// One page of a recipient's inbox
pub struct NotificationPage {
    pub items: Vec<notification::Model>,
    pub total: u64,
    pub unread: u64,
}

/// Repository for notification storage operations
///
/// Notifications are the durable record of consent-workflow events; the
/// realtime push layer is only a convenience on top of this store.
pub struct NotificationStore {
    db: DatabaseConnection,
}

impl NotificationStore {
    /// Create a new NotificationStore with the given database connection
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Insert a durable notification for a recipient
    ///
    /// `reference_id` optionally correlates the notification to a contact
    /// request so a client can resolve the notification back to it.
    pub async fn create(
        &self,
        recipient_id: &str,
        title: &str,
        body: &str,
        category: &str,
        reference_id: Option<String>,
    ) -> Result<notification::Model, InternalError> {
        let row = notification::ActiveModel {
            id: Set(Uuid::new_v4().to_string()),
            recipient_id: Set(recipient_id.to_string()),
            title: Set(title.to_string()),
            body: Set(body.to_string()),
            category: Set(category.to_string()),
            reference_id: Set(reference_id),
            is_read: Set(false),
            read_at: Set(None),
            created_at: Set(Utc::now().timestamp_millis()),
        };

        row.insert(&self.db)
            .await
            .map_err(|e| InternalError::database("insert_notification", e))
    }

    /// Mark one notification as read
    ///
    /// Scoped to the recipient: an unknown id and a notification addressed
    /// to someone else both return `None`. Marking an already-read
    /// notification is a no-op that preserves the original `read_at`.
    pub async fn mark_read(
        &self,
        id: &str,
        recipient_id: &str,
    ) -> Result<Option<notification::Model>, InternalError> {
        let found = Notification::find()
            .filter(notification::Column::Id.eq(id))
            .filter(notification::Column::RecipientId.eq(recipient_id))
            .one(&self.db)
            .await
            .map_err(|e| InternalError::database("find_notification", e))?;

        let Some(found) = found else {
            return Ok(None);
        };
        if found.is_read {
            return Ok(Some(found));
        }

        let mut row: notification::ActiveModel = found.into();
        row.is_read = Set(true);
        row.read_at = Set(Some(Utc::now().timestamp_millis()));

        let updated = row
            .update(&self.db)
            .await
            .map_err(|e| InternalError::database("mark_notification_read", e))?;

        Ok(Some(updated))
    }

    /// Mark every unread notification of a recipient as read
    ///
    /// Returns the number of notifications that changed state.
    pub async fn mark_all_read(&self, recipient_id: &str) -> Result<u64, InternalError> {
        let result = Notification::update_many()
            .col_expr(notification::Column::IsRead, Expr::value(true))
            .col_expr(
                notification::Column::ReadAt,
                Expr::value(Utc::now().timestamp_millis()),
            )
            .filter(notification::Column::RecipientId.eq(recipient_id))
            .filter(notification::Column::IsRead.eq(false))
            .exec(&self.db)
            .await
            .map_err(|e| InternalError::database("mark_all_notifications_read", e))?;

        Ok(result.rows_affected)
    }

    /// Fetch one page of a recipient's inbox, newest first
    ///
    /// `page` is 1-based.
    pub async fn list_page(
        &self,
        recipient_id: &str,
        page: u64,
        limit: u64,
    ) -> Result<NotificationPage, InternalError> {
        let paginator = Notification::find()
            .filter(notification::Column::RecipientId.eq(recipient_id))
            .order_by_desc(notification::Column::CreatedAt)
            .paginate(&self.db, limit);

        let total = paginator
            .num_items()
            .await
            .map_err(|e| InternalError::database("count_notifications", e))?;

        let items = paginator
            .fetch_page(page.saturating_sub(1))
            .await
            .map_err(|e| InternalError::database("list_notifications", e))?;

        let unread = Notification::find()
            .filter(notification::Column::RecipientId.eq(recipient_id))
            .filter(notification::Column::IsRead.eq(false))
            .count(&self.db)
            .await
            .map_err(|e| InternalError::database("count_unread_notifications", e))?;

        Ok(NotificationPage {
            items,
            total,
            unread,
        })
    }
}
