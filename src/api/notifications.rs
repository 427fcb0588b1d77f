use std::sync::Arc;

use poem_openapi::{param::Path, param::Query, payload::Json, OpenApi, Tags};

use crate::api::{BearerAuth, IdentityGate};
use crate::errors::api::NotificationError;
use crate::stores::NotificationStore;
use crate::types::dto::notifications::{NotificationPageView, NotificationView, ReadAllResponse};

const DEFAULT_PAGE_SIZE: u64 = 20;
const MAX_PAGE_SIZE: u64 = 100;

/// Notification inbox API endpoints
pub struct NotificationsApi {
    notifications: Arc<NotificationStore>,
    gate: Arc<IdentityGate>,
}

impl NotificationsApi {
    /// Create a new NotificationsApi
    pub fn new(notifications: Arc<NotificationStore>, gate: Arc<IdentityGate>) -> Self {
        Self {
            notifications,
            gate,
        }
    }
}

/// API tags for notification endpoints
#[derive(Tags)]
enum NotificationTags {
    /// Notification inbox endpoints
    Notifications,
}

#[OpenApi(prefix_path = "/notifications")]
impl NotificationsApi {
    /// The caller's notification inbox, newest first
    #[oai(path = "/", method = "get", tag = "NotificationTags::Notifications")]
    pub async fn list(
        &self,
        auth: BearerAuth,
        page: Query<Option<u64>>,
        limit: Query<Option<u64>>,
    ) -> Result<Json<NotificationPageView>, NotificationError> {
        let caller = self.gate.require(&auth).await?;

        let page = page.0.unwrap_or(1).max(1);
        let limit = limit.0.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE);

        let inbox = self
            .notifications
            .list_page(&caller.id, page, limit)
            .await
            .map_err(NotificationError::from_internal_error)?;

        Ok(Json(NotificationPageView {
            notifications: inbox.items.into_iter().map(NotificationView::from).collect(),
            total: inbox.total,
            unread: inbox.unread,
            page,
            limit,
        }))
    }

    /// Mark one notification as read
    ///
    /// Idempotent: marking an already-read notification succeeds without
    /// changing its original read time.
    #[oai(path = "/:id/read", method = "patch", tag = "NotificationTags::Notifications")]
    async fn mark_read(
        &self,
        auth: BearerAuth,
        id: Path<String>,
    ) -> Result<Json<NotificationView>, NotificationError> {
        let caller = self.gate.require(&auth).await?;

        let updated = self
            .notifications
            .mark_read(&id.0, &caller.id)
            .await
            .map_err(NotificationError::from_internal_error)?
            .ok_or_else(NotificationError::not_found)?;

        Ok(Json(updated.into()))
    }

    /// Mark every notification of the caller as read
    #[oai(path = "/read-all", method = "patch", tag = "NotificationTags::Notifications")]
    async fn mark_all_read(
        &self,
        auth: BearerAuth,
    ) -> Result<Json<ReadAllResponse>, NotificationError> {
        let caller = self.gate.require(&auth).await?;

        let updated = self
            .notifications
            .mark_all_read(&caller.id)
            .await
            .map_err(NotificationError::from_internal_error)?;

        Ok(Json(ReadAllResponse { updated }))
    }
}
