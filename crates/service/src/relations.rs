//! Comment and attachment operations.
//!
//! Every write follows the same path: validate content, resolve the
//! entity type through the registry, locate the target via the catalog,
//! enforce the tenant scope guard, then persist the record and its
//! activity row in one transaction.

use std::sync::Arc;

use serde::Serialize;
use uuid::Uuid;

use keel_core::activity::ActivityAction;
use keel_core::content::{
    snippet, validate_attachment_name, validate_comment_text, MAX_DESCRIPTION_LENGTH,
};
use keel_core::error::CoreError;
use keel_core::pagination::{Page, PageRequest};
use keel_core::reference::EntityRef;
use keel_core::tenant;
use keel_core::types::{BlobRef, OrgId, ProfileId};
use keel_db::models::activity::CreateActivity;
use keel_db::models::attachment::{Attachment, CreateAttachment};
use keel_db::models::comment::{Comment, CreateComment};
use keel_db::repositories::{AttachmentRepo, CommentRepo};
use keel_db::DbPool;

use crate::collaborators::{require_active_org, EntityCatalog, OrgDirectory, ProfileDirectory};
use crate::error::ServiceResult;
use crate::retry::with_retry;

// ---------------------------------------------------------------------------
// View types
// ---------------------------------------------------------------------------

/// A comment enriched with its author's display name.
///
/// `author_name` is `None` when the authoring profile no longer exists;
/// dangling author references are tolerated, never an error.
#[derive(Debug, Clone, Serialize)]
pub struct CommentView {
    #[serde(flatten)]
    pub comment: Comment,
    pub author_name: Option<String>,
}

/// An attachment enriched with its uploader's display name.
#[derive(Debug, Clone, Serialize)]
pub struct AttachmentView {
    #[serde(flatten)]
    pub attachment: Attachment,
    pub uploader_name: Option<String>,
}

// ---------------------------------------------------------------------------
// RelationService
// ---------------------------------------------------------------------------

/// Attaches comments and files to business entities.
pub struct RelationService {
    pool: DbPool,
    orgs: Arc<dyn OrgDirectory>,
    profiles: Arc<dyn ProfileDirectory>,
    catalog: Arc<dyn EntityCatalog>,
}

impl RelationService {
    pub fn new(
        pool: DbPool,
        orgs: Arc<dyn OrgDirectory>,
        profiles: Arc<dyn ProfileDirectory>,
        catalog: Arc<dyn EntityCatalog>,
    ) -> Self {
        RelationService {
            pool,
            orgs,
            profiles,
            catalog,
        }
    }

    /// Attach a comment to the entity named by `(type_name, entity_id)`.
    ///
    /// Emits exactly one activity record (`action = comment`) carrying
    /// the *target's* entity reference, atomically with the comment row.
    pub async fn attach_comment(
        &self,
        org_id: OrgId,
        author: ProfileId,
        type_name: &str,
        entity_id: Uuid,
        text: &str,
    ) -> ServiceResult<Comment> {
        validate_comment_text(text).map_err(CoreError::Validation)?;
        let entity_ref = EntityRef::build(type_name, entity_id)?;

        require_active_org(self.orgs.as_ref(), org_id).await?;
        let entity_name = self.guard_target(org_id, entity_ref).await?;

        let input = CreateComment {
            org_id,
            entity_type: entity_ref.entity_type.as_str().to_string(),
            entity_id,
            text: text.to_string(),
            author_id: Some(author),
        };
        let activity = CreateActivity {
            org_id,
            user_id: Some(author),
            action: ActivityAction::Comment.as_str().to_string(),
            entity_type: entity_ref.entity_type.as_str().to_string(),
            entity_id,
            entity_name,
            description: snippet(text, MAX_DESCRIPTION_LENGTH),
        };

        let comment =
            with_retry("comment.create", || {
                CommentRepo::create(&self.pool, &input, &activity)
            })
            .await?;

        tracing::info!(
            comment_id = %comment.id,
            org_id = %org_id,
            entity_type = %comment.entity_type,
            entity_id = %comment.entity_id,
            "Comment attached"
        );

        Ok(comment)
    }

    /// Attach an already-stored file to the entity named by
    /// `(type_name, entity_id)`.
    ///
    /// The display name defaults to the blob's stored filename. Emits one
    /// activity record (`action = create`) against the target, atomically
    /// with the attachment row.
    pub async fn attach_file(
        &self,
        org_id: OrgId,
        uploader: ProfileId,
        type_name: &str,
        entity_id: Uuid,
        blob: BlobRef,
        name: Option<&str>,
    ) -> ServiceResult<Attachment> {
        if let Some(name) = name {
            validate_attachment_name(name).map_err(CoreError::Validation)?;
        }
        let entity_ref = EntityRef::build(type_name, entity_id)?;

        require_active_org(self.orgs.as_ref(), org_id).await?;
        let entity_name = self.guard_target(org_id, entity_ref).await?;

        let display_name = name.unwrap_or(&blob.file_name).to_string();
        let input = CreateAttachment {
            org_id,
            entity_type: entity_ref.entity_type.as_str().to_string(),
            entity_id,
            file_key: blob.key,
            file_name: blob.file_name.clone(),
            name: display_name.clone(),
            uploaded_by: Some(uploader),
        };
        let activity = CreateActivity {
            org_id,
            user_id: Some(uploader),
            action: ActivityAction::Create.as_str().to_string(),
            entity_type: entity_ref.entity_type.as_str().to_string(),
            entity_id,
            entity_name,
            description: format!("Uploaded {display_name}"),
        };

        let attachment = with_retry("attachment.create", || {
            AttachmentRepo::create(&self.pool, &input, &activity)
        })
        .await?;

        tracing::info!(
            attachment_id = %attachment.id,
            org_id = %org_id,
            entity_type = %attachment.entity_type,
            entity_id = %attachment.entity_id,
            "Attachment stored"
        );

        Ok(attachment)
    }

    /// List comments on one entity, newest first, author names resolved.
    pub async fn list_comments(
        &self,
        org_id: OrgId,
        type_name: &str,
        entity_id: Uuid,
        page: &PageRequest,
    ) -> ServiceResult<Page<CommentView>> {
        let entity_ref = EntityRef::build(type_name, entity_id)?;

        let page = CommentRepo::list_for_entity(
            &self.pool,
            org_id,
            entity_ref.entity_type.as_str(),
            entity_id,
            page,
        )
        .await?;

        let mut items = Vec::with_capacity(page.items.len());
        for comment in page.items {
            let author_name = match comment.author_id {
                Some(profile_id) => self.profiles.display_name(profile_id).await,
                None => None,
            };
            items.push(CommentView {
                comment,
                author_name,
            });
        }

        Ok(Page {
            items,
            next: page.next,
        })
    }

    /// List attachments on one entity, newest first, uploader names
    /// resolved.
    pub async fn list_attachments(
        &self,
        org_id: OrgId,
        type_name: &str,
        entity_id: Uuid,
        page: &PageRequest,
    ) -> ServiceResult<Page<AttachmentView>> {
        let entity_ref = EntityRef::build(type_name, entity_id)?;

        let page = AttachmentRepo::list_for_entity(
            &self.pool,
            org_id,
            entity_ref.entity_type.as_str(),
            entity_id,
            page,
        )
        .await?;

        let mut items = Vec::with_capacity(page.items.len());
        for attachment in page.items {
            let uploader_name = match attachment.uploaded_by {
                Some(profile_id) => self.profiles.display_name(profile_id).await,
                None => None,
            };
            items.push(AttachmentView {
                attachment,
                uploader_name,
            });
        }

        Ok(Page {
            items,
            next: page.next,
        })
    }

    /// Soft-delete a comment within the caller's organization.
    ///
    /// Idempotent: deactivating an already-inactive comment succeeds.
    /// Fails with `NotFound` only when the id is not in the caller's org.
    pub async fn deactivate_comment(
        &self,
        org_id: OrgId,
        id: Uuid,
        actor: Option<ProfileId>,
    ) -> ServiceResult<()> {
        let found = CommentRepo::deactivate(&self.pool, id, org_id, actor).await?;
        if !found {
            return Err(CoreError::NotFound {
                entity: "Comment",
                id,
            }
            .into());
        }
        Ok(())
    }

    /// Soft-delete an attachment within the caller's organization.
    pub async fn deactivate_attachment(
        &self,
        org_id: OrgId,
        id: Uuid,
        actor: Option<ProfileId>,
    ) -> ServiceResult<()> {
        let found = AttachmentRepo::deactivate(&self.pool, id, org_id, actor).await?;
        if !found {
            return Err(CoreError::NotFound {
                entity: "Attachment",
                id,
            }
            .into());
        }
        Ok(())
    }

    /// Locate the target and enforce the tenant scope guard against it.
    ///
    /// Returns the target's display name for activity denormalization.
    /// An unknown target is tolerated (existence is optimistic): the
    /// reference is stored anyway and the captured name stays empty.
    async fn guard_target(&self, org_id: OrgId, entity_ref: EntityRef) -> ServiceResult<String> {
        match self
            .catalog
            .locate(entity_ref.entity_type, entity_ref.entity_id)
            .await
        {
            Some(target) => {
                tenant::authorize_org(org_id, target.org_id)?;
                Ok(target.display_name)
            }
            None => Ok(String::new()),
        }
    }
}
