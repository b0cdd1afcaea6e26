use feedcard_types::Comment;
use std::time::{Duration, Instant};

use crate::api::{ApiResult, PostService};
use crate::logging::LogConfig;

/// How long the "link copied" confirmation stays up
pub const SHARE_CONFIRMATION_TTL: Duration = Duration::from_secs(3);

/// Per-card settings supplied by the host at mount time
#[derive(Debug, Clone)]
pub struct CardOptions {
    /// Link written to the clipboard by the share action, copied verbatim
    pub page_url: String,
    pub share_confirmation_ttl: Duration,
    /// Restore the pre-toggle like state when the like request fails
    pub rollback_failed_likes: bool,
    pub log: LogConfig,
}

impl Default for CardOptions {
    fn default() -> Self {
        Self {
            page_url: crate::config::DEFAULT_PAGE_URL.to_string(),
            share_confirmation_ttl: SHARE_CONFIRMATION_TTL,
            rollback_failed_likes: true,
            log: LogConfig::default(),
        }
    }
}

/// Like controller state
#[derive(Debug, Default)]
pub struct LikeState {
    pub liked_by_viewer: bool,
    pub in_flight: bool,
    /// State before the in-flight toggle, used for rollback
    pub(crate) snapshot: Option<LikeSnapshot>,
}

#[derive(Debug, Clone)]
pub(crate) struct LikeSnapshot {
    pub liked_by_viewer: bool,
    pub likes: Vec<String>,
}

/// Comment controller state
#[derive(Debug, Default)]
pub struct CommentState {
    pub draft: String,
    pub in_flight: bool,
    pub panel_open: bool,
    /// Message from the last failed submission, cleared on the next attempt
    pub last_error: Option<String>,
}

/// Delete controller phases
///
/// `Idle -> ConfirmPending -> Deleting -> Deleted`; cancel returns to `Idle`
/// and a failed request returns to `ConfirmPending` with the error attached.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DeletePhase {
    #[default]
    Idle,
    ConfirmPending {
        last_error: Option<String>,
    },
    Deleting,
    Deleted,
}

impl DeletePhase {
    pub fn is_confirming(&self) -> bool {
        matches!(self, DeletePhase::ConfirmPending { .. } | DeletePhase::Deleting)
    }
}

/// Share controller state: when the confirmation disappears
#[derive(Debug, Default)]
pub struct ShareState {
    pub visible_until: Option<Instant>,
}

/// A network request a controller has committed to.
///
/// Produced by the `begin_*` methods on [`super::PostCard`]; dispatch it and
/// hand the outcome back to [`super::PostCard::apply`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PendingAction {
    Like { post_id: String },
    Comment { post_id: String, text: String },
    Delete { post_id: String },
}

impl PendingAction {
    pub fn name(&self) -> &'static str {
        match self {
            PendingAction::Like { .. } => "like",
            PendingAction::Comment { .. } => "comment",
            PendingAction::Delete { .. } => "delete",
        }
    }

    /// Run the request against the post service. Does not touch the card.
    pub async fn dispatch(self, service: &dyn PostService) -> ActionOutcome {
        match self {
            PendingAction::Like { post_id } => ActionOutcome::Like(service.like_post(&post_id).await),
            PendingAction::Comment { post_id, text } => {
                ActionOutcome::Comment(service.comment_on_post(&post_id, &text).await)
            }
            PendingAction::Delete { post_id } => {
                ActionOutcome::Delete(service.delete_post(&post_id).await)
            }
        }
    }
}

/// Result of a dispatched [`PendingAction`]
#[derive(Debug)]
pub enum ActionOutcome {
    Like(ApiResult<()>),
    Comment(ApiResult<Vec<Comment>>),
    Delete(ApiResult<()>),
}
