use feedcard_types::{Comment, Post, Viewer};
use std::time::Instant;

use crate::api::PostService;
use crate::clipboard::Clipboard;

pub mod state;
pub use state::*;
pub mod view;
pub use view::*;

/// One post as an interactive unit: like, comment, delete and share.
///
/// The card owns a local copy of the post's volatile fields (likers and
/// comments). Each controller allows a single request of its own kind in
/// flight; controllers never wait on each other. Once a delete succeeds the
/// card is removed: it renders nothing and every further call is a no-op.
pub struct PostCard {
    post: Post,
    viewer: Viewer,
    options: CardOptions,
    like: LikeState,
    comment: CommentState,
    delete: DeletePhase,
    share: ShareState,
    removed: bool,
}

impl PostCard {
    pub fn new(mut post: Post, viewer: Viewer, options: CardOptions) -> Self {
        // Keep the first occurrence of each liker
        let mut seen = std::collections::HashSet::new();
        post.likes.retain(|id| seen.insert(id.clone()));

        let liked_by_viewer = post.likes.contains(&viewer.id);

        log_debug!(
            options.log,
            "Mounted card: post={}, viewer={}, likes={}, comments={}",
            post.id,
            viewer.id,
            post.likes.len(),
            post.comments.len()
        );

        Self {
            post,
            viewer,
            options,
            like: LikeState {
                liked_by_viewer,
                ..Default::default()
            },
            comment: CommentState::default(),
            delete: DeletePhase::Idle,
            share: ShareState::default(),
            removed: false,
        }
    }

    pub fn post(&self) -> &Post {
        &self.post
    }

    pub fn viewer(&self) -> &Viewer {
        &self.viewer
    }

    pub fn options(&self) -> &CardOptions {
        &self.options
    }

    pub fn likes(&self) -> &[String] {
        &self.post.likes
    }

    /// Always derived from the liker set
    pub fn like_count(&self) -> usize {
        self.post.likes.len()
    }

    pub fn liked_by_viewer(&self) -> bool {
        self.like.liked_by_viewer
    }

    pub fn like_in_flight(&self) -> bool {
        self.like.in_flight
    }

    pub fn comments(&self) -> &[Comment] {
        &self.post.comments
    }

    pub fn comment_count(&self) -> usize {
        self.post.comments.len()
    }

    pub fn comment_in_flight(&self) -> bool {
        self.comment.in_flight
    }

    pub fn draft(&self) -> &str {
        &self.comment.draft
    }

    pub fn comments_panel_open(&self) -> bool {
        self.comment.panel_open
    }

    pub fn last_comment_error(&self) -> Option<&str> {
        self.comment.last_error.as_deref()
    }

    pub fn delete_phase(&self) -> &DeletePhase {
        &self.delete
    }

    /// Whether the delete control exists at all for this viewer
    pub fn can_delete(&self) -> bool {
        self.viewer.id == self.post.author.id
    }

    pub fn is_removed(&self) -> bool {
        self.removed
    }

    pub fn is_visible(&self) -> bool {
        !self.removed
    }

    // Like controller

    /// Flip the viewer's like locally and return the request to send.
    ///
    /// Returns `None` while a like request is already in flight.
    pub fn begin_like(&mut self) -> Option<PendingAction> {
        if self.removed || self.like.in_flight {
            return None;
        }

        self.like.snapshot = Some(LikeSnapshot {
            liked_by_viewer: self.like.liked_by_viewer,
            likes: self.post.likes.clone(),
        });

        if self.like.liked_by_viewer {
            self.post.likes.retain(|id| id != &self.viewer.id);
        } else if !self.post.likes.contains(&self.viewer.id) {
            self.post.likes.push(self.viewer.id.clone());
        }
        self.like.liked_by_viewer = !self.like.liked_by_viewer;
        self.like.in_flight = true;

        log_like!(
            self.options.log,
            "Optimistic like toggle: post={}, liked={}, count={}",
            self.post.id,
            self.like.liked_by_viewer,
            self.like_count()
        );
        log_api_call!(self.options.log, "POST /posts/like/{}", self.post.id);

        Some(PendingAction::Like {
            post_id: self.post.id.clone(),
        })
    }

    pub async fn toggle_like(&mut self, service: &dyn PostService) {
        if let Some(action) = self.begin_like() {
            let outcome = action.dispatch(service).await;
            self.apply(outcome);
        }
    }

    // Comment controller

    pub fn toggle_comments(&mut self) {
        if self.removed {
            return;
        }
        self.comment.panel_open = !self.comment.panel_open;
    }

    pub fn set_draft(&mut self, text: impl Into<String>) {
        if self.removed {
            return;
        }
        self.comment.draft = text.into();
    }

    pub fn push_draft_char(&mut self, c: char) {
        if self.removed {
            return;
        }
        self.comment.draft.push(c);
    }

    pub fn pop_draft_char(&mut self) {
        if self.removed {
            return;
        }
        self.comment.draft.pop();
    }

    /// Start submitting the current draft.
    ///
    /// Blank drafts and submissions made while one is in flight are ignored
    /// without entering the loading state. The draft is sent as typed.
    pub fn begin_comment(&mut self) -> Option<PendingAction> {
        if self.removed || self.comment.in_flight {
            return None;
        }
        if self.comment.draft.trim().is_empty() {
            return None;
        }

        self.comment.in_flight = true;
        self.comment.last_error = None;

        log_comment!(
            self.options.log,
            "Submitting comment: post={}, chars={}",
            self.post.id,
            self.comment.draft.chars().count()
        );
        log_api_call!(self.options.log, "POST /posts/comment/{}", self.post.id);

        Some(PendingAction::Comment {
            post_id: self.post.id.clone(),
            text: self.comment.draft.clone(),
        })
    }

    pub async fn submit_comment(&mut self, service: &dyn PostService) {
        if let Some(action) = self.begin_comment() {
            let outcome = action.dispatch(service).await;
            self.apply(outcome);
        }
    }

    // Delete controller

    /// Show the delete confirmation. Only the post's author gets one.
    pub fn request_delete(&mut self) {
        if self.removed || !self.can_delete() {
            return;
        }
        if self.delete == DeletePhase::Idle {
            self.delete = DeletePhase::ConfirmPending { last_error: None };
            log_delete!(self.options.log, "Delete confirmation shown: post={}", self.post.id);
        }
    }

    pub fn cancel_delete(&mut self) {
        if self.removed {
            return;
        }
        if matches!(self.delete, DeletePhase::ConfirmPending { .. }) {
            self.delete = DeletePhase::Idle;
            log_delete!(self.options.log, "Delete cancelled: post={}", self.post.id);
        }
    }

    /// Confirm the pending delete and return the request to send
    pub fn begin_delete(&mut self) -> Option<PendingAction> {
        if self.removed || !self.can_delete() {
            return None;
        }
        if !matches!(self.delete, DeletePhase::ConfirmPending { .. }) {
            return None;
        }

        self.delete = DeletePhase::Deleting;
        log_delete!(self.options.log, "Delete confirmed: post={}", self.post.id);
        log_api_call!(self.options.log, "DELETE /posts/{}", self.post.id);

        Some(PendingAction::Delete {
            post_id: self.post.id.clone(),
        })
    }

    pub async fn confirm_delete(&mut self, service: &dyn PostService) {
        if let Some(action) = self.begin_delete() {
            let outcome = action.dispatch(service).await;
            self.apply(outcome);
        }
    }

    // Share controller

    /// Copy the page link and show the confirmation until `now + ttl`.
    ///
    /// A second share restarts the countdown. Returns whether the link was
    /// copied.
    pub fn share_link(&mut self, clipboard: &mut dyn Clipboard, now: Instant) -> bool {
        if self.removed {
            return false;
        }

        if let Err(e) = clipboard.copy_text(&self.options.page_url) {
            log::error!("Error copying post link to clipboard: {:#}", e);
            return false;
        }

        self.share.visible_until = Some(now + self.options.share_confirmation_ttl);
        log_share!(
            self.options.log,
            "Link copied: post={}, url={}",
            self.post.id,
            self.options.page_url
        );
        true
    }

    pub fn share_confirmation_visible(&self, now: Instant) -> bool {
        !self.removed && self.share.visible_until.is_some_and(|until| now < until)
    }

    /// Drop the share confirmation once its deadline has passed
    pub fn clear_expired(&mut self, now: Instant) {
        if self.share.visible_until.is_some_and(|until| now >= until) {
            self.share.visible_until = None;
        }
    }

    // Reconciliation

    /// Reconcile a finished request with local state and clear its in-flight
    /// flag. Outcomes arriving after removal are ignored.
    pub fn apply(&mut self, outcome: ActionOutcome) {
        if self.removed {
            log_debug!(self.options.log, "Ignoring late response for removed post {}", self.post.id);
            return;
        }

        match outcome {
            ActionOutcome::Like(result) => self.finish_like(result),
            ActionOutcome::Comment(result) => self.finish_comment(result),
            ActionOutcome::Delete(result) => self.finish_delete(result),
        }
    }

    fn finish_like(&mut self, result: crate::api::ApiResult<()>) {
        if !self.like.in_flight {
            return;
        }
        self.like.in_flight = false;
        let snapshot = self.like.snapshot.take();

        match result {
            Ok(()) => {
                log_like!(
                    self.options.log,
                    "Like confirmed: post={}, liked={}",
                    self.post.id,
                    self.like.liked_by_viewer
                );
            }
            Err(e) => {
                log::error!("Error liking/unliking post {}: {}", self.post.id, e);
                if self.options.rollback_failed_likes {
                    if let Some(snapshot) = snapshot {
                        self.like.liked_by_viewer = snapshot.liked_by_viewer;
                        self.post.likes = snapshot.likes;
                    }
                }
            }
        }
    }

    fn finish_comment(&mut self, result: crate::api::ApiResult<Vec<Comment>>) {
        if !self.comment.in_flight {
            return;
        }
        self.comment.in_flight = false;

        match result {
            Ok(comments) => {
                log_comment!(
                    self.options.log,
                    "Comment accepted: post={}, comments={}",
                    self.post.id,
                    comments.len()
                );
                self.post.comments = comments;
                self.comment.draft.clear();
            }
            Err(e) => {
                log::error!("Error commenting on post {}: {}", self.post.id, e);
                self.comment.last_error = Some(categorize_error(&e.to_string()));
            }
        }
    }

    fn finish_delete(&mut self, result: crate::api::ApiResult<()>) {
        if self.delete != DeletePhase::Deleting {
            return;
        }

        match result {
            Ok(()) => {
                log_delete!(self.options.log, "Post deleted: {}", self.post.id);
                self.delete = DeletePhase::Deleted;
                self.removed = true;
                self.share.visible_until = None;
            }
            Err(e) => {
                log::error!("Error deleting post {}: {}", self.post.id, e);
                self.delete = DeletePhase::ConfirmPending {
                    last_error: Some(categorize_error(&e.to_string())),
                };
            }
        }
    }
}

/// Categorize error messages for user feedback
pub fn categorize_error(error_str: &str) -> String {
    let error_lower = error_str.to_lowercase();

    if error_lower.contains("connection")
        || error_lower.contains("timeout")
        || error_lower.contains("network")
    {
        return "Network Error: Connection failed. Check your network and try again".to_string();
    }

    if error_lower.contains("401")
        || error_lower.contains("403")
        || error_lower.contains("unauthorized")
        || error_lower.contains("forbidden")
    {
        return "Authorization Error: Session expired or insufficient permissions".to_string();
    }

    if error_lower.contains("400")
        || error_lower.contains("bad request")
        || error_lower.contains("invalid")
    {
        return format!("Validation Error: {}", error_str);
    }

    if error_lower.contains("500") || error_lower.contains("502") || error_lower.contains("503") {
        return "Server Error: The server is experiencing issues. Please try again later".to_string();
    }

    format!("Error: {}", error_str)
}
