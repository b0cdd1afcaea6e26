use chrono::{DateTime, Utc};
use std::time::Instant;

use super::{DeletePhase, PostCard};
use crate::ui::formatting::{self, DELETE_PROMPT, SHARE_CONFIRMATION_TEXT};

/// What the card shows, computed from its current state
#[derive(Debug, Clone, PartialEq)]
pub struct CardView {
    pub author_name: String,
    pub author_details: String,
    pub author_avatar: String,
    pub posted: String,
    pub text: String,
    pub image: Option<String>,
    pub like_count: usize,
    pub liked: bool,
    pub like_busy: bool,
    pub comment_count: usize,
    pub comments_panel: Option<CommentsPanelView>,
    pub delete: DeleteControl,
    pub share_banner: Option<&'static str>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CommentsPanelView {
    pub viewer_avatar: String,
    pub draft: String,
    pub submit_label: &'static str,
    pub submit_disabled: bool,
    pub error: Option<String>,
    pub comments: Vec<CommentView>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CommentView {
    pub id: String,
    pub author_name: String,
    pub author_avatar: String,
    pub text: String,
    pub posted: String,
}

/// The delete affordance. `Hidden` for anyone but the author.
#[derive(Debug, Clone, PartialEq)]
pub enum DeleteControl {
    Hidden,
    Button,
    Confirm {
        prompt: &'static str,
        error: Option<String>,
        busy: bool,
    },
}

impl PostCard {
    /// Build the view for this instant, or `None` once the post is removed
    pub fn view(&self, now: Instant, wall_now: DateTime<Utc>) -> Option<CardView> {
        if !self.is_visible() {
            return None;
        }

        let post = self.post();

        let comments_panel = self.comments_panel_open().then(|| CommentsPanelView {
            viewer_avatar: formatting::avatar_or_default(self.viewer()).to_string(),
            draft: self.draft().to_string(),
            submit_label: formatting::submit_label(self.comment_in_flight()),
            submit_disabled: self.comment_in_flight(),
            error: self.last_comment_error().map(String::from),
            comments: self
                .comments()
                .iter()
                .map(|c| CommentView {
                    id: c.id.clone(),
                    author_name: c.author.username.clone(),
                    author_avatar: formatting::avatar_or_default(&c.author).to_string(),
                    text: c.text.clone(),
                    posted: formatting::format_relative(&c.timestamp, &wall_now),
                })
                .collect(),
        });

        let delete = if !self.can_delete() {
            DeleteControl::Hidden
        } else {
            match self.delete_phase() {
                DeletePhase::ConfirmPending { last_error } => DeleteControl::Confirm {
                    prompt: DELETE_PROMPT,
                    error: last_error.clone(),
                    busy: false,
                },
                DeletePhase::Deleting => DeleteControl::Confirm {
                    prompt: DELETE_PROMPT,
                    error: None,
                    busy: true,
                },
                DeletePhase::Idle | DeletePhase::Deleted => DeleteControl::Button,
            }
        };

        Some(CardView {
            author_name: post.author.username.clone(),
            author_details: formatting::format_author_details(&post.author),
            author_avatar: formatting::avatar_or_default(&post.author).to_string(),
            posted: formatting::format_relative(&post.created_at, &wall_now),
            text: post.text.clone(),
            image: post.img.clone(),
            like_count: self.like_count(),
            liked: self.liked_by_viewer(),
            like_busy: self.like_in_flight(),
            comment_count: self.comment_count(),
            comments_panel,
            delete,
            share_banner: self
                .share_confirmation_visible(now)
                .then_some(SHARE_CONFIRMATION_TEXT),
        })
    }
}
