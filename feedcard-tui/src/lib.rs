// Library interface for feedcard: the post card and its collaborators
#[macro_use]
pub mod logging;

pub mod api;
pub mod card;
pub mod clipboard;
pub mod config;
pub mod input;
pub mod terminal;
pub mod ui;

pub use card::{ActionOutcome, CardOptions, CardView, DeletePhase, PendingAction, PostCard};
