//! UI Components
//!
//! Reusable Leptos components.

mod auth_nav;
mod business_card;
mod comment_form;
mod comment_item;
mod comment_section;
mod follow_button;
mod inline_error;
mod map_view;
mod profile_details;
mod profile_editor;
mod profile_map;

pub use auth_nav::AuthNav;
pub use business_card::BusinessCard;
pub use comment_form::CommentForm;
pub use comment_item::CommentItem;
pub use comment_section::CommentSection;
pub use follow_button::FollowButton;
pub use inline_error::InlineError;
pub use map_view::MapView;
pub use profile_details::ProfileDetails;
pub use profile_editor::ProfileEditor;
pub use profile_map::ProfileMap;
