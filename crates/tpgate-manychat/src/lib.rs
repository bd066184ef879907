//! ManyChat dynamic-block replies.
//!
//! Every outcome of a request, success or failure, is rendered as a v2 reply
//! whose actions set ManyChat custom fields. The chat platform only accepts
//! HTTP 200, so failures are encoded in the fields as well.

pub mod fields;
pub mod reply;

pub use reply::{
    Action, Content, ManyChat, Reply, ACTION_SET_FIELD_VALUE, DEFAULT_CONTENT_TYPE, VERSION,
};
