//! Inquiries domain actions

mod create;
mod manage;

pub use create::create_inquiry;
pub use manage::{received_inquiries, sent_inquiries, update_inquiry_status};
