pub mod admin_user;
pub mod blog_post;
pub mod contact;
