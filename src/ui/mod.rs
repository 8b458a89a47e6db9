pub mod notice;
pub mod panels;
