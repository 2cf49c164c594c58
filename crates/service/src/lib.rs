pub mod book_service;
pub mod contact;
pub mod errors;
pub mod faq_service;
pub mod rate_limit;
pub mod sanitize;
pub mod search;
