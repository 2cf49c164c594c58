pub mod domain;
pub mod service;

pub use domain::ContactForm;
pub use service::{list_all, submit, ClientMeta};
