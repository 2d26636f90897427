pub mod client;
pub mod error;
pub mod form;
pub mod resolver;

pub use client::ApiClient;
pub use error::{ApiError, ErrorBody, FieldMessages, Result};
pub use form::PayloadBuilder;
pub use resolver::{
    RefState, ResolveRule, ResolvedRecord, fetch_and_resolve, fetch_and_resolve_list,
    resolve_list, resolve_record,
};
