//! Client for the Transparenzportal CKAN `package_search` API.

mod client;
mod record;

pub use self::{
    client::{SearchClient, SearchRequest},
    record::DocumentRecord,
};
