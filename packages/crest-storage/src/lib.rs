pub mod solr;

mod error;

pub use error::{Error, Result};
