pub mod arxiv_client;

pub use arxiv_client::{ArxivClient, PreprintIndex};
