pub mod corpus_store;
pub mod yaml_loader;

pub use corpus_store::{load_corpus, write_json_pretty};
pub use yaml_loader::{load_scrape_config, load_taxonomy};
