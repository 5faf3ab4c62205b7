pub mod loaders;
pub mod paper;
pub mod summary;
pub mod taxonomy;

pub use loaders::{load_corpus, load_scrape_config, load_taxonomy, write_json_pretty};
pub use paper::{IndexEntry, Paper, PaperKey};
pub use summary::CategorySummary;
pub use taxonomy::Taxonomy;
