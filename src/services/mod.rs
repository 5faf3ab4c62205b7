pub mod corpus_merger;
pub mod date_window;
pub mod keyword_matcher;
pub mod search_service;
pub mod summary_service;

pub use corpus_merger::{merge_first_seen, CorpusIndex, MergeStats};
pub use date_window::{resolve_start_date, DateWindow, StartDateOverride, WindowSource};
pub use keyword_matcher::{KeywordMatcher, PaperTagger};
pub use search_service::{build_query, RetryPolicy, SearchService};
pub use summary_service::{build_summary, count_categories};
