//! Loading raw result documents from disk.
//!
//! Files hold either a single result document or an array of them, in JSON
//! or YAML. The documents are returned untouched; standardization happens in
//! [`crate::parsing`].
//!
//! # Example
//!
//! ```no_run
//! use qa_analytics::io::loaders::ResultLoader;
//! use std::path::Path;
//!
//! let result = ResultLoader::load_from_file(Path::new("results.json"))
//!     .expect("Failed to load");
//! println!("Loaded {} documents", result.num_documents);
//! ```

pub mod loaders;


pub use loaders::{ResultLoadResult, ResultLoader, ResultSourceType};
