pub mod static_tokenizer;

pub use static_tokenizer::{StaticTokenizer, StaticUser};
