//! Natural Language Processing components
//!
//! Text normalization, segmentation into sentences and clause units,
//! regex tokenization, stopword filtering and language lexicons.

pub mod lexicon;
pub mod normalizer;
pub mod segmenter;
pub mod stopwords;
pub mod tokenizer;
