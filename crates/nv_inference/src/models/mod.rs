pub mod huggingface;
pub mod lexicon;

pub use huggingface::HuggingFaceSentiment;
pub use lexicon::LexiconSentiment;
