//! Library for working with genome assembly graphs in the SPAdes
//! `.fastg` and bcalm `.fasta` formats: parsing into edge tables,
//! dual-graph construction with component decomposition, and
//! serialization back to `.fastg` text.

pub mod fastg;
pub mod graph;
pub mod parser;
pub mod writer;
