// mod.rs - Data structures module

pub mod loaders;
pub mod sequence;

// Re-export main types for convenience
pub use loaders::load_mutation_scores;
pub use sequence::{
    check_sequence, clean_sequence, load_sequences, normalize_sequence, Alphabet, SequenceRecord,
};
