// mod.rs - File loaders

pub mod scores;

pub use scores::load_mutation_scores;
