pub mod assembler;
pub mod conjugation;
pub mod lexicon;
pub mod morphology;
pub mod noun_group;
pub mod pipeline;
pub mod render;
pub mod structure;
