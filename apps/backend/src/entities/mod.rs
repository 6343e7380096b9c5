pub mod games;
pub mod participants;
pub mod sentences;
