//! 한글 조합/분해 핵심 로직

pub mod automaton;
pub mod chosung;
pub mod keymap;
pub mod unicode;
