//! Core data types shared between the parser and the renderers.

pub mod ast;
