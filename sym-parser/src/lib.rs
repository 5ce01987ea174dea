//! Tokenizer and parser for the textual expression syntax.
//!
//! The parser produces an abstract syntax tree that mirrors the source closely, including
//! parentheses and implicit multiplication, so that errors can point at the exact region of the
//! source they came from. Converting the tree into a simplified symbolic expression is done by
//! `sym-compute`.

pub mod parser;
pub mod tokenizer;
