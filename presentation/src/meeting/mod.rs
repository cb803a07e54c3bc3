//! Interactive meeting interface

pub mod repl;
