//! Grammars built with `parse-comb`, and the driver shared by their
//! command-line front ends.

pub mod cli;
pub mod ini;
pub mod json;
