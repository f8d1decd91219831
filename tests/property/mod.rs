//! Property-based tests for the self-description grammar and resolution

mod equivalence;
