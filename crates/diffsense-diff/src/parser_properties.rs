//! Property-based tests for the diff parser
