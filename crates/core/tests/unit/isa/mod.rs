//! Unit tests for the instruction table and register naming.
