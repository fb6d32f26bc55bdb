//! Unit tests for assembly-text loading.
