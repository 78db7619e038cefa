//! Unit tests for server descriptor publication.
