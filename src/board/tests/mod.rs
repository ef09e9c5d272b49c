//! Unit tests for the content board.
