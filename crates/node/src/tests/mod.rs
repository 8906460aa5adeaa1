//! Cross-module tests for the command processor.
//!
//! Unit tests live next to the code they cover; the suites here exercise the
//! peek/process/abort/clean contracts end to end against scripted fakes.

mod support;
