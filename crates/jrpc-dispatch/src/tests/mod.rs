//! Test suites for batch dispatch.

mod support;
