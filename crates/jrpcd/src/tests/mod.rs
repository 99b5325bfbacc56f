//! Test suites for the dispatcher daemon.

mod support;
