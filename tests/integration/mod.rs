//! Integration tests for wsh plugin bootstrap, resolution, and dispatch

mod args_command;
mod dispatch;
mod logging_default;
mod test_utils;
