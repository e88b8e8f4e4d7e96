#![no_std]
pub mod firmware_functions;
pub mod hid;
pub mod indicator;
pub mod key_reporter;
pub mod key_scanner;
pub mod key_state;
pub mod keymap;
pub mod link;
pub mod primary;
pub mod secondary;
pub mod sink;
pub mod usb;

#[cfg(any(test, feature = "test-utils"))]
pub mod switch_test_stub;
#[cfg(any(test, feature = "test-utils"))]
pub mod usb_test_stub;

#[macro_use]
mod macros;

pub use locust_common::globals;
