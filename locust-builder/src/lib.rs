#![no_std]

#[cfg(feature = "rp")]
pub mod rp;

#[cfg(feature = "defmt")]
use defmt_rtt as _;

pub mod usb;

pub use embassy_sync::blocking_mutex::raw::NoopRawMutex;
pub use embassy_time::Delay;
pub use locust_firmware::*;
pub use locust_firmware::usb::{
    Configurator as UsbConfigurator, State as UsbState, UsbBuffers,
};
pub use static_cell::StaticCell;

/// Keystrokes queued between the scan loop and the HID reporter.
pub const EVENT_BUFFER_SIZE: usize = 32;
