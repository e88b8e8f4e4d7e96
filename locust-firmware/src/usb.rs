use core::{
    mem::MaybeUninit,
    sync::atomic::{AtomicU8, Ordering},
};
use embassy_usb::{
    control::{InResponse, OutResponse, Recipient, Request, RequestType},
    driver::Driver,
    types::InterfaceNumber,
    Builder, Config, Handler,
};

use crate::hid::HidWriter;

// HID
const HID_CLASS: u8 = 3;
pub const HID_SUBCLASS_BOOT: u8 = 1;
pub const HID_PROTOCOL_KEYBOARD: u8 = 1;

const HID_DESC_DESCTYPE_HID: u8 = 0x21;
const HID_DESC_DESCTYPE_HID_REPORT: u8 = 0x22;
const HID_DESC_SPEC_1_11: [u8; 2] = [0x11, 0x01];
const HID_DESC_COUNTRY_UNSPEC: u8 = 0x00;

const HID_REQ_SET_IDLE: u8 = 0x0a;
const HID_REQ_GET_IDLE: u8 = 0x02;
const HID_REQ_GET_REPORT: u8 = 0x01;
const HID_REQ_SET_REPORT: u8 = 0x09;
const HID_REQ_GET_PROTOCOL: u8 = 0x03;
const HID_REQ_SET_PROTOCOL: u8 = 0x0b;

pub const PROTOCOL_BOOT: u8 = 0;
pub const PROTOCOL_REPORT: u8 = 1;

/// Size of a keyboard input report: modifiers, reserved, six key slots.
pub const KEYBOARD_REPORT_LEN: usize = 8;

#[rustfmt::skip]
pub const KEYBOARD_REPORT_DESC: [u8; 63] = [
    0x05, 0x01, // (GLOBAL) USAGE_PAGE         0x0001 Generic Desktop Page
    0x09, 0x06, // (LOCAL)  USAGE              0x00010006 Keyboard (Application Collection)
    0xA1, 0x01, // (MAIN)   COLLECTION         0x01 Application
    0x05, 0x07, //   (GLOBAL) USAGE_PAGE         0x0007 Keyboard/Keypad Page
    0x19, 0xE0, //   (LOCAL)  USAGE_MINIMUM      0x000700E0 Keyboard LeftControl
    0x29, 0xE7, //   (LOCAL)  USAGE_MAXIMUM      0x000700E7 Keyboard Right GUI
    0x15, 0x00, //   (GLOBAL) LOGICAL_MINIMUM    0x00 (0)
    0x25, 0x01, //   (GLOBAL) LOGICAL_MAXIMUM    0x01 (1)
    0x75, 0x01, //   (GLOBAL) REPORT_SIZE        0x01 (1) Number of bits per field
    0x95, 0x08, //   (GLOBAL) REPORT_COUNT       0x08 (8) Number of fields
    0x81, 0x02, //   (MAIN)   INPUT              0x00000002 (8 fields x 1 bit) Data Variable Absolute
    0x95, 0x01, //   (GLOBAL) REPORT_COUNT       0x01 (1) Number of fields
    0x75, 0x08, //   (GLOBAL) REPORT_SIZE        0x08 (8) Number of bits per field
    0x81, 0x01, //   (MAIN)   INPUT              0x00000001 (1 field x 8 bits) Constant
    0x95, 0x05, //   (GLOBAL) REPORT_COUNT       0x05 (5) Number of fields
    0x75, 0x01, //   (GLOBAL) REPORT_SIZE        0x01 (1) Number of bits per field
    0x05, 0x08, //   (GLOBAL) USAGE_PAGE         0x0008 LED Page
    0x19, 0x01, //   (LOCAL)  USAGE_MINIMUM      0x00080001 Num Lock
    0x29, 0x05, //   (LOCAL)  USAGE_MAXIMUM      0x00080005 Kana
    0x91, 0x02, //   (MAIN)   OUTPUT             0x00000002 (5 fields x 1 bit) Data Variable Absolute
    0x95, 0x01, //   (GLOBAL) REPORT_COUNT       0x01 (1) Number of fields
    0x75, 0x03, //   (GLOBAL) REPORT_SIZE        0x03 (3) Number of bits per field
    0x91, 0x01, //   (MAIN)   OUTPUT             0x00000001 (1 field x 3 bits) Constant
    0x95, 0x06, //   (GLOBAL) REPORT_COUNT       0x06 (6) Number of fields
    0x75, 0x08, //   (GLOBAL) REPORT_SIZE        0x08 (8) Number of bits per field
    0x15, 0x00, //   (GLOBAL) LOGICAL_MINIMUM    0x00 (0)
    0x25, 0x65, //   (GLOBAL) LOGICAL_MAXIMUM    0x65 (101)
    0x05, 0x07, //   (GLOBAL) USAGE_PAGE         0x0007 Keyboard/Keypad Page
    0x19, 0x00, //   (LOCAL)  USAGE_MINIMUM      0x00070000 Keyboard No event indicated
    0x29, 0x65, //   (LOCAL)  USAGE_MAXIMUM      0x00070065 Keyboard Application
    0x81, 0x00, //   (MAIN)   INPUT              0x00000000 (6 fields x 8 bits) Data Array Absolute
    0xC0,       // (MAIN)   END_COLLECTION     Application
];

/// Internal state for USB HID.
pub struct State<'d> {
    control: MaybeUninit<Control<'d>>,
    idle: AtomicU8,
    protocol: AtomicU8,
}
impl Default for State<'_> {
    fn default() -> Self {
        Self::new()
    }
}
impl State<'_> {
    /// Create a new `State`.
    pub const fn new() -> Self {
        State {
            control: MaybeUninit::uninit(),
            idle: AtomicU8::new(0),
            protocol: AtomicU8::new(PROTOCOL_REPORT),
        }
    }

    /// Protocol last selected by the host.
    pub fn protocol(&self) -> u8 {
        self.protocol.load(Ordering::Relaxed)
    }
}

const CONFIG_SIZE: usize = 64;
const BOS_SIZE: usize = 32;
const MSOS_SIZE: usize = 0;
const CONTROL_SIZE: usize = 128;

pub struct UsbBuffers {
    config_descriptor_buf: [u8; CONFIG_SIZE],
    bos_descriptor_buf: [u8; BOS_SIZE],
    msos_descriptor_buf: [u8; MSOS_SIZE],
    control_buf: [u8; CONTROL_SIZE],
}

impl Default for UsbBuffers {
    fn default() -> Self {
        Self {
            config_descriptor_buf: [0; CONFIG_SIZE],
            bos_descriptor_buf: [0; BOS_SIZE],
            msos_descriptor_buf: [0; MSOS_SIZE],
            control_buf: [0; CONTROL_SIZE],
        }
    }
}

pub struct Configurator<'d> {
    device_config: Option<Config<'d>>,
    max_packet_size: u16,
    poll_ms: u8,
}

impl<'d> Configurator<'d> {
    pub fn new(device_config: Config<'d>) -> Self {
        Self {
            max_packet_size: device_config.max_packet_size_0 as u16,
            device_config: Some(device_config),
            poll_ms: 1,
        }
    }

    pub fn usb_builder<D: Driver<'d>>(
        &mut self,
        driver: D,
        buffers: &'d mut UsbBuffers,
    ) -> Option<Builder<'d, D>> {
        self.device_config.take().map(|device_config| {
            Builder::new(
                driver,
                device_config,
                &mut buffers.config_descriptor_buf,
                &mut buffers.bos_descriptor_buf,
                &mut buffers.msos_descriptor_buf,
                &mut buffers.control_buf,
            )
        })
    }

    /// Add the boot keyboard interface and return the writer for its interrupt IN endpoint.
    pub fn add_keyboard_iface<D: Driver<'d>>(
        &self,
        builder: &mut Builder<'d, D>,
        state: &'d mut State<'d>,
    ) -> HidWriter<D::EndpointIn, KEYBOARD_REPORT_LEN> {
        let descriptor = &KEYBOARD_REPORT_DESC;
        let mut func = builder.function(HID_CLASS, HID_SUBCLASS_BOOT, HID_PROTOCOL_KEYBOARD);
        let mut iface = func.interface();
        let if_num = iface.interface_number();
        let mut alt = iface.alt_setting(HID_CLASS, HID_SUBCLASS_BOOT, HID_PROTOCOL_KEYBOARD, None);

        let hid_descriptor = hid_descriptor(descriptor.len());
        alt.descriptor(HID_DESC_DESCTYPE_HID, &hid_descriptor[2..]);

        let ep_in = alt.endpoint_interrupt_in(
            self.max_packet_size.min(KEYBOARD_REPORT_LEN as u16),
            self.poll_ms,
        );

        drop(func);

        let control = Control {
            if_num,
            report_descriptor: descriptor,
            hid_descriptor,
            idle: &state.idle,
            protocol: &state.protocol,
        };
        let control = state.control.write(control);
        builder.handler(control);

        HidWriter::new(ep_in)
    }
}

/// Class descriptor, inclusive of its length and type prefix.
fn hid_descriptor(report_len: usize) -> [u8; 9] {
    [
        9,                                // Length of buf inclusive of size prefix
        HID_DESC_DESCTYPE_HID,            // Descriptor type
        HID_DESC_SPEC_1_11[0],            // HID Class spec version
        HID_DESC_SPEC_1_11[1],            //
        HID_DESC_COUNTRY_UNSPEC,          // Country code not supported
        1,                                // Number of following descriptors
        HID_DESC_DESCTYPE_HID_REPORT,     // Report descriptor follows
        (report_len & 0xFF) as u8,        // Report descriptor size
        ((report_len >> 8) & 0xFF) as u8, //
    ]
}

struct Control<'d> {
    if_num: InterfaceNumber,
    report_descriptor: &'d [u8],
    hid_descriptor: [u8; 9],
    idle: &'d AtomicU8,
    protocol: &'d AtomicU8,
}

impl Handler for Control<'_> {
    fn reset(&mut self) {
        self.idle.store(0, Ordering::Relaxed);
        self.protocol.store(PROTOCOL_REPORT, Ordering::Relaxed);
    }

    fn control_out(&mut self, req: Request, _data: &[u8]) -> Option<OutResponse> {
        if (req.request_type, req.recipient, req.index)
            != (
                RequestType::Class,
                Recipient::Interface,
                self.if_num.0 as u16,
            )
        {
            return None;
        }

        match req.request {
            HID_REQ_SET_IDLE => {
                self.idle.store((req.value >> 8) as u8, Ordering::Relaxed);
                Some(OutResponse::Accepted)
            }
            // LED state is not shown anywhere
            HID_REQ_SET_REPORT => Some(OutResponse::Accepted),
            HID_REQ_SET_PROTOCOL => match req.value as u8 {
                p @ (PROTOCOL_BOOT | PROTOCOL_REPORT) => {
                    self.protocol.store(p, Ordering::Relaxed);
                    Some(OutResponse::Accepted)
                }
                _ => Some(OutResponse::Rejected),
            },
            _ => Some(OutResponse::Rejected),
        }
    }

    fn control_in<'a>(&'a mut self, req: Request, buf: &'a mut [u8]) -> Option<InResponse<'a>> {
        if req.index != self.if_num.0 as u16 {
            return None;
        }

        match (req.request_type, req.recipient) {
            (RequestType::Standard, Recipient::Interface) => match req.request {
                Request::GET_DESCRIPTOR => match (req.value >> 8) as u8 {
                    HID_DESC_DESCTYPE_HID_REPORT => {
                        Some(InResponse::Accepted(self.report_descriptor))
                    }
                    HID_DESC_DESCTYPE_HID => Some(InResponse::Accepted(&self.hid_descriptor)),
                    _ => Some(InResponse::Rejected),
                },

                _ => Some(InResponse::Rejected),
            },
            (RequestType::Class, Recipient::Interface) => match req.request {
                HID_REQ_GET_IDLE => {
                    buf[0] = self.idle.load(Ordering::Relaxed);
                    Some(InResponse::Accepted(&buf[0..1]))
                }
                HID_REQ_GET_PROTOCOL => {
                    buf[0] = self.protocol.load(Ordering::Relaxed);
                    Some(InResponse::Accepted(&buf[0..1]))
                }
                HID_REQ_GET_REPORT => Some(InResponse::Rejected),
                _ => Some(InResponse::Rejected),
            },
            _ => None,
        }
    }
}

#[cfg(test)]
#[path = "usb_test.rs"]
mod test;
