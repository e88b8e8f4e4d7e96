extern crate std;
use core::cell::{Cell, RefCell};
use embassy_usb::driver::{
    Bus, ControlPipe, Driver, Endpoint, EndpointAddress, EndpointError, EndpointIn, EndpointInfo,
    EndpointOut, EndpointType,
};
use std::rc::Rc;
use std::vec::Vec;

/// Packets written to a [MyEndpointIn], oldest first.
#[derive(Clone, Default)]
pub struct MessageLog(Rc<RefCell<Vec<Vec<u8>>>>);
impl MessageLog {
    pub fn push(&self, msg: Vec<u8>) {
        self.0.borrow_mut().push(msg);
    }

    pub fn take(&self) -> Vec<Vec<u8>> {
        core::mem::take(&mut *self.0.borrow_mut())
    }

    pub fn len(&self) -> usize {
        self.0.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.borrow().is_empty()
    }
}

pub struct MyEndpointIn {
    pub messages: MessageLog,
    pub info: EndpointInfo,
    /// While set, writes fail with [EndpointError::Disabled].
    pub disabled: Rc<Cell<bool>>,
}
impl MyEndpointIn {
    pub fn with_max_packet_size(max_packet_size: u16) -> Self {
        let mut ep = Self::default();
        ep.info.max_packet_size = max_packet_size;
        ep
    }
}
impl Endpoint for MyEndpointIn {
    fn info(&self) -> &EndpointInfo {
        &self.info
    }

    async fn wait_enabled(&mut self) {}
}
impl EndpointIn for MyEndpointIn {
    async fn write(&mut self, buf: &[u8]) -> Result<(), EndpointError> {
        if self.disabled.get() {
            return Err(EndpointError::Disabled);
        }
        self.messages.push(Vec::from(buf));
        Ok(())
    }
}
impl Default for MyEndpointIn {
    fn default() -> Self {
        Self {
            messages: MessageLog::default(),
            info: EndpointInfo {
                addr: EndpointAddress::from(0x81),
                ep_type: EndpointType::Interrupt,
                max_packet_size: 8,
                interval_ms: 1,
            },
            disabled: Rc::new(Cell::new(false)),
        }
    }
}

pub struct MyEndpointOut;
impl Endpoint for MyEndpointOut {
    fn info(&self) -> &EndpointInfo {
        unimplemented!()
    }

    async fn wait_enabled(&mut self) {}
}
impl EndpointOut for MyEndpointOut {
    async fn read(&mut self, _buf: &mut [u8]) -> Result<usize, EndpointError> {
        unimplemented!()
    }
}

pub struct MyBus;
impl Bus for MyBus {
    async fn enable(&mut self) {}

    async fn disable(&mut self) {}

    async fn poll(&mut self) -> embassy_usb::driver::Event {
        unimplemented!()
    }

    fn endpoint_set_enabled(
        &mut self,
        _ep_addr: embassy_usb::driver::EndpointAddress,
        _enabled: bool,
    ) {
        unimplemented!()
    }

    fn endpoint_set_stalled(
        &mut self,
        _ep_addr: embassy_usb::driver::EndpointAddress,
        _stalled: bool,
    ) {
        unimplemented!()
    }

    fn endpoint_is_stalled(&mut self, _ep_addr: embassy_usb::driver::EndpointAddress) -> bool {
        unimplemented!()
    }

    async fn remote_wakeup(&mut self) -> Result<(), embassy_usb::driver::Unsupported> {
        unimplemented!()
    }
}

pub struct MyControlPipe;
impl ControlPipe for MyControlPipe {
    fn max_packet_size(&self) -> usize {
        unimplemented!()
    }

    async fn setup(&mut self) -> [u8; 8] {
        unimplemented!()
    }

    async fn data_out(
        &mut self,
        _buf: &mut [u8],
        _first: bool,
        _last: bool,
    ) -> Result<usize, EndpointError> {
        unimplemented!()
    }

    async fn data_in(&mut self, _data: &[u8], _first: bool, _last: bool) -> Result<(), EndpointError> {
        unimplemented!()
    }

    async fn accept(&mut self) {
        unimplemented!()
    }

    async fn reject(&mut self) {
        unimplemented!()
    }

    async fn accept_set_address(&mut self, _addr: u8) {
        unimplemented!()
    }
}

/// Hands out [MyEndpointIn]s sharing one [MessageLog].
#[derive(Default)]
pub struct MyDriver {
    pub messages: MessageLog,
    next_in: u8,
}
impl Driver<'_> for MyDriver {
    type EndpointOut = MyEndpointOut;

    type EndpointIn = MyEndpointIn;

    type ControlPipe = MyControlPipe;

    type Bus = MyBus;

    fn alloc_endpoint_out(
        &mut self,
        _ep_type: EndpointType,
        _max_packet_size: u16,
        _interval_ms: u8,
    ) -> Result<Self::EndpointOut, embassy_usb::driver::EndpointAllocError> {
        Ok(MyEndpointOut)
    }

    fn alloc_endpoint_in(
        &mut self,
        ep_type: EndpointType,
        max_packet_size: u16,
        interval_ms: u8,
    ) -> Result<Self::EndpointIn, embassy_usb::driver::EndpointAllocError> {
        self.next_in += 1;
        Ok(MyEndpointIn {
            messages: self.messages.clone(),
            info: EndpointInfo {
                addr: EndpointAddress::from(0x80 | self.next_in),
                ep_type,
                max_packet_size,
                interval_ms,
            },
            disabled: Rc::new(Cell::new(false)),
        })
    }

    fn start(self, _control_max_packet_size: u16) -> (Self::Bus, Self::ControlPipe) {
        unimplemented!()
    }
}
