use embassy_usb::{driver::Driver, Builder};
use locust_firmware::{
    hid,
    usb::{Configurator, State, KEYBOARD_REPORT_LEN},
};

pub type KeyboardHidWriter<'d, D> = hid::HidWriter<<D as Driver<'d>>::EndpointIn, KEYBOARD_REPORT_LEN>;

/// USB identity of a board.
pub struct ConfigBuilder {
    pub vendor_id: u16,
    pub product_id: u16,
    pub manufacturer: &'static str,
    pub product: &'static str,
    pub serial_number: &'static str,
    pub max_power: u16,
}
impl ConfigBuilder {
    pub fn usb_configurator<'d>(&self) -> Configurator<'d> {
        let mut conf = embassy_usb::Config::new(self.vendor_id, self.product_id);
        conf.manufacturer = Some(self.manufacturer);
        conf.product = Some(self.product);
        conf.serial_number = Some(self.serial_number);
        conf.max_power = self.max_power;
        Configurator::new(conf)
    }

    pub fn keyboard_iface<'d, D: Driver<'d>>(
        &self,
        usb_config: &Configurator<'d>,
        keyboard_state: &'d mut State<'d>,
        mut usb_builder: Builder<'d, D>,
    ) -> (KeyboardHidWriter<'d, D>, Builder<'d, D>) {
        let writer = usb_config.add_keyboard_iface(&mut usb_builder, keyboard_state);
        crate::info!("keyboard interface added");
        (writer, usb_builder)
    }
}

#[cfg(test)]
#[path = "usb_test.rs"]
mod test;
