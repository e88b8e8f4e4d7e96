//! Left half. Plugged into the host; polls the right half over I2C1.
#![no_std]
#![no_main]

// ---------------- User Config ------------------
// USB config
const VENDOR_ID: u16 = 0xfeed;
const PRODUCT_ID: u16 = 0x4c43;
const MANUFACTURER: &str = "Honey Locust";
const PRODUCT: &str = "Honey Locust";
const SERIAL_NUMBER: &str = "locust:0001";
const MAX_POWER: u16 = 100;

// Key switch configuration: columns are inputs, rows are outputs
macro_rules! config_pins {
    (peripherals: $p:ident) => {
        locust_builder::config_matrix_pins_rp!(peripherals: $p,
            input: [PIN_29, PIN_28, PIN_27, PIN_26, PIN_22, PIN_20],
            output: [PIN_4, PIN_5, PIN_6, PIN_7, PIN_8])
    };
}
// ----------- End of user config ----------------

locust_builder::rp_run_primary! {
    link: { i2c: I2C1, scl: PIN_3, sda: PIN_2 },
    leds: PIN_9
}
