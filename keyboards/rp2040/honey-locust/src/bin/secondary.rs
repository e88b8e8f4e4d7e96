//! Right half. Scans its matrix and answers polls from the left half on I2C1.
#![no_std]
#![no_main]

// ---------------- User Config ------------------
// Key switch configuration: columns are inputs, rows are outputs
macro_rules! config_pins {
    (peripherals: $p:ident) => {
        locust_builder::config_matrix_pins_rp!(peripherals: $p,
            input: [PIN_29, PIN_28, PIN_27, PIN_26, PIN_22, PIN_20, PIN_23, PIN_21],
            output: [PIN_4, PIN_5, PIN_6, PIN_7, PIN_8])
    };
}
// ----------- End of user config ----------------

locust_builder::rp_run_secondary! {
    link: { i2c: I2C1, irq: I2C1_IRQ, scl: PIN_3, sda: PIN_2 },
    leds: PIN_9
}
