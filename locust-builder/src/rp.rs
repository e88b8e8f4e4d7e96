pub use embassy_rp::{bind_interrupts, gpio, i2c, i2c_slave, init, peripherals, usb};

use embassy_rp::gpio::Output;
use embassy_rp::i2c_slave::{Command, I2cSlave};
use locust_firmware::{globals::ROWS, link::ScanShare, warn};
use smart_leds::{SmartLedsWrite, RGB8};

/// Bus target config answering on `address`.
pub fn target_config(address: u8) -> i2c_slave::Config {
    let mut config = i2c_slave::Config::default();
    config.addr = address as u16;
    config
}

/// Answer every read from the primary with the last published scan.
pub async fn respond_polls<T: i2c::Instance>(mut target: I2cSlave<'_, T>, share: &ScanShare<ROWS>) -> ! {
    let mut cmd = [0u8; 8];
    loop {
        match target.listen(&mut cmd).await {
            Ok(Command::Read) | Ok(Command::WriteRead(_)) => {
                if let Err(err) = target.respond_and_fill(&share.wire_payload(), 0x00).await {
                    warn!("poll response failed: {:?}", err);
                }
            }
            Ok(Command::Write(_)) | Ok(Command::GeneralCall(_)) => {}
            Err(err) => warn!("link bus error: {:?}", err),
        }
    }
}

// Cycle counts at the default 125 MHz system clock. `asm::delay` only bounds the wait from
// below, so the bit loop runs from RAM to keep flash cache misses out of the pulses.
const T0H: u32 = 40;
const T0L: u32 = 100;
const T1H: u32 = 90;
const T1L: u32 = 50;
const LATCH: u32 = 125 * 300;

/// WS2812 chain driven by toggling a plain output pin. Pixels are sent GRB.
///
/// Timing assumes `clk_sys` at 125 MHz and no interrupts during a frame; each high pulse must
/// land within 150 ns of its nominal 0.4 or 0.8 µs.
pub struct GpioWs2812<'d> {
    pin: Output<'d>,
}

impl<'d> GpioWs2812<'d> {
    pub fn new(mut pin: Output<'d>) -> Self {
        pin.set_low();
        Self { pin }
    }

    #[inline(never)]
    #[link_section = ".data.ram_func"]
    fn write_byte(&mut self, byte: u8) {
        for bit in (0..8).rev() {
            let (high, low) = if byte & (1 << bit) != 0 {
                (T1H, T1L)
            } else {
                (T0H, T0L)
            };
            self.pin.set_high();
            cortex_m::asm::delay(high);
            self.pin.set_low();
            cortex_m::asm::delay(low);
        }
    }
}

impl SmartLedsWrite for GpioWs2812<'_> {
    type Error = core::convert::Infallible;
    type Color = RGB8;

    fn write<T, I>(&mut self, iterator: T) -> Result<(), Self::Error>
    where
        T: IntoIterator<Item = I>,
        I: Into<Self::Color>,
    {
        critical_section::with(|_| {
            for color in iterator {
                let color: RGB8 = color.into();
                self.write_byte(color.g);
                self.write_byte(color.r);
                self.write_byte(color.b);
            }
        });
        cortex_m::asm::delay(LATCH);
        Ok(())
    }
}

/// Column inputs pulled up and row outputs idle high, in the order given.
#[macro_export]
macro_rules! config_matrix_pins_rp {
    (peripherals: $p:ident, input: [$($in_pin:ident),+], output: [$($out_pin:ident),+]) => {{
        let input_pins = [$($crate::rp::gpio::Input::new($p.$in_pin, $crate::rp::gpio::Pull::Up)),+];
        let output_pins =
            [$($crate::rp::gpio::Output::new($p.$out_pin, $crate::rp::gpio::Level::High)),+];
        (input_pins, output_pins)
    }};
}

/// Build and run the primary half: the one plugged into the host.
///
/// Expects `VENDOR_ID`, `PRODUCT_ID`, `MANUFACTURER`, `PRODUCT`, `SERIAL_NUMBER`, `MAX_POWER` and
/// a `config_pins!` macro in scope.
///
/// # Example `src/bin/primary.rs`
///
/// ```rust
/// #![no_std]
/// #![no_main]
///
/// locust_builder::rp_run_primary! {
///     link: { i2c: I2C1, scl: PIN_3, sda: PIN_2 },
///     leds: PIN_9
/// }
/// ```
#[macro_export]
macro_rules! rp_run_primary {
    (link: { i2c: $i2c:ident, scl: $scl:ident, sda: $sda:ident }, leds: $led:ident) => {
        use $crate::rp::{self, bind_interrupts, i2c, usb::{Driver, InterruptHandler}};
        use rp::gpio::{Input, Level, Output};
        use rp::peripherals::USB;
        use $crate::{
            globals,
            indicator::{self, LedStrip},
            key_reporter::Reporter,
            key_scanner::{KeyScanner, ScanTiming},
            key_state::{KeyStateEngine, Typematic},
            link::RemoteLink,
            primary::Primary,
            sink::KeyEventChannel,
            usb, Delay, NoopRawMutex, StaticCell, UsbBuffers, UsbConfigurator, UsbState,
            EVENT_BUFFER_SIZE,
        };

        type Events = KeyEventChannel<NoopRawMutex, EVENT_BUFFER_SIZE>;
        type LinkBus = i2c::I2c<'static, rp::peripherals::$i2c, i2c::Blocking>;
        type PrimaryHalf = Primary<'static, LinkBus, Input<'static>, Output<'static>, Delay, Delay>;
        type UsbDriver = Driver<'static, USB>;

        static EVENTS: StaticCell<Events> = StaticCell::new();
        static USB_BUFFERS: StaticCell<UsbBuffers> = StaticCell::new();
        static USB_CONFIG: StaticCell<UsbConfigurator> = StaticCell::new();
        static KEYBOARD_STATE: StaticCell<UsbState> = StaticCell::new();

        const CONFIG_BUILDER: usb::ConfigBuilder = usb::ConfigBuilder {
            vendor_id: VENDOR_ID,
            product_id: PRODUCT_ID,
            manufacturer: MANUFACTURER,
            product: PRODUCT,
            serial_number: SERIAL_NUMBER,
            max_power: MAX_POWER,
        };

        bind_interrupts!(struct Irqs {
            USBCTRL_IRQ => InterruptHandler<USB>;
        });

        fn reset() {
            cortex_m::peripheral::SCB::sys_reset()
        }

        #[embassy_executor::task]
        async fn scan_loop(primary: PrimaryHalf, events: &'static Events) {
            primary.run(events).await
        }

        #[embassy_executor::task]
        async fn hid_reporter(
            events: &'static Events,
            hid_writer: usb::KeyboardHidWriter<'static, UsbDriver>,
        ) {
            Reporter::new(hid_writer).run(events).await
        }

        #[embassy_executor::main]
        async fn main(spawner: embassy_executor::Spawner) -> ! {
            let p = rp::init(Default::default());
            let (input_pins, output_pins) = config_pins!(peripherals: p);

            let mut leds = LedStrip::<_, { globals::PRIMARY_PIXELS }>::new(
                rp::GpioWs2812::new(Output::new(p.$led, Level::Low)),
            );
            indicator::boot_indicator(&mut leds);

            let bus = i2c::I2c::new_blocking(p.$i2c, p.$scl, p.$sda, i2c::Config::default());
            let scanner = KeyScanner::new(output_pins, input_pins, Delay, ScanTiming::PRIMARY);
            let primary = Primary::new(
                RemoteLink::new(bus),
                scanner,
                KeyStateEngine::new(Typematic::default()),
                Delay,
            );

            let events: &'static Events = EVENTS.init(Events::new());

            let keyboard_state: &'static mut UsbState<'static> = KEYBOARD_STATE.init(UsbState::new());
            let driver = Driver::new(p.USB, Irqs);

            let usb_buffers: &'static mut UsbBuffers = USB_BUFFERS.init(UsbBuffers::default());
            let usb_config: &'static mut UsbConfigurator =
                USB_CONFIG.init(CONFIG_BUILDER.usb_configurator());

            let usb_builder = usb_config.usb_builder(driver, usb_buffers).unwrap();
            let (hid_writer, usb_builder) =
                CONFIG_BUILDER.keyboard_iface(usb_config, keyboard_state, usb_builder);

            let mut usb = usb_builder.build();

            $crate::firmware_functions::handle_reset(Some(&reset));

            spawner.spawn(scan_loop(primary, events)).unwrap();
            spawner.spawn(hid_reporter(events, hid_writer)).unwrap();

            usb.run().await
        }
    };
}

/// Build and run the secondary half: scans its matrix and answers polls on the link bus.
///
/// Expects a `config_pins!` macro in scope.
#[macro_export]
macro_rules! rp_run_secondary {
    (
        link: { i2c: $i2c:ident, irq: $irq:ident, scl: $scl:ident, sda: $sda:ident },
        leds: $led:ident
    ) => {
        use $crate::rp::{self, bind_interrupts, i2c, i2c_slave::I2cSlave};
        use rp::gpio::{Level, Output};
        use $crate::{
            globals,
            indicator::{self, LedStrip},
            key_scanner::{KeyScanner, ScanTiming},
            link::ScanShare,
            secondary::Secondary,
            Delay,
        };

        type LinkTarget = I2cSlave<'static, rp::peripherals::$i2c>;

        static SHARE: ScanShare<{ globals::ROWS }> = ScanShare::new();

        bind_interrupts!(struct Irqs {
            $irq => i2c::InterruptHandler<rp::peripherals::$i2c>;
        });

        fn reset() {
            cortex_m::peripheral::SCB::sys_reset()
        }

        #[embassy_executor::task]
        async fn responder(target: LinkTarget) {
            rp::respond_polls(target, &SHARE).await
        }

        #[embassy_executor::main]
        async fn main(spawner: embassy_executor::Spawner) -> ! {
            let p = rp::init(Default::default());
            let (input_pins, output_pins) = config_pins!(peripherals: p);

            let mut leds = LedStrip::<_, { globals::SECONDARY_PIXELS }>::new(
                rp::GpioWs2812::new(Output::new(p.$led, Level::Low)),
            );
            indicator::boot_indicator(&mut leds);

            let target = I2cSlave::new(
                p.$i2c,
                p.$scl,
                p.$sda,
                Irqs,
                rp::target_config(globals::SECONDARY_ADDRESS),
            );
            let scanner = KeyScanner::new(output_pins, input_pins, Delay, ScanTiming::SECONDARY);

            $crate::firmware_functions::handle_reset(Some(&reset));

            spawner.spawn(responder(target)).unwrap();

            Secondary::new(scanner, &SHARE, Delay).run().await
        }
    };
}
