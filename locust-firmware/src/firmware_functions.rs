//! MCU hooks registered by the board at start up.

use core::cell::Cell;

use embassy_sync::blocking_mutex::CriticalSectionMutex;

pub type ResetFn = &'static (dyn Fn() + Sync);

static RESET: CriticalSectionMutex<Cell<Option<ResetFn>>> =
    CriticalSectionMutex::new(Cell::new(None));

/// Run the registered reset, at most once.
pub fn reset() {
    if let Some(f) = RESET.lock(|r| r.take()) {
        f();
    }
}

/// Register a function that will reset the MCU when [reset] is called.
///
/// The scan loop has no supervisor; with feature `reset-on-panic` the panic handler calls
/// [reset] so the board restarts scanning.
///
/// ```
/// use locust_firmware::firmware_functions::handle_reset;
/// # pub mod cortex_m { pub mod peripheral {pub mod SCB {pub fn sys_reset() {}}}}
///
/// fn myreset() {
///     cortex_m::peripheral::SCB::sys_reset();
/// }
///
/// handle_reset(Some(&myreset));
/// ```
pub fn handle_reset(value: Option<ResetFn>) {
    RESET.lock(|r| r.set(value));
}

#[cfg(test)]
pub fn has_reset() -> bool {
    RESET.lock(|r| {
        let f = r.take();
        let present = f.is_some();
        r.set(f);
        present
    })
}

#[cfg(all(not(test), feature = "reset-on-panic", target_os = "none"))]
mod panic {
    #[panic_handler]
    fn panic(_info: &core::panic::PanicInfo) -> ! {
        crate::error!("panic, resetting");
        super::reset();

        loop {}
    }
}

#[cfg(test)]
#[path = "firmware_functions_test.rs"]
mod test;
