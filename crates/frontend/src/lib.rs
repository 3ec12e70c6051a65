pub mod shared;

/// Installs browser console logging and the panic hook. Call once from the
/// host application's entry point.
pub fn init_logging() {
    _ = console_log::init_with_level(log::Level::Debug);
    console_error_panic_hook::set_once();
}
