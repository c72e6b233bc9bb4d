//! Console logging. Browser builds write to the devtools console; native
//! builds (tests) write to stderr.

const PREFIX: &str = "BMC Clicker: ";

#[cfg(target_arch = "wasm32")]
pub fn log(msg: &str) {
    web_sys::console::log_1(&format!("{PREFIX}{msg}").into());
}

#[cfg(target_arch = "wasm32")]
pub fn warn(msg: &str) {
    web_sys::console::warn_1(&format!("{PREFIX}{msg}").into());
}

#[cfg(not(target_arch = "wasm32"))]
pub fn log(msg: &str) {
    eprintln!("{PREFIX}{msg}");
}

#[cfg(not(target_arch = "wasm32"))]
pub fn warn(msg: &str) {
    eprintln!("{PREFIX}warning: {msg}");
}
