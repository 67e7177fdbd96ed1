pub mod headless;
pub mod runtime;

pub use headless::HeadlessRuntime;
pub use runtime::{MediaRuntime, RuntimeStatus};

#[cfg(test)]
pub use runtime::MockMediaRuntime;
