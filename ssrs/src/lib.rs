pub mod render;
pub mod shared;

pub mod prelude {
    pub use crate::render::prelude::*;
    pub use crate::shared::prelude::*;
}

/// Write user facing output. The line goes to tracing for the log file and to stdout
/// through the global stdout writer, so the call is async.
#[macro_export]
macro_rules! report_stdout {
    ($($arg:tt)*) => {
        tracing::info!(target="stdout", $($arg)*);
        writeln!($crate::prelude::STDOUT_WRITER.write().await, $($arg)*).ok()
    };
}
