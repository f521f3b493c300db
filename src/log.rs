//! Logging macros, forwarded to `defmt` when the `defmt` feature is enabled.
use cfg_if::cfg_if;

cfg_if! {
    if #[cfg(feature = "defmt")] {
        macro_rules! debug {
            ($($arg:tt)*) => {
                defmt::debug!($($arg)*)
            };
        }

        macro_rules! trace {
            ($($arg:tt)*) => {
                defmt::trace!($($arg)*)
            };
        }
    } else {
        macro_rules! debug {
            ($fmt:literal $(, $arg:expr)* $(,)?) => {{
                let _ = ($(&$arg,)*);
            }};
        }

        macro_rules! trace {
            ($fmt:literal $(, $arg:expr)* $(,)?) => {{
                let _ = ($(&$arg,)*);
            }};
        }
    }
}
