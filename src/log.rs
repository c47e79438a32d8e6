//! Feature-gated logging macros.
//!
//! Forward to `defmt` and/or the `log` facade. With neither feature enabled the
//! arguments are still evaluated and then discarded.

macro_rules! debug {
    ( $($arg:tt)+ ) => {{
        #[cfg(feature = "defmt")]
        defmt::debug!($($arg)+);
        #[cfg(feature = "log")]
        ::log::debug!($($arg)+);
        #[cfg(not(any(feature = "defmt", feature = "log")))]
        let _ = ($($arg)+,);
    }};
}

macro_rules! info {
    ( $($arg:tt)+ ) => {{
        #[cfg(feature = "defmt")]
        defmt::info!($($arg)+);
        #[cfg(feature = "log")]
        ::log::info!($($arg)+);
        #[cfg(not(any(feature = "defmt", feature = "log")))]
        let _ = ($($arg)+,);
    }};
}

// Named with a suffix; a plain `warn` re-export clashes with the `#[warn]` attribute.
macro_rules! warn_ {
    ( $($arg:tt)+ ) => {{
        #[cfg(feature = "defmt")]
        defmt::warn!($($arg)+);
        #[cfg(feature = "log")]
        ::log::warn!($($arg)+);
        #[cfg(not(any(feature = "defmt", feature = "log")))]
        let _ = ($($arg)+,);
    }};
}

pub(crate) use {debug, info, warn_ as warn};
