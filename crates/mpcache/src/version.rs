//! Version information.

/// Get the version string.
#[must_use]
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

/// Version string including the native library versions in use.
#[must_use]
pub fn full_version() -> String {
    format!(
        "mpcache {} (gmp {}, mpfr {}, mpc {})",
        version(),
        rug::integer::gmp_version(),
        rug::float::mpfr_version(),
        rug::complex::mpc_version()
    )
}
