macro_rules! printinfo {
    ($($tokens: tt)*) => {
        println!("cargo:warning=\r\x1b[36;1m   {}", format!($($tokens)*))
    }
}

fn main() {
    config_csdp_link();
}

fn config_csdp_link() {
    // CSDP is only linked when the engine bindings are compiled in.
    // SDPFREE_CSDP_LIB_DIR can point at a non-standard install prefix.
    println!("cargo:rerun-if-env-changed=SDPFREE_CSDP_LIB_DIR");

    if cfg!(not(feature = "csdp")) {
        return;
    }

    if let Ok(dir) = std::env::var("SDPFREE_CSDP_LIB_DIR") {
        println!("cargo:rustc-link-search=native={}", dir);
        printinfo!("CSDP: searching for libsdp in {}", dir);
    }
    println!("cargo:rustc-link-lib=sdp");

    // CSDP itself depends on LAPACK / BLAS and libm
    println!("cargo:rustc-link-lib=lapack");
    println!("cargo:rustc-link-lib=blas");
    println!("cargo:rustc-link-lib=m");
}
