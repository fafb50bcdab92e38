//! Build script for pkmn-engine
//!
//! Links the prebuilt libpkmn (Showdown-compatible build) when the `native`
//! feature is enabled. Without it the crate is pure Rust.

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed=PKMN_LIB_DIR");

    if std::env::var_os("CARGO_FEATURE_NATIVE").is_none() {
        return;
    }

    match std::env::var("PKMN_LIB_DIR") {
        Ok(dir) => println!("cargo:rustc-link-search=native={dir}"),
        Err(_) => println!(
            "cargo:warning=PKMN_LIB_DIR is not set, relying on the default linker search path"
        ),
    }
    println!("cargo:rustc-link-lib=pkmn-showdown");
}
