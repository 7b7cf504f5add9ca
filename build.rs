//! Build script compiling the native C dispatch variants.
//!
//! The C variants are only enabled for GCC, MSVC or Apple Clang. Vanilla Clang
//! shares its backend with rustc, which makes the comparison meaningless.

use std::env;

fn detect_compiler(compiler: &cc::Tool) -> Option<&'static str> {
    if compiler.is_like_clang() {
        let target_os = env::var("CARGO_CFG_TARGET_OS").unwrap_or_default();
        if target_os == "macos" {
            Some("Apple Clang")
        } else {
            println!("cargo:warning=Vanilla Clang detected. C dispatch variants disabled (requires GCC, MSVC, or Apple Clang).");
            None
        }
    } else if compiler.is_like_gnu() {
        Some("GCC")
    } else if compiler.is_like_msvc() {
        Some("MSVC")
    } else {
        println!("cargo:warning=C compiler is not compatible (needs GCC, Clang, or MSVC). C dispatch variants disabled.");
        None
    }
}

fn main() {
    println!("cargo:rustc-check-cfg=cfg(c_implementation_active)");
    println!("cargo:rerun-if-changed=build.rs");

    let probe = cc::Build::new();
    let compiler = probe.get_compiler();
    let Some(compiler_name) = detect_compiler(&compiler) else {
        return;
    };

    let rustflags = env::var("RUSTFLAGS").unwrap_or_default();
    let encoded_rustflags = env::var("CARGO_ENCODED_RUSTFLAGS").unwrap_or_default();
    let is_rust_native =
        rustflags.contains("target-cpu=native") || encoded_rustflags.contains("target-cpu=native");

    let mut build = cc::Build::new();

    let c_files = match glob::glob("src/**/*.c") {
        Ok(paths) => paths.filter_map(Result::ok).collect::<Vec<_>>(),
        Err(e) => {
            println!("cargo:warning=Invalid glob pattern for C sources: {}", e);
            return;
        }
    };
    if c_files.is_empty() {
        return;
    }

    for file in &c_files {
        println!("cargo:rerun-if-changed={}", file.display());
        build.file(file);
    }

    build.opt_level(3);

    if is_rust_native {
        build.flag_if_supported("-march=native");
    }

    build.compile("dispatch_c");

    println!("cargo:rustc-cfg=c_implementation_active");
    println!("cargo:rustc-env=C_COMPILER_NAME={}", compiler_name);
}
