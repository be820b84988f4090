fn main() {
    println!("cargo:rerun-if-env-changed=CANTERA_DIR");
    println!("cargo:rerun-if-env-changed=CANTERA_LINK_LIB");

    // Without the engine there is nothing to bind or link.
    #[cfg(feature = "cantera")]
    generate_bindings();
}

#[cfg(feature = "cantera")]
fn generate_bindings() {
    use std::{env, path::PathBuf};

    // Define the output directory where the bindings will be written.
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    // Install prefix of the Cantera library.
    let cantera_dir = PathBuf::from(
        env::var("CANTERA_DIR").expect("CANTERA_DIR environment variable not set."),
    );
    let lib_dir = cantera_dir.join("lib");
    let headers_dir = cantera_dir.join("include");
    let header_file = headers_dir.join("cantera").join("clib").join("ct.h");

    if !header_file.exists() {
        panic!(
            "C header file not found at {}. Ensure that Cantera was installed with the C library.",
            header_file.display()
        )
    }

    // ======================
    // Link Configuration
    // ======================
    let link_lib = env::var("CANTERA_LINK_LIB").unwrap_or_else(|_| "cantera_shared".to_string());

    println!("cargo:rustc-link-search=native={}", lib_dir.display());
    println!("cargo:rustc-link-lib=dylib={}", link_lib);
    println!("cargo:rerun-if-changed={}", header_file.display());

    // ======================
    // Bindgen Integration
    // ======================
    let bindings = bindgen::Builder::default()
        .header(header_file.to_str().unwrap())
        // Include the headers directory for include files
        .clang_arg(format!("-I{}", headers_dir.display()))
        .clang_arg(format!("-I{}", headers_dir.join("cantera").join("clib").display()))
        // Only the thermo and global entry points of the C library are needed.
        .allowlist_function("thermo_.*")
        .allowlist_function("ct_.*")
        .generate()
        .expect("Unable to generate bindings with bindgen.");

    // Write the bindings to the $OUT_DIR/bindings.rs file.
    let bindings_out_path = out_dir.join("bindings.rs");
    bindings
        .write_to_file(&bindings_out_path)
        .expect("Couldn't write bindings.");

    // Inform Cargo to include the bindings.rs file via environment variable.
    println!(
        "cargo:rustc-env=BINDINGS_PATH={}",
        bindings_out_path.display()
    );
}
