use rustc_version::{version, version_meta, Channel};

// benches in `prox::sorted_l1` need `#![feature(test)]`
fn main() {
    let ver = version().unwrap();
    assert!(ver.major >= 1);

    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rustc-check-cfg=cfg(rustc_nightly)");
    if let Channel::Nightly = version_meta().unwrap().channel {
        println!("cargo:rustc-cfg=rustc_nightly");
    }
}
