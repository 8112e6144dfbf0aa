use std::env;

fn main() {
    println!("cargo:rerun-if-changed=build.rs");

    // Host builds only compile the library and its tests
    let target = env::var("TARGET").unwrap_or_default();
    if !target.contains("avr") {
        return;
    }

    // Configure for ATmega48P
    println!("cargo:rustc-link-arg=-mmcu=atmega48p");

    // Pass CPU frequency for timing calculations
    println!("cargo:rustc-env=MCU_FREQ_HZ=4000000");

    // Debug builds get the serial trace console
    if env::var("PROFILE").map(|p| p == "debug").unwrap_or(false) {
        println!("cargo:rustc-cfg=feature=\"debug\"");
    }

    println!("cargo:warning=Building for ATmega48P at 4MHz");
}
