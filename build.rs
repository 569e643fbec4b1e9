fn main() {
    // Only wire up the N-API linker flags when the bridge is built.
    if std::env::var_os("CARGO_FEATURE_NAPI").is_some() {
        napi_build::setup();
    }
}
