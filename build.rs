use std::env;

fn main() {
    // Load .env during build so tunables can be embedded into the binary and
    // picked up through option_env!() at runtime.
    if let Err(e) = dotenvy::dotenv() {
        println!(
            "cargo:warning=No .env file loaded: {}. Using system environment variables.",
            e
        );
    }

    for key in ["READBAND_TEST_MINUTES", "READBAND_EXPORT_DIR"] {
        if let Ok(value) = env::var(key) {
            println!("cargo:rustc-env={}={}", key, value);
        }
    }

    tauri_build::build()
}
