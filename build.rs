use std::path::PathBuf;

fn main() {
    // Tell Cargo to re-run this build script if the bundled defaults change
    println!("cargo:rerun-if-changed=defaults/");

    // include_dir! requires the directory to exist at compile time
    let defaults_path = PathBuf::from("defaults");
    if !defaults_path.exists() {
        std::fs::create_dir_all(&defaults_path)
            .expect("Failed to create defaults directory");
    }
}
