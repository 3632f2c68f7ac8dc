use std::path::PathBuf;

use conduit_gen::output::{generate_service_code, load_service, module_file_name, write_atomic};

const SCHEMA: &str = "api/todo.toml";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("cargo:rerun-if-changed={SCHEMA}");

    let service = load_service(SCHEMA)?;
    let code = generate_service_code(&service)?;

    let out_dir = PathBuf::from(std::env::var("OUT_DIR")?);
    write_atomic(&out_dir.join(module_file_name(&service)), &code)?;
    Ok(())
}
