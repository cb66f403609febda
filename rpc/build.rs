use std::io::{Error, ErrorKind, Result};

fn main() -> Result<()> {
    let protoc = protoc_bin_vendored::protoc_bin_path()
        .map_err(|e| Error::new(ErrorKind::NotFound, e.to_string()))?;

    let mut config = prost_build::Config::new();
    config.protoc_executable(protoc);

    tonic_build::configure().compile_protos_with_config(
        config,
        &["proto/todo.proto"],
        &["proto"],
    )?;
    println!("cargo:rerun-if-changed=proto/todo.proto");
    Ok(())
}
