use ovhapi_core::{Context, OsEnv};
use ovhapi_file_read_tokio::TokioFileRead;
use std::env;

#[tokio::main]
async fn main() -> ovhapi_core::Result<()> {
    let ctx = Context::new().with_file_read(TokioFileRead).with_env(OsEnv);

    let path = env::args()
        .nth(1)
        .unwrap_or_else(|| "~/.ovh.conf".to_string());
    let Some(path) = ctx.expand_home_dir(&path) else {
        eprintln!("cannot expand {path}: home directory not found");
        return Ok(());
    };

    match ctx.file_read_as_string(&path).await {
        Ok(content) => {
            println!("Read {} bytes from {path}", content.len());
            for line in content.lines().filter(|l| l.trim_start().starts_with('[')) {
                println!("  section {}", line.trim());
            }
        }
        Err(e) => eprintln!("Failed to read {path}: {e}"),
    }

    Ok(())
}
