use anyhow::Result;

fn main() -> Result<()> {
    cluebox::cli::run()
}
