use anyhow::Result;

fn main() -> Result<()> {
    uvs::cli::run()
}
