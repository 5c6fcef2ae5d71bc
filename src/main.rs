use std::io;

#[tokio::main]
async fn main() -> io::Result<()> {
    allmylinks::app::run().await
}
