#[tokio::main]
async fn main() {
    skinquiz::start_server().await;
}
