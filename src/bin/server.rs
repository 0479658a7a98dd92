#[tokio::main]
async fn main() {
    quiz_engine::start_server().await;
}
