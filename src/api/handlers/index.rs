/// Plain-text banner for `GET /`.
pub async fn index_handler() -> &'static str {
    "Splitter running"
}
